//! Trait surfaces the feed controller depends on.
//!
//! Everything with a side effect outside the controller (history, media
//! elements, input listeners, data access) sits behind one of these traits so
//! the controller can run against fakes.
#![allow(missing_docs)]

pub mod gesture;
pub mod navigation;
pub mod observer;
pub mod playback;
pub mod repository;

/// Frequently used traits and value types for controller and host crates.
pub mod prelude {
    pub use super::gesture::{
        GestureSource, InputEvent, InputSink, ListenerGuard, NavKey,
    };
    pub use super::navigation::NavigationPort;
    pub use super::observer::{FeedObserver, NoopObserver};
    pub use super::playback::{
        PlayOutcome, PlayTicket, PlaybackError, PlaybackFactory, PlaybackHandle,
    };
    pub use super::repository::{CommentsProvider, FeedRepository, UserLookup};
}

#[cfg(any(test, feature = "mock"))]
pub mod mocks {
    //! Generated mocks for every port.
    pub use super::gesture::MockGestureSource;
    pub use super::navigation::MockNavigationPort;
    pub use super::observer::MockFeedObserver;
    pub use super::playback::{MockPlaybackFactory, MockPlaybackHandle};
    pub use super::repository::{
        MockCommentsProvider, MockFeedRepository, MockUserLookup,
    };
}
