//! The vertical short-video feed.
//!
//! [`ShortFeed`] is the entry point. The submodules are usable on their own
//! and are exposed for hosts that want to compose them differently.

pub mod controller;
pub mod driver;
pub mod gesture;
pub mod messages;
pub mod overlay;
pub mod playback;
pub mod sequencer;
pub mod url_sync;
pub mod view;

#[cfg(test)]
pub(crate) mod test_support;

pub use controller::{FeedPorts, ShortFeed};
pub use driver::DriverOutput;
pub use gesture::{SwipeOutcome, SwipeTracker, WheelDebouncer};
pub use messages::{Direction, FeedEvent, FeedMessage};
pub use overlay::OverlayState;
pub use playback::{HandleState, PlaybackCoordinator};
pub use sequencer::{Sequencer, Transition};
pub use url_sync::UrlSynchronizer;
pub use view::{ActiveView, CounterLabels, FeedView};
