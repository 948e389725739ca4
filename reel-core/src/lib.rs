//! # Reel Core
//!
//! Controller for the vertical short-video feed: one entry on screen at a
//! time, looping navigation by swipe, wheel or keyboard, a single playing
//! media element, global mute, address sync and per-entry overlays.
//!
//! ## Architecture
//!
//! - [`feed`]: the [`ShortFeed`] controller and the pieces it composes
//!   (sequencer, playback coordinator, address sync, overlay state), plus an
//!   async mailbox [`feed::driver`]
//! - [`comments`]: threaded comment views with sort orders
//! - [`config`]: [`FeedConfig`] tunables
//! - [`fixtures`]: a seeded in-memory repository
//! - [`format`]: compact counter labels
//!
//! All side effects go through the ports in `reel-contracts`, so the
//! controller runs headless against fakes.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use reel_contracts::prelude::*;
//! use reel_core::{FeedConfig, FeedMessage, FeedPorts, ShortFeed, feed::Direction};
//! use reel_core::fixtures::FixtureRepository;
//!
//! fn mount(
//!     navigation: Box<dyn NavigationPort>,
//!     playback: Box<dyn PlaybackFactory>,
//! ) -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = Arc::new(FixtureRepository::seeded(42)?);
//!     let ports = FeedPorts {
//!         navigation,
//!         playback,
//!         users: repo.clone(),
//!         comments: repo.clone(),
//!         observer: Box::new(NoopObserver),
//!     };
//!     let mut feed =
//!         ShortFeed::from_repository(repo.as_ref(), None, ports, FeedConfig::default())?;
//!     feed.update(FeedMessage::Advance(Direction::Next))?;
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

/// Threaded comment views
pub mod comments;

/// Feed tunables
pub mod config;

/// Error types for feed operations
pub mod error;

/// Short-feed controller and its components
pub mod feed;

/// Seeded in-memory repository
pub mod fixtures;

/// Counter label formatting
pub mod format;

pub use comments::{CommentNode, CommentSort, CommentThread};
pub use config::FeedConfig;
pub use error::{FeedError, Result};
pub use feed::{FeedEvent, FeedMessage, FeedPorts, FeedView, ShortFeed};
pub use format::format_count;
