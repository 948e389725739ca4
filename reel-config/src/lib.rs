//! Configuration loading for the Reel short feed.
//!
//! Resolves a [`FeedConfig`](reel_core::FeedConfig) from the environment,
//! a config file or defaults, and checks it against the guard rails the
//! controller relies on before a feed is mounted.
#![allow(missing_docs)]

pub mod feed;
pub mod validation;

pub use feed::{
    FeedConfigLoad, FeedConfigSource, load_from_env, load_from_sources,
    load_validated,
};
pub use validation::{
    ConfigGuardRailError, ConfigWarning, ConfigWarnings, apply_guard_rails,
};
