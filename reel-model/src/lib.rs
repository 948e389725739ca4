//! Core data model definitions shared across Reel crates.
#![allow(missing_docs)]

pub use ::chrono;

pub mod comment;
pub mod entry;
pub mod error;
pub mod ids;
pub mod prelude;
pub mod uploader;

// Intentionally curated re-exports for downstream consumers.
pub use comment::Comment;
pub use entry::{Counters, VideoEntry, VideoKind};
pub use error::{ModelError, Result as ModelResult};
pub use ids::{CommentId, EntryId, UploaderId};
pub use uploader::Uploader;
