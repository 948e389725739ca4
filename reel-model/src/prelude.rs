//! Feed-facing snapshot of the model surface.
//! Prefer importing from this module in controller and presentation code.

pub use super::comment::Comment;
pub use super::entry::{Counters, VideoEntry, VideoKind};
pub use super::ids::{CommentId, EntryId, UploaderId};
pub use super::uploader::Uploader;
