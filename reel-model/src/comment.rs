use crate::chrono::{DateTime, Utc};
use crate::ids::{CommentId, EntryId, UploaderId};

/// A flat comment record. Threads are assembled from `parent_id` links.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Comment {
    pub id: CommentId,
    pub entry_id: EntryId,
    pub author_id: UploaderId,
    pub text: String,
    pub parent_id: Option<CommentId>,
    pub upvotes: u32,
    pub downvotes: u32,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Net vote score; can be negative.
    pub fn score(&self) -> i64 {
        i64::from(self.upvotes) - i64::from(self.downvotes)
    }
}
