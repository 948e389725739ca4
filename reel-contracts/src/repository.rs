use reel_model::{Comment, EntryId, Uploader, VideoEntry};

/// Source of feed entries, injected at construction time.
///
/// Implementations decide where entries come from (fixtures, an API client,
/// a cache). The feed only reads from it while mounting.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait FeedRepository: Send + Sync {
    /// All entries in display order.
    fn entries(&self) -> Vec<VideoEntry>;

    /// Entries that belong in the vertical short feed, in display order.
    fn short_entries(&self) -> Vec<VideoEntry> {
        self.entries().into_iter().filter(|e| e.is_short()).collect()
    }

    /// Look up a single entry by id.
    fn entry(&self, id: &EntryId) -> Option<VideoEntry> {
        self.entries().into_iter().find(|e| &e.id == id)
    }
}

/// Resolves the uploader shown next to an entry. Display only.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait UserLookup: Send + Sync {
    fn uploader(&self, entry_id: &EntryId) -> Option<Uploader>;
}

/// Hands over the flat comment list for an entry. Ordering and threading are
/// the caller's job.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait CommentsProvider: Send + Sync {
    fn comments(&self, entry_id: &EntryId) -> Vec<Comment>;
}
