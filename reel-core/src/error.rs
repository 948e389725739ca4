use reel_model::EntryId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    /// `go_to` / deep link named an id that is not in the feed. The caller is
    /// expected to redirect; the feed itself stays where it is.
    #[error("Entry not found: {0}")]
    NotFound(EntryId),

    #[error("Duplicate entry id in feed: {0}")]
    DuplicateEntry(EntryId),
}

pub type Result<T> = std::result::Result<T, FeedError>;
