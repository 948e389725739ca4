use crate::chrono::{DateTime, Utc};
use crate::ids::{EntryId, UploaderId};

/// Whether an entry belongs to the vertical short feed or the long-form grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum VideoKind {
    #[default]
    Short,
    Long,
}

/// Display-only engagement counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Counters {
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
}

/// A single playable video handed to the feed. Read-only to the controller.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VideoEntry {
    pub id: EntryId,
    pub kind: VideoKind,
    pub title: String,
    pub description: String,
    pub uploader_id: UploaderId,
    /// Opaque source handed to the playback element.
    pub media_url: String,
    /// Image shown while the media is paused, loading or blocked.
    pub poster_url: String,
    pub counters: Counters,
    pub country: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub premium: bool,
}

impl VideoEntry {
    /// Minimal entry with empty text fields; fill the rest with the `with_*`
    /// setters.
    pub fn new(id: EntryId, kind: VideoKind, uploader_id: UploaderId) -> Self {
        Self {
            id,
            kind,
            title: String::new(),
            description: String::new(),
            uploader_id,
            media_url: String::new(),
            poster_url: String::new(),
            counters: Counters::default(),
            country: String::new(),
            tags: Vec::new(),
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            premium: false,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_media(
        mut self,
        media_url: impl Into<String>,
        poster_url: impl Into<String>,
    ) -> Self {
        self.media_url = media_url.into();
        self.poster_url = poster_url.into();
        self
    }

    pub fn with_counters(mut self, counters: Counters) -> Self {
        self.counters = counters;
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn is_short(&self) -> bool {
        self.kind == VideoKind::Short
    }
}
