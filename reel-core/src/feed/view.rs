//! Render-ready snapshot of the feed.

use reel_model::{Uploader, VideoEntry};

use crate::comments::CommentThread;
use crate::format::format_count;

#[derive(Debug, Clone, PartialEq)]
pub enum FeedView {
    /// No entries; render the "no content" placeholder.
    Empty,
    Active(Box<ActiveView>),
}

impl FeedView {
    pub fn is_empty(&self) -> bool {
        matches!(self, FeedView::Empty)
    }

    pub fn active(&self) -> Option<&ActiveView> {
        match self {
            FeedView::Empty => None,
            FeedView::Active(view) => Some(view),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterLabels {
    pub likes: String,
    pub comments: String,
    pub shares: String,
}

impl CounterLabels {
    pub fn for_entry(entry: &VideoEntry) -> Self {
        Self {
            likes: format_count(entry.counters.likes),
            comments: format_count(entry.counters.comments),
            shares: format_count(entry.counters.shares),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActiveView {
    pub index: usize,
    pub total: usize,
    pub entry: VideoEntry,
    pub uploader: Option<Uploader>,
    pub counters: CounterLabels,
    pub muted: bool,
    pub description_expanded: bool,
    /// The "...more" affordance under a collapsed description.
    pub show_more: bool,
    /// Playback was refused; show the poster instead of the video surface.
    pub poster_visible: bool,
    /// Present while the comments panel is open.
    pub comments: Option<CommentThread>,
}
