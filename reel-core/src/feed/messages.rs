use reel_contracts::gesture::InputEvent;
use reel_contracts::playback::{PlayOutcome, PlayTicket};
use reel_model::EntryId;

use crate::comments::CommentSort;

/// Direction of travel through the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Next,
    Previous,
}

impl Direction {
    pub fn delta(self) -> isize {
        match self {
            Direction::Next => 1,
            Direction::Previous => -1,
        }
    }
}

/// Everything that can happen to a mounted feed.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedMessage {
    // Raw container input (wheel, touch, keys)
    Input(InputEvent),

    // Programmatic navigation
    Advance(Direction),
    GoTo(EntryId),

    // Playback
    ToggleMute,
    PlaybackSettled {
        ticket: PlayTicket,
        outcome: PlayOutcome,
    },

    // Overlay
    ExpandDescription,
    ToggleDescription,
    OpenComments,
    CloseComments,
    SortComments(CommentSort),
}

/// What changed as the result of a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedEvent {
    IndexChanged { index: usize, entry_id: EntryId },
    MuteChanged(bool),
    /// A drag ended below the swipe threshold; the renderer should animate
    /// the entry back into place.
    SnapBack,
}
