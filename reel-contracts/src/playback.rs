use reel_model::VideoEntry;
use std::fmt;

/// Token identifying one `play` command.
///
/// Hosts whose playback start is asynchronous report the result back with the
/// ticket they were handed; results carrying an outdated ticket are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlayTicket(u64);

impl PlayTicket {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for PlayTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "play#{}", self.0)
    }
}

/// Reasons a media element refused to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    /// The runtime's autoplay policy rejected the start.
    AutoplayBlocked,
    /// The source could not be decoded or fetched.
    Source(String),
    /// Anything else the backend reports.
    Backend(String),
}

impl fmt::Display for PlaybackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackError::AutoplayBlocked => {
                write!(f, "playback blocked by autoplay policy")
            }
            PlaybackError::Source(msg) => write!(f, "media source error: {}", msg),
            PlaybackError::Backend(msg) => write!(f, "playback backend error: {}", msg),
        }
    }
}

impl std::error::Error for PlaybackError {}

/// Asynchronous result of a `play` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayOutcome {
    Playing,
    Rejected(PlaybackError),
}

/// Command surface of one media element.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait PlaybackHandle: Send {
    /// Request playback. An `Err` is a synchronous rejection; hosts that only
    /// learn the result later return `Ok` and report a [`PlayOutcome`] for
    /// `ticket`.
    fn play(&mut self, ticket: PlayTicket) -> Result<(), PlaybackError>;

    fn pause(&mut self);

    /// Seek back to the start of the media.
    fn reset(&mut self);

    fn set_muted(&mut self, muted: bool);
}

/// Creates media handles the first time an entry becomes active.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait PlaybackFactory: Send {
    fn bind(&mut self, entry: &VideoEntry) -> Box<dyn PlaybackHandle>;
}
