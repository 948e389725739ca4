//! Host ports that report to the log instead of a browser.

use std::sync::{Arc, Mutex};

use reel_contracts::navigation::NavigationPort;
use reel_contracts::observer::FeedObserver;
use reel_contracts::playback::{
    PlayTicket, PlaybackError, PlaybackFactory, PlaybackHandle,
};
use reel_model::{EntryId, VideoEntry};
use tracing::{debug, info};

/// Records the address the feed would show.
#[derive(Debug, Clone, Default)]
pub struct ConsoleNavigation {
    current: Arc<Mutex<Option<String>>>,
}

impl ConsoleNavigation {
    pub fn current(&self) -> Option<String> {
        self.current.lock().ok().and_then(|path| path.clone())
    }
}

impl NavigationPort for ConsoleNavigation {
    fn replace_path(&mut self, path: &str) {
        info!(path, "address replaced");
        if let Ok(mut current) = self.current.lock() {
            *current = Some(path.to_string());
        }
    }
}

/// Media handles that only log. With `block_autoplay` every `play` is
/// refused the way a browser refuses unmuted autoplay.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsolePlayback {
    block_autoplay: bool,
}

impl ConsolePlayback {
    pub fn new(block_autoplay: bool) -> Self {
        Self { block_autoplay }
    }
}

impl PlaybackFactory for ConsolePlayback {
    fn bind(&mut self, entry: &VideoEntry) -> Box<dyn PlaybackHandle> {
        debug!(entry_id = %entry.id, media = %entry.media_url, "binding media element");
        Box::new(ConsoleHandle {
            entry_id: entry.id.clone(),
            block_autoplay: self.block_autoplay,
        })
    }
}

#[derive(Debug)]
struct ConsoleHandle {
    entry_id: EntryId,
    block_autoplay: bool,
}

impl PlaybackHandle for ConsoleHandle {
    fn play(&mut self, ticket: PlayTicket) -> Result<(), PlaybackError> {
        if self.block_autoplay {
            return Err(PlaybackError::AutoplayBlocked);
        }
        info!(entry_id = %self.entry_id, %ticket, "play");
        Ok(())
    }

    fn pause(&mut self) {
        debug!(entry_id = %self.entry_id, "pause");
    }

    fn reset(&mut self) {
        debug!(entry_id = %self.entry_id, "rewind");
    }

    fn set_muted(&mut self, muted: bool) {
        debug!(entry_id = %self.entry_id, muted, "set muted");
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleObserver;

impl FeedObserver for ConsoleObserver {
    fn on_index_change(&mut self, entry_id: &EntryId) {
        info!(%entry_id, "now showing");
    }

    fn on_mute_change(&mut self, muted: bool) {
        info!(muted, "mute changed");
    }
}
