//! Fakes shared by the feed tests.

use std::sync::{Arc, Mutex};

use reel_contracts::navigation::NavigationPort;
use reel_contracts::observer::FeedObserver;
use reel_contracts::playback::{
    PlayTicket, PlaybackError, PlaybackFactory, PlaybackHandle,
};
use reel_model::{Counters, EntryId, UploaderId, VideoEntry, VideoKind};

pub fn entry(id: &str) -> VideoEntry {
    VideoEntry::new(
        EntryId::new(id).unwrap(),
        VideoKind::Short,
        UploaderId::new("user_1").unwrap(),
    )
    .with_title(format!("Title {id}"))
    .with_description(format!("Description for {id}"))
    .with_media(
        format!("https://cdn.test/{id}.mp4"),
        format!("https://cdn.test/{id}.jpg"),
    )
    .with_counters(Counters {
        likes: 1_500,
        comments: 42,
        shares: 2_300_000,
    })
}

/// `short_0` .. `short_{len-1}`.
pub fn entries(len: usize) -> Vec<VideoEntry> {
    (0..len).map(|i| entry(&format!("short_{i}"))).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Play(PlayTicket),
    Pause,
    Reset,
    SetMuted(bool),
}

#[derive(Debug, Clone, Default)]
pub struct CommandLog(Arc<Mutex<Vec<(EntryId, Command)>>>);

impl CommandLog {
    fn push(&self, id: &EntryId, command: Command) {
        self.0.lock().unwrap().push((id.clone(), command));
    }

    pub fn commands_for(&self, id: &EntryId) -> Vec<Command> {
        self.0
            .lock()
            .unwrap()
            .iter()
            .filter(|(entry, _)| entry == id)
            .map(|(_, command)| *command)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.lock().unwrap().len()
    }
}

struct RecordingHandle {
    id: EntryId,
    log: CommandLog,
    reject: bool,
}

impl PlaybackHandle for RecordingHandle {
    fn play(&mut self, ticket: PlayTicket) -> Result<(), PlaybackError> {
        self.log.push(&self.id, Command::Play(ticket));
        if self.reject {
            Err(PlaybackError::AutoplayBlocked)
        } else {
            Ok(())
        }
    }

    fn pause(&mut self) {
        self.log.push(&self.id, Command::Pause);
    }

    fn reset(&mut self) {
        self.log.push(&self.id, Command::Reset);
    }

    fn set_muted(&mut self, muted: bool) {
        self.log.push(&self.id, Command::SetMuted(muted));
    }
}

pub struct RecordingFactory {
    log: CommandLog,
    reject: bool,
}

impl RecordingFactory {
    pub fn new() -> (Self, CommandLog) {
        let log = CommandLog::default();
        (
            Self {
                log: log.clone(),
                reject: false,
            },
            log,
        )
    }

    /// Every `play` is refused synchronously.
    pub fn rejecting() -> (Self, CommandLog) {
        let (mut factory, log) = Self::new();
        factory.reject = true;
        (factory, log)
    }
}

impl PlaybackFactory for RecordingFactory {
    fn bind(&mut self, entry: &VideoEntry) -> Box<dyn PlaybackHandle> {
        Box::new(RecordingHandle {
            id: entry.id.clone(),
            log: self.log.clone(),
            reject: self.reject,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordingNavigation(Arc<Mutex<Vec<String>>>);

impl RecordingNavigation {
    pub fn paths(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

impl NavigationPort for RecordingNavigation {
    fn replace_path(&mut self, path: &str) {
        self.0.lock().unwrap().push(path.to_string());
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notified {
    Index(EntryId),
    Mute(bool),
}

#[derive(Debug, Clone, Default)]
pub struct RecordingObserver(Arc<Mutex<Vec<Notified>>>);

impl RecordingObserver {
    pub fn notifications(&self) -> Vec<Notified> {
        self.0.lock().unwrap().clone()
    }
}

impl FeedObserver for RecordingObserver {
    fn on_index_change(&mut self, entry_id: &EntryId) {
        self.0.lock().unwrap().push(Notified::Index(entry_id.clone()));
    }

    fn on_mute_change(&mut self, muted: bool) {
        self.0.lock().unwrap().push(Notified::Mute(muted));
    }
}
