//! The short-feed controller.
//!
//! `ShortFeed` owns the feed state and composes the sequencer, playback
//! coordinator, address synchronizer and overlay state. It is driven by
//! [`FeedMessage`]s, one at a time, and reports what changed as
//! [`FeedEvent`]s. A single message changes the active entry at most once.

use std::fmt;
use std::sync::Arc;

use reel_contracts::gesture::{
    GestureSource, InputEvent, InputSink, ListenerGuard, NavKey,
};
use reel_contracts::navigation::NavigationPort;
use reel_contracts::observer::FeedObserver;
use reel_contracts::playback::{PlayTicket, PlaybackFactory};
use reel_contracts::repository::{CommentsProvider, FeedRepository, UserLookup};
use reel_model::{EntryId, VideoEntry};
use tracing::{debug, info, trace};

use super::gesture::{SwipeOutcome, SwipeTracker, WheelDebouncer};
use super::messages::{Direction, FeedEvent, FeedMessage};
use super::overlay::OverlayState;
use super::playback::{HandleState, PlaybackCoordinator};
use super::sequencer::{Sequencer, Transition, resolve_start};
use super::url_sync::UrlSynchronizer;
use super::view::{ActiveView, CounterLabels, FeedView};
use crate::comments::CommentThread;
use crate::config::FeedConfig;
use crate::error::Result;

/// Host capabilities the feed is mounted with.
pub struct FeedPorts {
    pub navigation: Box<dyn NavigationPort>,
    pub playback: Box<dyn PlaybackFactory>,
    pub users: Arc<dyn UserLookup>,
    pub comments: Arc<dyn CommentsProvider>,
    pub observer: Box<dyn FeedObserver>,
}

impl fmt::Debug for FeedPorts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeedPorts").finish_non_exhaustive()
    }
}

pub struct ShortFeed {
    config: FeedConfig,
    sequencer: Sequencer,
    playback: PlaybackCoordinator,
    url: UrlSynchronizer,
    overlay: OverlayState,
    swipe: SwipeTracker,
    wheel: WheelDebouncer,
    navigation: Box<dyn NavigationPort>,
    users: Arc<dyn UserLookup>,
    comments: Arc<dyn CommentsProvider>,
    observer: Box<dyn FeedObserver>,
    listener: Option<ListenerGuard>,
    mounted: bool,
}

impl fmt::Debug for ShortFeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShortFeed")
            .field("entries", &self.sequencer.len())
            .field("current_index", &self.sequencer.current_index())
            .field("playing", &self.playback.active())
            .field("muted", &self.playback.is_muted())
            .field("overlay", &self.overlay)
            .field("mounted", &self.mounted)
            .finish()
    }
}

impl ShortFeed {
    /// Mount over `entries`, starting at `start_index` (clamped).
    ///
    /// A non-empty feed immediately syncs the address, commands the starting
    /// entry to play and notifies the observer. An empty feed does none of
    /// that and renders as [`FeedView::Empty`].
    pub fn mount(
        entries: Vec<VideoEntry>,
        start_index: usize,
        ports: FeedPorts,
        config: FeedConfig,
    ) -> Result<Self> {
        let sequencer = Sequencer::new(entries, start_index)?;
        let mut feed = Self {
            playback: PlaybackCoordinator::new(ports.playback, config.start_muted),
            url: UrlSynchronizer::new(config.path_prefix.clone()),
            swipe: SwipeTracker::new(config.swipe_threshold_px),
            wheel: WheelDebouncer::new(
                config.wheel_delta_threshold,
                config.wheel_cooldown(),
            ),
            overlay: OverlayState::default(),
            navigation: ports.navigation,
            users: ports.users,
            comments: ports.comments,
            observer: ports.observer,
            listener: None,
            mounted: true,
            sequencer,
            config,
        };

        info!(
            entries = feed.sequencer.len(),
            start = ?feed.sequencer.current_index(),
            "mounting short feed"
        );
        feed.activate_current();
        Ok(feed)
    }

    /// Mount starting at a deep-linked entry. Fails with `NotFound` when the
    /// id is not part of `entries`; the caller decides where to redirect.
    pub fn mount_at(
        entries: Vec<VideoEntry>,
        start_id: &EntryId,
        ports: FeedPorts,
        config: FeedConfig,
    ) -> Result<Self> {
        let start_index = resolve_start(&entries, start_id)?;
        Self::mount(entries, start_index, ports, config)
    }

    /// Mount over the short entries of a repository.
    pub fn from_repository(
        repository: &dyn FeedRepository,
        start_id: Option<&EntryId>,
        ports: FeedPorts,
        config: FeedConfig,
    ) -> Result<Self> {
        let entries = repository.short_entries();
        match start_id {
            Some(id) => Self::mount_at(entries, id, ports, config),
            None => Self::mount(entries, 0, ports, config),
        }
    }

    /// Register the container listeners. A previous registration is detached
    /// first.
    pub fn attach_gestures(
        &mut self,
        source: &mut dyn GestureSource,
        sink: InputSink,
    ) {
        if !self.mounted {
            return;
        }
        if let Some(previous) = self.listener.take() {
            previous.detach();
        }
        self.listener = Some(source.attach(sink));
    }

    /// Process one message.
    ///
    /// Only `GoTo` with an unknown id fails; every other anomaly leaves the
    /// feed in a stable state and returns no events.
    pub fn update(&mut self, message: FeedMessage) -> Result<Vec<FeedEvent>> {
        if !self.mounted {
            trace!(?message, "feed unmounted, dropping message");
            return Ok(Vec::new());
        }

        if self.sequencer.is_empty() {
            if let FeedMessage::GoTo(id) = message {
                self.sequencer.go_to(&id)?;
            }
            return Ok(Vec::new());
        }

        let events = match message {
            FeedMessage::Input(input) => self.handle_input(input),
            FeedMessage::Advance(direction) => self.advance(direction),
            FeedMessage::GoTo(id) => {
                let transition = self.sequencer.go_to(&id).inspect_err(|err| {
                    debug!(error = %err, "go_to failed");
                })?;
                self.apply_transition(transition)
            }
            FeedMessage::ToggleMute => {
                let muted = self.playback.toggle_mute();
                self.observer.on_mute_change(muted);
                vec![FeedEvent::MuteChanged(muted)]
            }
            FeedMessage::PlaybackSettled { ticket, outcome } => {
                self.playback.settle(ticket, outcome);
                Vec::new()
            }
            FeedMessage::ExpandDescription => {
                self.overlay.expand_description();
                Vec::new()
            }
            FeedMessage::ToggleDescription => {
                self.overlay.toggle_description();
                Vec::new()
            }
            FeedMessage::OpenComments => {
                self.overlay.open_comments();
                self.swipe.cancel();
                Vec::new()
            }
            FeedMessage::CloseComments => {
                self.overlay.close_comments();
                Vec::new()
            }
            FeedMessage::SortComments(sort) => {
                self.overlay.set_comment_sort(sort);
                Vec::new()
            }
        };
        Ok(events)
    }

    /// Swap the entry list. Handles bound to the old list are released.
    pub fn replace_entries(
        &mut self,
        entries: Vec<VideoEntry>,
        start_index: usize,
    ) -> Result<Vec<FeedEvent>> {
        if !self.mounted {
            return Ok(Vec::new());
        }
        self.sequencer.replace_entries(entries, start_index)?;
        self.playback.release_all();
        self.url.reset();
        self.overlay.reset();
        self.swipe.cancel();
        Ok(self.activate_current().into_iter().collect())
    }

    /// Release listeners and pause every managed handle. Messages and play
    /// results arriving afterwards are ignored.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        if let Some(listener) = self.listener.take() {
            listener.detach();
        }
        self.playback.teardown();
        info!("short feed unmounted");
    }

    pub fn view(&self) -> FeedView {
        let (Some(index), Some(entry)) =
            (self.sequencer.current_index(), self.sequencer.current())
        else {
            return FeedView::Empty;
        };

        let poster_visible = self
            .playback
            .state(&entry.id)
            .is_some_and(|state| state.blocked);
        let comments = self.overlay.comments_open().then(|| {
            CommentThread::build(
                entry.id.clone(),
                self.comments.comments(&entry.id),
                self.overlay.comment_sort(),
            )
        });

        FeedView::Active(Box::new(ActiveView {
            index,
            total: self.sequencer.len(),
            uploader: self.users.uploader(&entry.id),
            counters: CounterLabels::for_entry(entry),
            muted: self.playback.is_muted(),
            description_expanded: self.overlay.description_expanded(),
            show_more: !self.overlay.description_expanded(),
            poster_visible,
            comments,
            entry: entry.clone(),
        }))
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_empty(&self) -> bool {
        self.sequencer.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sequencer.len()
    }

    /// `None` only in the empty state.
    pub fn current_index(&self) -> Option<usize> {
        self.sequencer.current_index()
    }

    pub fn current_entry(&self) -> Option<&VideoEntry> {
        self.sequencer.current()
    }

    pub fn entries(&self) -> &[VideoEntry] {
        self.sequencer.entries()
    }

    pub fn is_muted(&self) -> bool {
        self.playback.is_muted()
    }

    pub fn overlay(&self) -> &OverlayState {
        &self.overlay
    }

    pub fn playback_state(&self, id: &EntryId) -> Option<HandleState> {
        self.playback.state(id)
    }

    pub fn managed_entries(&self) -> impl Iterator<Item = &EntryId> {
        self.playback.managed_ids()
    }

    pub fn pending_ticket(&self) -> Option<PlayTicket> {
        self.playback.pending_ticket()
    }

    pub fn current_path(&self) -> Option<&str> {
        self.url.last_path()
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    fn handle_input(&mut self, input: InputEvent) -> Vec<FeedEvent> {
        let suspended = self.overlay.suspends_navigation();
        match input {
            InputEvent::Wheel { delta_y, at } => {
                if suspended {
                    return Vec::new();
                }
                match self.wheel.on_wheel(delta_y, at) {
                    Some(direction) => self.advance(direction),
                    None => Vec::new(),
                }
            }
            InputEvent::TouchStart { y } => {
                self.swipe.touch_start(y);
                Vec::new()
            }
            InputEvent::TouchMove { y } => {
                self.swipe.touch_move(y);
                Vec::new()
            }
            InputEvent::TouchEnd => {
                let outcome = self.swipe.touch_end();
                if suspended {
                    return Vec::new();
                }
                match outcome {
                    SwipeOutcome::Advance(direction) => self.advance(direction),
                    SwipeOutcome::SnapBack => vec![FeedEvent::SnapBack],
                    SwipeOutcome::Tap => Vec::new(),
                }
            }
            InputEvent::Key(_) if suspended => Vec::new(),
            InputEvent::Key(NavKey::ArrowUp) => self.advance(Direction::Previous),
            InputEvent::Key(NavKey::ArrowDown) => self.advance(Direction::Next),
            InputEvent::Key(NavKey::Other) => Vec::new(),
        }
    }

    fn advance(&mut self, direction: Direction) -> Vec<FeedEvent> {
        match self.sequencer.advance(direction) {
            Some(transition) => self.apply_transition(transition),
            None => Vec::new(),
        }
    }

    fn apply_transition(&mut self, transition: Transition) -> Vec<FeedEvent> {
        if !transition.changed() {
            return Vec::new();
        }
        debug!(from = transition.from, to = transition.to, "active entry changed");
        self.overlay.reset();
        self.swipe.cancel();
        self.activate_current().into_iter().collect()
    }

    fn activate_current(&mut self) -> Option<FeedEvent> {
        let index = self.sequencer.current_index()?;
        let entry = self.sequencer.current()?;
        self.playback.activate(entry);
        self.url.sync(self.navigation.as_mut(), &entry.id);
        self.observer.on_index_change(&entry.id);
        Some(FeedEvent::IndexChanged {
            index,
            entry_id: entry.id.clone(),
        })
    }
}

impl Drop for ShortFeed {
    fn drop(&mut self) {
        self.unmount();
    }
}
