//! Playback coordination across the feed's media handles.
//!
//! Handles are bound lazily: an entry gets one the first time it becomes
//! active and keeps it until teardown. Entries that were never active are
//! never commanded.

use std::collections::BTreeMap;
use std::fmt;

use reel_contracts::playback::{
    PlayOutcome, PlayTicket, PlaybackFactory, PlaybackHandle,
};
use reel_model::{EntryId, VideoEntry};
use tracing::{debug, trace};

/// Coordinator's view of one managed handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HandleState {
    /// Commanded to play. Distinct from actually playing, which the runtime
    /// may refuse.
    pub play_intent: bool,
    /// Playback position is at the start.
    pub at_start: bool,
    pub muted: bool,
    /// The last play command for this handle was rejected; the poster stays
    /// visible until a later play succeeds.
    pub blocked: bool,
}

struct ManagedHandle {
    handle: Box<dyn PlaybackHandle>,
    state: HandleState,
    ticket: Option<PlayTicket>,
}

impl ManagedHandle {
    fn pause_and_rewind(&mut self) {
        self.handle.pause();
        self.handle.reset();
        self.state.play_intent = false;
        self.state.at_start = true;
        self.ticket = None;
    }
}

pub struct PlaybackCoordinator {
    factory: Box<dyn PlaybackFactory>,
    handles: BTreeMap<EntryId, ManagedHandle>,
    active: Option<EntryId>,
    muted: bool,
    last_ticket: PlayTicket,
    torn_down: bool,
}

impl fmt::Debug for PlaybackCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaybackCoordinator")
            .field("managed", &self.handles.len())
            .field("active", &self.active)
            .field("muted", &self.muted)
            .field("torn_down", &self.torn_down)
            .finish()
    }
}

impl PlaybackCoordinator {
    pub fn new(factory: Box<dyn PlaybackFactory>, muted: bool) -> Self {
        Self {
            factory,
            handles: BTreeMap::new(),
            active: None,
            muted,
            last_ticket: PlayTicket::new(0),
            torn_down: false,
        }
    }

    /// Make `entry` the only entry with play intent. Every other managed
    /// handle is paused and rewound.
    pub fn activate(&mut self, entry: &VideoEntry) {
        if self.torn_down {
            return;
        }

        if !self.handles.contains_key(&entry.id) {
            let mut handle = self.factory.bind(entry);
            handle.set_muted(self.muted);
            debug!(entry_id = %entry.id, muted = self.muted, "bound media handle");
            self.handles.insert(
                entry.id.clone(),
                ManagedHandle {
                    handle,
                    state: HandleState {
                        at_start: true,
                        muted: self.muted,
                        ..HandleState::default()
                    },
                    ticket: None,
                },
            );
        }

        for (id, managed) in self.handles.iter_mut() {
            if id != &entry.id {
                managed.pause_and_rewind();
            }
        }

        self.last_ticket = self.last_ticket.next();
        let ticket = self.last_ticket;
        self.active = Some(entry.id.clone());

        let Some(managed) = self.handles.get_mut(&entry.id) else {
            return;
        };
        managed.state.play_intent = true;
        managed.state.at_start = false;
        managed.state.blocked = false;
        managed.ticket = Some(ticket);

        // Rejection is expected under autoplay policies; leave the element
        // paused with its poster.
        if let Err(err) = managed.handle.play(ticket) {
            debug!(entry_id = %entry.id, %ticket, error = %err, "play rejected");
            managed.state.blocked = true;
        }
    }

    /// Apply an asynchronous play result. Returns whether it was applied;
    /// results for superseded tickets or after teardown are dropped.
    pub fn settle(&mut self, ticket: PlayTicket, outcome: PlayOutcome) -> bool {
        if self.torn_down {
            trace!(%ticket, "play settled after teardown, ignoring");
            return false;
        }

        let Some(active) = self.active.as_ref() else {
            return false;
        };
        let Some(managed) = self.handles.get_mut(active) else {
            return false;
        };
        if managed.ticket != Some(ticket) {
            trace!(%ticket, "stale play result, ignoring");
            return false;
        }

        match outcome {
            PlayOutcome::Playing => managed.state.blocked = false,
            PlayOutcome::Rejected(err) => {
                debug!(entry_id = %active, %ticket, error = %err, "play rejected");
                managed.state.blocked = true;
            }
        }
        true
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.set_muted(!self.muted);
        self.muted
    }

    /// Apply `muted` to every managed handle, visible or not.
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if self.torn_down {
            return;
        }
        for managed in self.handles.values_mut() {
            managed.handle.set_muted(muted);
            managed.state.muted = muted;
        }
    }

    /// Pause everything and stop reacting. Late play results become no-ops.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        for managed in self.handles.values_mut() {
            managed.handle.pause();
            managed.state.play_intent = false;
            managed.ticket = None;
        }
        self.active = None;
        self.torn_down = true;
    }

    /// Forget every handle, e.g. when the entry list is replaced.
    pub fn release_all(&mut self) {
        for managed in self.handles.values_mut() {
            managed.handle.pause();
        }
        self.handles.clear();
        self.active = None;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn active(&self) -> Option<&EntryId> {
        self.active.as_ref()
    }

    pub fn state(&self, id: &EntryId) -> Option<HandleState> {
        self.handles.get(id).map(|managed| managed.state)
    }

    /// Ticket of the outstanding play command for the active entry.
    pub fn pending_ticket(&self) -> Option<PlayTicket> {
        self.active
            .as_ref()
            .and_then(|id| self.handles.get(id))
            .and_then(|managed| managed.ticket)
    }

    pub fn managed_ids(&self) -> impl Iterator<Item = &EntryId> {
        self.handles.keys()
    }

    pub fn managed_count(&self) -> usize {
        self.handles.len()
    }
}
