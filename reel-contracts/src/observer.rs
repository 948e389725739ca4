use reel_model::EntryId;

/// Outbound notifications for the host page (address sync, analytics).
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait FeedObserver: Send {
    /// The active entry changed, including the initial entry on mount.
    fn on_index_change(&mut self, entry_id: &EntryId);

    fn on_mute_change(&mut self, muted: bool);
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl FeedObserver for NoopObserver {
    fn on_index_change(&mut self, _entry_id: &EntryId) {}

    fn on_mute_change(&mut self, _muted: bool) {}
}
