//! Async mailbox driver for a mounted feed.
//!
//! Hosts that receive input and play results on other tasks send
//! [`FeedMessage`]s into a bounded channel; the driver applies them to the
//! feed one at a time until the channel closes or the token is cancelled.

use reel_contracts::gesture::InputSink;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

use super::controller::ShortFeed;
use super::messages::{FeedEvent, FeedMessage};
use crate::error::FeedError;

/// Default mailbox depth for [`channel`].
pub const DEFAULT_MAILBOX_CAPACITY: usize = 64;

/// What the driver reports back for each processed message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverOutput {
    Event(FeedEvent),
    Error(FeedError),
}

pub fn channel() -> (mpsc::Sender<FeedMessage>, mpsc::Receiver<FeedMessage>) {
    mpsc::channel(DEFAULT_MAILBOX_CAPACITY)
}

/// Adapt a mailbox sender into the sink a `GestureSource` delivers to.
///
/// Input is dropped while the mailbox is full, so a touch sequence can arrive
/// truncated. A lost `TouchEnd` leaves the drag open until the next
/// `TouchStart` replaces its origin. The sink reports `false` once the driver
/// is gone.
pub fn input_sink(tx: mpsc::Sender<FeedMessage>) -> InputSink {
    Box::new(move |event| match tx.try_send(FeedMessage::Input(event)) {
        Ok(()) => true,
        Err(TrySendError::Full(FeedMessage::Input(event))) => {
            debug!(?event, "feed mailbox full, dropping input");
            true
        }
        Err(TrySendError::Full(_)) => true,
        Err(TrySendError::Closed(_)) => false,
    })
}

/// Drive `feed` until `inbox` closes or `cancel` fires, then unmount it.
pub async fn run(
    mut feed: ShortFeed,
    mut inbox: mpsc::Receiver<FeedMessage>,
    cancel: CancellationToken,
    outputs: Option<mpsc::UnboundedSender<DriverOutput>>,
) -> ShortFeed {
    info!(entries = feed.len(), "feed driver started");

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("feed driver cancelled");
                break;
            }
            message = inbox.recv() => {
                let Some(message) = message else {
                    debug!("feed mailbox closed");
                    break;
                };
                let reports: Vec<DriverOutput> = match feed.update(message) {
                    Ok(events) => events.into_iter().map(DriverOutput::Event).collect(),
                    Err(err) => {
                        warn!(error = %err, "feed message failed");
                        vec![DriverOutput::Error(err)]
                    }
                };
                if let Some(tx) = outputs.as_ref() {
                    for report in reports {
                        if tx.send(report).is_err() {
                            trace!("driver output receiver dropped");
                            break;
                        }
                    }
                }
            }
        }
    }

    feed.unmount();
    info!("feed driver stopped");
    feed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FeedConfig;
    use crate::feed::controller::FeedPorts;
    use crate::feed::messages::Direction;
    use crate::feed::test_support::{
        RecordingFactory, RecordingNavigation, RecordingObserver, entries,
    };
    use reel_contracts::gesture::{InputEvent, NavKey};
    use reel_contracts::mocks::{MockCommentsProvider, MockUserLookup};
    use reel_model::EntryId;
    use std::sync::Arc;

    fn feed(len: usize) -> (ShortFeed, RecordingNavigation) {
        let (factory, _log) = RecordingFactory::new();
        let navigation = RecordingNavigation::default();
        let ports = FeedPorts {
            navigation: Box::new(navigation.clone()),
            playback: Box::new(factory),
            users: Arc::new(MockUserLookup::new()),
            comments: Arc::new(MockCommentsProvider::new()),
            observer: Box::new(RecordingObserver::default()),
        };
        let feed =
            ShortFeed::mount(entries(len), 0, ports, FeedConfig::default()).unwrap();
        (feed, navigation)
    }

    #[tokio::test]
    async fn applies_messages_in_order_until_closed() {
        let (feed, navigation) = feed(3);
        let (tx, rx) = channel();
        let (out_tx, mut out_rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(feed, rx, CancellationToken::new(), Some(out_tx)));

        tx.send(FeedMessage::Advance(Direction::Next)).await.unwrap();
        tx.send(FeedMessage::GoTo(EntryId::new("missing").unwrap()))
            .await
            .unwrap();
        tx.send(FeedMessage::Advance(Direction::Next)).await.unwrap();
        drop(tx);

        let feed = task.await.unwrap();
        assert_eq!(feed.current_index(), Some(2));
        assert!(!feed.is_mounted());
        assert_eq!(
            navigation.paths(),
            vec!["/shorts/short_0", "/shorts/short_1", "/shorts/short_2"]
        );

        let mut reports = Vec::new();
        while let Some(report) = out_rx.recv().await {
            reports.push(report);
        }
        assert_eq!(reports.len(), 3);
        assert!(matches!(reports[1], DriverOutput::Error(FeedError::NotFound(_))));
    }

    #[tokio::test]
    async fn cancellation_unmounts() {
        let (feed, _navigation) = feed(2);
        let (_tx, rx) = channel();
        let cancel = CancellationToken::new();
        let task = tokio::spawn(run(feed, rx, cancel.clone(), None));

        cancel.cancel();
        let feed = task.await.unwrap();
        assert!(!feed.is_mounted());
        assert_eq!(feed.current_index(), Some(0));
    }

    #[tokio::test]
    async fn full_mailbox_drops_input_but_keeps_sink_open() {
        let (tx, mut rx) = channel();
        let sink = input_sink(tx);
        for _ in 0..DEFAULT_MAILBOX_CAPACITY {
            assert!(sink(InputEvent::Key(NavKey::ArrowDown)));
        }
        assert!(sink(InputEvent::TouchEnd));

        let mut queued = Vec::new();
        while let Ok(message) = rx.try_recv() {
            queued.push(message);
        }
        assert_eq!(queued.len(), DEFAULT_MAILBOX_CAPACITY);
        assert!(
            !queued.contains(&FeedMessage::Input(InputEvent::TouchEnd))
        );
    }

    #[tokio::test]
    async fn input_sink_forwards_until_driver_stops() {
        let (feed, _navigation) = feed(2);
        let (tx, rx) = channel();
        let sink = input_sink(tx.clone());
        let cancel = CancellationToken::new();
        let task = tokio::spawn(run(feed, rx, cancel.clone(), None));

        assert!(sink(InputEvent::Key(NavKey::ArrowDown)));
        drop(tx);
        // The sink still holds a sender, so stop the driver explicitly.
        tokio::task::yield_now().await;
        cancel.cancel();
        let feed = task.await.unwrap();
        assert!(!sink(InputEvent::Key(NavKey::ArrowDown)));
        assert!(!feed.is_mounted());
    }
}
