use std::fmt;
use std::time::Instant;

/// Navigation keys the feed reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavKey {
    ArrowUp,
    ArrowDown,
    Other,
}

/// Raw pointer, wheel and keyboard input from the feed container.
///
/// Vertical coordinates grow downward, matching screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Discrete wheel or trackpad step. Positive `delta_y` scrolls toward the
    /// next entry.
    Wheel { delta_y: f32, at: Instant },
    TouchStart { y: f32 },
    TouchMove { y: f32 },
    TouchEnd,
    Key(NavKey),
}

/// Receiver side of a gesture subscription. Returns `false` once the feed is
/// gone so the source can stop delivering.
pub type InputSink = Box<dyn Fn(InputEvent) -> bool + Send + Sync>;

/// Keeps a listener registration alive. Dropping it detaches the listener.
pub struct ListenerGuard {
    detach: Option<Box<dyn FnOnce() + Send>>,
}

impl ListenerGuard {
    pub fn new(detach: impl FnOnce() + Send + 'static) -> Self {
        Self {
            detach: Some(Box::new(detach)),
        }
    }

    /// Guard for sources that have nothing to release.
    pub fn noop() -> Self {
        Self { detach: None }
    }

    /// Detach now instead of on drop.
    pub fn detach(mut self) {
        self.run_detach();
    }

    fn run_detach(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.run_detach();
    }
}

impl fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerGuard")
            .field("attached", &self.detach.is_some())
            .finish()
    }
}

/// Wheel, touch and keyboard listeners registered on the feed container.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait GestureSource: Send {
    /// Start delivering input to `sink` until the returned guard is dropped.
    fn attach(&mut self, sink: InputSink) -> ListenerGuard;
}
