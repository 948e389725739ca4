//! Tunables for the short feed.
//!
//! Thresholds are unit-based (CSS pixels for touch, wheel delta units for
//! wheel) so hosts with a different density can scale them.

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_SWIPE_THRESHOLD_PX: f32 = 50.0;
pub const DEFAULT_WHEEL_DELTA_THRESHOLD: f32 = 30.0;
pub const DEFAULT_WHEEL_COOLDOWN_MS: u64 = 800;
pub const DEFAULT_PATH_PREFIX: &str = "/shorts";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Minimum vertical travel for a touch gesture to count as a swipe.
    /// Shorter drags snap back.
    pub swipe_threshold_px: f32,
    /// Wheel events with a smaller absolute delta are ignored outright.
    pub wheel_delta_threshold: f32,
    /// Window after an accepted wheel navigation during which further wheel
    /// events are dropped. One trackpad flick emits dozens of events.
    pub wheel_cooldown_ms: u64,
    /// Path the active entry id is appended to when syncing the address.
    pub path_prefix: String,
    /// Initial mute state. Browsers only autoplay muted media.
    pub start_muted: bool,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            swipe_threshold_px: DEFAULT_SWIPE_THRESHOLD_PX,
            wheel_delta_threshold: DEFAULT_WHEEL_DELTA_THRESHOLD,
            wheel_cooldown_ms: DEFAULT_WHEEL_COOLDOWN_MS,
            path_prefix: DEFAULT_PATH_PREFIX.to_string(),
            start_muted: true,
        }
    }
}

impl FeedConfig {
    pub fn wheel_cooldown(&self) -> Duration {
        Duration::from_millis(self.wheel_cooldown_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: FeedConfig =
            serde_json::from_str(r#"{"wheel_cooldown_ms": 650}"#).unwrap();
        assert_eq!(cfg.wheel_cooldown(), Duration::from_millis(650));
        assert_eq!(cfg.swipe_threshold_px, DEFAULT_SWIPE_THRESHOLD_PX);
        assert_eq!(cfg.path_prefix, "/shorts");
        assert!(cfg.start_muted);
    }
}
