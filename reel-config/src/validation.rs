use reel_core::FeedConfig;
use thiserror::Error;

/// Upper bound for the wheel cool-down before it starts to feel unresponsive.
const MAX_COMFORTABLE_COOLDOWN_MS: u64 = 3_000;
/// Swipes longer than this rarely fit on a phone screen.
const MAX_COMFORTABLE_SWIPE_PX: f32 = 400.0;

#[derive(Debug, Error)]
pub enum ConfigGuardRailError {
    #[error("{field} must be a positive number, got {value}")]
    NonPositiveThreshold { field: &'static str, value: f32 },
    #[error("invalid path_prefix {prefix:?}: {reason}")]
    InvalidPathPrefix { prefix: String, reason: &'static str },
}

#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConfigWarning> {
        self.items.iter()
    }
}

pub fn apply_guard_rails(
    config: &FeedConfig,
) -> Result<ConfigWarnings, ConfigGuardRailError> {
    let mut warnings = ConfigWarnings::default();

    ensure_positive("swipe_threshold_px", config.swipe_threshold_px)?;
    ensure_positive("wheel_delta_threshold", config.wheel_delta_threshold)?;
    validate_prefix(&config.path_prefix)?;

    if config.wheel_cooldown_ms == 0 {
        warnings.push_with_hint(
            "wheel_cooldown_ms is 0; a single trackpad flick will skip several entries",
            "Use a cool-down of a few hundred milliseconds (default 800)",
        );
    } else if config.wheel_cooldown_ms > MAX_COMFORTABLE_COOLDOWN_MS {
        warnings.push(format!(
            "wheel_cooldown_ms is {} ms; wheel navigation will feel sluggish",
            config.wheel_cooldown_ms
        ));
    }

    if config.swipe_threshold_px > MAX_COMFORTABLE_SWIPE_PX {
        warnings.push(format!(
            "swipe_threshold_px is {}; most swipes will snap back",
            config.swipe_threshold_px
        ));
    }

    if !config.start_muted {
        warnings.push_with_hint(
            "start_muted is false; browsers usually block unmuted autoplay",
            "Expect the poster fallback until the viewer interacts",
        );
    }

    Ok(warnings)
}

fn ensure_positive(
    field: &'static str,
    value: f32,
) -> Result<(), ConfigGuardRailError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigGuardRailError::NonPositiveThreshold { field, value })
    }
}

fn validate_prefix(prefix: &str) -> Result<(), ConfigGuardRailError> {
    let reason = if prefix.trim().is_empty() {
        "must not be empty"
    } else if !prefix.starts_with('/') {
        "must start with '/'"
    } else if prefix.chars().any(|c| c.is_whitespace() || c == '?' || c == '#') {
        "must be a plain path without whitespace, query or fragment"
    } else {
        return Ok(());
    };
    Err(ConfigGuardRailError::InvalidPathPrefix {
        prefix: prefix.to_string(),
        reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pass_without_warnings() {
        let warnings = apply_guard_rails(&FeedConfig::default()).unwrap();
        assert!(warnings.is_empty());
    }

    #[test]
    fn rejects_non_positive_thresholds() {
        for value in [0.0, -5.0, f32::NAN] {
            let config = FeedConfig {
                swipe_threshold_px: value,
                ..FeedConfig::default()
            };
            assert!(matches!(
                apply_guard_rails(&config),
                Err(ConfigGuardRailError::NonPositiveThreshold {
                    field: "swipe_threshold_px",
                    ..
                })
            ));
        }

        let config = FeedConfig {
            wheel_delta_threshold: 0.0,
            ..FeedConfig::default()
        };
        assert!(apply_guard_rails(&config).is_err());
    }

    #[test]
    fn rejects_bad_prefixes() {
        for prefix in ["", "   ", "shorts", "/sh orts", "/shorts?x=1"] {
            let config = FeedConfig {
                path_prefix: prefix.into(),
                ..FeedConfig::default()
            };
            let err = apply_guard_rails(&config).unwrap_err();
            assert!(
                matches!(err, ConfigGuardRailError::InvalidPathPrefix { .. }),
                "{prefix:?} accepted"
            );
        }
    }

    #[test]
    fn warns_on_unusual_values() {
        let config = FeedConfig {
            wheel_cooldown_ms: 0,
            start_muted: false,
            swipe_threshold_px: 900.0,
            ..FeedConfig::default()
        };
        let warnings = apply_guard_rails(&config).unwrap();
        assert_eq!(warnings.len(), 3);
        assert!(warnings.iter().any(|w| w.hint.is_some()));
    }
}
