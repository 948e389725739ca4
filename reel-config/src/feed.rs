use anyhow::{Context, anyhow};
use reel_core::FeedConfig;
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::validation::{ConfigWarnings, apply_guard_rails};

pub const CONFIG_PATH_ENV: &str = "REEL_FEED_CONFIG_PATH";
pub const CONFIG_JSON_ENV: &str = "REEL_FEED_CONFIG_JSON";

const DEFAULT_CANDIDATES: &[&str] = &[
    "feed.toml",
    "feed.json",
    "config/feed.toml",
    "config/feed.json",
];

/// Source that produced the feed configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FeedConfigSource {
    #[default]
    Default,
    EnvPath(PathBuf),
    EnvInline,
    File(PathBuf),
}

impl std::fmt::Display for FeedConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedConfigSource::Default => f.write_str("built-in defaults"),
            FeedConfigSource::EnvPath(path) => {
                write!(f, "${CONFIG_PATH_ENV} ({})", path.display())
            }
            FeedConfigSource::EnvInline => write!(f, "${CONFIG_JSON_ENV}"),
            FeedConfigSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// A loaded and validated configuration.
#[derive(Debug, Clone)]
pub struct FeedConfigLoad {
    pub config: FeedConfig,
    pub source: FeedConfigSource,
    pub warnings: ConfigWarnings,
}

/// Load feed configuration overrides from the process environment.
/// Evaluation order:
/// 1) `$REEL_FEED_CONFIG_PATH` (TOML or JSON file),
/// 2) `$REEL_FEED_CONFIG_JSON` (inline JSON),
/// 3) the first default file found under the working directory,
/// 4) defaults.
pub fn load_from_env() -> anyhow::Result<(FeedConfig, FeedConfigSource)> {
    load_from_sources(|key| env::var(key).ok(), Path::new("."))
}

/// [`load_from_env`] followed by the guard rails.
pub fn load_validated() -> anyhow::Result<FeedConfigLoad> {
    let (config, source) = load_from_env()?;
    validate_loaded(config, source)
}

/// Same order as [`load_from_env`], reading variables through `lookup` and
/// resolving default files relative to `root`.
pub fn load_from_sources<F>(
    lookup: F,
    root: &Path,
) -> anyhow::Result<(FeedConfig, FeedConfigSource)>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path_str) = lookup(CONFIG_PATH_ENV)
        && !path_str.trim().is_empty()
    {
        let path = PathBuf::from(path_str.trim());
        let config = load_from_file(&path)?;
        return Ok((config, FeedConfigSource::EnvPath(path)));
    }

    if let Some(raw) = lookup(CONFIG_JSON_ENV)
        && !raw.trim().is_empty()
    {
        let parsed = parse_json(&raw)
            .with_context(|| format!("failed to parse {CONFIG_JSON_ENV}"))?;
        return Ok((parsed, FeedConfigSource::EnvInline));
    }

    if let Some(path) = find_default_file(root) {
        let config = load_from_file(&path)?;
        return Ok((config, FeedConfigSource::File(path)));
    }

    debug!("no feed config override found, using defaults");
    Ok((FeedConfig::default(), FeedConfigSource::Default))
}

pub fn validate_loaded(
    config: FeedConfig,
    source: FeedConfigSource,
) -> anyhow::Result<FeedConfigLoad> {
    let warnings = apply_guard_rails(&config)
        .with_context(|| format!("feed config from {source} rejected"))?;
    Ok(FeedConfigLoad {
        config,
        source,
        warnings,
    })
}

pub fn load_from_file(path: &Path) -> anyhow::Result<FeedConfig> {
    let contents = fs::read_to_string(path).with_context(|| {
        format!("failed to read feed config from {}", path.display())
    })?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => parse_json(&contents)
            .with_context(|| format!("invalid feed config {}", path.display())),
        Some("toml") | Some("tml") => toml::from_str(&contents).map_err(|err| {
            anyhow!("invalid feed config {}: {}", path.display(), err)
        }),
        _ => parse_from_str(&contents, &path.display().to_string()),
    }
}

pub fn parse_from_str(contents: &str, origin: &str) -> anyhow::Result<FeedConfig> {
    // TOML first, then JSON.
    toml::from_str(contents).or_else(|toml_err| {
        serde_json::from_str(contents).map_err(|json_err| {
            anyhow!(
                "failed to parse feed config {}: toml error: {}; json error: {}",
                origin,
                toml_err,
                json_err
            )
        })
    })
}

pub fn parse_json(raw: &str) -> anyhow::Result<FeedConfig> {
    serde_json::from_str(raw)
        .map_err(|err| anyhow!("invalid feed config json: {err}"))
}

fn find_default_file(root: &Path) -> Option<PathBuf> {
    DEFAULT_CANDIDATES
        .iter()
        .map(|candidate| root.join(candidate))
        .find(|path| path.exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::time::Duration;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let dir = tempfile::tempdir().unwrap();
        let (config, source) = load_from_sources(vars(&[]), dir.path()).unwrap();
        assert_eq!(source, FeedConfigSource::Default);
        assert_eq!(config, FeedConfig::default());
    }

    #[test]
    fn env_path_toml_wins_over_inline_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "swipe_threshold_px = 80.0\nwheel_cooldown_ms = 500\n")
            .unwrap();
        let path_str = path.display().to_string();

        let (config, source) = load_from_sources(
            vars(&[
                (CONFIG_PATH_ENV, path_str.as_str()),
                (CONFIG_JSON_ENV, r#"{"swipe_threshold_px": 10.0}"#),
            ]),
            dir.path(),
        )
        .unwrap();

        assert_eq!(source, FeedConfigSource::EnvPath(path));
        assert_eq!(config.swipe_threshold_px, 80.0);
        assert_eq!(config.wheel_cooldown(), Duration::from_millis(500));
        assert_eq!(config.path_prefix, "/shorts");
    }

    #[test]
    fn inline_json() {
        let dir = tempfile::tempdir().unwrap();
        let (config, source) = load_from_sources(
            vars(&[
                (CONFIG_PATH_ENV, "  "),
                (CONFIG_JSON_ENV, r#"{"start_muted": false, "path_prefix": "/clips"}"#),
            ]),
            dir.path(),
        )
        .unwrap();
        assert_eq!(source, FeedConfigSource::EnvInline);
        assert!(!config.start_muted);
        assert_eq!(config.path_prefix, "/clips");
    }

    #[test]
    fn bad_inline_json_names_the_variable() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_from_sources(vars(&[(CONFIG_JSON_ENV, "{nope")]), dir.path())
            .unwrap_err();
        assert!(format!("{err:#}").contains(CONFIG_JSON_ENV));
    }

    #[test]
    fn default_file_is_discovered() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("config")).unwrap();
        fs::write(
            dir.path().join("config/feed.json"),
            r#"{"wheel_delta_threshold": 12.5}"#,
        )
        .unwrap();

        let (config, source) = load_from_sources(vars(&[]), dir.path()).unwrap();
        assert_eq!(
            source,
            FeedConfigSource::File(dir.path().join("config/feed.json"))
        );
        assert_eq!(config.wheel_delta_threshold, 12.5);
    }

    #[test]
    fn extensionless_file_accepts_either_format() {
        let dir = tempfile::tempdir().unwrap();
        let toml_path = dir.path().join("feedrc");
        fs::write(&toml_path, "path_prefix = \"/s\"\n").unwrap();
        assert_eq!(load_from_file(&toml_path).unwrap().path_prefix, "/s");

        let json_path = dir.path().join("feedrc-json");
        fs::write(&json_path, r#"{"path_prefix": "/j"}"#).unwrap();
        assert_eq!(load_from_file(&json_path).unwrap().path_prefix, "/j");
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_from_file(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }

    #[test]
    fn validated_load_rejects_bad_prefix() {
        let config = FeedConfig {
            path_prefix: "shorts".into(),
            ..FeedConfig::default()
        };
        let err = validate_loaded(config, FeedConfigSource::EnvInline).unwrap_err();
        assert!(format!("{err:#}").contains("path_prefix"));
    }
}
