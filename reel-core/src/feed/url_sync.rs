use reel_contracts::navigation::NavigationPort;
use reel_model::EntryId;
use tracing::trace;

/// Mirrors the active entry into the address bar by replacing, never pushing,
/// the current history entry.
#[derive(Debug, Clone)]
pub struct UrlSynchronizer {
    prefix: String,
    last_path: Option<String>,
}

impl UrlSynchronizer {
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let prefix = prefix.trim_end_matches('/').to_string();
        Self {
            prefix,
            last_path: None,
        }
    }

    pub fn path_for(&self, id: &EntryId) -> String {
        format!("{}/{}", self.prefix, urlencoding::encode(id.as_str()))
    }

    /// Replace the address with the path for `id`. Repeated syncs to the same
    /// path are skipped. Returns whether the port was called.
    pub fn sync(&mut self, navigation: &mut dyn NavigationPort, id: &EntryId) -> bool {
        let path = self.path_for(id);
        if self.last_path.as_deref() == Some(path.as_str()) {
            return false;
        }
        trace!(%path, "replacing history entry");
        navigation.replace_path(&path);
        self.last_path = Some(path);
        true
    }

    pub fn last_path(&self) -> Option<&str> {
        self.last_path.as_deref()
    }

    pub fn reset(&mut self) {
        self.last_path = None;
    }
}
