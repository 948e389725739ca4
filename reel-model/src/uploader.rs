use crate::ids::UploaderId;

/// Display data for the account behind an entry. Never used for authorization.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Uploader {
    pub id: UploaderId,
    pub display_name: String,
    pub avatar_url: String,
}

impl Uploader {
    /// First character of the display name, used as the avatar fallback.
    pub fn initial(&self) -> Option<char> {
        self.display_name.trim_start().chars().next()
    }
}
