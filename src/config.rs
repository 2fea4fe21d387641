/// Shell configuration: pagination and catalog defaults
use serde::{Deserialize, Serialize};

/// Storage key for the registered accounts
pub const ACCOUNTS_KEY: &str = "accounts";
/// Storage key for the active session
pub const SESSION_KEY: &str = "session";
/// Storage key for the category catalog
pub const CATEGORIES_KEY: &str = "categories";
/// Storage key for the e-mail verification issued at registration
pub const PENDING_VERIFICATION_KEY: &str = "pendingVerification";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Categories shown per page
    pub page_size: usize,
    /// Page the interests view opens on, clamped to the available pages
    pub initial_page: usize,
    /// Numbered page buttons before the ellipsis
    pub max_page_buttons: usize,
    /// Categories generated on first load
    pub catalog_size: usize,
    pub min_password_len: usize,
}

impl ShellConfig {
    /// Parse overrides; missing fields keep their defaults
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        ShellConfig {
            page_size: 6,
            initial_page: 1,
            max_page_buttons: 7,
            catalog_size: 100,
            min_password_len: 6,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ShellConfig::default();

        assert_eq!(config.page_size, 6);
        assert_eq!(config.initial_page, 1);
        assert_eq!(config.max_page_buttons, 7);
        assert_eq!(config.catalog_size, 100);
        assert_eq!(config.min_password_len, 6);
    }

    #[test]
    fn test_partial_override() {
        let config = ShellConfig::from_json(r#"{"initial_page": 4}"#).unwrap();

        assert_eq!(config.initial_page, 4);
        assert_eq!(config.page_size, 6);
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(ShellConfig::from_json("{page_size").is_err());
    }
}
