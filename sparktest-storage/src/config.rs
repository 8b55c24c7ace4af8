//! Storage configuration
//!
//! Resolves which backend the facade binds to, where the remote backend lives
//! and where the local store keeps its collections. The values are read from
//! the environment once per process and never change afterwards.

use std::path::PathBuf;
use std::sync::LazyLock;

use sparktest_client::DEFAULT_BASE_URL;
use tracing::warn;

/// Selects the remote-backed (hybrid) store when set to exactly `"true"`
pub const USE_REMOTE_API_VAR: &str = "SPARKTEST_USE_RUST_API";
/// Base URL of the backend API
pub const API_URL_VAR: &str = "SPARKTEST_API_URL";
/// Directory of the local store's collection files
pub const DATA_DIR_VAR: &str = "SPARKTEST_DATA_DIR";

const DEFAULT_DATA_DIR: &str = ".sparktest";

static SETTINGS: LazyLock<Settings> = LazyLock::new(Settings::from_env);

/// Storage settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Use the backend API (with local fallback) instead of the local store only
    pub use_remote_api: bool,

    /// Backend base URL (e.g., "http://localhost:8080")
    pub api_base_url: String,

    /// Where the local store writes its collections
    pub data_dir: PathBuf,
}

impl Settings {
    /// Creates settings from environment variables
    ///
    /// Expected environment variables:
    /// - SPARKTEST_USE_RUST_API (optional, only "true" enables the backend)
    /// - SPARKTEST_API_URL (optional, default: http://localhost:8080)
    /// - SPARKTEST_DATA_DIR (optional, default: .sparktest)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Creates settings from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let use_remote_api = parse_flag(lookup(USE_REMOTE_API_VAR).as_deref());

        let api_base_url = match lookup(API_URL_VAR) {
            Some(url) if url.starts_with("http://") || url.starts_with("https://") => url,
            Some(url) if !url.is_empty() => {
                warn!(
                    "Ignoring {}={:?}: must start with http:// or https://",
                    API_URL_VAR, url
                );
                DEFAULT_BASE_URL.to_string()
            }
            _ => DEFAULT_BASE_URL.to_string(),
        };

        let data_dir = lookup(DATA_DIR_VAR)
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        Self {
            use_remote_api,
            api_base_url,
            data_dir,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            use_remote_api: false,
            api_base_url: DEFAULT_BASE_URL.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

/// Interprets the backend-selection flag
///
/// Only the literal string `"true"` enables it.
pub fn parse_flag(value: Option<&str>) -> bool {
    value == Some("true")
}

/// Process-wide settings, read from the environment on first access
pub fn settings() -> &'static Settings {
    &SETTINGS
}

/// Whether the facade binds to the remote-backed store
pub fn use_remote_api() -> bool {
    settings().use_remote_api
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag(Some("true")));
        assert!(!parse_flag(Some("TRUE")));
        assert!(!parse_flag(Some("1")));
        assert!(!parse_flag(Some("")));
        assert!(!parse_flag(None));
    }

    #[test]
    fn test_defaults_when_unset() {
        let settings = Settings::from_lookup(lookup(&[]));
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.api_base_url, "http://localhost:8080");
    }

    #[test]
    fn test_reads_all_variables() {
        let settings = Settings::from_lookup(lookup(&[
            (USE_REMOTE_API_VAR, "true"),
            (API_URL_VAR, "https://sparktest.internal"),
            (DATA_DIR_VAR, "/var/lib/sparktest"),
        ]));

        assert!(settings.use_remote_api);
        assert_eq!(settings.api_base_url, "https://sparktest.internal");
        assert_eq!(settings.data_dir, PathBuf::from("/var/lib/sparktest"));
    }

    #[test]
    fn test_invalid_url_falls_back_to_default() {
        let settings = Settings::from_lookup(lookup(&[(API_URL_VAR, "localhost:3001")]));
        assert_eq!(settings.api_base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_settings_are_resolved_once() {
        assert!(std::ptr::eq(settings(), settings()));
        assert_eq!(use_remote_api(), settings().use_remote_api);
    }
}
