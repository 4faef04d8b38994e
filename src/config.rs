use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Structural selector for the "next page" anchor on the longest-pages listing
pub const DEFAULT_NEXT_LINK_SELECTOR: &str = "#E8goUPurn > div.\\34 9e4646c > div > div > div > article > div:nth-child(6) > div > div:nth-child(4) > div > div > div > div > div > div > div > div > div:nth-child(2) > a:nth-child(2)";

/// Configuration for the page walker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkerConfig {
    /// URL of the first listing page
    #[serde(default = "default_start_url")]
    pub start_url: String,

    /// CSS selector locating the "next page" anchor
    #[serde(default = "default_next_link_selector")]
    pub next_link_selector: String,

    /// Attribute on the anchor holding the link target
    #[serde(default = "default_link_attribute")]
    pub link_attribute: String,

    /// Directory that receives the `<n>.html` dumps
    #[serde(default = "default_dump_dir")]
    pub dump_dir: PathBuf,

    /// Whether to create the dump directory if it is missing
    #[serde(default = "default_create_dump_dir")]
    pub create_dump_dir: bool,

    /// Fixed pause after each navigation, in milliseconds
    #[serde(default = "default_pause_ms")]
    pub pause_ms: u64,

    /// Element to wait for before extracting (no wait when unset)
    #[serde(default)]
    pub ready_selector: Option<String>,

    /// Upper bound on the ready-selector wait, in seconds
    #[serde(default = "default_ready_timeout_secs")]
    pub ready_timeout_secs: u64,

    /// Stop cleanly after this many saved pages
    #[serde(default)]
    pub max_pages: Option<u64>,

    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,
}

impl WalkerConfig {
    /// Create a new configuration with default values
    pub fn new(start_url: &str) -> Self {
        Self {
            start_url: start_url.to_string(),
            ..Self::default()
        }
    }

    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut file = File::open(path).map_err(io_err)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents).map_err(io_err)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Apply the `WEBDRIVER_URL` environment variable, if set and non-empty
    pub fn apply_env(&mut self) {
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                self.webdriver_url = webdriver_url;
            }
        }
    }

    pub fn pause(&self) -> Duration {
        Duration::from_millis(self.pause_ms)
    }

    pub fn ready_timeout(&self) -> Duration {
        Duration::from_secs(self.ready_timeout_secs)
    }
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            start_url: default_start_url(),
            next_link_selector: default_next_link_selector(),
            link_attribute: default_link_attribute(),
            dump_dir: default_dump_dir(),
            create_dump_dir: default_create_dump_dir(),
            pause_ms: default_pause_ms(),
            ready_selector: None,
            ready_timeout_secs: default_ready_timeout_secs(),
            max_pages: None,
            webdriver_url: default_webdriver_url(),
        }
    }
}

fn default_start_url() -> String {
    "https://namu.wiki/LongestPages".to_string()
}

fn default_next_link_selector() -> String {
    DEFAULT_NEXT_LINK_SELECTOR.to_string()
}

fn default_link_attribute() -> String {
    "href".to_string()
}

fn default_dump_dir() -> PathBuf {
    PathBuf::from("dump")
}

fn default_create_dump_dir() -> bool {
    true
}

fn default_pause_ms() -> u64 {
    1000
}

/// Matches the 100 second explicit wait used when waiting on page readiness
fn default_ready_timeout_secs() -> u64 {
    100
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WalkerConfig::default();
        assert_eq!(config.start_url, "https://namu.wiki/LongestPages");
        assert_eq!(config.link_attribute, "href");
        assert_eq!(config.dump_dir, PathBuf::from("dump"));
        assert_eq!(config.pause(), Duration::from_secs(1));
        assert_eq!(config.ready_timeout(), Duration::from_secs(100));
        assert!(config.ready_selector.is_none());
        assert!(config.max_pages.is_none());
        assert!(config.create_dump_dir);
        assert_eq!(config.webdriver_url, "http://localhost:4444");
    }

    #[test]
    fn test_new_overrides_start_url_only() {
        let config = WalkerConfig::new("https://example.com/list");
        assert_eq!(config.start_url, "https://example.com/list");
        assert_eq!(config.next_link_selector, DEFAULT_NEXT_LINK_SELECTOR);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "dump_dir": "out", "pause_ms": 250, "max_pages": 3 }"#;
        let config = WalkerConfig::from_json(json).unwrap();
        assert_eq!(config.dump_dir, PathBuf::from("out"));
        assert_eq!(config.pause_ms, 250);
        assert_eq!(config.max_pages, Some(3));
        assert_eq!(config.start_url, "https://namu.wiki/LongestPages");
        assert_eq!(config.next_link_selector, DEFAULT_NEXT_LINK_SELECTOR);
    }

    #[test]
    fn test_invalid_json_is_rejected() {
        let err = WalkerConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("walker.json");
        std::fs::write(
            &path,
            r#"{ "start_url": "https://example.com/a", "ready_selector": "main" }"#,
        )
        .unwrap();

        let config = WalkerConfig::from_file(&path).unwrap();
        assert_eq!(config.start_url, "https://example.com/a");
        assert_eq!(config.ready_selector.as_deref(), Some("main"));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = WalkerConfig::from_file("/nonexistent/walker.json").unwrap_err();
        match err {
            ConfigError::Io { path, .. } => {
                assert_eq!(path, PathBuf::from("/nonexistent/walker.json"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
