use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Configuration for one page scrape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// User-Agent header sent on both the static and rendered paths
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Timeout in seconds for the static HTTP fetch
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// URL for the WebDriver instance used by the render path
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Timeout in seconds for browser navigation
    #[serde(default = "default_navigation_timeout_secs")]
    pub navigation_timeout_secs: u64,

    /// Aggregate section-text length (in chars) below which the static
    /// result is considered insufficient and rendering is attempted
    #[serde(default = "default_score_threshold")]
    pub score_threshold: usize,

    /// Wait in milliseconds after navigation for script-driven rendering
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            webdriver_url: default_webdriver_url(),
            navigation_timeout_secs: default_navigation_timeout_secs(),
            score_threshold: default_score_threshold(),
            settle_ms: default_settle_ms(),
        }
    }
}

impl ScrapeConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }
}

/// Default User-Agent (a plain browser string; some sites reject bare clients)
fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string()
}

/// Default static fetch timeout
fn default_fetch_timeout_secs() -> u64 {
    10
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

/// Default browser navigation timeout
fn default_navigation_timeout_secs() -> u64 {
    30
}

/// Default content-volume threshold for escalating to the render path
fn default_score_threshold() -> usize {
    500
}

/// Default post-navigation settle wait
fn default_settle_ms() -> u64 {
    2000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScrapeConfig::default();
        assert_eq!(config.webdriver_url, "http://localhost:4444");
        assert_eq!(config.fetch_timeout_secs, 10);
        assert_eq!(config.score_threshold, 500);
        assert_eq!(config.settle_ms, 2000);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ScrapeConfig =
            serde_json::from_str(r#"{"webdriver_url": "http://localhost:9515"}"#).unwrap();
        assert_eq!(config.webdriver_url, "http://localhost:9515");
        assert_eq!(config.score_threshold, 500);
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
    }
}
