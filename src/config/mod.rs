use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 6;
pub const DEFAULT_KEYWORD: &str = "[Blackjack]";

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub feed: FeedConfig,
    pub page: PageConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct FeedConfig {
    pub url: Option<String>,
    pub keyword: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: None,
            keyword: DEFAULT_KEYWORD.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: format!("feedreel/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl FeedConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct PageConfig {
    pub lang: String,
    pub title: String,
    pub subtitle: String,
    pub empty_message: String,
    pub embed_base_url: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            lang: "en".to_string(),
            title: "Video gallery".to_string(),
            subtitle: String::new(),
            empty_message: "No videos available right now.".to_string(),
            embed_base_url: "https://www.youtube.com/embed/".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: "json".to_string(),
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file {}", path))
    }

    pub fn get_logging_format(&self) -> &str {
        &self.logging.format
    }
}
