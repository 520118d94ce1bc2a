use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub odesli: OdesliConfig,
    #[serde(default)]
    pub links: LinksConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
}

/// Link-resolution service endpoint and the timeout applied to every
/// outbound lookup (Odesli and Shazam alike).
#[derive(Debug, Deserialize, Clone)]
pub struct OdesliConfig {
    #[serde(default = "default_odesli_base_url")]
    pub base_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl OdesliConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for OdesliConfig {
    fn default() -> Self {
        Self {
            base_url: default_odesli_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// Companion link targets rendered into replies.
#[derive(Debug, Deserialize, Clone)]
pub struct LinksConfig {
    /// Base of the companion web page; the original URL is appended
    /// percent-encoded.
    #[serde(default = "default_web_base_url")]
    pub web_base_url: String,
    /// Base of the VK audio search page; the song title is appended
    /// percent-encoded.
    #[serde(default = "default_vk_search_base_url")]
    pub vk_search_base_url: String,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            web_base_url: default_web_base_url(),
            vk_search_base_url: default_vk_search_base_url(),
        }
    }
}

fn default_odesli_base_url() -> String {
    "https://api.streaming-hell.com/v1".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_web_base_url() -> String {
    "https://streaming-hell.com/?url=".to_string()
}

fn default_vk_search_base_url() -> String {
    "https://vk.com/audio?q=".to_string()
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content).context("Failed to parse config file")
    }
}
