//! Client for the links-by-URL resolution service.

use std::collections::HashMap;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::config::OdesliConfig;

/// A song/track identity inside a resolution payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongEntity {
    pub artist_name: String,
    pub title: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

/// One platform destination for a song. The API sends more fields
/// (entity ids, native app URIs); only the web URL is used.
#[derive(Debug, Clone, Deserialize)]
pub struct PlatformLink {
    pub url: String,
}

/// Successful `/links/byUrl` payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedSong {
    pub entity_unique_id: String,
    #[serde(default)]
    pub entities_by_unique_id: HashMap<String, SongEntity>,
    #[serde(default)]
    pub links_by_platform: HashMap<String, PlatformLink>,
}

impl ResolvedSong {
    /// The entity the payload points at. `None` means the payload is
    /// malformed or empty and the song counts as not found.
    pub fn entity(&self) -> Option<&SongEntity> {
        self.entities_by_unique_id.get(&self.entity_unique_id)
    }
}

/// Looks up every known streaming/purchase destination for a song URL.
#[async_trait]
pub trait SongLookup: Send + Sync {
    async fn links_by_url(&self, url: &str) -> Result<ResolvedSong>;
}

pub struct OdesliClient {
    client: reqwest::Client,
    base_url: String,
}

impl OdesliClient {
    pub fn new(config: &OdesliConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .context("Failed to build Odesli HTTP client")?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl SongLookup for OdesliClient {
    async fn links_by_url(&self, url: &str) -> Result<ResolvedSong> {
        let endpoint = format!("{}/links/byUrl", self.base_url);

        debug!("Resolving {} via {}", url, endpoint);

        let response = self
            .client
            .get(&endpoint)
            .query(&[("url", url)])
            .send()
            .await
            .context("Failed to send request to Odesli")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Odesli API error ({})", status);
        }

        response
            .json::<ResolvedSong>()
            .await
            .context("Failed to parse Odesli response")
    }
}
