//! Shazam share-link detection and resolution to a canonical streaming URL.
//!
//! The resolution service cannot look up Shazam identifiers directly, so a
//! share link is first converted to the Apple Music URL embedded in the
//! Shazam track page.

use std::sync::LazyLock;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use regex::Regex;
use tracing::debug;

static SHAZAM_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://(?:www\.)?shazam\.com/(?:[a-z]{2}(?:-[a-zA-Z]{2})?/)?(?:track|song)/")
        .expect("Shazam URL regex must compile")
});

static APPLE_MUSIC_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"https://(?:geo\.)?music\.apple\.com/[^\s"'<>\\]+"#)
        .expect("Apple Music URL regex must compile")
});

/// True when the URL points at a Shazam share page.
pub fn is_shazam_link(url: &str) -> bool {
    SHAZAM_URL.is_match(url)
}

/// Converts a share-service URL into a canonical streaming URL.
#[async_trait]
pub trait ShareLinkResolver: Send + Sync {
    /// `Ok(None)` means the service could not identify the track.
    async fn canonical_url(&self, url: &str) -> Result<Option<String>>;
}

pub struct ShazamClient {
    client: reqwest::Client,
}

impl ShazamClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build Shazam HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ShareLinkResolver for ShazamClient {
    async fn canonical_url(&self, url: &str) -> Result<Option<String>> {
        debug!("Fetching Shazam page {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to fetch Shazam page")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Shazam returned {}", status);
        }

        let body = response
            .text()
            .await
            .context("Failed to read Shazam page body")?;

        Ok(apple_music_link(&body))
    }
}

/// First Apple Music URL embedded in a Shazam track page, if any.
/// The page serves HTML, so `&` arrives entity-encoded.
fn apple_music_link(html: &str) -> Option<String> {
    APPLE_MUSIC_URL
        .find(html)
        .map(|m| m.as_str().replace("&amp;", "&"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_shazam_track_links() {
        assert!(is_shazam_link("https://www.shazam.com/track/58910978/baby-shark"));
        assert!(is_shazam_link("https://shazam.com/song/1443109064"));
        assert!(is_shazam_link("http://www.shazam.com/en-US/track/5933917/rehab"));
    }

    #[test]
    fn test_ignores_other_music_links() {
        assert!(!is_shazam_link("https://open.spotify.com/track/abc"));
        assert!(!is_shazam_link("https://music.apple.com/us/album/x/123"));
        assert!(!is_shazam_link("https://www.shazam.com/apps"));
    }

    #[test]
    fn test_extracts_apple_music_link_from_page() {
        let html = r#"<html><a class="store" href="https://music.apple.com/us/album/rehab/12345?i=678&amp;at=partner">Open</a></html>"#;
        assert_eq!(
            apple_music_link(html).as_deref(),
            Some("https://music.apple.com/us/album/rehab/12345?i=678&at=partner")
        );
    }

    #[test]
    fn test_page_without_store_link_yields_none() {
        assert_eq!(apple_music_link("<html><body>not identified</body></html>"), None);
    }
}
