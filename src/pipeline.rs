//! Per-message processing pipeline:
//! extract → normalize → resolve (per URL) → compose → reply.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::LinksConfig;
use crate::extract;
use crate::i18n::{self, MessageKey};
use crate::odesli::SongLookup;
use crate::reply::{self, SongCard};
use crate::shazam::{self, ShareLinkResolver};

/// A message as delivered by the bot platform.
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub chat_id: i64,
    pub message_id: i32,
    pub is_private: bool,
    pub text: Option<String>,
    /// Sender's Telegram language code, used to pick reply templates.
    pub locale: Option<String>,
}

/// Outbound operations on the chat a message arrived from.
/// Every reply is sent with notifications suppressed.
#[async_trait]
pub trait ReplySink: Send + Sync {
    /// Markdown text message, optionally with link previews disabled.
    async fn send_markdown(&self, text: &str, disable_preview: bool) -> Result<()>;
    /// Photo by URL with a Markdown caption.
    async fn send_photo(&self, photo_url: &str, caption: &str) -> Result<()>;
    /// Delete the originating message.
    async fn delete_message(&self) -> Result<()>;
}

/// Per-message failure modes. Only [`PipelineError::NoTextInMessage`]
/// escapes [`Pipeline::process`]; the rest are recovered with a chat reply
/// or a silent drop.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("no text in message")]
    NoTextInMessage,
    #[error("no music links in message")]
    NoLinksFound,
    #[error("no data for link {0}")]
    LinkNotResolved(String),
    #[error("could not normalize share link {0}")]
    NormalizationFailed(String),
}

pub struct Pipeline {
    lookup: Arc<dyn SongLookup>,
    sharelink: Arc<dyn ShareLinkResolver>,
    links: LinksConfig,
}

impl Pipeline {
    pub fn new(
        lookup: Arc<dyn SongLookup>,
        sharelink: Arc<dyn ShareLinkResolver>,
        links: LinksConfig,
    ) -> Self {
        Self {
            lookup,
            sharelink,
            links,
        }
    }

    /// Process one incoming message end to end. Non-private chats pass
    /// through untouched; a message without text is the only error that
    /// reaches the caller.
    pub async fn process(
        &self,
        message: &IncomingMessage,
        sink: &dyn ReplySink,
    ) -> Result<(), PipelineError> {
        if !message.is_private {
            return Ok(());
        }

        match self.run(message, sink).await {
            Err(PipelineError::NoLinksFound) => {
                info!("No music links in message {}", message.message_id);
                self.send_text(
                    sink,
                    i18n::t(message.locale.as_deref(), MessageKey::NoMusicLinksInMessage),
                )
                .await;
                Ok(())
            }
            other => other,
        }
    }

    async fn run(
        &self,
        message: &IncomingMessage,
        sink: &dyn ReplySink,
    ) -> Result<(), PipelineError> {
        let text = message
            .text
            .as_deref()
            .ok_or(PipelineError::NoTextInMessage)?;
        let locale = message.locale.as_deref();

        let urls = extract::find_urls(text);
        if urls.is_empty() {
            return Err(PipelineError::NoLinksFound);
        }

        info!(
            "Found {} link(s) in message {} (chat {})",
            urls.len(),
            message.message_id,
            message.chat_id
        );

        // A message carrying a share link is noise once processed; delete it
        // up front, whatever the lookups end up returning. At most once per
        // message.
        if urls.iter().any(|url| shazam::is_shazam_link(url)) {
            if let Err(e) = sink.delete_message().await {
                warn!("Failed to delete share-link message: {:#}", e);
            }
        }

        for url in self.normalize(urls).await {
            if let Err(e) = self.resolve_and_reply(&url, sink, locale).await {
                warn!("{}", e);
                self.send_text(sink, i18n::t(locale, MessageKey::NoDataByLink))
                    .await;
            }
        }

        Ok(())
    }

    /// Single-pass transform mapping each extracted URL to zero or one
    /// lookup-ready URLs, preserving order. Share links that cannot be
    /// identified are dropped without a reply.
    async fn normalize(&self, urls: Vec<String>) -> Vec<String> {
        let mut normalized = Vec::with_capacity(urls.len());
        for url in urls {
            match self.normalize_one(url).await {
                Ok(url) => normalized.push(url),
                Err(e) => warn!("{}", e),
            }
        }
        normalized
    }

    async fn normalize_one(&self, url: String) -> Result<String, PipelineError> {
        if !shazam::is_shazam_link(&url) {
            return Ok(url);
        }
        match self.sharelink.canonical_url(&url).await {
            Ok(Some(canonical)) => {
                info!("Share link {} resolved to {}", url, canonical);
                Ok(canonical)
            }
            Ok(None) => Err(PipelineError::NormalizationFailed(url)),
            Err(e) => {
                error!("Share link lookup failed: {:#}", e);
                Err(PipelineError::NormalizationFailed(url))
            }
        }
    }

    /// Resolve one URL and send the two replies for it. Any lookup failure
    /// or entity-less payload collapses to [`PipelineError::LinkNotResolved`].
    async fn resolve_and_reply(
        &self,
        url: &str,
        sink: &dyn ReplySink,
        locale: Option<&str>,
    ) -> Result<(), PipelineError> {
        let song = self.lookup.links_by_url(url).await.map_err(|e| {
            error!("Error on API request for {}: {:#}", url, e);
            PipelineError::LinkNotResolved(url.to_string())
        })?;

        let card = reply::song_card(&song, url, &self.links)
            .ok_or_else(|| PipelineError::LinkNotResolved(url.to_string()))?;

        match card {
            SongCard::Photo {
                thumbnail_url,
                caption,
            } => {
                if let Err(e) = sink.send_photo(&thumbnail_url, &caption).await {
                    warn!("Failed to send song card: {:#}", e);
                }
            }
            SongCard::Text { text } => {
                if let Err(e) = sink.send_markdown(&text, false).await {
                    warn!("Failed to send song card: {:#}", e);
                }
            }
        }

        let listen_header = i18n::t(locale, MessageKey::Listen);
        let buy_header = i18n::t(locale, MessageKey::Buy);
        if let Some(list) = reply::link_list(&song, listen_header, buy_header, &self.links) {
            if let Err(e) = sink.send_markdown(&list, true).await {
                warn!("Failed to send link list: {:#}", e);
            }
        }

        Ok(())
    }

    async fn send_text(&self, sink: &dyn ReplySink, text: &str) {
        if let Err(e) = sink.send_markdown(text, false).await {
            warn!("Failed to send reply: {:#}", e);
        }
    }
}
