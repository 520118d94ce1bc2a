use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use teloxide::payloads::{SendMessageSetters, SendPhotoSetters};
use teloxide::prelude::*;
use teloxide::sugar::request::RequestLinkPreviewExt;
use teloxide::types::{ChatId, InputFile, MessageId, ParseMode};
use tracing::{error, info, warn};

use crate::config::Config;
use crate::i18n::{self, MessageKey};
use crate::odesli::OdesliClient;
use crate::pipeline::{IncomingMessage, Pipeline, PipelineError, ReplySink};
use crate::shazam::ShazamClient;

/// Shared application state
pub struct AppState {
    pub config: Config,
    pub pipeline: Pipeline,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let odesli = OdesliClient::new(&config.odesli)?;
        let shazam = ShazamClient::new(config.odesli.request_timeout())?;
        let pipeline = Pipeline::new(Arc::new(odesli), Arc::new(shazam), config.links.clone());
        Ok(Self { config, pipeline })
    }
}

/// Start the Telegram bot
pub async fn run(state: Arc<AppState>) -> Result<()> {
    let bot = Bot::new(&state.config.telegram.bot_token);

    info!("Starting Telegram bot...");

    let handler = Update::filter_message().endpoint(handle_message);

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .default_handler(|upd| async move {
            warn!("Unhandled update: {:?}", upd.id);
        })
        .error_handler(LoggingErrorHandler::with_custom_text("bot"))
        .build()
        .dispatch()
        .await;

    Ok(())
}

/// Replies addressed to the chat a message arrived from. Notifications are
/// always suppressed.
struct TelegramSink {
    bot: Bot,
    chat_id: ChatId,
    message_id: MessageId,
}

#[async_trait]
impl ReplySink for TelegramSink {
    async fn send_markdown(&self, text: &str, disable_preview: bool) -> Result<()> {
        let mut request = self
            .bot
            .send_message(self.chat_id, text)
            .parse_mode(ParseMode::Markdown)
            .disable_notification(true);
        if disable_preview {
            request = request.disable_link_preview(true);
        }
        request.await?;
        Ok(())
    }

    async fn send_photo(&self, photo_url: &str, caption: &str) -> Result<()> {
        self.bot
            .send_photo(self.chat_id, InputFile::url(photo_url.parse()?))
            .caption(caption)
            .parse_mode(ParseMode::Markdown)
            .disable_notification(true)
            .await?;
        Ok(())
    }

    async fn delete_message(&self) -> Result<()> {
        self.bot.delete_message(self.chat_id, self.message_id).await?;
        Ok(())
    }
}

async fn handle_message(bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let locale = msg
        .from
        .as_ref()
        .and_then(|user| user.language_code.clone());

    // Commands are answered directly; everything else goes through the
    // pipeline.
    if let Some(text) = msg.text() {
        if text == "/start" {
            bot.send_message(
                msg.chat.id,
                i18n::t(locale.as_deref(), MessageKey::StartCommandReply),
            )
            .parse_mode(ParseMode::Markdown)
            .await?;
            return Ok(());
        }
        if text == "/services" {
            bot.send_message(
                msg.chat.id,
                i18n::t(locale.as_deref(), MessageKey::ServicesCommandReply),
            )
            .parse_mode(ParseMode::Markdown)
            .await?;
            return Ok(());
        }
    }

    let incoming = IncomingMessage {
        chat_id: msg.chat.id.0,
        message_id: msg.id.0,
        is_private: msg.chat.is_private(),
        text: msg.text().map(str::to_string),
        locale,
    };

    let sink = TelegramSink {
        bot,
        chat_id: msg.chat.id,
        message_id: msg.id,
    };

    match state.pipeline.process(&incoming, &sink).await {
        Ok(()) => {}
        Err(PipelineError::NoTextInMessage) => {
            error!(
                "Message {} in chat {} has no text",
                incoming.message_id, incoming.chat_id
            );
        }
        Err(e) => error!("Pipeline error: {}", e),
    }

    Ok(())
}
