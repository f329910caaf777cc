//! Telegram delivery for alerts and charts.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{InputFile, ParseMode};
use teloxide::{ApiError, RequestError};

use crate::error::DeliveryError;
use crate::port::outbound::Messenger;

/// Sends messages through a shared teloxide [`Bot`].
#[derive(Clone)]
pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    #[must_use]
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Messenger for TelegramMessenger {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<(), DeliveryError> {
        self.bot
            .send_message(ChatId(chat_id), text)
            .parse_mode(ParseMode::MarkdownV2)
            .await
            .map(|_| ())
            .map_err(classify)
    }

    async fn send_photo(&self, chat_id: i64, png: Vec<u8>) -> Result<(), DeliveryError> {
        let photo = InputFile::memory(png).file_name("chart.png");
        self.bot
            .send_photo(ChatId(chat_id), photo)
            .await
            .map(|_| ())
            .map_err(classify)
    }
}

/// Separate "the user blocked us" from every other failure.
pub fn classify(err: RequestError) -> DeliveryError {
    match err {
        RequestError::Api(ApiError::BotBlocked) => DeliveryError::Blocked,
        other => {
            let text = other.to_string();
            if text.contains("bot was blocked by the user") {
                DeliveryError::Blocked
            } else {
                DeliveryError::Failed(text)
            }
        }
    }
}
