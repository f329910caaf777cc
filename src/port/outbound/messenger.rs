//! Chat delivery port.

use async_trait::async_trait;

use crate::error::DeliveryError;

/// Sends messages to a single chat.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Send MarkdownV2 text.
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<(), DeliveryError>;

    /// Send a PNG image.
    async fn send_photo(&self, chat_id: i64, png: Vec<u8>) -> Result<(), DeliveryError>;
}
