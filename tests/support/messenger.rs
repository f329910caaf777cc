use std::collections::HashSet;

use async_trait::async_trait;
use parking_lot::Mutex;

use klinewatch::error::DeliveryError;
use klinewatch::port::outbound::Messenger;

/// Reason reported for texts marked with [`RecordingMessenger::fail_text`].
pub const FAILED_SEND_REASON: &str = "Bad Request: can't parse entities";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Text(i64, String),
    Photo(i64, Vec<u8>),
}

/// Records deliveries; chats can be marked blocked or failing.
#[derive(Default)]
pub struct RecordingMessenger {
    sent: Mutex<Vec<Sent>>,
    blocked: Mutex<HashSet<i64>>,
    failing_text: Mutex<HashSet<String>>,
}

impl RecordingMessenger {
    pub fn block(&self, chat_id: i64) {
        self.blocked.lock().insert(chat_id);
    }

    /// Fail every send of exactly this text.
    pub fn fail_text(&self, text: &str) {
        self.failing_text.lock().insert(text.to_string());
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().clone()
    }

    pub fn texts_to(&self, chat_id: i64) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Text(id, text) if id == chat_id => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn photos_to(&self, chat_id: i64) -> usize {
        self.sent()
            .iter()
            .filter(|s| matches!(s, Sent::Photo(id, _) if *id == chat_id))
            .count()
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<(), DeliveryError> {
        tokio::task::yield_now().await;
        if self.blocked.lock().contains(&chat_id) {
            return Err(DeliveryError::Blocked);
        }
        if self.failing_text.lock().contains(text) {
            return Err(DeliveryError::Failed(FAILED_SEND_REASON.into()));
        }
        self.sent.lock().push(Sent::Text(chat_id, text.to_string()));
        Ok(())
    }

    async fn send_photo(&self, chat_id: i64, png: Vec<u8>) -> Result<(), DeliveryError> {
        tokio::task::yield_now().await;
        if self.blocked.lock().contains(&chat_id) {
            return Err(DeliveryError::Blocked);
        }
        self.sent.lock().push(Sent::Photo(chat_id, png));
        Ok(())
    }
}
