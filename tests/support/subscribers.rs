use chrono::Utc;
use parking_lot::Mutex;

use klinewatch::domain::{Audience, NewSubscriber, Subscriber};
use klinewatch::error::Result;
use klinewatch::port::outbound::SubscriberStore;

/// Subscriber table kept in memory.
#[derive(Default)]
pub struct MemorySubscribers {
    rows: Mutex<Vec<Subscriber>>,
}

impl MemorySubscribers {
    pub fn with_chats(chats: &[i64]) -> Self {
        let store = Self::default();
        for chat in chats {
            store
                .register(&NewSubscriber {
                    telegram_id: *chat,
                    first_name: format!("user{chat}"),
                    ..Default::default()
                })
                .unwrap();
        }
        store
    }

    pub fn is_enabled(&self, telegram_id: i64) -> bool {
        self.rows
            .lock()
            .iter()
            .any(|s| s.telegram_id == telegram_id && s.enabled)
    }

    pub fn len(&self) -> usize {
        self.rows.lock().len()
    }
}

impl SubscriberStore for MemorySubscribers {
    fn register(&self, chat: &NewSubscriber) -> Result<Subscriber> {
        let mut rows = self.rows.lock();
        if let Some(existing) = rows.iter_mut().find(|s| s.telegram_id == chat.telegram_id) {
            existing.enabled = true;
            existing.first_name = chat.first_name.clone();
            return Ok(existing.clone());
        }
        let subscriber = Subscriber {
            id: rows.len() as i64 + 1,
            telegram_id: chat.telegram_id,
            first_name: chat.first_name.clone(),
            last_name: chat.last_name.clone(),
            username: chat.username.clone(),
            enabled: true,
            created_at: Utc::now(),
        };
        rows.push(subscriber.clone());
        Ok(subscriber)
    }

    fn enabled(&self, audience: Audience) -> Result<Vec<Subscriber>> {
        Ok(self
            .rows
            .lock()
            .iter()
            .filter(|s| s.enabled)
            .filter(|s| audience.telegram_id().map_or(true, |id| id == s.telegram_id))
            .cloned()
            .collect())
    }

    fn disable(&self, subscriber_id: i64) -> Result<()> {
        if let Some(row) = self.rows.lock().iter_mut().find(|s| s.id == subscriber_id) {
            row.enabled = false;
        }
        Ok(())
    }
}
