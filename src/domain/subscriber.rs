//! Chat users receiving alerts.

use chrono::{DateTime, Utc};

/// A chat registered for alerts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscriber {
    pub id: i64,
    pub telegram_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
}

/// Details of a chat that just wrote to the bot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewSubscriber {
    pub telegram_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
}

/// Which enabled subscribers an outbound message goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    Everyone,
    Chat(i64),
}

impl Audience {
    /// The chat filter, if any.
    #[must_use]
    pub const fn telegram_id(self) -> Option<i64> {
        match self {
            Self::Everyone => None,
            Self::Chat(id) => Some(id),
        }
    }
}
