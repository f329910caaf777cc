//! Subscriber persistence port.

use crate::domain::{Audience, NewSubscriber, Subscriber};
use crate::error::Result;

/// Storage operations for alert subscribers.
pub trait SubscriberStore: Send + Sync {
    /// Register a chat, or return the existing row re-enabled.
    fn register(&self, chat: &NewSubscriber) -> Result<Subscriber>;

    /// Enabled subscribers, optionally narrowed to a single chat.
    fn enabled(&self, audience: Audience) -> Result<Vec<Subscriber>>;

    /// Stop sending to a subscriber.
    fn disable(&self, subscriber_id: i64) -> Result<()>;
}
