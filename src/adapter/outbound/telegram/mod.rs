//! Telegram delivery and message formatting.

pub mod format;
pub mod messenger;

pub use messenger::TelegramMessenger;
