//! Telegram chat interface: commands, keyboard buttons and rate queries.

pub mod keyboard;
pub mod listener;
pub mod request;
pub mod reply;

pub use listener::listen;
pub use request::{parse_request, BotRequest};
pub use reply::{answer, Reply};
