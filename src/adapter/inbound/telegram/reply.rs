//! Answers to incoming messages.

use crate::adapter::outbound::telegram::format::escape_markdown;
use crate::app::Broadcaster;
use crate::domain::{ChartInterval, CoinCode};

use super::request::BotRequest;

pub const STATUS_TEXT: &str = "I m ok";
pub const UNKNOWN_COMMAND_TEXT: &str = "I don't know that command";

/// What to send back to the chat that wrote.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reply {
    /// MarkdownV2 text; nothing is sent when empty.
    pub text: String,
    /// Chart to send to the same chat.
    pub chart: Option<(CoinCode, ChartInterval)>,
}

impl Reply {
    fn message(text: String) -> Self {
        Self { text, chart: None }
    }
}

/// Greeting for `/start`.
#[must_use]
pub fn greeting(first_name: &str) -> String {
    format!("Привет {first_name} я буду присылать тебе уведомления о движениях монет")
}

/// Work out the reply to one request.
pub async fn answer(
    broadcaster: &Broadcaster,
    request: BotRequest,
    first_name: &str,
) -> Reply {
    match request {
        BotRequest::Start => Reply::message(escape_markdown(&greeting(first_name))),
        BotRequest::Status => Reply::message(escape_markdown(STATUS_TEXT)),
        BotRequest::UnknownCommand(_) => Reply::message(escape_markdown(UNKNOWN_COMMAND_TEXT)),
        BotRequest::Chart(interval) => Reply {
            text: String::new(),
            chart: Some((CoinCode::btc(), interval)),
        },
        BotRequest::Movers => Reply::message(broadcaster.movers_text().await),
        BotRequest::RateQuery(message) => match broadcaster.rate_text(&message).await {
            Ok((code, text)) => Reply {
                text,
                chart: Some((code, ChartInterval::OneHour)),
            },
            Err(e) => Reply::message(escape_markdown(e.text())),
        },
    }
}
