//! Classification of incoming chat messages.

use crate::domain::ChartInterval;

/// Keyboard button: BTC chart at the default interval.
pub const BUTTON_BTC: &str = "Btc ❤️";
/// Keyboard button: BTC chart over ten minutes.
pub const BUTTON_BTC_10M: &str = "Btc ❤️ 10m";
/// Keyboard button: BTC chart over one hour.
pub const BUTTON_BTC_1H: &str = "Btc ❤️ 1H";
/// Keyboard button: current movers table.
pub const BUTTON_MOVERS: &str = "Есь че? 😘";

/// What a chat message asks the bot to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotRequest {
    Start,
    Status,
    /// A `/command` the bot does not handle.
    UnknownCommand(String),
    /// BTC chart over the given interval.
    Chart(ChartInterval),
    Movers,
    /// Anything else; treated as a coin rate query.
    RateQuery(String),
}

/// Parse a message text into a request.
///
/// Commands win over everything else; `/start@my_bot` is the same as
/// `/start`.
#[must_use]
pub fn parse_request(text: &str) -> BotRequest {
    let trimmed = text.trim();

    if let Some(raw_command) = trimmed
        .split_whitespace()
        .next()
        .filter(|t| t.starts_with('/'))
    {
        let command = raw_command
            .split_once('@')
            .map_or(raw_command, |(head, _)| head);
        return match command {
            "/start" => BotRequest::Start,
            "/status" => BotRequest::Status,
            other => BotRequest::UnknownCommand(other.to_string()),
        };
    }

    match trimmed {
        BUTTON_BTC => BotRequest::Chart(ChartInterval::FourHours),
        BUTTON_BTC_10M => BotRequest::Chart(ChartInterval::TenMinutes),
        BUTTON_BTC_1H => BotRequest::Chart(ChartInterval::OneHour),
        BUTTON_MOVERS => BotRequest::Movers,
        _ => BotRequest::RateQuery(text.to_string()),
    }
}

/// Bot commands for Telegram menu registration.
///
/// Returns tuples of (command, description) for `set_my_commands`.
#[must_use]
pub fn bot_commands() -> Vec<(&'static str, &'static str)> {
    vec![
        ("start", "Subscribe to coin movement alerts"),
        ("status", "Check that the bot is alive"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_commands() {
        assert_eq!(parse_request("/start"), BotRequest::Start);
        assert_eq!(parse_request("/status"), BotRequest::Status);
    }

    #[test]
    fn parse_command_with_bot_mention() {
        assert_eq!(parse_request("/start@klinewatch_bot"), BotRequest::Start);
        assert_eq!(parse_request("/status@other"), BotRequest::Status);
    }

    #[test]
    fn parse_unknown_command() {
        assert_eq!(
            parse_request("/report"),
            BotRequest::UnknownCommand("/report".into())
        );
    }

    #[test]
    fn parse_keyboard_buttons() {
        assert_eq!(
            parse_request(BUTTON_BTC),
            BotRequest::Chart(ChartInterval::FourHours)
        );
        assert_eq!(
            parse_request(BUTTON_BTC_10M),
            BotRequest::Chart(ChartInterval::TenMinutes)
        );
        assert_eq!(
            parse_request(BUTTON_BTC_1H),
            BotRequest::Chart(ChartInterval::OneHour)
        );
        assert_eq!(parse_request(BUTTON_MOVERS), BotRequest::Movers);
    }

    #[test]
    fn other_text_is_a_rate_query() {
        assert_eq!(
            parse_request("eth?"),
            BotRequest::RateQuery("eth?".into())
        );
        assert_eq!(parse_request(""), BotRequest::RateQuery(String::new()));
    }

    #[test]
    fn commands_are_case_sensitive() {
        assert_eq!(
            parse_request("/START"),
            BotRequest::UnknownCommand("/START".into())
        );
    }
}
