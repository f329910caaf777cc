//! Message formatting for Telegram alerts.
//!
//! Tables are rendered with `tabled` in ASCII style and wrapped in a
//! MarkdownV2 code block so columns stay aligned in the chat client.

use tabled::settings::{Panel, Style};
use tabled::{Table, Tabled};

use crate::domain::{ConsolidationRow, ExchangeRate, Movement, Window};

/// Telegram rejects messages above 4096 characters.
pub const MAX_MESSAGE_CHARS: usize = 4000;

#[derive(Tabled)]
struct MoverLine {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "10m")]
    minute10: String,
    #[tabled(rename = "1h")]
    hour: String,
    #[tabled(rename = "4h")]
    hour4: String,
    #[tabled(rename = "12h")]
    hour12: String,
    #[tabled(rename = "24h")]
    hour24: String,
}

#[derive(Tabled)]
struct RateLine {
    #[tabled(rename = "Name")]
    name: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Tabled)]
struct ConsolidationLine {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Avg open")]
    avg_open: String,
    #[tabled(rename = "Avg close")]
    avg_close: String,
    #[tabled(rename = "Price")]
    price: String,
}

/// Table of coins that moved, or an empty string when none did.
#[must_use]
pub fn movers_table(movements: &[Movement]) -> String {
    if movements.is_empty() {
        return String::new();
    }

    let lines = movements.iter().map(|m| MoverLine {
        name: format!("{} [{}]", m.code, m.rank),
        minute10: format_number(m.changes.get(Window::Minute10)),
        hour: format_number(m.changes.get(Window::Hour)),
        hour4: format_number(m.changes.get(Window::Hour4)),
        hour12: format_number(m.changes.get(Window::Hour12)),
        hour24: format_number(m.changes.get(Window::Hour24)),
    });

    Table::new(lines)
        .with(Style::ascii())
        .with(Panel::footer("Coins."))
        .to_string()
}

/// Name/value table describing one coin's recent range.
#[must_use]
pub fn rate_table(rate: &ExchangeRate) -> String {
    let changes = rate.changes();
    let min_open = &rate.min_open;
    let max_close = &rate.max_close;

    let lines = [
        ("Coin id", rate.coin_id.to_string()),
        ("Coin", rate.code.to_string()),
        ("Rank", rate.rank.to_string()),
        ("10 Minute", format_number(changes.minute10)),
        ("Hour", format_number(changes.hour)),
        ("4 Hour", format_number(changes.hour4)),
        ("12 Hour", format_number(changes.hour12)),
        ("24 Hour", format_number(changes.hour24)),
        ("10 Min open", format_number(min_open.minute10)),
        ("10 Max close", format_number(max_close.minute10)),
        ("Hour min open", format_number(min_open.hour)),
        ("Hour max close", format_number(max_close.hour)),
        ("4 Hour min open", format_number(min_open.hour4)),
        ("4 Hour max close", format_number(max_close.hour4)),
        ("12 Hour min open", format_number(min_open.hour12)),
        ("12 Hour max close", format_number(max_close.hour12)),
        ("24 Hour min open", format_number(min_open.hour24)),
        ("24 Hour max close", format_number(max_close.hour24)),
    ]
    .into_iter()
    .map(|(name, value)| RateLine { name, value });

    Table::new(lines).with(Style::ascii()).to_string()
}

/// Table of consolidating coins, cut to at most `max_chars` characters.
#[must_use]
pub fn consolidation_table(rows: &[ConsolidationRow], max_chars: usize) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let lines = rows.iter().map(|r| ConsolidationLine {
        name: r.code.to_string(),
        avg_open: format_number(r.avg_open),
        avg_close: format_number(r.avg_close),
        price: format_number(r.price),
    });

    let table = Table::new(lines)
        .with(Style::ascii())
        .with(Panel::footer("Coins in period consolidation"))
        .to_string();

    truncate_chars(&table, max_chars)
}

/// Wrap text in a MarkdownV2 pre-formatted block.
#[must_use]
pub fn code_block(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        if c == '`' || c == '\\' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    format!("```\n{escaped}\n```")
}

/// Escape special characters for Telegram `MarkdownV2`.
#[must_use]
pub fn escape_markdown(text: &str) -> String {
    let special_chars = [
        '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
        '\\',
    ];
    let mut result = String::with_capacity(text.len() * 2);

    for c in text.chars() {
        if special_chars.contains(&c) {
            result.push('\\');
        }
        result.push(c);
    }

    result
}

/// Keep at most `max_chars` characters (Unicode-safe).
#[must_use]
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

/// Up to eight decimals and no trailing zeros, `-` when unknown.
///
/// Used for prices and percent changes alike.
#[must_use]
pub fn format_number(value: Option<f64>) -> String {
    let Some(v) = value else {
        return "-".to_string();
    };
    let text = format!("{v:.8}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}
