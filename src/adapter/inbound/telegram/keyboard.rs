//! Reply keyboard shown under every bot answer.

use teloxide::types::{KeyboardButton, KeyboardMarkup};

use super::request::{BUTTON_BTC, BUTTON_BTC_10M, BUTTON_BTC_1H, BUTTON_MOVERS};

/// Button labels, row by row.
#[must_use]
pub fn keyboard_rows() -> Vec<Vec<&'static str>> {
    vec![
        vec![BUTTON_BTC, BUTTON_BTC_10M, BUTTON_BTC_1H],
        vec![BUTTON_MOVERS],
    ]
}

#[must_use]
pub fn reply_keyboard() -> KeyboardMarkup {
    let rows = keyboard_rows()
        .into_iter()
        .map(|row| row.into_iter().map(KeyboardButton::new).collect::<Vec<_>>());
    KeyboardMarkup::new(rows).resize_keyboard()
}
