//! Telegram bot configuration.

use serde::Deserialize;

/// Telegram bot configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TelegramAppConfig {
    /// Bot API token obtained from BotFather. Overridden by
    /// `TELEGRAM_BOT_TOKEN`.
    #[serde(default)]
    pub bot_token: String,
}

impl TelegramAppConfig {
    /// Token with everything but the last four characters hidden.
    #[must_use]
    pub fn masked_token(&self) -> String {
        let chars: Vec<char> = self.bot_token.chars().collect();
        if chars.len() <= 4 {
            return "*".repeat(chars.len());
        }
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}{tail}", "*".repeat(chars.len() - 4))
    }
}
