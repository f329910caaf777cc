//! Coin identifiers parsed from chat messages.

use std::fmt;

use thiserror::Error;

/// Longest accepted coin code, exclusive.
const MAX_CODE_LEN: usize = 10;

/// Coin ticker used by the `coins.code` column, e.g. `BTC`.
///
/// The inner String is private to ensure codes are always uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CoinCode(String);

/// Reasons a chat message is not a usable coin query.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoinQueryError {
    /// The message is missing the trailing `?` marker.
    #[error("no correct coin")]
    NotAQuery,

    /// The code is empty or too long to be a ticker.
    #[error("no correct coin")]
    InvalidCode,
}

impl CoinCode {
    /// Create a code from a ticker, normalising it to uppercase.
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_uppercase())
    }

    /// Parse a rate query such as `eth?` or ` Sol ? `.
    ///
    /// The message must contain a `?`; every `?` is stripped and the rest
    /// must be a non-empty code shorter than ten characters.
    pub fn parse_query(message: &str) -> Result<Self, CoinQueryError> {
        let message = message.trim().to_uppercase();

        if !message.contains('?') {
            return Err(CoinQueryError::NotAQuery);
        }

        let code: String = message.chars().filter(|c| *c != '?').collect();
        let code = code.trim();

        if code.is_empty() || code.chars().count() >= MAX_CODE_LEN {
            return Err(CoinQueryError::InvalidCode);
        }

        Ok(Self(code.to_string()))
    }

    /// Bitcoin, the coin charted when nothing else is asked for.
    #[must_use]
    pub fn btc() -> Self {
        Self("BTC".into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CoinCode {
    fn default() -> Self {
        Self::btc()
    }
}

impl fmt::Display for CoinCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
