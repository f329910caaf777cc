//! Signal selection and consolidation report settings.

use serde::Deserialize;

use crate::adapter::outbound::telegram::format::MAX_MESSAGE_CHARS;
use crate::domain::{ConsolidationBand, SignalThresholds};

fn default_quote() -> String {
    "BUSD".into()
}

const fn default_candidate_limit() -> i64 {
    45
}

const fn default_lookback_days() -> i32 {
    14
}

const fn default_max_message_chars() -> usize {
    MAX_MESSAGE_CHARS
}

/// Which coins are scanned and how far they must move to be reported.
#[derive(Debug, Clone, Deserialize)]
pub struct SignalsConfig {
    /// Quote currency of the tracked pairs.
    #[serde(default = "default_quote")]
    pub quote: String,
    /// Coins considered per pass, lowest ids first.
    #[serde(default = "default_candidate_limit")]
    pub candidate_limit: i64,
    #[serde(default)]
    pub thresholds: SignalThresholds,
}

impl Default for SignalsConfig {
    fn default() -> Self {
        Self {
            quote: default_quote(),
            candidate_limit: default_candidate_limit(),
            thresholds: SignalThresholds::default(),
        }
    }
}

/// Daily consolidation report.
#[derive(Debug, Clone, Deserialize)]
pub struct ConsolidationConfig {
    /// Days of daily averages compared against the last close.
    #[serde(default = "default_lookback_days")]
    pub lookback_days: i32,
    #[serde(default)]
    pub band: ConsolidationBand,
    #[serde(default = "default_max_message_chars")]
    pub max_message_chars: usize,
}

impl Default for ConsolidationConfig {
    fn default() -> Self {
        Self {
            lookback_days: default_lookback_days(),
            band: ConsolidationBand::default(),
            max_message_chars: default_max_message_chars(),
        }
    }
}
