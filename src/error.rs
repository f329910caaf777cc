use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Outcome of a failed delivery to a single chat.
///
/// A chat that blocked the bot is reported separately so the caller can
/// disable the subscriber instead of retrying on every pass.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("bot was blocked by the user")]
    Blocked,

    #[error("delivery failed: {0}")]
    Failed(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("chart error: {0}")]
    Chart(String),

    #[error("telegram error: {0}")]
    Telegram(String),

    #[error("background task failed: {0}")]
    Task(String),

    #[error("{0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<teloxide::RequestError> for Error {
    fn from(err: teloxide::RequestError) -> Self {
        Error::Telegram(err.to_string())
    }
}
