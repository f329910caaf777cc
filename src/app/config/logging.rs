//! Logging configuration and initialization.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::Deserialize;
use tracing::warn;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt, EnvFilter};

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`.
    pub format: String,
    /// Append logs to this file instead of stdout.
    pub file: Option<PathBuf>,
}

impl LoggingConfig {
    /// Initialize the tracing subscriber with this logging configuration.
    ///
    /// Falls back to stdout when the log file cannot be opened.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        let mut fallback = None;
        let (writer, ansi) = match &self.file {
            Some(path) => match open_log_file(path) {
                Ok(file) => (BoxMakeWriter::new(Mutex::new(file)), false),
                Err(e) => {
                    fallback = Some((path.clone(), e));
                    (BoxMakeWriter::new(io::stdout), true)
                }
            },
            None => (BoxMakeWriter::new(io::stdout), true),
        };

        match self.format.as_str() {
            "json" => {
                fmt()
                    .json()
                    .with_env_filter(filter)
                    .with_writer(writer)
                    .init();
            }
            _ => {
                fmt()
                    .with_env_filter(filter)
                    .with_ansi(ansi)
                    .with_writer(writer)
                    .init();
            }
        }

        if let Some((path, e)) = fallback {
            warn!(path = %path.display(), error = %e, "Failed to log to file, using stdout");
        }
    }
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
            file: None,
        }
    }
}
