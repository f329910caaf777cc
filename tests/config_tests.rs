use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use klinewatch::app::config::Config;
use klinewatch::error::{ConfigError, Error};

static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);
static ENV_LOCK: Mutex<()> = Mutex::new(());

const SECRETS: [&str; 3] = ["TELEGRAM_BOT_TOKEN", "DATABASE_PASSWORD", "DATABASE_URL"];

fn write_temp_config(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
    let suffix = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let path = dir.path().join(format!("klinewatch-{suffix}.toml"));
    fs::write(&path, contents).expect("write temp config");
    path
}

/// Load with the secret variables cleared, then set to `env`.
fn load_with_env(contents: &str, env: &[(&str, &str)]) -> Result<Config, Error> {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    for key in SECRETS {
        std::env::remove_var(key);
    }
    for (key, value) in env {
        std::env::set_var(key, value);
    }

    let dir = tempfile::tempdir().expect("temp dir");
    let path = write_temp_config(&dir, contents);
    let result = Config::load(&path);

    for key in SECRETS {
        std::env::remove_var(key);
    }
    result
}

const MINIMAL: &str = r#"
[logging]
level = "debug"
format = "json"

[database]
host = "db"
dbname = "klines"
user = "bot"

[telegram]
bot_token = "123:file"
"#;

#[test]
fn minimal_config_fills_defaults() {
    let config = load_with_env(MINIMAL, &[]).unwrap();

    assert_eq!(config.logging.format, "json");
    assert_eq!(config.database.port, 5432);
    assert_eq!(config.schedule.notification_tick_secs, 45);
    assert_eq!(config.schedule.consolidation_hour, 10);
    assert_eq!(config.signals.candidate_limit, 45);
    assert_eq!(config.signals.thresholds.hour24, 10.0);
    assert_eq!(config.consolidation.band.min_percent, -3.0);
    assert_eq!(config.consolidation.max_message_chars, 4000);
}

#[test]
fn env_overrides_secrets() {
    let config = load_with_env(
        MINIMAL,
        &[
            ("TELEGRAM_BOT_TOKEN", "999:env"),
            ("DATABASE_PASSWORD", "s3cret"),
        ],
    )
    .unwrap();

    assert_eq!(config.telegram.bot_token, "999:env");
    assert!(config
        .database
        .connection_string()
        .contains("password='s3cret'"));
}

#[test]
fn missing_token_is_rejected() {
    let toml = r#"
[database]
dbname = "klines"
"#;

    match load_with_env(toml, &[]) {
        Err(Error::Config(ConfigError::MissingField {
            field: "telegram.bot_token",
        })) => {}
        Err(err) => panic!("Expected missing token error, got {err}"),
        Ok(_) => panic!("Expected missing token to be rejected"),
    }
}

#[test]
fn database_url_replaces_dbname() {
    let toml = r#"
[telegram]
bot_token = "123:file"
"#;

    let config = load_with_env(toml, &[("DATABASE_URL", "postgres://bot@db/klines")]).unwrap();
    assert_eq!(config.database.connection_string(), "postgres://bot@db/klines");
}

#[test]
fn invalid_notification_minute_is_rejected() {
    let toml = format!("{MINIMAL}\n[schedule]\nnotification_minutes = [0, 60]\n");

    assert!(matches!(
        load_with_env(&toml, &[]),
        Err(Error::Config(ConfigError::InvalidValue {
            field: "schedule.notification_minutes",
            ..
        }))
    ));
}

#[test]
fn negative_threshold_is_rejected() {
    let toml = format!("{MINIMAL}\n[signals.thresholds]\nhour = -1.0\n");

    assert!(matches!(
        load_with_env(&toml, &[]),
        Err(Error::Config(ConfigError::InvalidValue {
            field: "signals.thresholds",
            ..
        }))
    ));
}

#[test]
fn unreadable_file_is_a_read_error() {
    let result = Config::load("/nonexistent/klinewatch.toml");
    assert!(matches!(result, Err(Error::Config(ConfigError::ReadFile(_)))));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    assert!(matches!(
        load_with_env("[logging\nlevel = ", &[]),
        Err(Error::Config(ConfigError::Parse(_)))
    ));
}
