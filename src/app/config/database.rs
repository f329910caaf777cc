//! Database connection configuration.

use serde::Deserialize;

const fn default_port() -> u16 {
    5432
}

const fn default_pool_size() -> u32 {
    5
}

/// PostgreSQL connection settings.
///
/// `url` wins over the individual fields when set.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub user: String,
    /// Overridden by `DATABASE_PASSWORD`; keep it out of the file.
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub dbname: String,
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
    /// Apply the bundled migrations at startup.
    #[serde(default)]
    pub run_migrations: bool,
}

impl DatabaseConfig {
    /// Connection string understood by libpq.
    #[must_use]
    pub fn connection_string(&self) -> String {
        if let Some(url) = &self.url {
            return url.clone();
        }

        let mut parts = vec![
            format!("host={}", quote(&self.host)),
            format!("port={}", self.port),
            format!("dbname={}", quote(&self.dbname)),
        ];
        if !self.user.is_empty() {
            parts.push(format!("user={}", quote(&self.user)));
        }
        if !self.password.is_empty() {
            parts.push(format!("password={}", quote(&self.password)));
        }
        parts.join(" ")
    }
}

/// Quote a libpq keyword value.
fn quote(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{escaped}'")
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: "localhost".into(),
            port: default_port(),
            user: String::new(),
            password: String::new(),
            dbname: String::new(),
            pool_size: default_pool_size(),
            run_migrations: false,
        }
    }
}
