//! Handles settings for the application.
//!
//! Values come from an optional TOML file (`settings.toml` unless `--config`
//! points elsewhere) and are overridden by `BALANCE__`-prefixed environment
//! variables, e.g. `BALANCE__SERVER__PORT=9000`.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    #[default]
    Memory,
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
pub struct App {
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
    pub request_timeout_ms: u64,
    #[serde(default)]
    pub database: Database,
}

#[derive(Debug, Deserialize)]
pub struct Ledger {
    pub max_retries: u32,
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    pub default_limit: u64,
    pub max_limit: u64,
    pub empty_page_is_error: bool,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
    pub ledger: Ledger,
    pub pagination: Pagination,
}

impl Settings {
    pub fn new(path: &str) -> Result<Self, ConfigError> {
        Self::builder()?
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("BALANCE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("app.level", "info")?
            .set_default("server.port", 8080)?
            .set_default("server.request_timeout_ms", 10_000)?
            .set_default("ledger.max_retries", 3)?
            .set_default("pagination.default_limit", 10)?
            .set_default("pagination.max_limit", 100)?
            .set_default("pagination.empty_page_is_error", true)
    }
}
