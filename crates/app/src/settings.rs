//! Application settings, read from `settings.toml` with `MASRUF_*`
//! environment overrides.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Database {
    /// In-memory database, lost on exit. Useful for local experiments.
    Memory,
    Sqlite { path: String },
}

#[derive(Clone, Debug, Deserialize)]
pub struct Server {
    pub database: Database,
    pub bind: Option<String>,
    pub port: u16,
    /// Public API key every client must present; `None` disables the check.
    pub api_key: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct App {
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "info".to_string()
}

#[derive(Clone, Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("settings"))
            .add_source(Environment::with_prefix("MASRUF").separator("__"))
            .build()?;

        settings.try_deserialize()
    }
}
