use clap::Parser;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/client.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Backend endpoint, e.g. `http://127.0.0.1:3000`. Required.
    pub base_url: String,
    /// Public API key sent as `x-api-key` on every request. Required.
    pub api_key: String,
    pub username: String,
    /// Where the legacy JSON snapshot lives.
    pub state_path: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            username: String::new(),
            state_path: crate::local_state::default_state_path().to_string(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "masruf_client", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override base URL (e.g. http://127.0.0.1:3000).
    #[arg(long)]
    base_url: Option<String>,
    /// Override the public API key.
    #[arg(long)]
    api_key: Option<String>,
    /// Override username (password is never read from CLI).
    #[arg(long)]
    username: Option<String>,
    /// Override the local snapshot path.
    #[arg(long)]
    state_path: Option<String>,
}

pub fn load() -> Result<AppConfig> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("MASRUF_CLIENT"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(api_key) = args.api_key {
        settings.api_key = api_key;
    }
    if let Some(username) = args.username {
        settings.username = username;
    }
    if let Some(state_path) = args.state_path {
        settings.state_path = state_path;
    }

    settings.validate()?;
    Ok(settings)
}

impl AppConfig {
    /// The backend endpoint and API key have no usable defaults; starting
    /// without them is a configuration error, not a runtime one.
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "base_url is required and has no default".to_string(),
            )
            .into());
        }
        if self.api_key.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "api_key is required and has no default".to_string(),
            )
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::error::AppError;

    use super::*;

    #[test]
    fn missing_base_url_is_fatal() {
        let settings = AppConfig {
            api_key: "public-anon-key".to_string(),
            ..AppConfig::default()
        };
        assert!(matches!(settings.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn missing_api_key_is_fatal() {
        let settings = AppConfig {
            base_url: "http://127.0.0.1:3000".to_string(),
            ..AppConfig::default()
        };
        assert!(matches!(settings.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn complete_settings_validate() {
        let settings = AppConfig {
            base_url: "http://127.0.0.1:3000".to_string(),
            api_key: "public-anon-key".to_string(),
            ..AppConfig::default()
        };
        assert!(settings.validate().is_ok());
    }
}
