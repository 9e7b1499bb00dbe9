use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::AppError;

#[derive(Clone, Deserialize, Debug)]
pub struct AppConfig {
    pub tmdb_api_key: String,
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    #[serde(default = "default_tmdb_base_url")]
    pub tmdb_base_url: String,
    #[serde(default = "default_tmdb_timeout_secs")]
    pub tmdb_timeout_secs: u64,
}

/// Port the server binds when `http_port` is unset.
const fn default_http_port() -> u16 {
    8080
}

/// Public TMDB v3 API root.
fn default_tmdb_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

/// Per-request timeout for TMDB calls.
const fn default_tmdb_timeout_secs() -> u64 {
    10
}

impl AppConfig {
    /// Rejects settings the server cannot run with. An empty key counts as missing.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.tmdb_api_key.trim().is_empty() {
            return Err(AppError::Validation(
                "tmdb_api_key is not set (TMDB_API_KEY)".to_string(),
            ));
        }
        if self.tmdb_timeout_secs == 0 {
            return Err(AppError::Validation(
                "tmdb_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

pub fn get_config() -> Result<AppConfig, AppError> {
    let config = Config::builder()
        .add_source(File::with_name("config").required(false))
        .add_source(Environment::default())
        .build()?;

    parse_config(config)
}

/// Deserializes and validates a built `Config`.
fn parse_config(config: Config) -> Result<AppConfig, AppError> {
    let app_config: AppConfig = config.try_deserialize()?;
    app_config.validate()?;
    Ok(app_config)
}
