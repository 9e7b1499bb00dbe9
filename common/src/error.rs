use reqwest::StatusCode;
use thiserror::Error;

// Core internal errors
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("Upstream returned {status} for {url}")]
    UpstreamStatus { status: StatusCode, url: String },
    #[error("Url error: {0}")]
    Url(#[from] url::ParseError),
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// True for failures talking to the remote movie database.
    pub const fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::Reqwest(_) | Self::UpstreamStatus { .. } | Self::Url(_)
        )
    }
}
