use thiserror::Error;

/// Top-level error type for the claim trigger
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("External error: {0}")]
    ExternalError(String),

    #[error("Unexpected HTTP status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Short, single-line description used when an attempt is logged as failed.
    pub fn detail(&self) -> String {
        match self {
            AppError::UnexpectedStatus { status, body } if body.trim().is_empty() => {
                format!("HTTP {}", status)
            }
            AppError::UnexpectedStatus { status, body } => {
                format!("HTTP {}: {}", status, body.trim())
            }
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            AppError::Timeout(format!("{}", error))
        } else if error.is_connect() {
            AppError::ExternalError(format!("Connection failed: {}", error))
        } else if error.is_builder() {
            AppError::Internal(format!("HTTP client error: {:?}", error))
        } else {
            AppError::ExternalError(format!("HTTP request error: {}", error))
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(error: config::ConfigError) -> Self {
        AppError::Config(error.to_string())
    }
}

/// Result type alias for the application
pub type AppResult<T> = Result<T, AppError>;
