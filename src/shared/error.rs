use thiserror::Error;
use serde::Serialize;

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum AppError {
    #[error("I/O Error: {0}")]
    Io(String),

    #[error("Network Error: {0}")]
    Network(String),

    #[error("Validation Error: {0}")]
    Validation(String),

    #[error("Clipboard Error: {0}")]
    Clipboard(String),

    /// A platform capability (speech recognition, speech synthesis) is missing
    #[error("Unsupported: {0}")]
    Unsupported(String),

    #[error("Configuration Error: {0}")]
    Config(String),

    /// Every translation failure collapses into this variant; callers never
    /// see whether the network, the status code or the payload was at fault.
    #[error("Translation failed")]
    TranslationFailed,

    #[error("Unknown Error: {0}")]
    Unknown(String),
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Validation(format!("Serialization error: {}", err))
    }
}

impl From<keyring::Error> for AppError {
    fn from(err: keyring::Error) -> Self {
        AppError::Config(format!("Keyring error: {}", err))
    }
}

pub type AppResult<T> = Result<T, AppError>;
