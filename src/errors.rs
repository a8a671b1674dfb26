//! Error types for curlimport

use thiserror::Error;

/// Main error type for curlimport
#[derive(Error, Debug)]
pub enum CurlImportError {
    #[error("not a curl command")]
    NotCurl,

    #[error("no URL found in curl command")]
    MissingUrl,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid argument: {0}")]
    Argument(String),
}

impl CurlImportError {
    /// Message shown to the user for this error
    pub fn user_message(&self) -> String {
        match self {
            CurlImportError::NotCurl => {
                "Invalid cURL command. Please ensure it starts with 'curl'.".to_string()
            }
            CurlImportError::MissingUrl => {
                "Failed to parse cURL command: no http:// or https:// URL found.".to_string()
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CurlImportError>;
