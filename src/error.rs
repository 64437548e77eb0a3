//! Error handling for the CV enhancer application

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CvEnhancerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("API unavailable after {attempts} attempts")]
    ApiUnavailable { attempts: u32 },

    #[error("API returned an empty completion")]
    EmptyCompletion,

    #[error("Enhancement failed: {0}")]
    Enhancement(String),

    #[error("Output rendering error: {0}")]
    Rendering(String),
}

pub type Result<T> = std::result::Result<T, CvEnhancerError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for CvEnhancerError {
    fn from(err: anyhow::Error) -> Self {
        CvEnhancerError::Enhancement(err.to_string())
    }
}
