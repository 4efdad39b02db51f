//! Error types for the transition extractor

use thiserror::Error;

/// Errors that can occur while extracting or packaging transitions
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// ZIP archive error
    #[error("Archive error: {0}")]
    Archive(String),

    /// I/O error while writing artifacts
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::Serialization(e.to_string())
    }
}

impl From<zip::result::ZipError> for ExtractorError {
    fn from(e: zip::result::ZipError) -> Self {
        ExtractorError::Archive(e.to_string())
    }
}
