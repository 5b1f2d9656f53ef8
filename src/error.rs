//! Custom error types for textclassify.
//!
//! Every fallible step returns `Result<T, ClassifyError>`. The `Option`-returning
//! entry points (`complete_or_none`, `classify_with_confidence`) log the error
//! and collapse it to `None`.

use thiserror::Error;

/// Main error type for textclassify operations.
#[derive(Debug, Error)]
pub enum ClassifyError {
    /// Network/HTTP request error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Provider returned a non-success status
    #[error("API error: {code} - {message}")]
    Api {
        /// HTTP status code
        code: u16,
        /// Error body from the provider
        message: String,
    },

    /// Provider body could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),

    /// Model output contained none of the expected markers
    #[error("Format mismatch: {0}")]
    FormatMismatch(String),

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias using `ClassifyError`
pub type Result<T> = std::result::Result<T, ClassifyError>;

/// Extension trait for adding context to Option types
pub trait OptionExt<T> {
    /// Convert Option to Result with a parse error message
    fn ok_or_parse(self, msg: &str) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_parse(self, msg: &str) -> Result<T> {
        self.ok_or_else(|| ClassifyError::Parse(msg.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_or_parse() {
        let missing: Option<u8> = None;
        match missing.ok_or_parse("no content") {
            Err(ClassifyError::Parse(msg)) => assert_eq!(msg, "no content"),
            other => panic!("unexpected: {:?}", other),
        }
        assert_eq!(Some(3).ok_or_parse("unused").ok(), Some(3));
    }

    #[test]
    fn test_api_error_display() {
        let err = ClassifyError::Api {
            code: 401,
            message: "invalid key".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 401 - invalid key");
    }
}
