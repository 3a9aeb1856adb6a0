//! Error types for the idguard-core library.
//!
//! Extraction and masking themselves are infallible: a rule that finds
//! nothing yields `FieldValue::NotFound` and masking with no match returns the
//! input unchanged. Errors only come from the edges, i.e. loading
//! configuration and compiling vocabularies built from it.

use thiserror::Error;

/// Main error type for the idguard library.
#[derive(Error, Debug)]
pub enum IdguardError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pattern compilation error.
    #[error("pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors related to configuration values.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The redaction token would be empty.
    #[error("redaction width must be greater than zero")]
    ZeroRedactionWidth,

    /// The redaction character could itself be matched by a redaction pattern.
    #[error("redaction character {0:?} must not be a letter, digit, whitespace or one of ._%+-@,/:")]
    MatchableRedactionChar(char),

    /// The identity keyword list is empty.
    #[error("at least one identity keyword is required")]
    NoIdentityKeywords,

    /// A vocabulary entry is blank.
    #[error("blank entry in {0}")]
    BlankEntry(&'static str),
}

/// Result type for the idguard library.
pub type Result<T> = std::result::Result<T, IdguardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_wraps() {
        let err: IdguardError = ConfigError::ZeroRedactionWidth.into();
        assert_eq!(
            err.to_string(),
            "configuration error: redaction width must be greater than zero"
        );
    }
}
