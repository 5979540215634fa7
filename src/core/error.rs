//! Error types for the color-scale engine
//!
//! Engine operations are total wherever possible: numeric inputs are clamped
//! rather than rejected. Errors only surface for malformed color strings and
//! for the file/config plumbing around the engine.

use thiserror::Error;

/// Main error type for scale generation, palettes and export
#[derive(Error, Debug)]
pub enum ScaleError {
    /// A color string was not exactly six hex digits (with optional `#`)
    #[error("Invalid hex color '{0}': expected 6 hex digits, optionally prefixed with '#'")]
    InvalidHex(String),

    /// A palette entry referenced a scale name that does not exist
    #[error("Unknown scale '{0}'")]
    UnknownScale(String),

    /// Harmonize references between palette entries form a loop
    #[error("Harmonize references form a cycle involving '{0}'")]
    HarmonizeCycle(String),

    /// Two palette entries share a name
    #[error("Duplicate scale name '{0}'")]
    DuplicateScale(String),

    /// General I/O error
    #[error("IO error: {0}")]
    IoError(String),

    /// Token export could not be serialized
    #[error("Export failed: {0}")]
    ExportError(#[from] serde_json::Error),

    /// Configuration could not be loaded or saved
    #[error("Configuration error: {0}")]
    ConfigError(#[from] crate::core::config::ConfigError),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, ScaleError>;

impl From<std::io::Error> for ScaleError {
    fn from(err: std::io::Error) -> Self {
        ScaleError::IoError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_hex_message() {
        let err = ScaleError::InvalidHex("#12345".to_string());
        assert!(err.to_string().contains("#12345"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: ScaleError = io.into();
        assert!(matches!(err, ScaleError::IoError(ref msg) if msg.contains("missing")));
    }
}
