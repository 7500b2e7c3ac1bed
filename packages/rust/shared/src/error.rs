//! Error types for the competency dataset converter.
//!
//! Library crates use [`ConverterError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all converter operations.
#[derive(Debug, thiserror::Error)]
pub enum ConverterError {
    /// A file that must be read does not exist.
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Input is not valid JSON.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// An expected key is absent (or has the wrong type) at a tree level.
    #[error("missing field `{field}` in {context}")]
    MissingField { field: String, context: String },

    /// A caller passed a value outside the accepted set (e.g. an unknown label group).
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Record serialization error.
    #[error("serialization error: {0}")]
    Serialize(String),
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ConverterError>;

impl ConverterError {
    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Create a missing-field error for `field`, located by `context`.
    pub fn missing_field(field: impl Into<String>, context: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
            context: context.into(),
        }
    }

    /// Create an invalid-argument error from any displayable message.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: msg.into(),
        }
    }

    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Wrap an error from reading `path`; a missing file becomes [`ConverterError::NotFound`].
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            return Self::NotFound { path };
        }
        Self::Io { path, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = ConverterError::missing_field("text_before", "sentence record #3");
        assert_eq!(
            err.to_string(),
            "missing field `text_before` in sentence record #3"
        );

        let err = ConverterError::invalid_argument("unknown label group 'foo'");
        assert!(err.to_string().contains("unknown label group 'foo'"));
    }

    #[test]
    fn read_not_found_becomes_not_found() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = ConverterError::read("competency_dataset.json", source);
        assert!(matches!(err, ConverterError::NotFound { .. }));
        assert!(err.to_string().contains("competency_dataset.json"));

        let source = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = ConverterError::read("competency_dataset.json", source);
        assert!(matches!(err, ConverterError::Io { .. }));

        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "no such directory");
        let err = ConverterError::io("missing/out.json", source);
        assert!(matches!(err, ConverterError::Io { .. }));
    }
}
