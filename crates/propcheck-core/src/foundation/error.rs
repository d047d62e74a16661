//! Error types for configuration loading.
//!
//! Empty-value findings are advisory and never show up here; see
//! [`crate::audit`] for how those are reported.

use std::io;

use thiserror::Error;

// =============================================================================
// Load Errors
// =============================================================================

/// Errors that can occur while routing and parsing a configuration resource.
#[derive(Debug, Error)]
pub enum LoadError {
    /// A required input was missing or unusable.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The parser rejected the resource content.
    #[error("failed to parse '{source_name}': {message}")]
    Parse {
        /// Name of the resource being parsed.
        source_name: String,
        /// Parser diagnostic.
        message: String,
    },

    /// The resource could not be opened or read.
    #[error("failed to read '{source_name}': {source}")]
    Io {
        /// Name of the resource being read.
        source_name: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl LoadError {
    /// Creates an invalid argument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Creates a parse error for the named resource.
    pub fn parse(source_name: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Parse {
            source_name: source_name.into(),
            message: msg.into(),
        }
    }

    /// Creates an I/O error for the named resource.
    pub fn io(source_name: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            source_name: source_name.into(),
            source,
        }
    }

    /// Returns `true` if this is a parse error.
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for load operations.
pub type LoadResult<T> = Result<T, LoadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = LoadError::parse("application.yml", "unexpected end of stream");
        assert_eq!(
            err.to_string(),
            "failed to parse 'application.yml': unexpected end of stream"
        );
        assert!(err.is_parse());

        let err = LoadError::io(
            "missing.properties",
            io::Error::new(io::ErrorKind::NotFound, "no such file"),
        );
        assert!(err.to_string().starts_with("failed to read 'missing.properties'"));
        assert!(!err.is_parse());
    }
}
