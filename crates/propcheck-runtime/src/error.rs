//! Runtime error types.

use propcheck_core::LoadError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while running a startup check.
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Checker configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A configuration location could not be loaded.
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    /// The deny policy rejected empty values.
    #[error("Found {count} empty configuration value(s)")]
    EmptyValues { count: usize },
}

/// Result type for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;
