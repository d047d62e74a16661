//! Checker configuration.
//!
//! Layered loading of [`CheckerConfig`] (which files to check, how strictly,
//! and how to log) plus validation.

pub mod error;
pub mod loader;
pub mod schema;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigLoader, Profile, load_config, load_config_from_file};
pub use schema::{
    CheckConfig, CheckerConfig, LogFormat, LogLevel, LogOutput, LoggingConfig, SpanEventConfig,
};
pub use validation::validate_config;
