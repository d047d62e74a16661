//! Propcheck Runtime - startup checks for configuration files.
//!
//! This crate provides:
//! - Startup checks over a list of files (`StartupCheck`, `CheckReport`)
//! - Layered checker configuration (`ConfigLoader`, `CheckerConfig`)
//! - Logging configuration (`LoggingBuilder`)
//!
//! # Example
//!
//! ```ignore
//! use propcheck_runtime::{StartupCheck, config::load_config, logging};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = load_config()?;
//!     logging::init_from_config(&config.logging);
//!
//!     let report = StartupCheck::from_config(&config.check)?.run()?;
//!     println!("{} empty value(s)", report.findings.len());
//!     Ok(())
//! }
//! ```
//!
//! Strategies come from the link-time registry, so every format enabled in
//! `propcheck-loaders` (`properties` and `yaml` by default) is available
//! without further setup.

pub mod check;
pub mod config;
pub mod error;
pub mod logging;

// Links the built-in strategies into the registry.
use propcheck_loaders as _;

// Re-exports
pub use check::{CheckPolicy, CheckReport, FileStatus, FileSummary, StartupCheck};
pub use config::{CheckConfig, CheckerConfig, ConfigError, ConfigLoader, ConfigResult};
pub use error::{RuntimeError, RuntimeResult};
pub use logging::{LoggingBuilder, SpanEvents};

// Re-export tracing for use by other crates
pub use tracing;
pub use tracing_subscriber;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{CheckPolicy, CheckReport, StartupCheck};
    pub use tracing::{Level, debug, error, info, instrument, span, trace, warn};
}
