//! # Propcheck
//!
//! Pluggable configuration-file loading with empty-value auditing.
//!
//! ## Overview
//!
//! A [`CompositeLoader`](core::CompositeLoader) holds an ordered list of
//! loader strategies. Each strategy claims a few file extensions; loading a
//! file runs every strategy that claims it, concatenates the property sets
//! they produce, and audits each set for empty values on the way out.
//!
//! ```text
//! ┌──────────────┐     ┌─────────────────┐     ┌─────────────────────┐
//! │  Resource    │────▶│ CompositeLoader │────▶│ PropertiesStrategy  │──▶ parse ──▶ audit
//! │ (file name,  │     │ (extension      │────▶│ YamlStrategy        │──▶ parse ──▶ audit
//! │  bytes)      │     │  routing)       │────▶│ your strategy ...   │──▶ parse ──▶ audit
//! └──────────────┘     └─────────────────┘     └─────────────────────┘
//! ```
//!
//! - **Core**: data model, strategy contract, registry, auditor, merge helper
//! - **Loaders**: built-in `.properties` / `.xml` and `.yml` / `.yaml` strategies
//! - **Runtime**: startup checks, layered checker configuration, logging
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use propcheck::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     LoggingBuilder::new().init();
//!
//!     let report = StartupCheck::discover()
//!         .location("config/application.properties")
//!         .location("config/application.yml")
//!         .policy(CheckPolicy::Deny)
//!         .run()?;
//!
//!     let settings = report.merged(MergePolicy::LastWriteWins);
//!     println!("port = {:?}", settings.get("server.port"));
//!     Ok(())
//! }
//! ```
//!
//! ## Adding a format
//!
//! ```rust,ignore
//! use propcheck::prelude::*;
//!
//! #[register_strategy(crate = propcheck::core)]
//! #[derive(Default)]
//! struct EnvFileStrategy;
//!
//! impl LoaderStrategy for EnvFileStrategy {
//!     fn file_extensions(&self) -> &[&str] {
//!         &["env"]
//!     }
//!
//!     fn parse(&self, name: &str, source: RawSource<'_>) -> LoadResult<Vec<PropertySet>> {
//!         let mut set = PropertySet::builder(name);
//!         for line in source.text(name)?.lines() {
//!             if let Some((k, v)) = line.split_once('=') {
//!                 set.insert(k, v);
//!             }
//!         }
//!         Ok(vec![set.build()])
//!     }
//! }
//! ```
//!
//! ## Features
//!
//! - `properties` *(default)*: `.properties` and XML property lists
//! - `yaml` *(default)*: YAML documents
//! - `toml-config` *(default)* / `yaml-config`: checker configuration file formats
//! - `json-log`: JSON log lines

pub use propcheck_core as core;
pub use propcheck_loaders as loaders;
pub use propcheck_runtime as runtime;

pub use propcheck_macros::register_strategy;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use propcheck::prelude::*;
/// ```
pub mod prelude {
    // Loading
    pub use propcheck_core::prelude::*;

    // Auditing
    pub use propcheck_core::{CollectingSink, LogSink, NullSink, audit};

    // Strategy registration
    pub use propcheck_macros::register_strategy;

    // Startup checks
    pub use propcheck_runtime::logging::LoggingBuilder;
    pub use propcheck_runtime::{CheckPolicy, CheckReport, StartupCheck};
}
