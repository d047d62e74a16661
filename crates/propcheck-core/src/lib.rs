//! # Propcheck Core
//!
//! Strategy-dispatched configuration loading with empty-value auditing.
//!
//! ## Layers
//!
//! ### Foundation
//!
//! - **Values**: [`PropertyValue`] (null, bool, integer, float, string)
//! - **Property sets**: named, ordered collections of entries ([`PropertySet`])
//! - **Resources**: named byte sources ([`FileResource`], [`MemoryResource`])
//!
//! ### Loading
//!
//! - **Strategies**: one format each, claiming file extensions ([`LoaderStrategy`])
//! - **Registry**: link-time and startup-time registration ([`StrategyRegistry`])
//! - **Composite loader**: routes a resource to every matching strategy
//!   ([`CompositeLoader`])
//!
//! ### Auditing
//!
//! Every property set a strategy produces is scanned once for empty values
//! ([`audit`]); findings go to an [`AuditSink`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use propcheck_core::{CollectingSink, CompositeLoader, FileResource};
//!
//! let loader = CompositeLoader::builder()
//!     .registry(&StrategyRegistry::discover())
//!     .build()?;
//!
//! let report = loader.load_report("application", &FileResource::new("application.yml"))?;
//! for finding in &report.findings {
//!     eprintln!("{finding}");
//! }
//! ```

pub mod audit;
pub mod foundation;
pub mod loading;
pub mod merge;

pub use audit::{AuditSink, CollectingSink, Finding, LogSink, NullSink, audit, audit_into};
pub use foundation::{
    FileResource, LoadError, LoadResult, MemoryResource, PropertySet, PropertySetBuilder,
    PropertyValue, Resource,
};
pub use loading::{
    BoxedStrategy, CompositeLoader, CompositeLoaderBuilder, LoadReport, LoaderStrategy, MatchMode,
    RawSource, STRATEGY_REGISTRY, SharedStrategy, StrategyFactory, StrategyRegistry,
    registered_strategies,
};
pub use merge::{MergePolicy, MergedProperties, MergedValue, merge};

// Used by `#[register_strategy]` expansions.
pub use linkme;

/// Prelude for common imports.
pub mod prelude {
    pub use super::audit::{AuditSink, Finding};
    pub use super::foundation::*;
    pub use super::loading::{
        CompositeLoader, LoaderStrategy, MatchMode, RawSource, StrategyRegistry,
    };
    pub use super::merge::{MergePolicy, merge};
}
