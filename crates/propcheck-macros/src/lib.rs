//! Procedural macros for propcheck.
//!
//! This crate provides:
//!
//! - `#[register_strategy]` - Adds a loader strategy to the link-time registry
//!
//! ```rust,ignore
//! use propcheck_core::{LoadResult, LoaderStrategy, PropertySet, RawSource};
//! use propcheck_macros::register_strategy;
//!
//! #[register_strategy]
//! #[derive(Default)]
//! pub struct IniStrategy;
//!
//! impl LoaderStrategy for IniStrategy {
//!     fn file_extensions(&self) -> &[&str] {
//!         &["ini"]
//!     }
//!
//!     fn parse(&self, name: &str, source: RawSource<'_>) -> LoadResult<Vec<PropertySet>> {
//!         // ...
//!     }
//! }
//!
//! // IniStrategy now shows up in CompositeLoader::new()
//! ```

mod strategy;

use proc_macro::TokenStream;

/// Registers a `Default` strategy type in `propcheck_core::STRATEGY_REGISTRY`.
///
/// The annotated item is left unchanged. A `linkme` distributed-slice entry
/// is appended that builds the strategy with `Default::default()`.
///
/// # Arguments
///
/// - `crate = path` - Path to `propcheck_core` when it is only reachable
///   through a re-export (default: `::propcheck_core`)
///
/// ```rust,ignore
/// #[register_strategy(crate = ::propcheck::core)]
/// #[derive(Default)]
/// struct TomlStrategy;
/// ```
#[proc_macro_attribute]
pub fn register_strategy(attr: TokenStream, item: TokenStream) -> TokenStream {
    strategy::register_strategy(attr, item)
}
