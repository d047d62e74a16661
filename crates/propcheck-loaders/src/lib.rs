//! # Propcheck Loaders
//!
//! Built-in loader strategies for `propcheck-core`.
//!
//! ## Features
//!
//! - `properties` (default): [`PropertiesStrategy`] for `.properties` and `.xml`
//! - `yaml` (default): [`YamlStrategy`] for `.yml` and `.yaml`
//!
//! Every enabled strategy registers itself in the link-time registry, so
//! `CompositeLoader::new()` picks it up as soon as this crate is linked.
//!
//! ## Strategies
//!
//! | Strategy | Extensions | Property sets per file |
//! |----------|------------|------------------------|
//! | `PropertiesStrategy` | `properties`, `xml` | one per `#---` separated document |
//! | `YamlStrategy` | `yml`, `yaml` | one per YAML document |
//!
//! ```rust,ignore
//! use propcheck_core::{CompositeLoader, FileResource};
//! use propcheck_loaders::{PropertiesStrategy, YamlStrategy};
//!
//! let loader = CompositeLoader::builder()
//!     .strategy(PropertiesStrategy)
//!     .strategy(YamlStrategy)
//!     .build()?;
//! let sets = loader.load("application", &FileResource::new("application.yml"))?;
//! ```

#[cfg(feature = "properties")]
pub mod properties;
#[cfg(feature = "yaml")]
pub mod yaml;

#[cfg(feature = "properties")]
pub use properties::PropertiesStrategy;
#[cfg(feature = "yaml")]
pub use yaml::YamlStrategy;

/// Name of the `index`-th property set of a file that produced `total` sets.
///
/// Single-document files keep the plain name.
#[cfg_attr(not(any(feature = "properties", feature = "yaml")), allow(dead_code))]
pub(crate) fn document_name(name: &str, index: usize, total: usize) -> String {
    if total == 1 {
        name.to_string()
    } else {
        format!("{name} (document #{index})")
    }
}
