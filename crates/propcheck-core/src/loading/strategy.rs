//! The loader strategy contract.
//!
//! A strategy knows one file format. It claims a set of file extensions and
//! turns raw bytes into one or more [`PropertySet`]s. The composite loader
//! only ever talks to strategies through this trait, so new formats can be
//! added without touching it.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::audit::{AuditSink, audit_into};
use crate::foundation::{LoadError, LoadResult, PropertySet, Resource};

/// A format-specific configuration parser.
///
/// # Example
///
/// ```rust,ignore
/// use propcheck_core::{LoadResult, LoaderStrategy, PropertySet, RawSource};
///
/// #[derive(Default)]
/// struct EnvFileStrategy;
///
/// impl LoaderStrategy for EnvFileStrategy {
///     fn file_extensions(&self) -> &[&str] {
///         &["env"]
///     }
///
///     fn parse(&self, name: &str, source: RawSource<'_>) -> LoadResult<Vec<PropertySet>> {
///         let text = source.text(name)?;
///         // ...
///     }
/// }
/// ```
pub trait LoaderStrategy: Send + Sync {
    /// Label used in logs.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Extensions claimed by this strategy: lowercase, without a leading dot.
    ///
    /// Must be non-empty and must not change between calls.
    fn file_extensions(&self) -> &[&str];

    /// Parses raw content into property sets.
    ///
    /// Either every set is returned or an error is; never a partial result.
    fn parse(&self, name: &str, source: RawSource<'_>) -> LoadResult<Vec<PropertySet>>;

    /// Reads `resource`, parses it and audits every produced set exactly once
    /// before returning.
    fn load_property_source(
        &self,
        name: &str,
        resource: &dyn Resource,
        sink: &dyn AuditSink,
    ) -> LoadResult<Vec<PropertySet>> {
        let bytes = resource
            .read_bytes()
            .map_err(|e| LoadError::io(resource.description(), e))?;
        let sets = self.parse(name, RawSource::new(resource.file_name(), &bytes))?;

        let mut empty = 0;
        for set in &sets {
            empty += audit_into(set, sink);
        }
        debug!(
            strategy = self.name(),
            resource = %resource.description(),
            sets = sets.len(),
            empty,
            "Loaded property source"
        );

        Ok(sets)
    }

    /// Returns `true` if `file_name` ends with one of the claimed extensions.
    fn matches(&self, file_name: &str, mode: MatchMode) -> bool {
        self.file_extensions()
            .iter()
            .any(|ext| mode.matches(file_name, ext))
    }
}

/// The content handed to [`LoaderStrategy::parse`].
#[derive(Debug, Clone, Copy)]
pub struct RawSource<'a> {
    file_name: Option<&'a str>,
    bytes: &'a [u8],
}

impl<'a> RawSource<'a> {
    /// Wraps raw bytes and the file name they were read from.
    pub fn new(file_name: Option<&'a str>, bytes: &'a [u8]) -> Self {
        Self { file_name, bytes }
    }

    /// File name of the resource, if known.
    pub fn file_name(&self) -> Option<&'a str> {
        self.file_name
    }

    /// Raw content.
    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Returns `true` if the file name ends with `.{extension}`.
    pub fn has_extension(&self, extension: &str) -> bool {
        self.file_name
            .is_some_and(|f| MatchMode::Dotted.matches(f, extension))
    }

    /// Content as UTF-8; invalid bytes are a parse error for `name`.
    pub fn text(&self, name: &str) -> LoadResult<&'a str> {
        std::str::from_utf8(self.bytes)
            .map_err(|e| LoadError::parse(name, format!("content is not valid UTF-8: {e}")))
    }
}

/// Boxed strategy, as produced by registry factories.
pub type BoxedStrategy = Box<dyn LoaderStrategy>;

/// Shared strategy, as held by registries and loaders.
pub type SharedStrategy = Arc<dyn LoaderStrategy>;

/// How a file name is compared against a declared extension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Plain suffix test: `xml` matches `foo.xml` and also `notarealxml`.
    #[default]
    Suffix,
    /// The extension has to follow a dot: `xml` matches `foo.xml` only.
    Dotted,
}

impl MatchMode {
    /// Tests `file_name` against `extension`. Case-sensitive in both modes.
    pub fn matches(self, file_name: &str, extension: &str) -> bool {
        match self {
            Self::Suffix => file_name.ends_with(extension),
            Self::Dotted => file_name
                .strip_suffix(extension)
                .is_some_and(|stem| stem.ends_with('.')),
        }
    }
}

/// Rejects strategies that do not claim any extension.
pub(crate) fn ensure_extensions(strategy: &dyn LoaderStrategy) -> LoadResult<()> {
    if strategy.file_extensions().is_empty() {
        return Err(LoadError::invalid_argument(format!(
            "strategy '{}' declares no file extensions",
            strategy.name()
        )));
    }
    // An empty suffix would claim every file name.
    if strategy.file_extensions().iter().any(|ext| ext.is_empty()) {
        return Err(LoadError::invalid_argument(format!(
            "strategy '{}' declares an empty file extension",
            strategy.name()
        )));
    }
    Ok(())
}
