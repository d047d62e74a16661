//! The composite loader facade.
//!
//! ```text
//!                         ┌──────────────────────┐
//!  load(name, resource) ─▶│   CompositeLoader    │
//!                         │  (extension routing) │
//!                         └──────────┬───────────┘
//!              ┌─────────────────────┼─────────────────────┐
//!              ▼                     ▼                     ▼
//!     ┌────────────────┐    ┌────────────────┐    ┌────────────────┐
//!     │ properties/xml │    │   yml/yaml     │    │  third party   │
//!     └───────┬────────┘    └───────┬────────┘    └───────┬────────┘
//!             └──── parse ─▶ audit ─┴─▶ concatenated property sets
//! ```
//!
//! Every strategy whose extension matches runs, in list order, and the
//! results are concatenated. The first failure aborts the whole call.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, debug_span, trace};

use super::registry::StrategyRegistry;
use super::strategy::{LoaderStrategy, MatchMode, SharedStrategy, ensure_extensions};
use crate::audit::{AuditSink, CollectingSink, Finding, LogSink};
use crate::foundation::{LoadError, LoadResult, PropertySet, Resource};

/// Routes resources to every strategy claiming their extension.
///
/// The strategy list is fixed at construction, so one loader can be shared
/// between threads and used concurrently.
///
/// # Example
///
/// ```rust,ignore
/// use propcheck_core::{CompositeLoader, FileResource};
///
/// // Every link-time registered strategy
/// let loader = CompositeLoader::new();
/// let sets = loader.load("application", &FileResource::new("application.yml"))?;
///
/// // Exactly these strategies, in this order
/// let loader = CompositeLoader::builder()
///     .strategy(PropertiesStrategy)
///     .sink(CollectingSink::new())
///     .build()?;
/// ```
pub struct CompositeLoader {
    strategies: Vec<SharedStrategy>,
    sink: Arc<dyn AuditSink>,
    match_mode: MatchMode,
}

impl Default for CompositeLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl CompositeLoader {
    /// Creates a loader over every link-time registered strategy.
    pub fn new() -> Self {
        Self::from_registry(&StrategyRegistry::discover())
    }

    /// Creates a loader over a snapshot of `registry`.
    ///
    /// Registries only hold strategies that passed registration checks.
    pub fn from_registry(registry: &StrategyRegistry) -> Self {
        Self {
            strategies: registry.discover_all(),
            sink: Arc::new(LogSink),
            match_mode: MatchMode::default(),
        }
    }

    /// Creates a loader over an explicit, ordered list of strategies.
    ///
    /// Fails with [`LoadError::InvalidArgument`] if a strategy declares no
    /// extensions or an empty one.
    pub fn with_strategies<I>(strategies: I) -> LoadResult<Self>
    where
        I: IntoIterator<Item = SharedStrategy>,
    {
        strategies
            .into_iter()
            .fold(Self::builder(), CompositeLoaderBuilder::shared_strategy)
            .build()
    }

    /// Creates a loader over a single strategy.
    pub fn from_strategy<S>(strategy: S) -> LoadResult<Self>
    where
        S: LoaderStrategy + 'static,
    {
        Self::builder().strategy(strategy).build()
    }

    /// Starts building a loader with explicit settings.
    pub fn builder() -> CompositeLoaderBuilder {
        CompositeLoaderBuilder::default()
    }

    /// The held strategies, in dispatch order.
    pub fn strategies(&self) -> &[SharedStrategy] {
        &self.strategies
    }

    /// The extension match mode.
    pub fn match_mode(&self) -> MatchMode {
        self.match_mode
    }

    /// Union of every held strategy's extensions.
    pub fn file_extensions(&self) -> BTreeSet<String> {
        self.strategies
            .iter()
            .flat_map(|s| s.file_extensions().iter().map(|ext| ext.to_string()))
            .collect()
    }

    /// Returns `true` if at least one strategy would handle `file_name`.
    pub fn supports(&self, file_name: &str) -> bool {
        self.strategies
            .iter()
            .any(|s| s.matches(file_name, self.match_mode))
    }

    /// Loads `resource` through every matching strategy.
    ///
    /// Findings go to the loader's sink. A resource no strategy claims yields
    /// an empty list.
    pub fn load(&self, name: &str, resource: &dyn Resource) -> LoadResult<Vec<PropertySet>> {
        self.load_with_sink(name, resource, self.sink.as_ref())
    }

    /// Like [`load`](Self::load), but also returns the findings produced by
    /// this call. Findings are still forwarded to the loader's sink.
    pub fn load_report(&self, name: &str, resource: &dyn Resource) -> LoadResult<LoadReport> {
        let tee = TeeSink {
            inner: self.sink.as_ref(),
            collected: CollectingSink::new(),
        };
        let property_sets = self.load_with_sink(name, resource, &tee)?;
        Ok(LoadReport {
            property_sets,
            findings: tee.collected.take(),
        })
    }

    fn load_with_sink(
        &self,
        name: &str,
        resource: &dyn Resource,
        sink: &dyn AuditSink,
    ) -> LoadResult<Vec<PropertySet>> {
        let filename = resource.file_name().ok_or_else(|| {
            LoadError::invalid_argument(format!(
                "resource '{}' has no file name",
                resource.description()
            ))
        })?;

        let span = debug_span!("load", source = name, file = filename);
        let _enter = span.enter();

        let mut property_sets = Vec::new();
        for strategy in &self.strategies {
            if !strategy.matches(filename, self.match_mode) {
                trace!(strategy = strategy.name(), "Extension not claimed");
                continue;
            }
            debug!(strategy = strategy.name(), "Dispatching to strategy");
            property_sets.extend(strategy.load_property_source(name, resource, sink)?);
        }

        if property_sets.is_empty() {
            debug!("No property sets produced");
        }
        Ok(property_sets)
    }
}

impl std::fmt::Debug for CompositeLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self.strategies.iter().map(|s| s.name()).collect();
        f.debug_struct("CompositeLoader")
            .field("strategies", &names)
            .field("match_mode", &self.match_mode)
            .finish()
    }
}

struct TeeSink<'a> {
    inner: &'a dyn AuditSink,
    collected: CollectingSink,
}

impl AuditSink for TeeSink<'_> {
    fn report(&self, finding: &Finding) {
        self.inner.report(finding);
        self.collected.report(finding);
    }
}

/// Property sets and findings produced by one load call.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadReport {
    /// Property sets in load order.
    pub property_sets: Vec<PropertySet>,
    /// Findings in discovery order.
    pub findings: Vec<Finding>,
}

impl LoadReport {
    /// Returns `true` if no empty values were found.
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }
}

/// Builder for [`CompositeLoader`].
#[derive(Default)]
pub struct CompositeLoaderBuilder {
    strategies: Vec<SharedStrategy>,
    sink: Option<Arc<dyn AuditSink>>,
    match_mode: MatchMode,
}

impl CompositeLoaderBuilder {
    /// Appends a strategy.
    pub fn strategy<S>(mut self, strategy: S) -> Self
    where
        S: LoaderStrategy + 'static,
    {
        self.strategies.push(Arc::new(strategy));
        self
    }

    /// Appends an already shared strategy.
    pub fn shared_strategy(mut self, strategy: SharedStrategy) -> Self {
        self.strategies.push(strategy);
        self
    }

    /// Appends every strategy held by `registry`.
    pub fn registry(mut self, registry: &StrategyRegistry) -> Self {
        self.strategies.extend(registry.discover_all());
        self
    }

    /// Sets the audit sink (default: [`LogSink`]).
    pub fn sink<K>(mut self, sink: K) -> Self
    where
        K: AuditSink + 'static,
    {
        self.sink = Some(Arc::new(sink));
        self
    }

    /// Sets an already shared audit sink.
    pub fn shared_sink(mut self, sink: Arc<dyn AuditSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Sets the extension match mode (default: [`MatchMode::Suffix`]).
    pub fn match_mode(mut self, mode: MatchMode) -> Self {
        self.match_mode = mode;
        self
    }

    /// Builds the loader, rejecting strategies without usable extensions.
    pub fn build(self) -> LoadResult<CompositeLoader> {
        for strategy in &self.strategies {
            ensure_extensions(strategy.as_ref())?;
        }
        Ok(CompositeLoader {
            strategies: self.strategies,
            sink: self.sink.unwrap_or_else(|| Arc::new(LogSink)),
            match_mode: self.match_mode,
        })
    }
}
