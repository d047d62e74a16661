//! Strategy registration and discovery.
//!
//! Strategies become discoverable in two ways:
//!
//! - **Link time**: a crate annotates a `Default` strategy type with
//!   `#[register_strategy]`, which contributes a factory to
//!   [`STRATEGY_REGISTRY`]. Every crate linked into the binary takes part.
//! - **Startup time**: the application calls [`StrategyRegistry::register`]
//!   once per extra format before building a loader.
//!
//! Link order decides the order of link-time entries and is not guaranteed to
//! be stable across builds. Callers that care about ordering should hand an
//! explicit list to [`CompositeLoader::with_strategies`].
//!
//! [`CompositeLoader::with_strategies`]: crate::CompositeLoader::with_strategies

use std::sync::Arc;

use linkme::distributed_slice;
use parking_lot::RwLock;
use tracing::{debug, warn};

use super::strategy::{BoxedStrategy, LoaderStrategy, SharedStrategy, ensure_extensions};
use crate::foundation::LoadResult;

/// Factory producing a fresh strategy instance.
pub type StrategyFactory = fn() -> BoxedStrategy;

/// Link-time table of strategy factories.
/// Each crate that provides a strategy contributes one entry per strategy.
#[distributed_slice]
pub static STRATEGY_REGISTRY: [StrategyFactory];

/// Instantiates every strategy in [`STRATEGY_REGISTRY`].
///
/// Strategies that declare no extensions are skipped with a warning.
pub fn registered_strategies() -> Vec<SharedStrategy> {
    STRATEGY_REGISTRY
        .iter()
        .filter_map(|factory| {
            let strategy: SharedStrategy = Arc::from(factory());
            match ensure_extensions(strategy.as_ref()) {
                Ok(()) => Some(strategy),
                Err(e) => {
                    warn!(error = %e, "Skipping registered strategy");
                    None
                }
            }
        })
        .collect()
}

/// An ordered collection of loader strategies.
///
/// The registry itself may grow during startup; loaders built from it take a
/// snapshot and never see later registrations.
#[derive(Default)]
pub struct StrategyRegistry {
    strategies: RwLock<Vec<SharedStrategy>>,
}

impl StrategyRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every link-time registered strategy.
    pub fn discover() -> Self {
        let strategies = registered_strategies();
        debug!(count = strategies.len(), "Discovered loader strategies");
        Self {
            strategies: RwLock::new(strategies),
        }
    }

    /// Appends a strategy.
    pub fn register<S>(&self, strategy: S) -> LoadResult<()>
    where
        S: LoaderStrategy + 'static,
    {
        self.register_shared(Arc::new(strategy))
    }

    /// Appends an already shared strategy.
    pub fn register_shared(&self, strategy: SharedStrategy) -> LoadResult<()> {
        ensure_extensions(strategy.as_ref())?;
        debug!(
            strategy = strategy.name(),
            extensions = ?strategy.file_extensions(),
            "Registered loader strategy"
        );
        self.strategies.write().push(strategy);
        Ok(())
    }

    /// Returns the held strategies in registration order.
    ///
    /// An empty registry yields an empty list.
    pub fn discover_all(&self) -> Vec<SharedStrategy> {
        self.strategies.read().clone()
    }

    /// Returns the strategy names in registration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.strategies.read().iter().map(|s| s.name()).collect()
    }

    /// Number of registered strategies.
    pub fn len(&self) -> usize {
        self.strategies.read().len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.strategies.read().is_empty()
    }
}

impl std::fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategyRegistry")
            .field("strategies", &self.names())
            .finish()
    }
}
