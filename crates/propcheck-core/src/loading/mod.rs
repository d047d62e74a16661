//! Loading layer - strategies, their registry and the composite loader.

pub mod loader;
pub mod registry;
pub mod strategy;

pub use loader::{CompositeLoader, CompositeLoaderBuilder, LoadReport};
pub use registry::{STRATEGY_REGISTRY, StrategyFactory, StrategyRegistry, registered_strategies};
pub use strategy::{BoxedStrategy, LoaderStrategy, MatchMode, RawSource, SharedStrategy};
