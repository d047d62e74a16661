//! Foundation layer - data model shared by every loader.
//!
//! This module contains:
//! - Configuration values and named property sets
//! - Readable resources (files and in-memory buffers)
//! - Load error types

pub mod error;
pub mod property_set;
pub mod resource;
pub mod value;

pub use error::{LoadError, LoadResult};
pub use property_set::{PropertySet, PropertySetBuilder};
pub use resource::{FileResource, MemoryResource, Resource};
pub use value::PropertyValue;
