//! Asynchronous loading and caching for `arbor` behavior trees.
//!
//! This crate wires the synchronous engine to the surrounding
//! application: an [`AssetSource`] retrieves raw definition documents
//! (the only suspending operation in the system), the [`TreeRegistry`]
//! parses and caches each tree once per name, and a [`TreeHandle`] pairs
//! the shared tree with one agent's private environment.
//!
//! ```no_run
//! use std::collections::HashMap;
//! use std::sync::Arc;
//!
//! use arbor::NodeTypeRegistry;
//! use arbor_loader::{MemorySource, TreeRegistry};
//!
//! # async fn demo() -> arbor_loader::Result<()> {
//! let source = Arc::new(MemorySource::new());
//! let registry = TreeRegistry::new(source, Arc::new(NodeTypeRegistry::builtin()));
//!
//! let mut handle = registry.get_or_load("patrol", HashMap::new()).await?;
//! handle.run();
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handle;
pub mod registry;
pub mod source;

pub use error::{LoadError, Result};
pub use handle::TreeHandle;
pub use registry::TreeRegistry;
pub use source::{AssetSource, MemorySource, RawDefinition};
