//! Asynchronous boundary for sourcing raw tree definitions.
//!
//! Loader users plug in [`AssetSource`] implementations so trees can come
//! from a packaged asset bundle, a network service, or in-memory fixtures.
//! The source hands out [`RawDefinition`] handles and expects them back
//! through [`AssetSource::release`] once the parsed graph no longer needs
//! the raw text.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::error::{LoadError, Result};

/// Raw definition text checked out from an asset source.
pub struct RawDefinition {
    name: String,
    text: String,
}

impl RawDefinition {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Trait for retrieving raw tree definitions by name.
///
/// `fetch` may suspend the calling task (network, disk, host asset
/// system); it is the only asynchronous point in the whole engine.
#[async_trait]
pub trait AssetSource: Send + Sync {
    /// Retrieve the raw definition stored under `name`.
    ///
    /// # Errors
    ///
    /// [`LoadError::AssetNotFound`] when no asset exists under the name.
    async fn fetch(&self, name: &str) -> Result<RawDefinition>;

    /// Hand a definition handle back once the caller is done with it.
    fn release(&self, definition: RawDefinition);
}

/// In-memory asset source for tests and embedded fixtures.
pub struct MemorySource {
    assets: RwLock<HashMap<String, String>>,
    released: AtomicUsize,
}

impl MemorySource {
    pub fn new() -> Self {
        Self {
            assets: RwLock::new(HashMap::new()),
            released: AtomicUsize::new(0),
        }
    }

    /// Publish (or replace) an asset. Cached trees are unaffected; only
    /// future loads see the new text.
    pub fn insert(&self, name: impl Into<String>, text: impl Into<String>) -> Result<()> {
        let mut assets = self.assets.write().map_err(|_| LoadError::LockPoisoned)?;
        assets.insert(name.into(), text.into());
        Ok(())
    }

    /// How many handles have been released back. Lets tests assert the
    /// registry honors the release contract.
    pub fn released(&self) -> usize {
        self.released.load(Ordering::Relaxed)
    }
}

impl Default for MemorySource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AssetSource for MemorySource {
    async fn fetch(&self, name: &str) -> Result<RawDefinition> {
        let assets = self.assets.read().map_err(|_| LoadError::LockPoisoned)?;
        match assets.get(name) {
            Some(text) => Ok(RawDefinition::new(name, text.clone())),
            None => Err(LoadError::AssetNotFound {
                name: name.to_string(),
            }),
        }
    }

    fn release(&self, _definition: RawDefinition) {
        self.released.fetch_add(1, Ordering::Relaxed);
    }
}
