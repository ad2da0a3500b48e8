//! Process-wide registry of parsed trees.
//!
//! The registry is the single point of access for obtaining a runnable
//! handle to a named tree: it fetches and parses each definition at most
//! once, caches the parsed [`Tree`] for the process lifetime, and pairs it
//! with a fresh [`Environment`] per request.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use arbor::{Environment, NodeTypeRegistry, Tree, Value};

use crate::error::{LoadError, Result};
use crate::handle::TreeHandle;
use crate::source::AssetSource;

/// Cache of parsed trees keyed by name.
pub struct TreeRegistry {
    source: Arc<dyn AssetSource>,
    node_types: Arc<NodeTypeRegistry>,
    cache: RwLock<HashMap<String, Arc<Tree>>>,
}

impl TreeRegistry {
    /// The node-type registry must be fully populated before the first
    /// load; parsed trees hold references into it.
    pub fn new(source: Arc<dyn AssetSource>, node_types: Arc<NodeTypeRegistry>) -> Self {
        Self {
            source,
            node_types,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Obtain a handle for the named tree, loading and parsing the
    /// definition on first use.
    ///
    /// Always constructs a brand-new [`Environment`] seeded with `params`,
    /// so two handles for the same name share the parsed tree but nothing
    /// else. The raw asset handle is released back to the source as soon
    /// as parsing finishes, before any parse error is surfaced; failed
    /// loads cache nothing and may be retried.
    pub async fn get_or_load(
        &self,
        name: &str,
        params: HashMap<String, Value>,
    ) -> Result<TreeHandle> {
        if let Some(tree) = self.cached(name)? {
            tracing::debug!("tree `{}` served from cache", name);
            return Ok(TreeHandle::new(tree, Environment::seeded(params)));
        }

        tracing::debug!("tree `{}` not cached, fetching definition", name);
        let raw = self.source.fetch(name).await?;
        let parsed = Tree::parse(name, raw.text(), &self.node_types);
        // The parsed graph is self-contained; hand the raw asset back
        // before surfacing any parse failure.
        self.source.release(raw);
        let tree = Arc::new(parsed.inspect_err(|err| {
            tracing::warn!("tree `{}` failed to parse: {}", name, err);
        })?);

        let tree = {
            let mut cache = self.cache.write().map_err(|_| LoadError::LockPoisoned)?;
            // First load wins if two tasks raced on the same name.
            cache.entry(name.to_string()).or_insert(tree).clone()
        };
        Ok(TreeHandle::new(tree, Environment::seeded(params)))
    }

    /// Whether a parsed tree is cached under `name`.
    pub fn is_cached(&self, name: &str) -> bool {
        self.cache
            .read()
            .map(|cache| cache.contains_key(name))
            .unwrap_or(false)
    }

    fn cached(&self, name: &str) -> Result<Option<Arc<Tree>>> {
        let cache = self.cache.read().map_err(|_| LoadError::LockPoisoned)?;
        Ok(cache.get(name).cloned())
    }
}
