//! Error types surfaced by the loader layer.
//!
//! Wraps asset retrieval and parse failures so callers of
//! [`crate::TreeRegistry::get_or_load`] can bubble them up with consistent
//! context. Both failure modes leave the cache untouched, so a later call
//! with the same name may retry.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LoadError>;

#[derive(Debug, Error)]
pub enum LoadError {
    /// The asset source has no definition under this name. Safe to retry
    /// once the asset exists.
    #[error("tree asset `{name}` not found")]
    AssetNotFound { name: String },

    #[error(transparent)]
    Parse(#[from] arbor::ParseError),

    #[error("tree cache lock was poisoned")]
    LockPoisoned,
}
