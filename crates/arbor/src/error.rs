//! Error types raised while parsing tree definitions.

use thiserror::Error;

use crate::registry::{ArgType, Category};

/// A tree definition failed validation. No partial tree is produced; a
/// later load attempt may retry with a corrected document.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The document is not a well-formed definition (bad JSON, missing
    /// `root`, wrong field shapes).
    #[error("malformed tree definition: {0}")]
    Syntax(#[from] serde_json::Error),

    #[error("node {id}: unknown node type `{ty}`")]
    UnknownType { id: u32, ty: String },

    #[error("duplicate node id {id}")]
    DuplicateId { id: u32 },

    #[error("node {id}: missing required argument `{arg}`")]
    MissingArg { id: u32, arg: String },

    #[error("node {id}: argument `{arg}` expects {expected}, got {found}")]
    ArgType {
        id: u32,
        arg: String,
        expected: ArgType,
        found: &'static str,
    },

    #[error("node {id}: argument `{arg}` is not one of the allowed choices")]
    BadChoice { id: u32, arg: String },

    #[error("node {id}: a {category} node takes {expected}, got {found}")]
    ChildCount {
        id: u32,
        category: Category,
        expected: &'static str,
        found: usize,
    },
}
