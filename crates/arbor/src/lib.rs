//! Resumable behavior tree engine with a data-driven node-type registry.
//!
//! Trees are parsed once from a JSON definition document and stay
//! immutable; every piece of per-run state (blackboard, per-node inner
//! variables, the suspension stack) lives in an [`Environment`], so one
//! tree can drive many agents concurrently.
//!
//! - **Suspend/resume**: a node may return [`RunStatus::Running`] after
//!   recording its resumption point; the next run re-enters exactly that
//!   node before anything else executes
//! - **Deterministic**: child evaluation is strictly depth-first in
//!   declared order
//! - **Extensible**: applications register their own actions and
//!   conditions alongside the built-ins
//!
//! # Architecture
//!
//! - [`RunStatus`]: Success, Failure, or Running
//! - [`NodeTypeRegistry`]: name → category, argument schema, run function
//! - [`Tree`]: parsed node arena plus the tick driver
//! - [`Environment`]: per-agent mutable execution state
//! - Built-in node types: [`composite`] (sequence, selector, tick),
//!   [`decorator`] (not, always_success), [`leaf`] (wait, log, has_var)

pub mod composite;
pub mod decorator;
pub mod env;
pub mod error;
pub mod leaf;
pub mod node;
pub mod registry;
pub mod status;
pub mod tree;
pub mod value;

#[cfg(test)]
mod test_support;

// Re-export core types for ergonomic API
pub use env::{DELTA_VAR, Environment};
pub use error::ParseError;
pub use node::Node;
pub use registry::{ArgSpec, ArgType, Category, NodeType, NodeTypeRegistry, RunFn};
pub use status::RunStatus;
pub use tree::Tree;
pub use value::Value;
