//! Caller-facing handle to drive one agent's tree.

use std::collections::HashMap;
use std::sync::Arc;

use arbor::{Environment, RunStatus, Tree, Value};

/// A shared parsed tree paired with one agent's private [`Environment`].
///
/// The tree may back many handles at once; the environment belongs to
/// exactly this handle and must be driven from a single task.
pub struct TreeHandle {
    tree: Arc<Tree>,
    env: Environment,
}

impl std::fmt::Debug for TreeHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeHandle")
            .field("tree", &self.tree.name())
            .finish_non_exhaustive()
    }
}

impl TreeHandle {
    pub(crate) fn new(tree: Arc<Tree>, env: Environment) -> Self {
        Self { tree, env }
    }

    /// Drive one tick, resuming any suspended node first.
    pub fn run(&mut self) -> RunStatus {
        self.tree.run(&mut self.env)
    }

    /// Abandon any in-progress suspension, leaving the environment Idle.
    pub fn interrupt(&mut self) {
        self.tree.interrupt(&mut self.env);
    }

    /// The shared parsed tree backing this handle.
    pub fn tree(&self) -> &Arc<Tree> {
        &self.tree
    }

    /// Blackboard read access.
    pub fn vars(&self) -> &HashMap<String, Value> {
        self.env.vars()
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Mutable environment access, e.g. to feed `delta_time` or other
    /// inputs between ticks.
    pub fn env_mut(&mut self) -> &mut Environment {
        &mut self.env
    }
}
