//! Tree vertices.
//!
//! A [`Node`] is an arena-resident vertex of a parsed tree: its definition
//! id, its node type, validated arguments, and the arena indices of its
//! children. Nodes hold no mutable state of their own; everything that
//! changes while running lives in the [`Environment`], which is what makes
//! one tree safely shareable across many environments.

use std::collections::HashMap;
use std::sync::Arc;

use crate::registry::{Category, NodeType};
use crate::{Environment, RunStatus, Tree, Value};

/// Inner-variable name under which a suspending node records which child
/// was running. Scoped per node id, so it cannot collide across nodes.
const CURSOR_VAR: &str = "cursor";

/// One behavior tree vertex.
pub struct Node {
    id: u32,
    index: usize,
    ty: Arc<NodeType>,
    args: HashMap<String, Value>,
    children: Vec<usize>,
}

impl Node {
    pub(crate) fn new(
        id: u32,
        index: usize,
        ty: Arc<NodeType>,
        args: HashMap<String, Value>,
        children: Vec<usize>,
    ) -> Self {
        Self {
            id,
            index,
            ty,
            args,
            children,
        }
    }

    /// Definition id, unique within the tree. Keys this node's inner
    /// variables.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Position in the owning tree's arena. Keys this node's stack entries.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn type_name(&self) -> &str {
        &self.ty.name
    }

    pub fn category(&self) -> Category {
        self.ty.category
    }

    /// Arena indices of the children, in declared order.
    pub fn children(&self) -> &[usize] {
        &self.children
    }

    /// Raw argument value, after defaults were applied at parse time.
    pub fn arg(&self, name: &str) -> Option<&Value> {
        self.args.get(name)
    }

    pub fn arg_int(&self, name: &str) -> Option<i64> {
        self.arg(name).and_then(Value::as_int)
    }

    pub fn arg_float(&self, name: &str) -> Option<f64> {
        self.arg(name).and_then(Value::as_float)
    }

    pub fn arg_bool(&self, name: &str) -> Option<bool> {
        self.arg(name).and_then(Value::as_bool)
    }

    pub fn arg_str(&self, name: &str) -> Option<&str> {
        self.arg(name).and_then(Value::as_str)
    }

    /// Run this node's type-specific behavior.
    pub fn run(&self, tree: &Tree, env: &mut Environment) -> RunStatus {
        (self.ty.run)(self, tree, env)
    }

    /// Yield from a leaf: push this node onto the suspension stack and
    /// return [`RunStatus::Running`] so the parent can propagate upwards.
    pub fn suspend(&self, env: &mut Environment) -> RunStatus {
        env.push_stack(self.index);
        RunStatus::Running
    }

    /// Yield from a composite or decorator: record the running child's
    /// cursor before suspending, so the next run re-enters that child
    /// instead of restarting the chain.
    pub fn suspend_at(&self, env: &mut Environment, cursor: usize) -> RunStatus {
        env.set_inner_var(self.id, CURSOR_VAR, Value::Int(cursor as i64));
        self.suspend(env)
    }

    /// Consume the recorded cursor. `Some` means this invocation resumes a
    /// suspension; `None` means a fresh entry.
    pub fn resume_cursor(&self, env: &mut Environment) -> Option<usize> {
        env.take_inner_var(self.id, CURSOR_VAR)
            .and_then(|v| v.as_int())
            .map(|v| v as usize)
    }
}
