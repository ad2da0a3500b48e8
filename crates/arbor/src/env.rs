//! Per-instance execution state.
//!
//! An [`Environment`] carries everything that changes while a tree runs:
//! the caller-visible blackboard, per-node inner variables, the suspension
//! stack, and the status of the most recent run. The tree itself stays
//! immutable, which is what lets one parsed tree drive many environments
//! concurrently as long as each environment has a single driver.

use std::collections::HashMap;

use crate::{RunStatus, Value};

/// Blackboard key read by time-driven nodes (`tick`, `wait`) for the time
/// elapsed since the previous run. Defaults to `1.0` per run when unset,
/// which matches one-time-unit-per-tick stepping.
pub const DELTA_VAR: &str = "delta_time";

/// Mutable execution state for one running instance of a tree.
///
/// Create one environment per logical agent; never drive the same
/// environment from two tasks at once.
#[derive(Debug, Clone)]
pub struct Environment {
    vars: HashMap<String, Value>,
    inner_vars: HashMap<(u32, String), Value>,
    stack: Vec<usize>,
    last: RunStatus,
}

impl Environment {
    pub fn new() -> Self {
        Self {
            vars: HashMap::new(),
            inner_vars: HashMap::new(),
            stack: Vec::new(),
            last: RunStatus::Success,
        }
    }

    /// An environment with its blackboard seeded from `params`.
    pub fn seeded(params: HashMap<String, Value>) -> Self {
        Self {
            vars: params,
            ..Self::new()
        }
    }

    /// Read a blackboard variable.
    pub fn get_var(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    /// Write a blackboard variable.
    pub fn set_var(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.vars.insert(name.into(), value.into());
    }

    /// The whole blackboard, for callers reading results out.
    pub fn vars(&self) -> &HashMap<String, Value> {
        &self.vars
    }

    /// Read a node's private variable. Keys pair the variable name with the
    /// node's definition id, so two nodes never collide on a name.
    pub fn inner_var(&self, node_id: u32, name: &str) -> Option<&Value> {
        self.inner_vars.get(&(node_id, name.to_string()))
    }

    /// Write a node's private variable.
    pub fn set_inner_var(&mut self, node_id: u32, name: &str, value: Value) {
        self.inner_vars.insert((node_id, name.to_string()), value);
    }

    /// Remove and return a node's private variable.
    pub fn take_inner_var(&mut self, node_id: u32, name: &str) -> Option<Value> {
        self.inner_vars.remove(&(node_id, name.to_string()))
    }

    /// Record a suspended node's arena index.
    ///
    /// Suspensions unwind from the yielding leaf outwards, so entries are
    /// ordered innermost first; [`Environment::pop_stack`] returns the
    /// resumption point, i.e. the earliest entry.
    pub fn push_stack(&mut self, index: usize) {
        self.stack.push(index);
    }

    /// Remove and return the innermost suspended node, if any.
    pub fn pop_stack(&mut self) -> Option<usize> {
        if self.stack.is_empty() {
            None
        } else {
            Some(self.stack.remove(0))
        }
    }

    /// Drain the whole suspension path for replay.
    pub(crate) fn take_stack(&mut self) -> Vec<usize> {
        std::mem::take(&mut self.stack)
    }

    /// Re-append the outer part of a suspension path that was not reached
    /// before a node yielded again.
    pub(crate) fn extend_stack(&mut self, rest: impl IntoIterator<Item = usize>) {
        self.stack.extend(rest);
    }

    /// `true` when no node is suspended.
    pub fn is_idle(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    /// Status returned by the most recent run, or by the most recently
    /// completed node during a resume chain: composites read this to
    /// learn how their suspended child finished.
    pub fn last_status(&self) -> RunStatus {
        self.last
    }

    pub(crate) fn set_last(&mut self, status: RunStatus) {
        self.last = status;
    }

    /// Abandon any in-progress suspension: clears the stack and all inner
    /// variables. The blackboard survives.
    pub fn reset(&mut self) {
        self.stack.clear();
        self.inner_vars.clear();
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
