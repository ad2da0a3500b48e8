//! Decorator node types.
//!
//! Decorators wrap a single child and transform its completed result:
//! `not` (logical NOT) and `always_success` (failure suppression). A
//! Running child passes through untransformed: the decorator suspends
//! alongside it and applies the transform once the child finishes.

use crate::registry::{Category, NodeType, NodeTypeRegistry};
use crate::{Environment, Node, RunStatus, Tree};

pub(crate) fn register(registry: &mut NodeTypeRegistry) {
    registry.register(NodeType::new("not", Category::Decorator, vec![], run_not));
    registry.register(NodeType::new(
        "always_success",
        Category::Decorator,
        vec![],
        run_always_success,
    ));
}

/// Fresh entry runs the child; a resumed entry reads the status the child
/// completed with from the environment.
fn child_status(node: &Node, tree: &Tree, env: &mut Environment) -> RunStatus {
    match node.resume_cursor(env) {
        Some(_) => match env.last_status() {
            RunStatus::Running => run_child(node, tree, env),
            done => done,
        },
        None => run_child(node, tree, env),
    }
}

fn run_child(node: &Node, tree: &Tree, env: &mut Environment) -> RunStatus {
    // Arity is validated at parse time; a decorator always has one child.
    match node.children().first() {
        Some(&child) => tree.node(child).run(tree, env),
        None => RunStatus::Failure,
    }
}

/// Inverts the child's result.
fn run_not(node: &Node, tree: &Tree, env: &mut Environment) -> RunStatus {
    match child_status(node, tree, env) {
        RunStatus::Running => node.suspend_at(env, 0),
        done => done.invert(),
    }
}

/// Maps any completed child result to Success.
fn run_always_success(node: &Node, tree: &Tree, env: &mut Environment) -> RunStatus {
    match child_status(node, tree, env) {
        RunStatus::Running => node.suspend_at(env, 0),
        _ => RunStatus::Success,
    }
}
