//! Composite node types.
//!
//! Composites control the execution flow of multiple children:
//! `sequence` (AND logic), `selector` (OR logic), and `tick` (interval
//! polling). All three are resumable: when a child returns
//! [`RunStatus::Running`] the composite records that child's index and
//! suspends, so the next run re-enters the same child instead of
//! restarting the chain.

use crate::env::DELTA_VAR;
use crate::registry::{ArgSpec, ArgType, Category, NodeType, NodeTypeRegistry};
use crate::{Environment, Node, RunStatus, Tree, Value};

const ELAPSED_VAR: &str = "elapsed";

pub(crate) fn register(registry: &mut NodeTypeRegistry) {
    registry.register(NodeType::new(
        "sequence",
        Category::Composite,
        vec![],
        run_sequence,
    ));
    registry.register(NodeType::new(
        "selector",
        Category::Composite,
        vec![],
        run_selector,
    ));
    registry.register(NodeType::new(
        "tick",
        Category::Composite,
        vec![
            ArgSpec::required(
                "interval",
                ArgType::Float,
                "time units to accumulate before the children run",
            ),
            ArgSpec::optional(
                "reset",
                ArgType::Bool,
                "clear the accumulator once the children have run",
                true,
            ),
        ],
        run_tick,
    ));
}

/// Where a composite should continue after consuming its resume state.
///
/// When a child yields without suspending itself (a misbehaving custom
/// node), the recorded child is re-entered rather than skipped.
fn resume_index(node: &Node, env: &mut Environment, advance_on: RunStatus) -> Result<usize, RunStatus> {
    match node.resume_cursor(env) {
        None => Ok(0),
        Some(cursor) => match env.last_status() {
            RunStatus::Running => Ok(cursor),
            status if status == advance_on => Ok(cursor + 1),
            status => Err(status),
        },
    }
}

/// Runs children in order until one fails; short-circuited logical AND.
fn run_sequence(node: &Node, tree: &Tree, env: &mut Environment) -> RunStatus {
    let mut index = match resume_index(node, env, RunStatus::Success) {
        Ok(index) => index,
        Err(_) => return RunStatus::Failure,
    };
    while let Some(&child) = node.children().get(index) {
        match tree.node(child).run(tree, env) {
            RunStatus::Success => index += 1,
            RunStatus::Failure => return RunStatus::Failure,
            RunStatus::Running => return node.suspend_at(env, index),
        }
    }
    RunStatus::Success
}

/// Tries children in order until one succeeds; short-circuited logical OR.
fn run_selector(node: &Node, tree: &Tree, env: &mut Environment) -> RunStatus {
    let mut index = match resume_index(node, env, RunStatus::Failure) {
        Ok(index) => index,
        Err(_) => return RunStatus::Success,
    };
    while let Some(&child) = node.children().get(index) {
        match tree.node(child).run(tree, env) {
            RunStatus::Success => return RunStatus::Success,
            RunStatus::Failure => index += 1,
            RunStatus::Running => return node.suspend_at(env, index),
        }
    }
    RunStatus::Failure
}

/// Interval-polling composite.
///
/// Accumulates the blackboard's [`DELTA_VAR`] into its `elapsed` inner
/// variable. Below `interval` it returns Success without touching its
/// children (a no-op poll); once the interval is reached it runs every
/// child in declared order. A child's Failure does not stop the pass: the
/// node is a polling driver rather than an AND gate. A Running child
/// suspends the node with that child's cursor; a resumed invocation skips
/// the interval gate entirely, so the suspended chain always completes
/// before the cooldown applies again.
fn run_tick(node: &Node, tree: &Tree, env: &mut Environment) -> RunStatus {
    let mut index = match node.resume_cursor(env) {
        Some(cursor) => match env.last_status() {
            RunStatus::Running => cursor,
            _ => cursor + 1,
        },
        None => {
            let delta = env.get_var(DELTA_VAR).and_then(Value::as_float).unwrap_or(1.0);
            let elapsed = env
                .inner_var(node.id(), ELAPSED_VAR)
                .and_then(Value::as_float)
                .unwrap_or(0.0)
                + delta;
            let interval = node.arg_float("interval").unwrap_or_default();
            if elapsed < interval {
                env.set_inner_var(node.id(), ELAPSED_VAR, Value::Float(elapsed));
                return RunStatus::Success;
            }
            let carried = if node.arg_bool("reset").unwrap_or(true) {
                0.0
            } else {
                elapsed
            };
            env.set_inner_var(node.id(), ELAPSED_VAR, Value::Float(carried));
            0
        }
    };
    while let Some(&child) = node.children().get(index) {
        match tree.node(child).run(tree, env) {
            RunStatus::Running => return node.suspend_at(env, index),
            _ => index += 1,
        }
    }
    RunStatus::Success
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{env, env_with_delta, registry, trace};
    use crate::Tree;

    fn parse(text: &str) -> Tree {
        Tree::parse("test", text, &registry()).unwrap()
    }

    #[test]
    fn sequence_stops_on_first_failure() {
        let tree = parse(
            r#"{"root": {"id": 1, "type": "sequence", "children": [
                {"id": 2, "type": "probe", "args": {"label": "a"}},
                {"id": 3, "type": "probe", "args": {"label": "b", "result": "failure"}},
                {"id": 4, "type": "probe", "args": {"label": "c"}}
            ]}}"#,
        );
        let mut env = env();
        assert_eq!(tree.run(&mut env), RunStatus::Failure);
        assert_eq!(trace(&env), "ab");
        assert!(env.is_idle());
    }

    #[test]
    fn selector_stops_on_first_success() {
        let tree = parse(
            r#"{"root": {"id": 1, "type": "selector", "children": [
                {"id": 2, "type": "probe", "args": {"label": "a", "result": "failure"}},
                {"id": 3, "type": "probe", "args": {"label": "b"}},
                {"id": 4, "type": "probe", "args": {"label": "c"}}
            ]}}"#,
        );
        let mut env = env();
        assert_eq!(tree.run(&mut env), RunStatus::Success);
        assert_eq!(trace(&env), "ab");
    }

    #[test]
    fn sequence_resumes_at_suspended_child() {
        // Scenario: the middle child runs once, yields, then succeeds.
        let tree = parse(
            r#"{"root": {"id": 1, "type": "sequence", "children": [
                {"id": 2, "type": "probe", "args": {"label": "a"}},
                {"id": 3, "type": "step", "args": {"label": "w", "runs": 1}},
                {"id": 4, "type": "probe", "args": {"label": "c"}}
            ]}}"#,
        );
        let mut env = env();

        assert_eq!(tree.run(&mut env), RunStatus::Running);
        assert_eq!(trace(&env), "aw");
        assert!(!env.is_idle());

        // The suspended child is re-entered first; `a` does not run again.
        assert_eq!(tree.run(&mut env), RunStatus::Success);
        assert_eq!(trace(&env), "awwc");
        assert!(env.is_idle());
    }

    #[test]
    fn selector_resumes_past_failed_suspension() {
        let tree = parse(
            r#"{"root": {"id": 1, "type": "selector", "children": [
                {"id": 2, "type": "step", "args": {"label": "w", "runs": 1, "result": "failure"}},
                {"id": 3, "type": "probe", "args": {"label": "b"}}
            ]}}"#,
        );
        let mut env = env();

        assert_eq!(tree.run(&mut env), RunStatus::Running);
        // Resumed child fails; the selector moves on to the next sibling.
        assert_eq!(tree.run(&mut env), RunStatus::Success);
        assert_eq!(trace(&env), "wwb");
    }

    #[test]
    fn tick_polls_until_interval_elapses() {
        let tree = parse(
            r#"{"root": {"id": 1, "type": "tick", "args": {"interval": 3}, "children": [
                {"id": 2, "type": "probe", "args": {"label": "a"}},
                {"id": 3, "type": "probe", "args": {"label": "b"}}
            ]}}"#,
        );
        let mut env = env_with_delta(1.0);

        // Two no-op polls while elapsed < interval.
        assert_eq!(tree.run(&mut env), RunStatus::Success);
        assert_eq!(tree.run(&mut env), RunStatus::Success);
        assert_eq!(trace(&env), "");

        // Third run reaches the interval and drives both children in order.
        assert_eq!(tree.run(&mut env), RunStatus::Success);
        assert_eq!(trace(&env), "ab");

        // Accumulator was reset; the cycle repeats.
        assert_eq!(tree.run(&mut env), RunStatus::Success);
        assert_eq!(tree.run(&mut env), RunStatus::Success);
        assert_eq!(trace(&env), "ab");
        assert_eq!(tree.run(&mut env), RunStatus::Success);
        assert_eq!(trace(&env), "abab");
    }

    #[test]
    fn tick_resumes_suspended_child_before_cooldown() {
        let tree = parse(
            r#"{"root": {"id": 1, "type": "tick", "args": {"interval": 2}, "children": [
                {"id": 2, "type": "step", "args": {"label": "w", "runs": 1}}
            ]}}"#,
        );
        let mut env = env_with_delta(1.0);

        assert_eq!(tree.run(&mut env), RunStatus::Success); // elapsed 1 < 2
        assert_eq!(tree.run(&mut env), RunStatus::Running); // fired, child yields
        // The suspended child is resumed even though no new interval elapsed.
        assert_eq!(tree.run(&mut env), RunStatus::Success);
        assert_eq!(trace(&env), "ww");
        assert!(env.is_idle());
    }

    #[test]
    fn tick_without_reset_carries_the_accumulator() {
        let tree = parse(
            r#"{"root": {"id": 1, "type": "tick", "args": {"interval": 2, "reset": false}, "children": [
                {"id": 2, "type": "probe", "args": {"label": "a"}}
            ]}}"#,
        );
        let mut env = env_with_delta(1.0);

        assert_eq!(tree.run(&mut env), RunStatus::Success); // elapsed 1 < 2
        assert_eq!(trace(&env), "");
        assert_eq!(tree.run(&mut env), RunStatus::Success); // fires at 2, keeps elapsed
        assert_eq!(trace(&env), "a");

        // The retained accumulator holds the gate open on every later run.
        assert_eq!(tree.run(&mut env), RunStatus::Success);
        assert_eq!(tree.run(&mut env), RunStatus::Success);
        assert_eq!(trace(&env), "aaa");
    }

    #[test]
    fn tick_ignores_child_failures() {
        let tree = parse(
            r#"{"root": {"id": 1, "type": "tick", "args": {"interval": 1}, "children": [
                {"id": 2, "type": "probe", "args": {"label": "a", "result": "failure"}},
                {"id": 3, "type": "probe", "args": {"label": "b"}}
            ]}}"#,
        );
        let mut env = env_with_delta(1.0);
        assert_eq!(tree.run(&mut env), RunStatus::Success);
        assert_eq!(trace(&env), "ab");
    }
}
