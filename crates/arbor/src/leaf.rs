//! Built-in leaf node types.
//!
//! Leaves do the actual work: `wait` (time-driven action that spans
//! ticks), `log` (tracing output), and `has_var` (blackboard condition).
//! Gameplay-specific actions and conditions are registered by the
//! embedding application through [`NodeTypeRegistry::register`].

use crate::env::DELTA_VAR;
use crate::registry::{ArgSpec, ArgType, Category, NodeType, NodeTypeRegistry};
use crate::{Environment, Node, RunStatus, Tree, Value};

const ELAPSED_VAR: &str = "elapsed";

pub(crate) fn register(registry: &mut NodeTypeRegistry) {
    registry.register(NodeType::new(
        "wait",
        Category::Action,
        vec![ArgSpec::required(
            "duration",
            ArgType::Float,
            "time units to stay Running before succeeding",
        )],
        run_wait,
    ));
    registry.register(NodeType::new(
        "log",
        Category::Action,
        vec![
            ArgSpec::required("message", ArgType::String, "text to emit"),
            ArgSpec::optional("level", ArgType::String, "severity of the entry", "info")
                .with_choices(vec!["debug".into(), "info".into(), "warn".into()]),
        ],
        run_log,
    ));
    registry.register(NodeType::new(
        "has_var",
        Category::Condition,
        vec![ArgSpec::required(
            "name",
            ArgType::String,
            "blackboard variable to test",
        )],
        run_has_var,
    ));
}

/// Accumulates [`DELTA_VAR`] into its `elapsed` inner variable and stays
/// Running (re-suspending itself each tick) until `duration` is reached,
/// then clears the accumulator and succeeds.
fn run_wait(node: &Node, _tree: &Tree, env: &mut Environment) -> RunStatus {
    let delta = env.get_var(DELTA_VAR).and_then(Value::as_float).unwrap_or(1.0);
    let elapsed = env
        .inner_var(node.id(), ELAPSED_VAR)
        .and_then(Value::as_float)
        .unwrap_or(0.0)
        + delta;
    let duration = node.arg_float("duration").unwrap_or_default();
    if elapsed < duration {
        env.set_inner_var(node.id(), ELAPSED_VAR, Value::Float(elapsed));
        return node.suspend(env);
    }
    env.take_inner_var(node.id(), ELAPSED_VAR);
    RunStatus::Success
}

fn run_log(node: &Node, _tree: &Tree, _env: &mut Environment) -> RunStatus {
    let message = node.arg_str("message").unwrap_or_default();
    match node.arg_str("level") {
        Some("debug") => tracing::debug!("{}", message),
        Some("warn") => tracing::warn!("{}", message),
        _ => tracing::info!("{}", message),
    }
    RunStatus::Success
}

/// Succeeds when the named blackboard variable is set and non-null.
fn run_has_var(node: &Node, _tree: &Tree, env: &mut Environment) -> RunStatus {
    match node.arg_str("name").and_then(|name| env.get_var(name)) {
        Some(value) if !value.is_null() => RunStatus::Success,
        _ => RunStatus::Failure,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{env, env_with_delta, registry};
    use crate::Tree;

    fn parse(text: &str) -> Tree {
        Tree::parse("test", text, &registry()).unwrap()
    }

    #[test]
    fn wait_runs_until_duration_elapses() {
        let tree = parse(r#"{"root": {"id": 1, "type": "wait", "args": {"duration": 3}}}"#);
        // No delta_time on the blackboard: each run counts as 1.0.
        let mut env = env();

        assert_eq!(tree.run(&mut env), RunStatus::Running);
        assert_eq!(tree.run(&mut env), RunStatus::Running);
        assert_eq!(tree.run(&mut env), RunStatus::Success);
        assert!(env.is_idle());

        // The accumulator was cleared; a fresh cycle starts over.
        assert_eq!(tree.run(&mut env), RunStatus::Running);
    }

    #[test]
    fn wait_reads_delta_from_blackboard() {
        let tree = parse(r#"{"root": {"id": 1, "type": "wait", "args": {"duration": 3}}}"#);
        let mut env = env_with_delta(1.5);

        assert_eq!(tree.run(&mut env), RunStatus::Running);
        assert_eq!(tree.run(&mut env), RunStatus::Success);
    }

    #[test]
    fn has_var_checks_presence_and_nullness() {
        let tree = parse(r#"{"root": {"id": 1, "type": "has_var", "args": {"name": "target"}}}"#);

        let mut env = env();
        assert_eq!(tree.run(&mut env), RunStatus::Failure);

        env.set_var("target", "goblin");
        assert_eq!(tree.run(&mut env), RunStatus::Success);

        env.set_var("target", crate::Value::Null);
        assert_eq!(tree.run(&mut env), RunStatus::Failure);
    }

    #[test]
    fn log_succeeds_with_default_level() {
        let tree = parse(r#"{"root": {"id": 1, "type": "log", "args": {"message": "spawned"}}}"#);
        let mut env = env();
        assert_eq!(tree.run(&mut env), RunStatus::Success);
    }
}
