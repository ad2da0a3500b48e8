//! Shared unit-test fixtures.
//!
//! `probe` and `step` are instrumented actions that append their label to
//! the `trace` blackboard variable, so tests can assert exact execution
//! order. `step` yields a configurable number of times before completing,
//! which exercises the suspend/resume path.

use std::collections::HashMap;

use crate::env::DELTA_VAR;
use crate::registry::{ArgSpec, ArgType, Category, NodeType, NodeTypeRegistry};
use crate::{Environment, Node, RunStatus, Tree, Value};

pub(crate) fn registry() -> NodeTypeRegistry {
    let mut registry = NodeTypeRegistry::builtin();
    registry.register(NodeType::new(
        "probe",
        Category::Action,
        vec![
            ArgSpec::required("label", ArgType::String, "mark appended to the trace"),
            ArgSpec::optional("result", ArgType::String, "status to return", "success")
                .with_choices(vec!["success".into(), "failure".into()]),
        ],
        run_probe,
    ));
    registry.register(NodeType::new(
        "step",
        Category::Action,
        vec![
            ArgSpec::required("label", ArgType::String, "mark appended to the trace"),
            ArgSpec::optional("runs", ArgType::Int, "yields before completing", 1i64),
            ArgSpec::optional("result", ArgType::String, "status once complete", "success")
                .with_choices(vec!["success".into(), "failure".into()]),
        ],
        run_step,
    ));
    registry
}

pub(crate) fn env() -> Environment {
    Environment::new()
}

pub(crate) fn env_with_delta(delta: f64) -> Environment {
    Environment::seeded(HashMap::from([(DELTA_VAR.to_string(), Value::Float(delta))]))
}

pub(crate) fn trace(env: &Environment) -> String {
    env.get_var("trace")
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default()
}

fn mark(node: &Node, env: &mut Environment) {
    let mut trace = trace(env);
    trace.push_str(node.arg_str("label").unwrap_or("?"));
    env.set_var("trace", trace);
}

fn finish(node: &Node) -> RunStatus {
    match node.arg_str("result") {
        Some("failure") => RunStatus::Failure,
        _ => RunStatus::Success,
    }
}

fn run_probe(node: &Node, _tree: &Tree, env: &mut Environment) -> RunStatus {
    mark(node, env);
    finish(node)
}

fn run_step(node: &Node, _tree: &Tree, env: &mut Environment) -> RunStatus {
    mark(node, env);
    let left = env
        .inner_var(node.id(), "left")
        .and_then(Value::as_int)
        .or_else(|| node.arg_int("runs"))
        .unwrap_or(0);
    if left > 0 {
        env.set_inner_var(node.id(), "left", Value::Int(left - 1));
        return node.suspend(env);
    }
    env.take_inner_var(node.id(), "left");
    finish(node)
}
