//! Tree parsing and tick driving.
//!
//! A [`Tree`] owns its node arena and is immutable once parsed: per-run
//! state lives entirely in each [`Environment`], so one `Arc<Tree>` can
//! back any number of agents. `run` either resumes the suspension path
//! recorded on the environment or starts from the root.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Deserialize;

use crate::error::ParseError;
use crate::registry::{NodeType, NodeTypeRegistry};
use crate::{Environment, Node, RunStatus, Value};

/// Serialized tree document: an object with a `root` node.
#[derive(Deserialize)]
struct TreeDef {
    root: NodeDef,
}

/// Serialized node: id, type tag, named args, ordered children.
#[derive(Deserialize)]
struct NodeDef {
    id: u32,
    #[serde(rename = "type")]
    ty: String,
    #[serde(default)]
    args: HashMap<String, Value>,
    #[serde(default)]
    children: Vec<NodeDef>,
}

/// A parsed, immutable behavior tree.
pub struct Tree {
    name: String,
    nodes: Vec<Node>,
    root: usize,
    /// Total runs driven through this tree, across all environments. The
    /// tree is shared read-only, hence the atomic.
    tick: AtomicU64,
}

impl std::fmt::Debug for Tree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tree")
            .field("name", &self.name)
            .field("root", &self.root)
            .field("tick", &self.tick)
            .finish_non_exhaustive()
    }
}

impl Tree {
    /// Parse a definition document into a tree.
    ///
    /// Validates node types against the registry, child arity against each
    /// type's category, argument values against the declared schema
    /// (applying defaults), and id uniqueness.
    pub fn parse(name: &str, text: &str, registry: &NodeTypeRegistry) -> Result<Self, ParseError> {
        let def: TreeDef = serde_json::from_str(text)?;
        let mut nodes = Vec::new();
        let mut seen = HashSet::new();
        let root = build(def.root, registry, &mut nodes, &mut seen)?;
        Ok(Self {
            name: name.to_string(),
            nodes,
            root,
            tick: AtomicU64::new(0),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of runs driven through this tree so far.
    pub fn tick(&self) -> u64 {
        self.tick.load(Ordering::Relaxed)
    }

    pub fn root(&self) -> &Node {
        &self.nodes[self.root]
    }

    /// Node at an arena index. Composite run functions use this to reach
    /// their children.
    pub fn node(&self, index: usize) -> &Node {
        &self.nodes[index]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Drive one tick for the given environment.
    ///
    /// With suspended nodes on the stack, re-enters the innermost one
    /// first and walks outwards as nodes complete, stopping when a node
    /// yields again or the path is exhausted. With an idle environment,
    /// runs from the root. The tick counter advances exactly once per
    /// call regardless of outcome.
    pub fn run(&self, env: &mut Environment) -> RunStatus {
        let status = if env.is_idle() {
            self.root().run(self, env)
        } else {
            self.replay(env)
        };
        env.set_last(status);
        self.tick.fetch_add(1, Ordering::Relaxed);
        status
    }

    /// Abandon any suspension recorded on the environment: clears the
    /// stack and all inner variables, leaving the environment Idle. The
    /// blackboard is untouched. Idempotent; in-flight nodes get no
    /// cleanup callback.
    pub fn interrupt(&self, env: &mut Environment) {
        env.reset();
    }

    fn replay(&self, env: &mut Environment) -> RunStatus {
        let mut path = env.take_stack().into_iter();
        let mut status = RunStatus::Success;
        while let Some(index) = path.next() {
            let Some(node) = self.nodes.get(index) else {
                // The environment was suspended against a different tree.
                tracing::warn!(
                    "tree `{}`: stale suspension entry {}, restarting from root",
                    self.name,
                    index
                );
                env.reset();
                return self.root().run(self, env);
            };
            status = node.run(self, env);
            if status.is_running() {
                // The rest of the path stays suspended, outside whatever
                // the yielding node just re-pushed.
                env.extend_stack(path);
                return status;
            }
            // Publish the completed status for the parent about to resume.
            env.set_last(status);
        }
        status
    }
}

fn build(
    def: NodeDef,
    registry: &NodeTypeRegistry,
    nodes: &mut Vec<Node>,
    seen: &mut HashSet<u32>,
) -> Result<usize, ParseError> {
    if !seen.insert(def.id) {
        return Err(ParseError::DuplicateId { id: def.id });
    }
    let ty = registry.get(&def.ty).ok_or_else(|| ParseError::UnknownType {
        id: def.id,
        ty: def.ty.clone(),
    })?;

    let (min, max) = ty.category.child_bounds();
    let found = def.children.len();
    if found < min || max.is_some_and(|max| found > max) {
        return Err(ParseError::ChildCount {
            id: def.id,
            category: ty.category,
            expected: ty.category.arity_label(),
            found,
        });
    }

    let args = validate_args(def.id, &ty, def.args)?;
    let mut children = Vec::with_capacity(def.children.len());
    for child in def.children {
        children.push(build(child, registry, nodes, seen)?);
    }

    let index = nodes.len();
    nodes.push(Node::new(def.id, index, ty, args, children));
    Ok(index)
}

/// Check provided argument values against the type's schema and fill in
/// defaults. Arguments the schema does not declare pass through untouched.
fn validate_args(
    id: u32,
    ty: &NodeType,
    mut args: HashMap<String, Value>,
) -> Result<HashMap<String, Value>, ParseError> {
    for spec in &ty.args {
        let value = match args.remove(&spec.name) {
            None | Some(Value::Null) => {
                if let Some(default) = &spec.default {
                    default.clone()
                } else if spec.nullable {
                    Value::Null
                } else {
                    return Err(ParseError::MissingArg {
                        id,
                        arg: spec.name.clone(),
                    });
                }
            }
            Some(value) => {
                if !spec.ty.accepts(&value) {
                    return Err(ParseError::ArgType {
                        id,
                        arg: spec.name.clone(),
                        expected: spec.ty,
                        found: value.kind(),
                    });
                }
                if !spec.choices.is_empty() && !spec.choices.contains(&value) {
                    return Err(ParseError::BadChoice {
                        id,
                        arg: spec.name.clone(),
                    });
                }
                value
            }
        };
        args.insert(spec.name.clone(), value);
    }
    Ok(args)
}
