//! Node-type registry.
//!
//! Every node in a tree definition names a type; the registry maps that name
//! to a [`NodeType`]: a category, a documented argument schema, and the run
//! function executed each tick. The registry is populated once at startup
//! (before any tree is parsed) and is read-only afterwards, so parsed trees
//! can hold `Arc<NodeType>` references without further synchronization.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::{Environment, Node, RunStatus, Tree, Value};

/// Run function attached to a node type.
///
/// Implementations operate purely through the node/environment contract:
/// child access via the tree arena, argument access, inner variables, and
/// the suspension stack.
pub type RunFn = Box<dyn Fn(&Node, &Tree, &mut Environment) -> RunStatus + Send + Sync>;

/// Human-readable category of a node type. The category fixes the child
/// arity a definition must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Drives one or more children (sequence, selector, tick).
    Composite,
    /// Wraps exactly one child and transforms its result.
    Decorator,
    /// Leaf that performs work. No children.
    Action,
    /// Leaf that tests a predicate. No children.
    Condition,
}

impl Category {
    /// Allowed child count as `(min, max)`; `None` means unbounded.
    pub(crate) fn child_bounds(self) -> (usize, Option<usize>) {
        match self {
            Category::Composite => (1, None),
            Category::Decorator => (1, Some(1)),
            Category::Action | Category::Condition => (0, Some(0)),
        }
    }

    /// Diagnostic label for the arity rule, e.g. "exactly 1 child".
    pub(crate) fn arity_label(self) -> &'static str {
        match self {
            Category::Composite => "at least 1 child",
            Category::Decorator => "exactly 1 child",
            Category::Action | Category::Condition => "no children",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Composite => "composite",
            Category::Decorator => "decorator",
            Category::Action => "action",
            Category::Condition => "condition",
        };
        write!(f, "{}", label)
    }
}

/// Declared type of a node argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgType {
    Int,
    Float,
    Bool,
    String,
}

impl ArgType {
    /// Whether a concrete value satisfies this declared type.
    ///
    /// `Float` accepts integer literals since JSON has no float/int split
    /// authors can be expected to respect.
    pub fn accepts(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (ArgType::Int, Value::Int(_))
                | (ArgType::Float, Value::Float(_))
                | (ArgType::Float, Value::Int(_))
                | (ArgType::Bool, Value::Bool(_))
                | (ArgType::String, Value::Str(_))
        )
    }
}

impl fmt::Display for ArgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ArgType::Int => "int",
            ArgType::Float => "float",
            ArgType::Bool => "bool",
            ArgType::String => "string",
        };
        write!(f, "{}", label)
    }
}

/// Schema entry for one named node argument.
#[derive(Debug, Clone)]
pub struct ArgSpec {
    pub name: String,
    pub ty: ArgType,
    pub desc: String,
    /// Filled in at parse time when the definition omits the argument.
    pub default: Option<Value>,
    /// Non-empty restricts the argument to these values.
    pub choices: Vec<Value>,
    /// A nullable argument may be omitted or explicitly `null`.
    pub nullable: bool,
}

impl ArgSpec {
    /// An argument the definition must provide.
    pub fn required(name: &str, ty: ArgType, desc: &str) -> Self {
        Self {
            name: name.to_string(),
            ty,
            desc: desc.to_string(),
            default: None,
            choices: Vec::new(),
            nullable: false,
        }
    }

    /// An argument with a default applied when omitted.
    pub fn optional(name: &str, ty: ArgType, desc: &str, default: impl Into<Value>) -> Self {
        Self {
            default: Some(default.into()),
            ..Self::required(name, ty, desc)
        }
    }

    /// Restrict the argument to an enumerated set of values.
    pub fn with_choices(mut self, choices: Vec<Value>) -> Self {
        self.choices = choices;
        self
    }

    /// Allow the argument to be omitted or `null` without a default.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }
}

/// A registered node type: name, category, argument schema, and run function.
pub struct NodeType {
    pub name: String,
    pub category: Category,
    pub args: Vec<ArgSpec>,
    pub run: RunFn,
}

impl NodeType {
    pub fn new(
        name: &str,
        category: Category,
        args: Vec<ArgSpec>,
        run: impl Fn(&Node, &Tree, &mut Environment) -> RunStatus + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.to_string(),
            category,
            args,
            run: Box::new(run),
        }
    }
}

/// Name → node type map consulted while parsing tree definitions.
pub struct NodeTypeRegistry {
    types: HashMap<String, Arc<NodeType>>,
}

impl NodeTypeRegistry {
    /// An empty registry. Useful when embedding only custom node types.
    pub fn new() -> Self {
        Self {
            types: HashMap::new(),
        }
    }

    /// A registry pre-populated with the built-in composites, decorators,
    /// and leaves.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        crate::composite::register(&mut registry);
        crate::decorator::register(&mut registry);
        crate::leaf::register(&mut registry);
        registry
    }

    /// Register a node type. The last registration for a name wins, so
    /// embedders can shadow a built-in.
    pub fn register(&mut self, ty: NodeType) {
        self.types.insert(ty.name.clone(), Arc::new(ty));
    }

    /// Look up a node type by name.
    pub fn get(&self, name: &str) -> Option<Arc<NodeType>> {
        self.types.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }
}

impl Default for NodeTypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_covers_all_categories() {
        let registry = NodeTypeRegistry::builtin();
        for name in ["sequence", "selector", "tick"] {
            assert_eq!(registry.get(name).unwrap().category, Category::Composite);
        }
        for name in ["not", "always_success"] {
            assert_eq!(registry.get(name).unwrap().category, Category::Decorator);
        }
        assert_eq!(registry.get("wait").unwrap().category, Category::Action);
        assert_eq!(registry.get("log").unwrap().category, Category::Action);
        assert_eq!(registry.get("has_var").unwrap().category, Category::Condition);
        assert!(registry.contains("sequence"));
        assert!(!registry.contains("no_such_type"));
        assert!(registry.get("no_such_type").is_none());
    }

    #[test]
    fn last_registration_wins() {
        let mut registry = NodeTypeRegistry::builtin();
        registry.register(NodeType::new("wait", Category::Condition, vec![], |_, _, _| {
            crate::RunStatus::Failure
        }));
        assert_eq!(registry.get("wait").unwrap().category, Category::Condition);
    }

    #[test]
    fn float_args_accept_int_values() {
        assert!(ArgType::Float.accepts(&Value::Int(3)));
        assert!(ArgType::Float.accepts(&Value::Float(3.0)));
        assert!(!ArgType::Int.accepts(&Value::Float(3.0)));
        assert!(!ArgType::String.accepts(&Value::Bool(true)));
    }

    #[test]
    fn arg_spec_builders() {
        let spec = ArgSpec::optional("level", ArgType::String, "log level", "info")
            .with_choices(vec!["debug".into(), "info".into(), "warn".into()]);
        assert_eq!(spec.default, Some(Value::Str("info".into())));
        assert_eq!(spec.choices.len(), 3);
        assert!(!spec.nullable);

        let spec = ArgSpec::required("target", ArgType::String, "optional target").nullable();
        assert!(spec.nullable);
        assert!(spec.default.is_none());
    }
}
