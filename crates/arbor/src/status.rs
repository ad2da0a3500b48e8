//! Status returned by behavior tree nodes.

/// The result of running a behavior tree node for one tick.
///
/// # Suspension Semantics
///
/// Unlike a pure turn-based tree, nodes here may span several ticks:
/// - Conditions evaluate immediately (e.g., "Is the target variable set?")
/// - Actions either complete within the tick or return [`RunStatus::Running`]
///   after recording their resumption point on the environment's stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunStatus {
    /// The node completed successfully.
    ///
    /// For conditions: The condition was met.
    /// For actions: The action executed without errors.
    Success,

    /// The node failed.
    ///
    /// For conditions: The condition was not met.
    /// For actions: The action could not be executed.
    Failure,

    /// The node has not finished and must be resumed on the next tick
    /// instead of restarted.
    ///
    /// A node returning `Running` is expected to have suspended itself via
    /// [`crate::Node::suspend`] or [`crate::Node::suspend_at`] so the tree
    /// can re-enter it first on the next run.
    Running,
}

impl RunStatus {
    /// Returns `true` if this status is `Success`.
    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, RunStatus::Success)
    }

    /// Returns `true` if this status is `Failure`.
    #[inline]
    pub fn is_failure(self) -> bool {
        matches!(self, RunStatus::Failure)
    }

    /// Returns `true` if this status is `Running`.
    #[inline]
    pub fn is_running(self) -> bool {
        matches!(self, RunStatus::Running)
    }

    /// Inverts a completed status: Success becomes Failure and vice versa.
    ///
    /// `Running` is not a result, so it inverts to itself.
    #[inline]
    pub fn invert(self) -> Self {
        match self {
            RunStatus::Success => RunStatus::Failure,
            RunStatus::Failure => RunStatus::Success,
            RunStatus::Running => RunStatus::Running,
        }
    }
}
