//! Execution scope handles
//!
//! The execution scope identifies the group of processes that cooperate on
//! one time point (the spatial communicator of the solver). The harness never
//! communicates through it; callbacks may. The only thing the harness reads is
//! an identity string for tagging log spans.

/// Opaque handle for the cooperating process group
pub trait ExecutionScope {
    /// Stable, human-readable identity of this scope
    fn identity(&self) -> String;
}

impl<S: ExecutionScope + ?Sized> ExecutionScope for &S {
    fn identity(&self) -> String {
        (**self).identity()
    }
}

/// Single-process scope with no peers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocalScope;

impl ExecutionScope for LocalScope {
    fn identity(&self) -> String {
        "local".to_string()
    }
}

/// Scope identified by a caller-chosen label
///
/// Handy when a caller wraps a real communicator and wants its rank or name
/// to show up in log spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedScope(pub String);

impl ExecutionScope for NamedScope {
    fn identity(&self) -> String {
        self.0.clone()
    }
}
