//! Component lifecycle tracking.

/// Lifecycle states for one component instance.
///
/// Transitions: Uninitialized → Pending on `initialize`, Pending → Attached
/// when an attachment completes, any state → Disposed on `dispose`. A host
/// that never fires its scheduled callback leaves the component Pending
/// forever; that is an accepted limitation, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Constructed; `initialize` has not been invoked.
    Uninitialized,
    /// Initialized; no attachment has completed yet.
    Pending,
    /// The element was inserted or the worker was started.
    Attached,
    /// `dispose` has run.
    Disposed,
}

impl LifecycleState {
    /// Whether an attachment side effect has completed.
    pub fn is_attached(&self) -> bool {
        matches!(self, Self::Attached)
    }

    /// Whether the component has been torn down.
    pub fn is_disposed(&self) -> bool {
        matches!(self, Self::Disposed)
    }
}

/// Where the surrounding runtime is executing, supplied explicitly by the
/// host at `initialize` time rather than inferred from a global platform
/// token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionContext {
    /// Server-side document generation.
    Server,
    /// Client-side execution.
    Client,
}
