//! Error types for the attachment engine.

use thiserror::Error;

use crate::config::AppendTarget;

/// Content-source invariant violations in a [`crate::ScriptRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Neither `src` nor `inline_content` was provided.
    #[error("either `src` or `inline_content` must be provided")]
    MissingContent,

    /// Both `src` and `inline_content` were provided.
    #[error("`src` and `inline_content` cannot both be provided")]
    ConflictingContent,

    /// The worker strategy was selected without inline content.
    #[error("the worker strategy requires `inline_content`")]
    WorkerRequiresInlineContent,
}

/// Failures raised by a [`crate::ScriptHost`] implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// No document exists in this execution context.
    #[error("no document is available in this execution context")]
    DocumentUnavailable,

    /// The document lacks the requested insertion target.
    #[error("document has no {0} element")]
    MissingTarget(AppendTarget),

    /// A DOM operation failed.
    #[error("DOM operation failed: {0}")]
    Dom(String),

    /// Starting the background worker failed.
    #[error("worker start failed: {0}")]
    WorkerStart(String),
}

/// Failures of one attachment attempt.
///
/// Every operation is attempt-once: none of these trigger a retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttachError {
    /// The request violated a content-source invariant.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// `initialize` was invoked more than once.
    #[error("component is already initialized")]
    AlreadyInitialized,

    /// The environment cannot start background workers.
    #[error("background workers are unavailable in this environment")]
    WorkerUnavailable,

    /// The host failed while performing a side effect.
    #[error("host operation failed: {0}")]
    Host(#[from] HostError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_converts() {
        let err: AttachError = ConfigError::MissingContent.into();
        assert_eq!(err, AttachError::Config(ConfigError::MissingContent));
    }

    #[test]
    fn test_missing_target_names_the_target() {
        let err = HostError::MissingTarget(AppendTarget::Body);
        assert_eq!(err.to_string(), "document has no body element");
    }
}
