//! Script attachment request configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Where the created script element is appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppendTarget {
    /// Append to the document head.
    #[default]
    Head,
    /// Append to the document body.
    Body,
}

impl AppendTarget {
    /// Stable string form, matching the serialized representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Head => "head",
            Self::Body => "body",
        }
    }
}

impl fmt::Display for AppendTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// When and how the script resource is fetched and executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadStrategy {
    /// Insert immediately; the element executes as soon as it is fetched.
    Eager,
    /// Insert immediately; the element defers execution until parsing ends.
    #[default]
    Lazy,
    /// Insert during an idle period, if the host exposes one.
    Idle,
    /// Run inline content in a background worker; no element is created.
    Worker,
}

impl LoadStrategy {
    /// Stable string form, matching the serialized representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eager => "eager",
            Self::Lazy => "lazy",
            Self::Idle => "idle",
            Self::Worker => "worker",
        }
    }

    /// Whether the element paths set the `defer` attribute.
    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Lazy | Self::Idle)
    }
}

impl fmt::Display for LoadStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which render phase performs the attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderPhase {
    /// Attach while the document is generated on the server.
    #[default]
    Server,
    /// Attach after the next client render pass completes.
    Client,
}

impl RenderPhase {
    /// Stable string form, matching the serialized representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Server => "server",
            Self::Client => "client",
        }
    }
}

fn default_content_type() -> String {
    "text/javascript".to_string()
}

/// Declarative configuration for one script attachment.
///
/// Exactly one of `src`/`inline_content` must be set, except for the worker
/// strategy where `inline_content` is mandatory and `src` is ignored. The
/// request is immutable once the engine starts processing it: the engine
/// takes it by value at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptRequest {
    /// Remote source URL.
    #[serde(default)]
    pub src: Option<String>,
    /// Inline script text.
    #[serde(default)]
    pub inline_content: Option<String>,
    /// Placement of the created element.
    #[serde(default)]
    pub append_to: AppendTarget,
    /// Timing/loading strategy.
    #[serde(default)]
    pub load_strategy: LoadStrategy,
    /// Render phase that performs the attachment.
    #[serde(default)]
    pub render_phase: RenderPhase,
    /// MIME type copied onto the element.
    #[serde(default = "default_content_type")]
    pub content_type: String,
    /// Subresource integrity attribute, passed through verbatim.
    #[serde(default)]
    pub integrity: Option<String>,
    /// CORS attribute, passed through verbatim.
    #[serde(default)]
    pub cross_origin: Option<String>,
}

impl Default for ScriptRequest {
    fn default() -> Self {
        Self {
            src: None,
            inline_content: None,
            append_to: AppendTarget::default(),
            load_strategy: LoadStrategy::default(),
            render_phase: RenderPhase::default(),
            content_type: default_content_type(),
            integrity: None,
            cross_origin: None,
        }
    }
}

impl ScriptRequest {
    /// Create a request for a remote script URL.
    pub fn external(src: impl Into<String>) -> Self {
        Self {
            src: Some(src.into()),
            ..Default::default()
        }
    }

    /// Create a request for inline script text.
    pub fn inline(content: impl Into<String>) -> Self {
        Self {
            inline_content: Some(content.into()),
            ..Default::default()
        }
    }

    /// Set the placement target.
    pub fn with_append_to(mut self, target: AppendTarget) -> Self {
        self.append_to = target;
        self
    }

    /// Set the loading strategy.
    pub fn with_load_strategy(mut self, strategy: LoadStrategy) -> Self {
        self.load_strategy = strategy;
        self
    }

    /// Set the render phase.
    pub fn with_render_phase(mut self, phase: RenderPhase) -> Self {
        self.render_phase = phase;
        self
    }

    /// Set the MIME type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Set the subresource integrity attribute.
    pub fn with_integrity(mut self, integrity: impl Into<String>) -> Self {
        self.integrity = Some(integrity.into());
        self
    }

    /// Set the CORS attribute.
    pub fn with_cross_origin(mut self, cross_origin: impl Into<String>) -> Self {
        self.cross_origin = Some(cross_origin.into());
        self
    }

    /// Check the content-source invariants.
    ///
    /// Runs before any side effect; a failure aborts the attachment attempt
    /// entirely.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.load_strategy == LoadStrategy::Worker {
            // Workers execute inline text only; `src` is ignored for them.
            if self.inline_content.is_none() {
                return Err(ConfigError::WorkerRequiresInlineContent);
            }
            return Ok(());
        }

        match (&self.src, &self.inline_content) {
            (Some(_), Some(_)) => Err(ConfigError::ConflictingContent),
            (None, None) => Err(ConfigError::MissingContent),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let request = ScriptRequest::default();
        assert_eq!(request.append_to, AppendTarget::Head);
        assert_eq!(request.load_strategy, LoadStrategy::Lazy);
        assert_eq!(request.render_phase, RenderPhase::Server);
        assert_eq!(request.content_type, "text/javascript");
    }

    #[test]
    fn test_validate_requires_exactly_one_source() {
        assert_eq!(
            ScriptRequest::default().validate(),
            Err(ConfigError::MissingContent)
        );

        let both = ScriptRequest::external("https://x/a.js").with_load_strategy(LoadStrategy::Lazy);
        let both = ScriptRequest {
            inline_content: Some("x".to_string()),
            ..both
        };
        assert_eq!(both.validate(), Err(ConfigError::ConflictingContent));

        assert!(ScriptRequest::external("https://x/a.js").validate().is_ok());
        assert!(ScriptRequest::inline("console.log(1)").validate().is_ok());
    }

    #[test]
    fn test_validate_worker_strategy() {
        let missing = ScriptRequest::default().with_load_strategy(LoadStrategy::Worker);
        assert_eq!(
            missing.validate(),
            Err(ConfigError::WorkerRequiresInlineContent)
        );

        // `src` is ignored for workers, so its presence is not a conflict.
        let with_src = ScriptRequest::external("https://x/a.js")
            .with_load_strategy(LoadStrategy::Worker);
        assert_eq!(
            with_src.validate(),
            Err(ConfigError::WorkerRequiresInlineContent)
        );

        let valid = ScriptRequest::inline("postMessage('ready')")
            .with_load_strategy(LoadStrategy::Worker);
        assert!(valid.validate().is_ok());
    }

    #[test]
    fn test_serde_lowercase_enums() {
        let request: ScriptRequest = serde_json::from_str(
            r#"{
                "src": "https://x/a.js",
                "append_to": "body",
                "load_strategy": "idle",
                "render_phase": "client"
            }"#,
        )
        .unwrap();

        assert_eq!(request.append_to, AppendTarget::Body);
        assert_eq!(request.load_strategy, LoadStrategy::Idle);
        assert_eq!(request.render_phase, RenderPhase::Client);
        assert_eq!(request.content_type, "text/javascript");
    }

    #[test]
    fn test_serde_rejects_unknown_target() {
        let result = serde_json::from_str::<AppendTarget>(r#""footer""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_defer_split() {
        assert!(!LoadStrategy::Eager.is_deferred());
        assert!(LoadStrategy::Lazy.is_deferred());
        assert!(LoadStrategy::Idle.is_deferred());
    }
}
