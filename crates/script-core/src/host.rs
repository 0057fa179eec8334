//! Injected platform surface the engine runs against.

use crate::config::{AppendTarget, ScriptRequest};
use crate::error::HostError;

/// Attribute set for the script element a host creates.
///
/// Derived from a [`ScriptRequest`]; attributes are copied onto the element
/// verbatim before insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptTag {
    /// Remote source URL.
    pub src: Option<String>,
    /// Inline script text.
    pub text: Option<String>,
    /// MIME type.
    pub content_type: String,
    /// Subresource integrity attribute.
    pub integrity: Option<String>,
    /// CORS attribute.
    pub cross_origin: Option<String>,
    /// Whether execution is deferred until document parsing ends.
    pub defer: bool,
    /// Whether the resource is fetched without blocking parsing.
    pub async_: bool,
}

impl ScriptTag {
    /// Build the tag for a request's element path.
    ///
    /// Eager scripts execute as soon as fetched (`defer=false`); lazy and
    /// idle scripts defer. All element paths fetch asynchronously.
    pub fn from_request(request: &ScriptRequest) -> Self {
        Self {
            src: request.src.clone(),
            text: request.inline_content.clone(),
            content_type: request.content_type.clone(),
            integrity: request.integrity.clone(),
            cross_origin: request.cross_origin.clone(),
            defer: request.load_strategy.is_deferred(),
            async_: true,
        }
    }
}

/// Callback channels wired into a spawned worker.
///
/// The worker is an opaque concurrent unit: only the inline source crosses
/// into it, and only these notifications cross back out.
pub struct WorkerChannels {
    /// Invoked for every message the worker posts back, with a textual
    /// rendering of the payload. The payload is observed, not interpreted.
    pub on_message: Box<dyn FnMut(String)>,
    /// Invoked with the error text for every worker error.
    pub on_error: Box<dyn FnMut(String)>,
}

/// The document/worker surface the engine drives.
///
/// Implementations own the platform specifics: a browser DOM, a server-side
/// HTML shell, or a test double. All methods take `&self`; hosts that carry
/// state use interior mutability, since the engine is single-threaded.
pub trait ScriptHost {
    /// Handle to a created script element.
    type Node: 'static;
    /// Handle to a running background worker.
    type Worker: 'static;

    /// Create a script element carrying the tag's attributes.
    fn create_script_element(&self, tag: &ScriptTag) -> Result<Self::Node, HostError>;

    /// Register a one-shot callback for the element's native load event.
    fn on_load(&self, node: &Self::Node, callback: Box<dyn FnOnce()>);

    /// Append the element to the given target. Called at most once per node.
    fn append_to(&self, target: AppendTarget, node: &Self::Node) -> Result<(), HostError>;

    /// Remove the element from the target it was appended to.
    fn remove_from(&self, target: AppendTarget, node: &Self::Node) -> Result<(), HostError>;

    /// Whether the environment exposes an idle-callback facility.
    fn supports_idle_callback(&self) -> bool;

    /// Schedule a callback for an idle period.
    ///
    /// Only invoked after `supports_idle_callback` returned true. One-shot,
    /// never retried.
    fn schedule_idle(&self, callback: Box<dyn FnOnce()>);

    /// Whether background workers can be started.
    fn supports_workers(&self) -> bool;

    /// Start the inline source in a background worker.
    fn spawn_worker(&self, source: &str, channels: WorkerChannels)
        -> Result<Self::Worker, HostError>;

    /// Terminate a running worker. The engine calls this at most once per
    /// handle.
    fn terminate_worker(&self, worker: Self::Worker);
}

/// One-shot "after the next render pass" registration, supplied by the host
/// framework as a dependency.
pub trait RenderScheduler {
    /// Register a callback fired once, after the next render pass for this
    /// component completes. A scheduler that never fires leaves the
    /// component pending; the engine does not retry.
    fn after_next_render(&self, callback: Box<dyn FnOnce()>);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoadStrategy;

    #[test]
    fn test_tag_defer_split() {
        let eager = ScriptRequest::external("https://x/a.js")
            .with_load_strategy(LoadStrategy::Eager);
        let tag = ScriptTag::from_request(&eager);
        assert!(!tag.defer);
        assert!(tag.async_);

        let lazy = ScriptRequest::external("https://x/a.js");
        let tag = ScriptTag::from_request(&lazy);
        assert!(tag.defer);
        assert!(tag.async_);
    }

    #[test]
    fn test_tag_copies_passthrough_attributes() {
        let request = ScriptRequest::external("https://x/a.js")
            .with_content_type("module")
            .with_integrity("sha384-abc")
            .with_cross_origin("anonymous");
        let tag = ScriptTag::from_request(&request);

        assert_eq!(tag.src.as_deref(), Some("https://x/a.js"));
        assert_eq!(tag.content_type, "module");
        assert_eq!(tag.integrity.as_deref(), Some("sha384-abc"));
        assert_eq!(tag.cross_origin.as_deref(), Some("anonymous"));
    }
}
