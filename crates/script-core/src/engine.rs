//! The attachment engine.
//!
//! One [`ScriptComponent`] instance owns at most one inserted element and at
//! most one running worker. The host invokes `initialize` exactly once after
//! the configuration is finalized and `dispose` exactly once at teardown;
//! everything between is driven by host callbacks.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use script_observability::ComponentLogger;

use crate::config::{AppendTarget, LoadStrategy, RenderPhase, ScriptRequest};
use crate::error::{AttachError, ConfigError};
use crate::host::{RenderScheduler, ScriptHost, ScriptTag, WorkerChannels};
use crate::lifecycle::{ExecutionContext, LifecycleState};
use crate::signal::CompletionSignal;

/// The script attachment engine.
///
/// Converts a [`ScriptRequest`] into at most one DOM/worker side effect
/// through the injected [`ScriptHost`], and tears it down idempotently.
pub struct ScriptComponent<H: ScriptHost + 'static> {
    inner: Rc<RefCell<Inner<H>>>,
}

struct Inner<H: ScriptHost> {
    request: ScriptRequest,
    host: Rc<H>,
    state: LifecycleState,
    node: Option<H::Node>,
    /// Target the node was actually appended to; removal uses this rather
    /// than probing both targets.
    attached_to: Option<AppendTarget>,
    worker: Option<H::Worker>,
    inserted: CompletionSignal,
    loaded: CompletionSignal,
    logger: ComponentLogger,
}

impl<H: ScriptHost + 'static> ScriptComponent<H> {
    /// Create a component for the given request and host.
    pub fn new(request: ScriptRequest, host: H) -> Self {
        Self::with_logger(
            request,
            host,
            ComponentLogger::new().with_component("script-component"),
        )
    }

    /// Create a component reporting to the given log sink.
    pub fn with_logger(request: ScriptRequest, host: H, logger: ComponentLogger) -> Self {
        let logger = logger.with_strategy(request.load_strategy.as_str());
        Self {
            inner: Rc::new(RefCell::new(Inner {
                request,
                host: Rc::new(host),
                state: LifecycleState::Uninitialized,
                node: None,
                attached_to: None,
                worker: None,
                inserted: CompletionSignal::new(),
                loaded: CompletionSignal::new(),
                logger,
            })),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LifecycleState {
        self.inner.borrow().state
    }

    /// The request this component was built from.
    pub fn request(&self) -> ScriptRequest {
        self.inner.borrow().request.clone()
    }

    /// Subscribe to the insertion signal.
    ///
    /// Fires exactly once per successful attachment: after the element is
    /// appended, or after the worker is started.
    pub fn on_inserted(&self, callback: impl Fn() + 'static) {
        self.inner.borrow().inserted.subscribe(callback);
    }

    /// Subscribe to the load-confirmation signal.
    ///
    /// Fires on the element's native load event, or on the first message a
    /// worker posts back. Callers that only need to know the side effect
    /// happened should use [`Self::on_inserted`].
    pub fn on_loaded(&self, callback: impl Fn() + 'static) {
        self.inner.borrow().loaded.subscribe(callback);
    }

    /// Process the request. Invoke exactly once, after configuration is
    /// finalized.
    ///
    /// `context` is the host's explicit statement of where this code is
    /// running; `scheduler` supplies the one-shot "after next render"
    /// capability used by client-phase requests.
    ///
    /// Validation runs here, before any side effect or scheduling, so the
    /// caller receives configuration failures synchronously on every path.
    pub fn initialize(
        &self,
        context: ExecutionContext,
        scheduler: &dyn RenderScheduler,
    ) -> Result<(), AttachError> {
        {
            let inner = self.inner.borrow();
            if inner.state != LifecycleState::Uninitialized {
                return Err(AttachError::AlreadyInitialized);
            }
        }

        if let Err(err) = self.inner.borrow().request.validate() {
            self.inner.borrow().logger.error(&err.to_string());
            return Err(err.into());
        }

        let (phase, logger) = {
            let mut inner = self.inner.borrow_mut();
            inner.state = LifecycleState::Pending;
            (inner.request.render_phase, inner.logger.clone())
        };

        match phase {
            RenderPhase::Server => match context {
                ExecutionContext::Server => attach(&self.inner),
                ExecutionContext::Client => {
                    // Server-phase scripts attach during server rendering
                    // only; in a client context they stay pending.
                    logger.debug("server-phase script skipped in client context");
                    Ok(())
                }
            },
            RenderPhase::Client => {
                let weak = Rc::downgrade(&self.inner);
                scheduler.after_next_render(Box::new(move || run_deferred(&weak, attach)));
                Ok(())
            }
        }
    }

    /// Tear down whatever attachment produced. Idempotent; safe to invoke
    /// even if attachment never completed or no document exists anymore.
    pub fn dispose(&self) {
        let (host, node, target, worker, logger) = {
            let mut inner = self.inner.borrow_mut();
            if inner.state == LifecycleState::Disposed {
                return;
            }
            inner.state = LifecycleState::Disposed;
            (
                Rc::clone(&inner.host),
                inner.node.take(),
                inner.attached_to.take(),
                inner.worker.take(),
                inner.logger.clone(),
            )
        };

        if let (Some(node), Some(target)) = (node.as_ref(), target) {
            // A torn-down or absent document is not an error at disposal.
            if let Err(err) = host.remove_from(target, node) {
                logger
                    .warn_builder("script element removal skipped")
                    .field("reason", err.to_string())
                    .emit();
            }
        }

        if let Some(worker) = worker {
            host.terminate_worker(worker);
            logger.debug("worker terminated");
        }
    }
}

/// Run a deferred attachment step, dropping it if the component is gone or
/// no longer pending. Disposal between scheduling and firing must win.
fn run_deferred<H: ScriptHost + 'static>(
    weak: &Weak<RefCell<Inner<H>>>,
    step: fn(&Rc<RefCell<Inner<H>>>) -> Result<(), AttachError>,
) {
    let inner = match weak.upgrade() {
        Some(inner) => inner,
        None => return,
    };
    if inner.borrow().state != LifecycleState::Pending {
        return;
    }
    if let Err(err) = step(&inner) {
        let logger = inner.borrow().logger.clone();
        logger.error(&err.to_string());
    }
}

/// Dispatch on the loading strategy. The branches are mutually exclusive:
/// at most one side effect sequence runs per component.
fn attach<H: ScriptHost + 'static>(inner: &Rc<RefCell<Inner<H>>>) -> Result<(), AttachError> {
    let strategy = inner.borrow().request.load_strategy;
    match strategy {
        LoadStrategy::Worker => spawn_worker(inner),
        LoadStrategy::Eager | LoadStrategy::Lazy => insert_element(inner),
        LoadStrategy::Idle => schedule_idle_insert(inner),
    }
}

fn insert_element<H: ScriptHost + 'static>(
    inner_rc: &Rc<RefCell<Inner<H>>>,
) -> Result<(), AttachError> {
    let (host, tag, target, logger) = {
        let inner = inner_rc.borrow();
        (
            Rc::clone(&inner.host),
            ScriptTag::from_request(&inner.request),
            inner.request.append_to,
            inner.logger.clone(),
        )
    };

    let node = host.create_script_element(&tag)?;

    let loaded = inner_rc.borrow().loaded.clone();
    host.on_load(&node, Box::new(move || loaded.emit()));

    host.append_to(target, &node)?;

    let inserted = {
        let mut inner = inner_rc.borrow_mut();
        inner.node = Some(node);
        inner.attached_to = Some(target);
        inner.state = LifecycleState::Attached;
        inner.inserted.clone()
    };

    logger
        .debug_builder("script element inserted")
        .field("target", target.as_str())
        .emit();
    inserted.emit();
    Ok(())
}

fn schedule_idle_insert<H: ScriptHost + 'static>(
    inner_rc: &Rc<RefCell<Inner<H>>>,
) -> Result<(), AttachError> {
    let (host, logger) = {
        let inner = inner_rc.borrow();
        (Rc::clone(&inner.host), inner.logger.clone())
    };

    if !host.supports_idle_callback() {
        // Without an idle facility the script is intentionally dropped,
        // not downgraded to immediate insertion.
        logger.warn("idle callbacks unavailable; script will not be attached");
        return Ok(());
    }

    let weak = Rc::downgrade(inner_rc);
    host.schedule_idle(Box::new(move || run_deferred(&weak, insert_element)));
    Ok(())
}

fn spawn_worker<H: ScriptHost + 'static>(
    inner_rc: &Rc<RefCell<Inner<H>>>,
) -> Result<(), AttachError> {
    let (host, source, logger) = {
        let inner = inner_rc.borrow();
        let source = match &inner.request.inline_content {
            Some(source) => source.clone(),
            // Guaranteed by validation at initialize.
            None => return Err(ConfigError::WorkerRequiresInlineContent.into()),
        };
        (Rc::clone(&inner.host), source, inner.logger.clone())
    };

    if !host.supports_workers() {
        logger.error("background workers are unavailable in this environment");
        return Err(AttachError::WorkerUnavailable);
    }

    let loaded = inner_rc.borrow().loaded.clone();
    let message_logger = logger.clone();
    let error_logger = logger.clone();
    let channels = WorkerChannels {
        on_message: Box::new(move |payload| {
            message_logger
                .debug_builder("message received from worker")
                .field("payload", payload)
                .emit();
            loaded.emit();
        }),
        on_error: Box::new(move |detail| {
            error_logger
                .error_builder("error in worker")
                .field("detail", detail)
                .emit();
        }),
    };

    let worker = host.spawn_worker(&source, channels)?;

    let inserted = {
        let mut inner = inner_rc.borrow_mut();
        inner.worker = Some(worker);
        inner.state = LifecycleState::Attached;
        inner.inserted.clone()
    };

    logger.debug("worker started");
    inserted.emit();
    Ok(())
}
