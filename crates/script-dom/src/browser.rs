//! web-sys implementation of the host surface.

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen::closure::Closure;
use web_sys::{Document, HtmlScriptElement, Window};

use script_core::{AppendTarget, HostError, ScriptHost, ScriptTag, WorkerChannels};

use crate::worker::BrowserWorker;

pub(crate) fn js_error(value: JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}

/// Host backed by the live browser document.
pub struct BrowserHost {
    window: Window,
    document: Document,
}

impl BrowserHost {
    /// Bind to the global window and document.
    pub fn from_window() -> Result<Self, HostError> {
        let window = web_sys::window().ok_or(HostError::DocumentUnavailable)?;
        let document = window.document().ok_or(HostError::DocumentUnavailable)?;
        Ok(Self { window, document })
    }
}

impl ScriptHost for BrowserHost {
    type Node = HtmlScriptElement;
    type Worker = BrowserWorker;

    fn create_script_element(&self, tag: &ScriptTag) -> Result<HtmlScriptElement, HostError> {
        let element = self
            .document
            .create_element("script")
            .map_err(|err| HostError::Dom(js_error(err)))?;
        let element: HtmlScriptElement = element.dyn_into().map_err(|_| {
            HostError::Dom("created element is not a script element".to_string())
        })?;

        element.set_type(&tag.content_type);
        element.set_defer(tag.defer);
        element.set_async(tag.async_);
        if let Some(src) = &tag.src {
            element.set_src(src);
        }
        if let Some(text) = &tag.text {
            element.set_text_content(Some(text));
        }
        if let Some(integrity) = &tag.integrity {
            element.set_integrity(integrity);
        }
        if let Some(cross_origin) = &tag.cross_origin {
            element.set_cross_origin(Some(cross_origin));
        }

        Ok(element)
    }

    fn on_load(&self, node: &HtmlScriptElement, callback: Box<dyn FnOnce()>) {
        let closure = Closure::once_into_js(callback);
        node.set_onload(Some(closure.unchecked_ref()));
    }

    fn append_to(&self, target: AppendTarget, node: &HtmlScriptElement) -> Result<(), HostError> {
        let parent: web_sys::HtmlElement = match target {
            AppendTarget::Head => self
                .document
                .head()
                .ok_or(HostError::MissingTarget(target))?
                .into(),
            AppendTarget::Body => self
                .document
                .body()
                .ok_or(HostError::MissingTarget(target))?,
        };
        parent
            .append_child(node)
            .map(|_| ())
            .map_err(|err| HostError::Dom(js_error(err)))
    }

    fn remove_from(&self, _target: AppendTarget, node: &HtmlScriptElement) -> Result<(), HostError> {
        node.remove();
        Ok(())
    }

    fn supports_idle_callback(&self) -> bool {
        js_sys::Reflect::has(&self.window, &JsValue::from_str("requestIdleCallback"))
            .unwrap_or(false)
    }

    fn schedule_idle(&self, callback: Box<dyn FnOnce()>) {
        let closure = Closure::once_into_js(callback);
        // A scheduler that throws behaves like one that never fires.
        let _ = self.window.request_idle_callback(closure.unchecked_ref());
    }

    fn supports_workers(&self) -> bool {
        js_sys::Reflect::has(&js_sys::global(), &JsValue::from_str("Worker")).unwrap_or(false)
    }

    fn spawn_worker(
        &self,
        source: &str,
        channels: WorkerChannels,
    ) -> Result<BrowserWorker, HostError> {
        BrowserWorker::start(source, channels)
    }

    fn terminate_worker(&self, worker: BrowserWorker) {
        worker.terminate();
    }
}
