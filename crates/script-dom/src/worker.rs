//! Background worker started from inline script text.

use js_sys::Array;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, ErrorEvent, MessageEvent, Url, Worker};

use script_core::{HostError, WorkerChannels};

use crate::browser::js_error;

/// A running background worker and the object URL its script lives at.
///
/// The message/error closures stay alive as long as the handle does;
/// dropping the handle revokes the object URL.
pub struct BrowserWorker {
    worker: Worker,
    url: String,
    _on_message: Closure<dyn FnMut(MessageEvent)>,
    _on_error: Closure<dyn FnMut(ErrorEvent)>,
}

impl BrowserWorker {
    /// Build an executable blob from the inline text and start it.
    pub(crate) fn start(source: &str, channels: WorkerChannels) -> Result<Self, HostError> {
        let url = object_url(source)?;
        let worker = match Worker::new(&url) {
            Ok(worker) => worker,
            Err(err) => {
                let _ = Url::revoke_object_url(&url);
                return Err(HostError::WorkerStart(js_error(err)));
            }
        };

        let WorkerChannels {
            mut on_message,
            mut on_error,
        } = channels;

        let on_message = Closure::wrap(Box::new(move |event: MessageEvent| {
            on_message(format!("{:?}", event.data()))
        }) as Box<dyn FnMut(MessageEvent)>);
        worker.set_onmessage(Some(on_message.as_ref().unchecked_ref()));

        let on_error = Closure::wrap(Box::new(move |event: ErrorEvent| on_error(event.message()))
            as Box<dyn FnMut(ErrorEvent)>);
        worker.set_onerror(Some(on_error.as_ref().unchecked_ref()));

        Ok(Self {
            worker,
            url,
            _on_message: on_message,
            _on_error: on_error,
        })
    }

    /// Stop the worker; the object URL is revoked when the handle drops.
    pub fn terminate(self) {
        self.worker.terminate();
    }
}

impl Drop for BrowserWorker {
    fn drop(&mut self) {
        let _ = Url::revoke_object_url(&self.url);
    }
}

/// Object URL for a blob holding the inline text as executable script.
fn object_url(source: &str) -> Result<String, HostError> {
    let sequence = Array::of1(&source.into());
    let options = BlobPropertyBag::new();
    options.set_type("text/javascript");
    let blob = Blob::new_with_str_sequence_and_options(&sequence, &options)
        .map_err(|err| HostError::WorkerStart(js_error(err)))?;

    Url::create_object_url_with_blob(&blob).map_err(|err| HostError::WorkerStart(js_error(err)))
}
