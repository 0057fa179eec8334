//! Render-pass scheduling for hosts without a framework-provided hook.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use script_core::RenderScheduler;

/// Approximates "after the next render pass" with `requestAnimationFrame`.
///
/// Frameworks that expose a real after-render hook should implement
/// [`RenderScheduler`] over that hook instead of using this.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnimationFrameScheduler;

impl RenderScheduler for AnimationFrameScheduler {
    fn after_next_render(&self, callback: Box<dyn FnOnce()>) {
        let window = match web_sys::window() {
            Some(window) => window,
            None => return,
        };
        let closure = Closure::once_into_js(callback);
        let _ = window.request_animation_frame(closure.unchecked_ref());
    }
}
