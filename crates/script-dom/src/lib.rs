//! Browser host for the script attachment engine.
//!
//! Implements [`script_core::ScriptHost`] over the real DOM:
//! - `BrowserHost` - script elements, head/body insertion, idle callbacks
//! - `BrowserWorker` - blob-backed background workers
//! - `AnimationFrameScheduler` - render-pass approximation for hosts
//!   without a framework-provided after-render hook
//! - `console_writer` - routes the structured log sink to the console
//!
//! The whole surface is gated to `wasm32`; on other targets this crate is
//! empty and only the core abstractions apply.

#[cfg(target_arch = "wasm32")]
mod browser;
#[cfg(target_arch = "wasm32")]
mod console;
#[cfg(target_arch = "wasm32")]
mod scheduler;
#[cfg(target_arch = "wasm32")]
mod worker;

#[cfg(target_arch = "wasm32")]
pub use browser::*;
#[cfg(target_arch = "wasm32")]
pub use console::*;
#[cfg(target_arch = "wasm32")]
pub use scheduler::*;
#[cfg(target_arch = "wasm32")]
pub use worker::*;
