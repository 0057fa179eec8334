//! Core engine for declarative script attachment.
//!
//! This crate provides the fundamental types and the attachment policy:
//! - `ScriptRequest` - Declarative configuration for one script resource
//! - `ScriptComponent` - The engine, with an initialize/dispose lifecycle
//! - `ScriptHost` / `RenderScheduler` traits - Injected platform surface
//! - `CompletionSignal` - Zero-payload completion notifications
//!
//! The engine never touches a global `document` or `window`: every side
//! effect goes through a [`ScriptHost`], so the same policy drives a browser
//! DOM, a server-rendered HTML shell, or a test double.

mod config;
mod engine;
mod error;
mod host;
mod lifecycle;
mod signal;

pub use config::*;
pub use engine::*;
pub use error::*;
pub use host::*;
pub use lifecycle::*;
pub use signal::*;
