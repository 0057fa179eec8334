//! Server-side shell host for the script attachment engine.
//!
//! During server rendering there is no live DOM: "attaching" a script means
//! emitting its tag into the generated document. [`ShellDocument`]
//! implements [`script_core::ScriptHost`] over head/body buffers and renders
//! the final HTML shell around them.

mod shell;

pub use shell::*;
