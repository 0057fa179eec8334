//! Observability infrastructure for the script attachment engine.
//!
//! This crate provides the log sink the engine reports to:
//! - `ComponentLogger` - Structured logger scoped to one component instance
//! - `LogEntry` / `LogLevel` / `LogFormat` - Structured log model
//!
//! The writer is pluggable so non-stderr environments (e.g. the browser
//! console) can receive the same entries.

mod logging;

pub use logging::*;
