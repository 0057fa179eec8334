//! Browser console log routing.

use wasm_bindgen::JsValue;

use script_observability::LogLevel;

/// Writer for `ComponentLogger::with_writer` that routes entries to the
/// browser console, level-aware.
pub fn console_writer(level: LogLevel, line: &str) {
    let line = JsValue::from_str(line);
    match level {
        LogLevel::Error => web_sys::console::error_1(&line),
        LogLevel::Warn => web_sys::console::warn_1(&line),
        LogLevel::Info => web_sys::console::log_1(&line),
        LogLevel::Trace | LogLevel::Debug => web_sys::console::debug_1(&line),
    }
}
