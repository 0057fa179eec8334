//! Public SDK for the script attachment engine.
//!
//! This crate re-exports the whole surface:
//!
//! ```ignore
//! use script_sdk::prelude::*;
//!
//! let shell = ShellDocument::new().with_title("Storefront");
//! let component = ScriptComponent::new(
//!     ScriptRequest::external("https://cdn.example/analytics.js")
//!         .with_load_strategy(LoadStrategy::Lazy),
//!     shell.clone(),
//! );
//!
//! component.initialize(ExecutionContext::Server, &scheduler)?;
//! let html = shell.render("<main>...</main>");
//!
//! component.dispose();
//! ```

pub use script_core;
pub use script_dom;
pub use script_observability;
pub use script_shell;

/// Prelude for convenient imports.
pub mod prelude {
    pub use script_core::*;
    #[cfg(target_arch = "wasm32")]
    pub use script_dom::*;
    pub use script_observability::*;
    pub use script_shell::*;
}
