//! Prelude module - commonly used types for convenient import.
//!
//! Use `use hookwire_events::prelude::*;` to import all essential types.

// Errors
pub use crate::{EventError, EventResult};

// Registry
pub use crate::{EventRegistry, HandlerCatalog, RegistryStats};

// Handlers
pub use crate::{CallParams, Handler, HandlerEnv, HandlerKind, ParamSource};

// Registrations
pub use crate::{HandlerDescriptor, HookSpec};

// Re-exported from core for handler signatures
pub use hookwire_core::{Args, BoxError, Value};
