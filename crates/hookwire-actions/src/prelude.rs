//! Prelude module - commonly used types for convenient import.
//!
//! Use `use hookwire_actions::prelude::*;` to import all essential types.

// Errors
pub use crate::{DispatchError, DispatchResult};

// Dispatch
pub use crate::{ActionDispatcher, IntegrationHooks};

// Tables
pub use crate::{ActionTarget, ControllerRef, Flag, SubAction, SubActionTable};

// Controllers
pub use crate::{Controller, ControllerCatalog};
