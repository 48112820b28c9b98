//! Prelude module - commonly used types for convenient import.
//!
//! Use `use hookwire_core::prelude::*;` to import all essential types.

// Errors
pub use crate::{HookwireError, HookwireResult};

// Context
pub use crate::{RequestContext, UserContext};

// Collaborators
pub use crate::{AllowAll, DenyAll, DependencyProvider, NoDependencies, PermissionChecker};

// Common types
pub use crate::{Args, BoxError, Value};
