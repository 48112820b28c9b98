//! Hookwire Core - Foundation types and collaborator traits for the Hookwire
//! dispatch kernel.
//!
//! This crate provides:
//! - Error types shared by the event registry and the action dispatcher
//! - Request and user context passed to handlers and controllers
//! - The [`DependencyProvider`] trait used to resolve named handler dependencies
//! - The [`PermissionChecker`] trait used to gate sub-action dispatch
//!
//! Nothing here performs I/O. Storage, sessions and request parsing live with
//! the host application; this crate only describes what the kernel consumes.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

pub mod context;
pub mod dependency;
pub mod error;
pub mod permission;
pub mod types;

pub use context::{RequestContext, UserContext};
pub use dependency::{DependencyProvider, FnProvider, NoDependencies, from_fn};
pub use error::{HookwireError, HookwireResult};
pub use permission::{AllowAll, DenyAll, PermissionChecker};
pub use types::{Args, BoxError, Value};
