//! Hookwire Events - Priority-ordered handler registry.
//!
//! Handlers are registered at named positions and triggered in ascending
//! priority order, ties resolved by registration order. Each handler id maps
//! to a kind in the [`HandlerCatalog`]; the registry builds one instance per id
//! on first trigger and keeps it for its lifetime.
//!
//! # Example
//!
//! ```rust,ignore
//! use hookwire_events::prelude::*;
//!
//! let mut registry = EventRegistry::new(catalog, HandlerEnv::default());
//! registry.register_handler_set(["mentions", "notifications"]);
//!
//! let mut args = Args::new();
//! args.insert("topic_id".into(), 7.into());
//! registry.trigger("post_save", &mut args)?;
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod bag;
mod catalog;
mod descriptor;
mod error;
mod handler;
mod queue;
mod registry;

pub use bag::EventBag;
pub use catalog::{HandlerCatalog, HandlerFactory, HooksFn};
pub use descriptor::{HandlerDescriptor, HookSpec};
pub use error::{EventError, EventResult};
pub use handler::{CallParams, Handler, HandlerEnv, HandlerKind, ParamSource};
pub use queue::PriorityQueue;
pub use registry::{EventRegistry, RegistryStats};
