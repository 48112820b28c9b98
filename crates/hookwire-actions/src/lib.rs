//! Hookwire Actions - Sub-action dispatch tables.
//!
//! An [`ActionDispatcher`] takes a [`SubActionTable`], lets integration hooks
//! extend it, filters out disabled entries, resolves the sub-action named by
//! the request (parameter `sa` by default) and invokes exactly one target
//! after checking its permission.
//!
//! Targets are closures, methods on shared controller instances, or methods on
//! controller classes from a [`ControllerCatalog`]. Class controllers are
//! built once per dispatcher and receive a fresh
//! [`EventRegistry`](hookwire_events::EventRegistry) and the current user
//! before their first call.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod action;
mod controller;
mod dispatcher;
mod error;
mod flag;
mod integration;

pub use action::{ActionFn, ActionTarget, ControllerRef, SubAction, SubActionTable};
pub use controller::{Controller, ControllerCatalog, ControllerFactory};
pub use dispatcher::{ActionDispatcher, DEFAULT_REQUEST_PARAM};
pub use error::{DispatchError, DispatchResult};
pub use flag::Flag;
pub use integration::{IntegrationFn, IntegrationHooks};
