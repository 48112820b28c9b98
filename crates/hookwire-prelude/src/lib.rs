//! Unified prelude for Hookwire.
//!
//! A single import for the types most hosts need from the registry, the
//! dispatcher and telemetry.
//!
//! # Usage
//!
//! ```rust,ignore
//! use hookwire_prelude::*;
//!
//! // Types from:
//! // - hookwire-core (contexts, collaborator traits, errors)
//! // - hookwire-events (EventRegistry, HandlerCatalog, Handler)
//! // - hookwire-actions (ActionDispatcher, SubActionTable, Controller)
//! // - hookwire-telemetry (LogConfig, DispatchSpan)
//! ```
//!
//! # Per-Crate Preludes
//!
//! ```rust,ignore
//! use hookwire_events::prelude::*;
//! use hookwire_actions::prelude::*;
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use hookwire_prelude::*;
//!
//! let env = HandlerEnv::new(request, user);
//! let mut registry = EventRegistry::new(Arc::new(catalog), env.clone());
//! registry.register_handler_set(["mentions"]);
//!
//! let mut dispatcher = ActionDispatcher::new(env).with_identity("board");
//! let _guard = DispatchSpan::new("board").enter();
//! dispatcher.execute(table, "")?;
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]

pub use hookwire_actions::prelude::*;
pub use hookwire_core::prelude::*;
pub use hookwire_events::prelude::*;
pub use hookwire_telemetry::prelude::*;
