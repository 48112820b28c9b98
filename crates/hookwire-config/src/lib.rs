//! Hookwire Config - Layered TOML configuration.
//!
//! Configuration is resolved from, lowest to highest precedence:
//!
//! 1. Embedded defaults (`defaults.toml`)
//! 2. A config file
//!
//! `HOOKWIRE_*` environment variables fill fields the file left unset.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use hookwire_config::Config;
//!
//! let config = Config::load(Some(Path::new("hookwire.toml"))).unwrap();
//! println!("sub-action parameter: {}", config.dispatch.request_param);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod env;
mod error;
mod loader;
mod merge;
mod types;
mod validate;

pub use error::{ConfigError, ConfigResult};
pub use types::{Config, DispatchSection, EventsSection, HandlerRegistration, LoggingSection};
pub use validate::validate;
