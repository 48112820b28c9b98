//! Hookwire Test - Shared test utilities.
//!
//! Mock handlers, controllers and permission checkers that record what the
//! registry and dispatcher did to them, plus fixtures for common inputs.
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! hookwire-test.workspace = true
//! ```
//!
//! ```rust,ignore
//! use hookwire_test::{CallLog, RecordingHandler, test_args};
//!
//! let log = CallLog::new();
//! let mut catalog = HandlerCatalog::new();
//! RecordingHandler::new("audit", &log).with_entry_point("run", 1).install(&mut catalog);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod prelude;

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
