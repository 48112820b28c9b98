//! Hookwire Telemetry - Logging setup and dispatch correlation.
//!
//! This crate provides:
//! - [`LogConfig`] and [`setup_logging`] to install a `tracing-subscriber`
//!   stack (env filter, pretty/compact/JSON output, rolling files)
//! - [`DispatchSpan`] to tag every log line of one request's dispatch cycle
//!
//! # Example
//!
//! ```rust,no_run
//! use hookwire_telemetry::{DispatchSpan, LogConfig, LogFormat, setup_logging};
//!
//! # fn main() -> Result<(), hookwire_telemetry::TelemetryError> {
//! let config = LogConfig::new("info")
//!     .with_format(LogFormat::Compact)
//!     .with_directive("hookwire_events=debug");
//! setup_logging(&config)?;
//!
//! let _guard = DispatchSpan::new("board").with_sub_action("index").enter();
//! tracing::info!("Rendering board index");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod error;
mod logging;
mod span;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{
    FileRotation, LogConfig, LogFormat, LogTarget, setup_default_logging, setup_logging,
};
pub use span::{DispatchGuard, DispatchSpan};
