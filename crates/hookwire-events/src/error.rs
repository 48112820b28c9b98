//! Event registry error types.

use hookwire_core::BoxError;
use thiserror::Error;

/// Errors that can occur while ordering or triggering handlers.
#[derive(Debug, Error)]
pub enum EventError {
    /// Sorted order was requested before the queue was sorted.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    /// A handler entry point returned an error.
    #[error("handler {handler_id}::{entry_point} failed at {position}: {source}")]
    Handler {
        /// The position being triggered.
        position: String,
        /// The handler identity.
        handler_id: String,
        /// The entry point that was invoked.
        entry_point: String,
        /// The error raised by the handler body.
        #[source]
        source: BoxError,
    },
}

/// Result type for event registry operations.
pub type EventResult<T> = Result<T, EventError>;
