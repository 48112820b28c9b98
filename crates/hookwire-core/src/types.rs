//! Common type aliases.

/// A dynamically typed value passed between the kernel and handlers.
pub type Value = serde_json::Value;

/// Named arguments supplied to an event trigger.
pub type Args = serde_json::Map<String, Value>;

/// Error type returned from handler and action bodies.
///
/// The kernel never inspects these errors; it only propagates them.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;
