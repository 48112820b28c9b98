//! Test fixtures for common inputs.

use std::collections::HashMap;

use hookwire_core::{Args, RequestContext, UserContext, Value};
use hookwire_events::HandlerEnv;

/// Build trigger arguments from pairs.
#[must_use]
pub fn test_args(pairs: &[(&str, Value)]) -> Args {
    pairs
        .iter()
        .map(|(name, value)| ((*name).to_string(), value.clone()))
        .collect()
}

/// Build a dependency provider from pairs.
#[must_use]
pub fn test_provider(pairs: &[(&str, Value)]) -> HashMap<String, Value> {
    pairs
        .iter()
        .map(|(name, value)| ((*name).to_string(), value.clone()))
        .collect()
}

/// A request carrying the given parameters.
#[must_use]
pub fn test_request(params: &[(&str, &str)]) -> RequestContext {
    params
        .iter()
        .fold(RequestContext::new(), |request, (name, value)| {
            request.with_param(*name, *value)
        })
}

/// A signed-in member holding the given permissions.
#[must_use]
pub fn test_user(permissions: &[&str]) -> UserContext {
    permissions
        .iter()
        .fold(UserContext::member(1, "tester"), |user, permission| {
            user.with_permission(*permission)
        })
}

/// A handler environment for a member with no permissions.
#[must_use]
pub fn test_env(params: &[(&str, &str)]) -> HandlerEnv {
    HandlerEnv::new(test_request(params), test_user(&[]))
}

/// Route `tracing` output to the test harness. Safe to call repeatedly.
///
/// Honors `RUST_LOG`.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
