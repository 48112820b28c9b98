//! Named dependency resolution for handler entry points.

use std::collections::HashMap;

use crate::types::{Args, Value};

/// Supplies values for dependency names that were not passed as trigger
/// arguments.
///
/// Returning `None` is not an error: the registry simply omits the name from
/// the parameters handed to the handler.
pub trait DependencyProvider {
    /// Resolve a dependency by name.
    fn provide(&self, name: &str) -> Option<Value>;
}

/// Provider that resolves nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDependencies;

impl DependencyProvider for NoDependencies {
    fn provide(&self, _name: &str) -> Option<Value> {
        None
    }
}

impl DependencyProvider for HashMap<String, Value> {
    fn provide(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

impl DependencyProvider for Args {
    fn provide(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

/// Provider backed by a closure. Build one with [`from_fn`].
#[derive(Clone, Copy)]
pub struct FnProvider<F>(F);

impl<F> std::fmt::Debug for FnProvider<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnProvider").finish_non_exhaustive()
    }
}

/// Wrap a closure as a [`DependencyProvider`].
pub fn from_fn<F>(f: F) -> FnProvider<F>
where
    F: Fn(&str) -> Option<Value>,
{
    FnProvider(f)
}

impl<F> DependencyProvider for FnProvider<F>
where
    F: Fn(&str) -> Option<Value>,
{
    fn provide(&self, name: &str) -> Option<Value> {
        (self.0)(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_no_dependencies() {
        assert!(NoDependencies.provide("anything").is_none());
    }

    #[test]
    fn test_map_provider() {
        let mut globals = HashMap::new();
        globals.insert("board_id".to_string(), json!(4));

        assert_eq!(globals.provide("board_id"), Some(json!(4)));
        assert_eq!(globals.provide("topic_id"), None);
    }

    #[test]
    fn test_closure_provider() {
        let provider = from_fn(|name| (name == "scripturl").then(|| json!("https://example.org")));

        assert_eq!(provider.provide("scripturl"), Some(json!("https://example.org")));
        assert!(provider.provide("boardurl").is_none());
    }
}
