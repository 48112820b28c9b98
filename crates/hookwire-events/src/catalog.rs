//! Explicit catalog of handler kinds, keyed by handler id.

use std::collections::HashMap;

use tracing::debug;

use crate::descriptor::HookSpec;
use crate::handler::{Handler, HandlerEnv, HandlerKind};
use crate::registry::EventRegistry;

/// Builds a handler instance.
pub type HandlerFactory = Box<dyn Fn(&HandlerEnv) -> Box<dyn Handler> + Send + Sync>;

/// Lists the registrations a handler kind asks for.
pub type HooksFn = Box<dyn Fn(&EventRegistry) -> Option<Vec<HookSpec>> + Send + Sync>;

struct CatalogEntry {
    factory: HandlerFactory,
    hooks: Option<HooksFn>,
}

/// Maps handler ids to the factories that build them.
///
/// Registries only instantiate handlers listed here; an id missing from the
/// catalog is skipped at trigger time.
#[derive(Default)]
pub struct HandlerCatalog {
    entries: HashMap<String, CatalogEntry>,
}

impl std::fmt::Debug for HandlerCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut ids: Vec<&String> = self.entries.keys().collect();
        ids.sort();
        f.debug_struct("HandlerCatalog")
            .field("handlers", &ids)
            .finish()
    }
}

impl HandlerCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler type under `handler_id`.
    pub fn register<K: HandlerKind>(&mut self, handler_id: impl Into<String>) {
        let factory: HandlerFactory =
            Box::new(|env: &HandlerEnv| -> Box<dyn Handler> { Box::new(K::create(env)) });
        let hooks: HooksFn = Box::new(K::hooks);
        self.insert(handler_id.into(), factory, Some(hooks));
    }

    /// Register a closure factory with no static hooks.
    pub fn register_fn<F, H>(&mut self, handler_id: impl Into<String>, factory: F)
    where
        F: Fn(&HandlerEnv) -> H + Send + Sync + 'static,
        H: Handler + 'static,
    {
        let factory: HandlerFactory =
            Box::new(move |env: &HandlerEnv| -> Box<dyn Handler> { Box::new(factory(env)) });
        self.insert(handler_id.into(), factory, None);
    }

    /// Register a closure factory together with its hook list.
    pub fn register_with_hooks<F, H, K>(
        &mut self,
        handler_id: impl Into<String>,
        factory: F,
        hooks: K,
    ) where
        F: Fn(&HandlerEnv) -> H + Send + Sync + 'static,
        H: Handler + 'static,
        K: Fn(&EventRegistry) -> Option<Vec<HookSpec>> + Send + Sync + 'static,
    {
        let factory: HandlerFactory =
            Box::new(move |env: &HandlerEnv| -> Box<dyn Handler> { Box::new(factory(env)) });
        let hooks: HooksFn = Box::new(hooks);
        self.insert(handler_id.into(), factory, Some(hooks));
    }

    fn insert(&mut self, handler_id: String, factory: HandlerFactory, hooks: Option<HooksFn>) {
        debug!(handler_id = %handler_id, "Handler kind registered");
        self.entries
            .insert(handler_id, CatalogEntry { factory, hooks });
    }

    /// Whether a handler id is known.
    #[must_use]
    pub fn contains(&self, handler_id: &str) -> bool {
        self.entries.contains_key(handler_id)
    }

    /// Build a new instance, or `None` for an unknown id.
    #[must_use]
    pub fn instantiate(&self, handler_id: &str, env: &HandlerEnv) -> Option<Box<dyn Handler>> {
        self.entries
            .get(handler_id)
            .map(|entry| (entry.factory)(env))
    }

    /// The hook list a handler kind declares.
    ///
    /// `None` when the id is unknown, the kind declares no hooks, or its hook
    /// function declined.
    #[must_use]
    pub fn hooks(&self, handler_id: &str, registry: &EventRegistry) -> Option<Vec<HookSpec>> {
        self.entries
            .get(handler_id)
            .and_then(|entry| entry.hooks.as_ref())
            .and_then(|hooks| hooks(registry))
    }

    /// Registered handler ids, sorted.
    #[must_use]
    pub fn handler_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Number of handler kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::CallParams;
    use hookwire_core::BoxError;

    struct Noop;

    impl Handler for Noop {
        fn arity(&self, entry_point: &str) -> Option<usize> {
            (entry_point == "run").then_some(0)
        }

        fn call(&mut self, _entry_point: &str, _params: &mut CallParams) -> Result<(), BoxError> {
            Ok(())
        }
    }

    impl HandlerKind for Noop {
        fn create(_env: &HandlerEnv) -> Self {
            Self
        }

        fn hooks(_registry: &EventRegistry) -> Option<Vec<HookSpec>> {
            Some(vec![HookSpec::new("p", "noop", "run")])
        }
    }

    struct Silent;

    impl Handler for Silent {
        fn arity(&self, _entry_point: &str) -> Option<usize> {
            None
        }

        fn call(&mut self, _entry_point: &str, _params: &mut CallParams) -> Result<(), BoxError> {
            Ok(())
        }
    }

    impl HandlerKind for Silent {
        fn create(_env: &HandlerEnv) -> Self {
            Self
        }
    }

    #[test]
    fn test_kind_without_hooks() {
        let mut catalog = HandlerCatalog::new();
        catalog.register::<Silent>("silent");

        assert!(catalog.contains("silent"));
        assert!(catalog.hooks("silent", &EventRegistry::default()).is_none());
    }

    #[test]
    fn test_register_type() {
        let mut catalog = HandlerCatalog::new();
        catalog.register::<Noop>("noop");

        assert!(catalog.contains("noop"));
        let handler = catalog
            .instantiate("noop", &HandlerEnv::default())
            .unwrap();
        assert_eq!(handler.arity("run"), Some(0));
        assert_eq!(handler.arity("missing"), None);
    }

    #[test]
    fn test_unknown_id() {
        let catalog = HandlerCatalog::new();
        assert!(catalog.instantiate("ghost", &HandlerEnv::default()).is_none());
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_register_fn_has_no_hooks() {
        let mut catalog = HandlerCatalog::new();
        catalog.register_fn("noop", |_env| Noop);
        let registry = EventRegistry::default();

        assert!(catalog.hooks("noop", &registry).is_none());
        assert_eq!(catalog.handler_ids(), vec!["noop"]);
    }
}
