//! Named integration hooks that extend dispatch tables before filtering.

use std::collections::HashMap;

use tracing::debug;

use crate::action::SubActionTable;

/// Mutates a dispatch table.
pub type IntegrationFn = Box<dyn Fn(&mut SubActionTable)>;

/// Integration hooks keyed by hook name.
///
/// A dispatcher with identity `board` runs the hooks named
/// `integrate_sa_board` on its table during initialization.
#[derive(Default)]
pub struct IntegrationHooks {
    hooks: HashMap<String, Vec<IntegrationFn>>,
}

impl std::fmt::Debug for IntegrationHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&String> = self.hooks.keys().collect();
        names.sort();
        f.debug_struct("IntegrationHooks")
            .field("hooks", &names)
            .finish()
    }
}

impl IntegrationHooks {
    /// Create an empty hook set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The hook name used for a dispatcher identity.
    #[must_use]
    pub fn hook_name(identity: &str) -> String {
        format!("integrate_sa_{identity}")
    }

    /// Add a hook. Hooks with the same name run in the order added.
    pub fn add<F>(&mut self, name: impl Into<String>, hook: F)
    where
        F: Fn(&mut SubActionTable) + 'static,
    {
        self.hooks.entry(name.into()).or_default().push(Box::new(hook));
    }

    /// Add a hook for a dispatcher identity.
    #[must_use]
    pub fn with_identity_hook<F>(mut self, identity: &str, hook: F) -> Self
    where
        F: Fn(&mut SubActionTable) + 'static,
    {
        self.add(Self::hook_name(identity), hook);
        self
    }

    /// Run every hook registered under `name`. Returns how many ran.
    pub fn call(&self, name: &str, table: &mut SubActionTable) -> usize {
        let Some(hooks) = self.hooks.get(name) else {
            return 0;
        };
        for hook in hooks {
            hook(table);
        }
        debug!(hook = name, count = hooks.len(), "Integration hooks called");
        hooks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::SubAction;

    #[test]
    fn test_hooks_run_in_order() {
        let hooks = IntegrationHooks::new()
            .with_identity_hook("board", |table| {
                table.insert("first", SubAction::function(|| Ok(())));
            })
            .with_identity_hook("board", |table| {
                table.insert("second", SubAction::function(|| Ok(())));
            });

        let mut table = SubActionTable::new();
        assert_eq!(hooks.call("integrate_sa_board", &mut table), 2);
        assert_eq!(table.keys().collect::<Vec<_>>(), vec!["first", "second"]);
    }

    #[test]
    fn test_unknown_hook() {
        let hooks = IntegrationHooks::new();
        let mut table = SubActionTable::new();
        assert_eq!(hooks.call("integrate_sa_none", &mut table), 0);
        assert!(table.is_empty());
    }
}
