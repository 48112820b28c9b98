//! Sub-action entries and the insertion-ordered table that holds them.

use std::cell::RefCell;
use std::rc::Rc;

use hookwire_core::BoxError;

use crate::controller::Controller;
use crate::flag::Flag;

/// A directly invokable sub-action body.
pub type ActionFn = Box<dyn FnMut() -> Result<(), BoxError>>;

/// Where a `Method` target gets its controller.
#[derive(Clone)]
pub enum ControllerRef {
    /// A class from the controller catalog, constructed with environment setup
    /// on first dispatch.
    Class(String),
    /// An existing controller, bound directly.
    Instance(Rc<RefCell<dyn Controller>>),
}

impl std::fmt::Debug for ControllerRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Class(name) => f.debug_tuple("Class").field(name).finish(),
            Self::Instance(_) => f.write_str("Instance(..)"),
        }
    }
}

/// What a sub-action invokes.
pub enum ActionTarget {
    /// A callable invoked as is.
    Function(ActionFn),
    /// A method on a controller.
    Method {
        /// The controller.
        controller: ControllerRef,
        /// The method name.
        method: String,
    },
}

impl std::fmt::Debug for ActionTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Function(_) => f.write_str("Function(..)"),
            Self::Method { controller, method } => f
                .debug_struct("Method")
                .field("controller", controller)
                .field("method", method)
                .finish(),
        }
    }
}

/// One entry of a dispatch table.
#[derive(Debug)]
pub struct SubAction {
    /// The target.
    pub target: ActionTarget,
    /// Absent means enabled.
    pub enabled: Option<Flag>,
    /// Absent means not disabled.
    pub disabled: Option<Flag>,
    /// Permission checked before the target runs.
    pub permission: Option<String>,
}

impl SubAction {
    /// Wrap a target with no flags and no permission.
    #[must_use]
    pub fn new(target: ActionTarget) -> Self {
        Self {
            target,
            enabled: None,
            disabled: None,
            permission: None,
        }
    }

    /// A closure target.
    #[must_use]
    pub fn function<F>(f: F) -> Self
    where
        F: FnMut() -> Result<(), BoxError> + 'static,
    {
        Self::new(ActionTarget::Function(Box::new(f)))
    }

    /// A method on a controller class from the catalog.
    #[must_use]
    pub fn class(class: impl Into<String>, method: impl Into<String>) -> Self {
        Self::new(ActionTarget::Method {
            controller: ControllerRef::Class(class.into()),
            method: method.into(),
        })
    }

    /// A method on an existing controller.
    #[must_use]
    pub fn instance(controller: Rc<RefCell<dyn Controller>>, method: impl Into<String>) -> Self {
        Self::new(ActionTarget::Method {
            controller: ControllerRef::Instance(controller),
            method: method.into(),
        })
    }

    /// Require a permission.
    #[must_use]
    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.permission = Some(permission.into());
        self
    }

    /// Set the `enabled` flag.
    #[must_use]
    pub fn with_enabled(mut self, flag: impl Into<Flag>) -> Self {
        self.enabled = Some(flag.into());
        self
    }

    /// Set the `disabled` flag.
    #[must_use]
    pub fn with_disabled(mut self, flag: impl Into<Flag>) -> Self {
        self.disabled = Some(flag.into());
        self
    }

    /// Whether the entry survives filtering.
    #[must_use]
    pub fn is_active(&self) -> bool {
        let disabled = self.disabled.as_ref().is_some_and(Flag::is_true);
        let switched_off = self.enabled.as_ref().is_some_and(Flag::is_false);
        !disabled && !switched_off
    }
}

/// Sub-actions keyed by name, in insertion order.
#[derive(Debug, Default)]
pub struct SubActionTable {
    entries: Vec<(String, SubAction)>,
}

impl SubActionTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry. Replacing an existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, action: SubAction) {
        let key = key.into();
        if let Some(slot) = self.get_mut(&key) {
            *slot = action;
        } else {
            self.entries.push((key, action));
        }
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, action: SubAction) -> Self {
        self.insert(key, action);
        self
    }

    /// Get an entry.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&SubAction> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, a)| a)
    }

    /// Get a mutable entry.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut SubAction> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, a)| a)
    }

    /// Remove an entry.
    pub fn remove(&mut self, key: &str) -> Option<SubAction> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Whether a key is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SubAction)> {
        self.entries.iter().map(|(k, a)| (k.as_str(), a))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, SubAction)> for SubActionTable {
    fn from_iter<I: IntoIterator<Item = (K, SubAction)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (key, action) in iter {
            table.insert(key, action);
        }
        table
    }
}
