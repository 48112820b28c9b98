//! Controllers and the catalog of controller classes.

use std::collections::HashMap;
use std::sync::Arc;

use hookwire_core::{BoxError, UserContext};
use hookwire_events::EventRegistry;
use tracing::debug;

/// An object whose methods serve sub-actions.
///
/// Controllers built from a class name go through the setup sequence
/// [`attach_events`](Self::attach_events), [`register_hooks`](Self::register_hooks),
/// [`set_user`](Self::set_user), [`pre_dispatch`](Self::pre_dispatch) before
/// their first method call. Shared instances are used as they are.
pub trait Controller {
    /// Receive the event registry created for this controller.
    fn attach_events(&mut self, _events: EventRegistry) {}

    /// Register the controller's own hooks on its registry.
    ///
    /// # Errors
    ///
    /// Fails the dispatch with a setup error.
    fn register_hooks(&mut self) -> Result<(), BoxError> {
        Ok(())
    }

    /// Receive the current user.
    fn set_user(&mut self, _user: Arc<UserContext>) {}

    /// Last step before the first method call.
    ///
    /// # Errors
    ///
    /// Fails the dispatch with a setup error.
    fn pre_dispatch(&mut self) -> Result<(), BoxError> {
        Ok(())
    }

    /// Whether `method` can be invoked.
    fn responds_to(&self, method: &str) -> bool;

    /// Invoke a method with no arguments.
    ///
    /// # Errors
    ///
    /// Any error is returned to the dispatcher's caller.
    fn invoke(&mut self, method: &str) -> Result<(), BoxError>;
}

/// Builds a controller instance.
pub type ControllerFactory = Box<dyn Fn() -> Box<dyn Controller>>;

/// Maps controller class names to factories.
#[derive(Default)]
pub struct ControllerCatalog {
    factories: HashMap<String, ControllerFactory>,
}

impl std::fmt::Debug for ControllerCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControllerCatalog")
            .field("classes", &self.names())
            .finish()
    }
}

impl ControllerCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a controller class.
    pub fn register<F, C>(&mut self, class: impl Into<String>, factory: F)
    where
        F: Fn() -> C + 'static,
        C: Controller + 'static,
    {
        let class = class.into();
        debug!(class = %class, "Controller class registered");
        let factory: ControllerFactory =
            Box::new(move || -> Box<dyn Controller> { Box::new(factory()) });
        self.factories.insert(class, factory);
    }

    /// Builder form of [`register`](Self::register).
    #[must_use]
    pub fn with<F, C>(mut self, class: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> C + 'static,
        C: Controller + 'static,
    {
        self.register(class, factory);
        self
    }

    /// Whether a class is registered.
    #[must_use]
    pub fn contains(&self, class: &str) -> bool {
        self.factories.contains_key(class)
    }

    /// Build a bare instance, or `None` for an unknown class.
    #[must_use]
    pub fn create(&self, class: &str) -> Option<Box<dyn Controller>> {
        self.factories.get(class).map(|factory| factory())
    }

    /// Registered class names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}
