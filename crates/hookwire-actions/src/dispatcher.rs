//! Sub-action resolution and dispatch.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use hookwire_core::{BoxError, HookwireError, PermissionChecker};
use hookwire_events::{EventRegistry, HandlerCatalog, HandlerEnv};
use hookwire_telemetry::DispatchSpan;
use tracing::{debug, info};

use crate::action::{ActionTarget, ControllerRef, SubActionTable};
use crate::controller::{Controller, ControllerCatalog};
use crate::error::{DispatchError, DispatchResult};
use crate::integration::IntegrationHooks;

/// Request parameter that selects the sub-action unless configured otherwise.
pub const DEFAULT_REQUEST_PARAM: &str = "sa";

/// Resolves a sub-action from the request and invokes its target.
///
/// The usual sequence is [`initialize`](Self::initialize) followed by
/// [`dispatch`](Self::dispatch) with the returned key, or
/// [`execute`](Self::execute) for both.
pub struct ActionDispatcher {
    identity: Option<String>,
    request_param: String,
    env: HandlerEnv,
    permissions: Box<dyn PermissionChecker>,
    controllers: ControllerCatalog,
    handlers: Arc<HandlerCatalog>,
    integrations: IntegrationHooks,
    table: SubActionTable,
    allowed: Vec<String>,
    default_key: String,
    constructed: HashMap<String, Box<dyn Controller>>,
}

impl std::fmt::Debug for ActionDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionDispatcher")
            .field("identity", &self.identity)
            .field("request_param", &self.request_param)
            .field("allowed", &self.allowed)
            .field("default_key", &self.default_key)
            .finish_non_exhaustive()
    }
}

impl Default for ActionDispatcher {
    fn default() -> Self {
        Self::new(HandlerEnv::default())
    }
}

impl ActionDispatcher {
    /// Create a dispatcher for a request.
    ///
    /// Permissions are checked against the environment's user until
    /// [`with_permissions`](Self::with_permissions) overrides it.
    #[must_use]
    pub fn new(env: HandlerEnv) -> Self {
        let permissions: Box<dyn PermissionChecker> = Box::new(Arc::clone(&env.user));
        Self {
            identity: None,
            request_param: DEFAULT_REQUEST_PARAM.to_string(),
            env,
            permissions,
            controllers: ControllerCatalog::new(),
            handlers: Arc::new(HandlerCatalog::new()),
            integrations: IntegrationHooks::new(),
            table: SubActionTable::new(),
            allowed: Vec::new(),
            default_key: String::new(),
            constructed: HashMap::new(),
        }
    }

    /// Name the dispatcher so `integrate_sa_<identity>` hooks run.
    #[must_use]
    pub fn with_identity(mut self, identity: impl Into<String>) -> Self {
        self.identity = Some(identity.into());
        self
    }

    /// Read the sub-action from a different request parameter.
    #[must_use]
    pub fn with_request_param(mut self, param: impl Into<String>) -> Self {
        self.request_param = param.into();
        self
    }

    /// Check permissions with a custom checker.
    #[must_use]
    pub fn with_permissions(mut self, checker: impl PermissionChecker + 'static) -> Self {
        self.permissions = Box::new(checker);
        self
    }

    /// Controller classes available to `Class` targets.
    #[must_use]
    pub fn with_controllers(mut self, controllers: ControllerCatalog) -> Self {
        self.controllers = controllers;
        self
    }

    /// Handler catalog backing the registries given to constructed controllers.
    #[must_use]
    pub fn with_handlers(mut self, handlers: Arc<HandlerCatalog>) -> Self {
        self.handlers = handlers;
        self
    }

    /// Integration hooks run during initialization.
    #[must_use]
    pub fn with_integrations(mut self, integrations: IntegrationHooks) -> Self {
        self.integrations = integrations;
        self
    }

    /// Take ownership of a table and resolve the requested sub-action.
    ///
    /// An empty `default_key` means the first active key. The requested key
    /// is returned when it names an active entry, the default key otherwise.
    ///
    /// The request parameter holding the requested key is
    /// [`DEFAULT_REQUEST_PARAM`] unless set with
    /// [`with_request_param`](Self::with_request_param).
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Configuration`] when an active entry names an
    /// unregistered controller class or an empty method.
    pub fn initialize(
        &mut self,
        mut table: SubActionTable,
        default_key: &str,
    ) -> DispatchResult<String> {
        if let Some(identity) = &self.identity {
            let hook = IntegrationHooks::hook_name(identity);
            self.integrations.call(&hook, &mut table);
        }

        self.validate(&table)?;

        let allowed: Vec<String> = table
            .iter()
            .filter(|(_, action)| action.is_active())
            .map(|(key, _)| key.to_string())
            .collect();

        let default_key = if default_key.is_empty() {
            allowed.first().cloned().unwrap_or_default()
        } else {
            default_key.to_string()
        };

        let requested = self
            .env
            .request
            .param(&self.request_param)
            .unwrap_or(&default_key);
        let resolved = if allowed.iter().any(|key| key == requested) {
            requested.to_string()
        } else {
            debug!(requested, default = %default_key, "Sub-action not available, using default");
            default_key.clone()
        };

        info!(
            identity = self.identity.as_deref().unwrap_or(""),
            sub_action = %resolved,
            available = allowed.len(),
            "Sub-action resolved"
        );

        self.table = table;
        self.allowed = allowed;
        self.default_key = default_key;
        Ok(resolved)
    }

    fn validate(&self, table: &SubActionTable) -> DispatchResult<()> {
        for (key, action) in table.iter().filter(|(_, action)| action.is_active()) {
            let ActionTarget::Method { controller, method } = &action.target else {
                continue;
            };
            if method.is_empty() {
                return Err(DispatchError::configuration(key, "method name is empty"));
            }
            if let ControllerRef::Class(class) = controller
                && !self.controllers.contains(class)
            {
                return Err(DispatchError::configuration(
                    key,
                    format!("controller class {class} is not registered"),
                ));
            }
        }
        Ok(())
    }

    /// Invoke the target for `key`, or for the default key when the table has
    /// no such entry.
    ///
    /// Enable/disable filtering is not applied here; dispatch only keys
    /// returned by [`initialize`](Self::initialize). The call runs inside the
    /// span from [`span_for`](Self::span_for).
    ///
    /// # Errors
    ///
    /// - [`DispatchError::PermissionDenied`] before the target runs when the
    ///   entry's permission is not granted, carrying the permission the
    ///   checker reported. The request must be aborted.
    /// - [`DispatchError::PermissionCheck`] when the checker fails otherwise.
    /// - [`DispatchError::UnknownSubAction`] when neither key is present.
    /// - [`DispatchError::ControllerBusy`] when a shared controller is
    ///   already borrowed.
    /// - [`DispatchError::Setup`] when constructing a controller fails.
    /// - [`DispatchError::Action`] when the target itself fails.
    pub fn dispatch(&mut self, key: &str) -> DispatchResult<()> {
        let key = if self.table.contains(key) {
            key.to_string()
        } else {
            self.default_key.clone()
        };

        let _span = self.span_for(&key).enter();

        let Self {
            table,
            permissions,
            controllers,
            constructed,
            handlers,
            env,
            ..
        } = self;

        let Some(action) = table.get_mut(&key) else {
            return Err(DispatchError::UnknownSubAction(key));
        };

        if let Some(permission) = &action.permission {
            match permissions.check(permission) {
                Ok(()) => {},
                Err(HookwireError::PermissionDenied { permission }) => {
                    return Err(DispatchError::PermissionDenied { key, permission });
                },
                Err(source) => return Err(DispatchError::PermissionCheck { key, source }),
            }
        }

        debug!(sub_action = %key, action = ?action.target, "Dispatching sub-action");

        match &mut action.target {
            ActionTarget::Function(function) => {
                function().map_err(|source| DispatchError::Action { key, source })
            },
            ActionTarget::Method {
                controller: ControllerRef::Instance(shared),
                method,
            } => {
                let mut controller = shared
                    .try_borrow_mut()
                    .map_err(|_| DispatchError::ControllerBusy(key.clone()))?;
                call_method(&mut *controller, &key, method)
            },
            ActionTarget::Method {
                controller: ControllerRef::Class(class),
                method,
            } => {
                let controller = match constructed.entry(class.clone()) {
                    Entry::Occupied(entry) => entry.into_mut(),
                    Entry::Vacant(entry) => {
                        entry.insert(construct(controllers, handlers, env, &key, class)?)
                    },
                };
                call_method(controller.as_mut(), &key, method)
            },
        }
    }

    /// Initialize with `table` and dispatch the resolved key.
    ///
    /// # Errors
    ///
    /// See [`initialize`](Self::initialize) and [`dispatch`](Self::dispatch).
    pub fn execute(&mut self, table: SubActionTable, default_key: &str) -> DispatchResult<String> {
        let key = self.initialize(table, default_key)?;
        self.dispatch(&key)?;
        Ok(key)
    }

    /// The correlation span a dispatch of `key` runs in.
    ///
    /// The source is the dispatcher identity, or `dispatcher` without one.
    #[must_use]
    pub fn span_for(&self, key: &str) -> DispatchSpan {
        DispatchSpan::new(self.identity.as_deref().unwrap_or("dispatcher"))
            .with_sub_action(key)
            .with_user_id(self.env.user.id)
    }

    /// Active sub-action keys from the last initialization, in table order.
    #[must_use]
    pub fn sub_actions(&self) -> &[String] {
        &self.allowed
    }

    /// Default key from the last initialization.
    #[must_use]
    pub fn default_key(&self) -> &str {
        &self.default_key
    }

    /// The unfiltered table from the last initialization.
    #[must_use]
    pub fn table(&self) -> &SubActionTable {
        &self.table
    }

    /// The request parameter read by [`initialize`](Self::initialize).
    #[must_use]
    pub fn request_param(&self) -> &str {
        &self.request_param
    }

    /// The dispatcher identity, if any.
    #[must_use]
    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    /// Whether a controller class has been constructed.
    #[must_use]
    pub fn is_constructed(&self, class: &str) -> bool {
        self.constructed.contains_key(class)
    }
}

fn construct(
    controllers: &ControllerCatalog,
    handlers: &Arc<HandlerCatalog>,
    env: &HandlerEnv,
    key: &str,
    class: &str,
) -> DispatchResult<Box<dyn Controller>> {
    let mut controller = controllers.create(class).ok_or_else(|| {
        DispatchError::configuration(key, format!("controller class {class} is not registered"))
    })?;

    let setup_failed = |source: BoxError| DispatchError::Setup {
        controller: class.to_string(),
        source,
    };

    controller.attach_events(EventRegistry::new(Arc::clone(handlers), env.clone()));
    controller.register_hooks().map_err(setup_failed)?;
    controller.set_user(Arc::clone(&env.user));
    controller.pre_dispatch().map_err(setup_failed)?;

    debug!(class, "Controller constructed");
    Ok(controller)
}

fn call_method(controller: &mut dyn Controller, key: &str, method: &str) -> DispatchResult<()> {
    if !controller.responds_to(method) {
        return Err(DispatchError::configuration(
            key,
            format!("controller does not respond to {method}"),
        ));
    }
    controller
        .invoke(method)
        .map_err(|source| DispatchError::Action {
            key: key.to_string(),
            source,
        })
}
