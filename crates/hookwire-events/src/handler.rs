//! The handler contract and the parameters handed to entry points.

use std::sync::Arc;

use hookwire_core::{Args, BoxError, RequestContext, UserContext, Value};
use serde::de::DeserializeOwned;

use crate::descriptor::HookSpec;
use crate::registry::EventRegistry;

/// A handler instance created by the registry.
///
/// One instance exists per handler id for the lifetime of the registry.
pub trait Handler: Send {
    /// Number of parameters the entry point declares, or `None` when the
    /// handler has no such entry point.
    ///
    /// An entry point declaring zero parameters is called with an empty
    /// parameter set even if dependencies were resolved for it.
    fn arity(&self, entry_point: &str) -> Option<usize>;

    /// Invoke an entry point.
    ///
    /// Values in `params` that came from trigger arguments are written back to
    /// the caller's arguments after the call returns.
    ///
    /// # Errors
    ///
    /// Any error is propagated to the caller of
    /// [`EventRegistry::trigger`] unchanged.
    fn call(&mut self, entry_point: &str, params: &mut CallParams) -> Result<(), BoxError>;
}

/// A handler type that can be registered in a catalog by type.
pub trait HandlerKind: Handler + Sized + 'static {
    /// Construct the instance for a registry.
    fn create(env: &HandlerEnv) -> Self;

    /// The registrations this handler asks for when its set is loaded.
    ///
    /// Returning `None` skips the handler.
    fn hooks(_registry: &EventRegistry) -> Option<Vec<HookSpec>> {
        None
    }
}

/// Context injected into every handler the registry instantiates.
#[derive(Debug, Clone, Default)]
pub struct HandlerEnv {
    /// The current request.
    pub request: Arc<RequestContext>,
    /// The current user.
    pub user: Arc<UserContext>,
}

impl HandlerEnv {
    /// Create an environment from a request and user.
    #[must_use]
    pub fn new(request: RequestContext, user: UserContext) -> Self {
        Self {
            request: Arc::new(request),
            user: Arc::new(user),
        }
    }
}

/// Where a parameter value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamSource {
    /// A trigger argument. Changes are written back to the caller.
    Argument,
    /// The registry's dependency provider. Changes stay local to the call.
    Provider,
}

#[derive(Debug, Clone)]
struct Param {
    name: String,
    value: Value,
    source: ParamSource,
}

/// Resolved parameters for one entry point call, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct CallParams {
    params: Vec<Param>,
}

impl CallParams {
    /// Create an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every trigger argument, in argument order.
    pub(crate) fn from_args(args: &Args) -> Self {
        let params = args
            .iter()
            .map(|(name, value)| Param {
                name: name.clone(),
                value: value.clone(),
                source: ParamSource::Argument,
            })
            .collect();
        Self { params }
    }

    /// Append a resolved value.
    pub fn push(&mut self, name: impl Into<String>, value: Value, source: ParamSource) {
        self.params.push(Param {
            name: name.into(),
            value,
            source,
        });
    }

    /// Get a value by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.params.iter().find(|p| p.name == name).map(|p| &p.value)
    }

    /// Get a mutable value by name.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.params
            .iter_mut()
            .find(|p| p.name == name)
            .map(|p| &mut p.value)
    }

    /// Get a value deserialized into `T`.
    #[must_use]
    pub fn get_as<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
        self.get(name)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// Replace the value of an existing parameter. Returns `false` if the name
    /// was not resolved for this call.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> bool {
        match self.get_mut(name) {
            Some(slot) => {
                *slot = value.into();
                true
            },
            None => false,
        }
    }

    /// Where a parameter came from.
    #[must_use]
    pub fn source(&self, name: &str) -> Option<ParamSource> {
        self.params.iter().find(|p| p.name == name).map(|p| p.source)
    }

    /// Whether a name was resolved.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.params.iter().any(|p| p.name == name)
    }

    /// Parameter names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|p| p.name.as_str())
    }

    /// Positional values in order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.params.iter().map(|p| &p.value)
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether no parameter was resolved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Drop every parameter.
    pub fn clear(&mut self) {
        self.params.clear();
    }

    /// Copy argument-sourced values back into the caller's arguments.
    pub(crate) fn write_back(self, args: &mut Args) {
        for param in self.params {
            if param.source == ParamSource::Argument {
                args.insert(param.name, param.value);
            }
        }
    }
}
