//! Event registry - registers handlers by position and triggers them.

use std::collections::HashMap;
use std::sync::Arc;

use hookwire_core::{Args, DependencyProvider, NoDependencies};
use tracing::{debug, info, trace};

use crate::bag::EventBag;
use crate::catalog::HandlerCatalog;
use crate::descriptor::{HandlerDescriptor, HookSpec};
use crate::error::{EventError, EventResult};
use crate::handler::{CallParams, Handler, HandlerEnv, ParamSource};

/// Registers handlers at named positions and triggers them in priority order.
///
/// Handler instances are created on first use through the catalog and kept
/// for the lifetime of the registry. The registry is request-scoped and not
/// internally synchronized; hosts sharing one across threads must wrap it in
/// a `Mutex`.
pub struct EventRegistry {
    bags: HashMap<String, EventBag>,
    instances: HashMap<String, Box<dyn Handler>>,
    catalog: Arc<HandlerCatalog>,
    provider: Box<dyn DependencyProvider + Send>,
    env: HandlerEnv,
}

impl std::fmt::Debug for EventRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventRegistry")
            .field("positions", &self.bags.len())
            .field("instances", &self.instances.len())
            .field("catalog", &self.catalog)
            .finish_non_exhaustive()
    }
}

impl Default for EventRegistry {
    fn default() -> Self {
        Self::new(Arc::new(HandlerCatalog::new()), HandlerEnv::default())
    }
}

impl EventRegistry {
    /// Create a registry over a catalog, for the given request environment.
    #[must_use]
    pub fn new(catalog: Arc<HandlerCatalog>, env: HandlerEnv) -> Self {
        Self {
            bags: HashMap::new(),
            instances: HashMap::new(),
            catalog,
            provider: Box::new(NoDependencies),
            env,
        }
    }

    /// Set the provider consulted for dependencies not passed as arguments.
    #[must_use]
    pub fn with_provider(mut self, provider: impl DependencyProvider + Send + 'static) -> Self {
        self.provider = Box::new(provider);
        self
    }

    /// The environment handed to handler factories.
    #[must_use]
    pub fn env(&self) -> &HandlerEnv {
        &self.env
    }

    /// The catalog handlers are instantiated from.
    #[must_use]
    pub fn catalog(&self) -> &Arc<HandlerCatalog> {
        &self.catalog
    }

    /// Register a descriptor at `position` with `priority`.
    ///
    /// Replaces any descriptor already registered for the same handler id at
    /// that position.
    pub fn register(
        &mut self,
        position: impl Into<String>,
        mut descriptor: HandlerDescriptor,
        priority: i32,
    ) {
        let position = position.into();
        descriptor.position.clone_from(&position);
        descriptor.priority = priority;

        trace!(
            position = %position,
            handler_id = %descriptor.handler_id,
            entry_point = %descriptor.entry_point,
            priority,
            "Registering handler"
        );

        self.bags
            .entry(position)
            .or_default()
            .add(descriptor, priority);
    }

    /// Register a single hook spec.
    pub fn register_spec(&mut self, spec: HookSpec) {
        let (descriptor, priority) = spec.into_descriptor();
        let position = descriptor.position.clone();
        self.register(position, descriptor, priority);
    }

    /// Register several hook specs. Returns how many were registered.
    pub fn register_all(&mut self, specs: impl IntoIterator<Item = HookSpec>) -> usize {
        let mut count: usize = 0;
        for spec in specs {
            self.register_spec(spec);
            count = count.saturating_add(1);
        }
        count
    }

    /// Load the hooks each listed handler kind declares.
    ///
    /// Unknown ids and kinds that decline to list hooks are skipped. Returns
    /// the number of registrations made.
    pub fn register_handler_set<I, S>(&mut self, handler_ids: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let catalog = Arc::clone(&self.catalog);
        let mut total: usize = 0;

        for handler_id in handler_ids {
            let handler_id = handler_id.as_ref();
            let Some(specs) = catalog.hooks(handler_id, self) else {
                debug!(handler_id, "Handler declares no hooks, skipping");
                continue;
            };
            let count = self.register_all(specs);
            total = total.saturating_add(count);
        }

        info!(registered = total, "Handler set loaded");
        total
    }

    /// Trigger every handler registered at `position`.
    ///
    /// Returns `Ok(false)` when nothing is registered there, `Ok(true)`
    /// otherwise, even if individual handlers were skipped. Arguments bound to
    /// handler dependencies are written back after each call, so later
    /// handlers and the caller see changes.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::Handler`] as soon as a handler body fails; the
    /// remaining handlers do not run.
    pub fn trigger(&mut self, position: &str, args: &mut Args) -> EventResult<bool> {
        let Some(bag) = self.bags.get_mut(position) else {
            trace!(position, "No handlers registered at position");
            return Ok(false);
        };
        if !bag.has_events() {
            return Ok(false);
        }

        let descriptors: Vec<HandlerDescriptor> = bag.events().into_iter().cloned().collect();
        debug!(position, handler_count = descriptors.len(), "Triggering position");

        for descriptor in &descriptors {
            self.invoke(descriptor, args)?;
        }

        Ok(true)
    }

    fn invoke(&mut self, descriptor: &HandlerDescriptor, args: &mut Args) -> EventResult<()> {
        let mut params = self.resolve(descriptor, args);

        let Some(handler) = self.instance(&descriptor.handler_id) else {
            debug!(
                handler_id = %descriptor.handler_id,
                position = %descriptor.position,
                "Handler not in catalog, skipping"
            );
            return Ok(());
        };

        let Some(arity) = handler.arity(&descriptor.entry_point) else {
            debug!(
                handler_id = %descriptor.handler_id,
                entry_point = %descriptor.entry_point,
                "Entry point not invocable, skipping"
            );
            return Ok(());
        };

        if arity == 0 {
            params.clear();
        }

        trace!(
            handler_id = %descriptor.handler_id,
            entry_point = %descriptor.entry_point,
            params = params.len(),
            "Invoking handler"
        );

        handler
            .call(&descriptor.entry_point, &mut params)
            .map_err(|source| EventError::Handler {
                position: descriptor.position.clone(),
                handler_id: descriptor.handler_id.clone(),
                entry_point: descriptor.entry_point.clone(),
                source,
            })?;

        params.write_back(args);
        Ok(())
    }

    /// Resolve the parameters for one call.
    ///
    /// A handler declaring no dependencies receives every argument. Declared
    /// names come from the arguments first, then the provider; names neither
    /// can supply are left out. A name listed twice is bound once.
    fn resolve(&self, descriptor: &HandlerDescriptor, args: &Args) -> CallParams {
        if descriptor.dependencies.is_empty() {
            return CallParams::from_args(args);
        }

        let mut params = CallParams::new();
        for name in &descriptor.dependencies {
            if params.contains(name) {
                continue;
            }
            if let Some(value) = args.get(name) {
                params.push(name.clone(), value.clone(), ParamSource::Argument);
            } else if let Some(value) = self.provider.provide(name) {
                params.push(name.clone(), value, ParamSource::Provider);
            } else {
                debug!(
                    handler_id = %descriptor.handler_id,
                    dependency = %name,
                    "Dependency unresolved, omitting"
                );
            }
        }
        params
    }

    fn instance(&mut self, handler_id: &str) -> Option<&mut Box<dyn Handler>> {
        if !self.instances.contains_key(handler_id) {
            let handler = self.catalog.instantiate(handler_id, &self.env)?;
            debug!(handler_id, "Handler instantiated");
            self.instances.insert(handler_id.to_string(), handler);
        }
        self.instances.get_mut(handler_id)
    }

    /// Positions with at least one registration, sorted.
    #[must_use]
    pub fn positions(&self) -> Vec<&str> {
        let mut positions: Vec<&str> = self
            .bags
            .iter()
            .filter(|(_, bag)| !bag.is_empty())
            .map(|(position, _)| position.as_str())
            .collect();
        positions.sort_unstable();
        positions
    }

    /// Whether anything is registered at `position`.
    #[must_use]
    pub fn has_position(&self, position: &str) -> bool {
        self.bags.get(position).is_some_and(|bag| !bag.is_empty())
    }

    /// Handler ids at `position`, in trigger order.
    pub fn handler_ids(&mut self, position: &str) -> Vec<String> {
        self.bags
            .get_mut(position)
            .map(|bag| {
                bag.events()
                    .into_iter()
                    .map(|d| d.handler_id.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether the handler has been instantiated by a trigger.
    #[must_use]
    pub fn is_instantiated(&self, handler_id: &str) -> bool {
        self.instances.contains_key(handler_id)
    }

    /// Statistics about the registry.
    #[must_use]
    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            positions: self.bags.values().filter(|bag| !bag.is_empty()).count(),
            registrations: self.bags.values().map(EventBag::len).sum(),
            instances: self.instances.len(),
        }
    }
}

/// Statistics about a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryStats {
    /// Positions with at least one handler.
    pub positions: usize,
    /// Total `(position, handler)` registrations.
    pub registrations: usize,
    /// Handler instances created so far.
    pub instances: usize,
}
