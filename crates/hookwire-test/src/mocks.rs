//! Mock implementations for testing.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use hookwire_actions::Controller;
use hookwire_core::{BoxError, PermissionChecker, UserContext, Value};
use hookwire_events::{CallParams, EventRegistry, Handler, HandlerCatalog};

/// One entry point call seen by a [`RecordingHandler`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// Handler id.
    pub handler_id: String,
    /// Entry point.
    pub entry_point: String,
    /// Parameters received, in order.
    pub params: Vec<(String, Value)>,
}

/// Shared, ordered record of handler calls.
///
/// Clones share the same record, so one log can observe several handlers.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl CallLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, call: RecordedCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }

    /// All calls so far.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Handler ids in call order.
    #[must_use]
    pub fn handler_order(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .map(|call| call.handler_id)
            .collect()
    }

    /// Calls made to one handler.
    #[must_use]
    pub fn calls_to(&self, handler_id: &str) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.handler_id == handler_id)
            .collect()
    }

    /// Number of calls.
    #[must_use]
    pub fn len(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or_default()
    }

    /// Whether nothing was called.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A handler that records its calls.
///
/// Entry points are declared with their arity. Assignments overwrite a
/// parameter during the call, which exercises write-back to the caller's
/// arguments.
#[derive(Debug, Clone)]
pub struct RecordingHandler {
    id: String,
    log: CallLog,
    entry_points: HashMap<String, usize>,
    assignments: HashMap<String, Vec<(String, Value)>>,
    failing: HashSet<String>,
    instances: Arc<AtomicUsize>,
}

impl RecordingHandler {
    /// Create a handler with no entry points.
    #[must_use]
    pub fn new(id: impl Into<String>, log: &CallLog) -> Self {
        Self {
            id: id.into(),
            log: log.clone(),
            entry_points: HashMap::new(),
            assignments: HashMap::new(),
            failing: HashSet::new(),
            instances: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Declare an entry point.
    #[must_use]
    pub fn with_entry_point(mut self, name: impl Into<String>, arity: usize) -> Self {
        self.entry_points.insert(name.into(), arity);
        self
    }

    /// Set `param` to `value` whenever `entry_point` runs.
    #[must_use]
    pub fn with_assignment(
        mut self,
        entry_point: impl Into<String>,
        param: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.assignments
            .entry(entry_point.into())
            .or_default()
            .push((param.into(), value.into()));
        self
    }

    /// Make `entry_point` return an error.
    #[must_use]
    pub fn failing_on(mut self, entry_point: impl Into<String>) -> Self {
        self.failing.insert(entry_point.into());
        self
    }

    /// Counter of instances built from this template.
    #[must_use]
    pub fn instance_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.instances)
    }

    /// Register in `catalog` under this handler's id.
    pub fn install(self, catalog: &mut HandlerCatalog) {
        let id = self.id.clone();
        catalog.register_fn(id, move |_env| {
            self.instances.fetch_add(1, Ordering::SeqCst);
            self.clone()
        });
    }
}

impl Handler for RecordingHandler {
    fn arity(&self, entry_point: &str) -> Option<usize> {
        self.entry_points.get(entry_point).copied()
    }

    fn call(&mut self, entry_point: &str, params: &mut CallParams) -> Result<(), BoxError> {
        self.log.push(RecordedCall {
            handler_id: self.id.clone(),
            entry_point: entry_point.to_string(),
            params: params
                .names()
                .map(str::to_string)
                .zip(params.values().cloned())
                .collect(),
        });

        if self.failing.contains(entry_point) {
            return Err(format!("{}::{entry_point} failed", self.id).into());
        }

        if let Some(assignments) = self.assignments.get(entry_point) {
            for (name, value) in assignments {
                params.set(name, value.clone());
            }
        }
        Ok(())
    }
}

/// A permission checker answering from a fixed grant list and recording
/// every key it was asked about.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPermissions {
    granted: HashSet<String>,
    checked: Arc<Mutex<Vec<String>>>,
}

impl ScriptedPermissions {
    /// Deny everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant a permission.
    #[must_use]
    pub fn granting(mut self, permission: impl Into<String>) -> Self {
        self.granted.insert(permission.into());
        self
    }

    /// Keys checked so far, in order.
    #[must_use]
    pub fn checked(&self) -> Vec<String> {
        self.checked.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl PermissionChecker for ScriptedPermissions {
    fn is_allowed(&self, permission: &str) -> bool {
        if let Ok(mut checked) = self.checked.lock() {
            checked.push(permission.to_string());
        }
        self.granted.contains(permission)
    }
}

/// A controller that records its setup steps and method calls.
///
/// Clones share the record. Entries look like `register_hooks`,
/// `set_user:<name>` or `call:<method>`.
#[derive(Debug, Clone, Default)]
pub struct CountingController {
    methods: HashSet<String>,
    steps: Rc<RefCell<Vec<String>>>,
    has_events: bool,
}

impl CountingController {
    /// Create a controller responding to `methods`.
    #[must_use]
    pub fn new(methods: &[&str]) -> Self {
        Self {
            methods: methods.iter().map(|m| (*m).to_string()).collect(),
            ..Self::default()
        }
    }

    /// Steps recorded so far.
    #[must_use]
    pub fn steps(&self) -> Vec<String> {
        self.steps.borrow().clone()
    }

    /// Number of method calls.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.steps
            .borrow()
            .iter()
            .filter(|step| step.starts_with("call:"))
            .count()
    }

    fn record(&self, step: String) {
        self.steps.borrow_mut().push(step);
    }
}

impl Controller for CountingController {
    fn attach_events(&mut self, _events: EventRegistry) {
        self.has_events = true;
        self.record("attach_events".to_string());
    }

    fn register_hooks(&mut self) -> Result<(), BoxError> {
        self.record("register_hooks".to_string());
        Ok(())
    }

    fn set_user(&mut self, user: Arc<UserContext>) {
        self.record(format!("set_user:{}", user.name));
    }

    fn pre_dispatch(&mut self) -> Result<(), BoxError> {
        self.record(format!("pre_dispatch:{}", self.has_events));
        Ok(())
    }

    fn responds_to(&self, method: &str) -> bool {
        self.methods.contains(method)
    }

    fn invoke(&mut self, method: &str) -> Result<(), BoxError> {
        self.record(format!("call:{method}"));
        Ok(())
    }
}
