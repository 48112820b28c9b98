//! Handler descriptors and the hook specs handler kinds declare.

use serde::{Deserialize, Serialize};

/// A handler bound to a position.
///
/// Identity is `(position, handler_id)`. Registering the same pair twice
/// replaces the earlier descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerDescriptor {
    /// Position the handler listens on.
    pub position: String,
    /// Handler identity, resolved through the handler catalog.
    pub handler_id: String,
    /// Entry point invoked on the handler instance.
    pub entry_point: String,
    /// Dependency names, in declaration order.
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Priority (lower runs first).
    #[serde(default)]
    pub priority: i32,
}

impl HandlerDescriptor {
    /// Create a descriptor with no dependencies and priority 0.
    #[must_use]
    pub fn new(
        position: impl Into<String>,
        handler_id: impl Into<String>,
        entry_point: impl Into<String>,
    ) -> Self {
        Self {
            position: position.into(),
            handler_id: handler_id.into(),
            entry_point: entry_point.into(),
            dependencies: Vec::new(),
            priority: 0,
        }
    }

    /// Declare the dependency names the entry point receives.
    #[must_use]
    pub fn with_dependencies<I, S>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = dependencies.into_iter().map(Into::into).collect();
        self
    }

    /// Set the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

/// One registration a handler kind asks for when its set is loaded.
///
/// The priority is optional; absent means 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookSpec {
    /// Position to register at.
    pub position: String,
    /// Handler identity and entry point.
    pub target: (String, String),
    /// Dependency names.
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Optional priority.
    #[serde(default)]
    pub priority: Option<i32>,
}

impl HookSpec {
    /// Create a spec targeting `handler_id::entry_point` at `position`.
    #[must_use]
    pub fn new(
        position: impl Into<String>,
        handler_id: impl Into<String>,
        entry_point: impl Into<String>,
    ) -> Self {
        Self {
            position: position.into(),
            target: (handler_id.into(), entry_point.into()),
            dependencies: Vec::new(),
            priority: None,
        }
    }

    /// Declare dependency names.
    #[must_use]
    pub fn with_dependencies<I, S>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = dependencies.into_iter().map(Into::into).collect();
        self
    }

    /// Set the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Split into the descriptor and the effective priority.
    #[must_use]
    pub fn into_descriptor(self) -> (HandlerDescriptor, i32) {
        let priority = self.priority.unwrap_or(0);
        let (handler_id, entry_point) = self.target;
        let descriptor = HandlerDescriptor {
            position: self.position,
            handler_id,
            entry_point,
            dependencies: self.dependencies,
            priority,
        };
        (descriptor, priority)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_builder() {
        let descriptor = HandlerDescriptor::new("post_save", "mentions", "on_save")
            .with_dependencies(["msg_options", "topic_options"])
            .with_priority(5);

        assert_eq!(descriptor.position, "post_save");
        assert_eq!(descriptor.dependencies, vec!["msg_options", "topic_options"]);
        assert_eq!(descriptor.priority, 5);
    }

    #[test]
    fn test_spec_default_priority() {
        let (descriptor, priority) = HookSpec::new("p", "h", "run").into_descriptor();
        assert_eq!(priority, 0);
        assert_eq!(descriptor.handler_id, "h");
        assert_eq!(descriptor.entry_point, "run");
    }

    #[test]
    fn test_spec_explicit_priority() {
        let (descriptor, priority) = HookSpec::new("p", "h", "run")
            .with_priority(-3)
            .with_dependencies(["x"])
            .into_descriptor();
        assert_eq!(priority, -3);
        assert_eq!(descriptor.priority, -3);
        assert_eq!(descriptor.dependencies, vec!["x"]);
    }

    #[test]
    fn test_descriptor_deserialize_defaults() {
        let descriptor: HandlerDescriptor = serde_json::from_str(
            r#"{"position":"p","handler_id":"h","entry_point":"run"}"#,
        )
        .unwrap();
        assert!(descriptor.dependencies.is_empty());
        assert_eq!(descriptor.priority, 0);
    }
}
