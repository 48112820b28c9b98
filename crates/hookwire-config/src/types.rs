//! Configuration types.

use std::path::PathBuf;

use hookwire_actions::ActionDispatcher;
use hookwire_events::{EventRegistry, HandlerDescriptor};
use hookwire_telemetry::{FileRotation, LogConfig, LogFormat};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Complete Hookwire configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Sub-action dispatch settings.
    pub dispatch: DispatchSection,
    /// Handler registrations.
    pub events: EventsSection,
    /// Logging.
    pub logging: LoggingSection,
}

impl Config {
    /// Register the configured handler sets and handlers on `registry`.
    ///
    /// Returns the number of registrations made.
    pub fn apply_to(&self, registry: &mut EventRegistry) -> usize {
        let from_sets = registry.register_handler_set(&self.events.handler_sets);

        for handler in &self.events.handlers {
            registry.register(
                handler.position.clone(),
                handler.to_descriptor(),
                handler.priority,
            );
        }

        let total = from_sets.saturating_add(self.events.handlers.len());
        info!(
            handler_sets = self.events.handler_sets.len(),
            handlers = self.events.handlers.len(),
            registrations = total,
            "Configured handlers registered"
        );
        total
    }

    /// Apply the dispatch settings to a dispatcher.
    #[must_use]
    pub fn configure_dispatcher(&self, dispatcher: ActionDispatcher) -> ActionDispatcher {
        dispatcher.with_request_param(self.dispatch.request_param.clone())
    }
}

/// `[dispatch]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchSection {
    /// Request parameter naming the sub-action.
    pub request_param: String,
    /// Explicit default sub-action; empty means the first active entry.
    pub default_sub_action: String,
}

impl Default for DispatchSection {
    fn default() -> Self {
        Self {
            request_param: hookwire_actions::DEFAULT_REQUEST_PARAM.to_string(),
            default_sub_action: String::new(),
        }
    }
}

/// `[events]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventsSection {
    /// Handler ids whose declared hooks are loaded.
    pub handler_sets: Vec<String>,
    /// Declarative registrations.
    pub handlers: Vec<HandlerRegistration>,
}

/// One `[[events.handlers]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerRegistration {
    /// Position to listen on.
    pub position: String,
    /// Handler id in the catalog.
    pub handler: String,
    /// Entry point to invoke.
    pub entry_point: String,
    /// Dependency names.
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Priority; lower runs first.
    #[serde(default)]
    pub priority: i32,
}

impl HandlerRegistration {
    /// The descriptor this entry registers.
    #[must_use]
    pub fn to_descriptor(&self) -> HandlerDescriptor {
        HandlerDescriptor::new(&*self.position, &*self.handler, &*self.entry_point)
            .with_dependencies(self.dependencies.iter().cloned())
            .with_priority(self.priority)
    }
}

/// `[logging]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Base level.
    pub level: String,
    /// Output format.
    pub format: LogFormat,
    /// Extra filter directives.
    pub directives: Vec<String>,
    /// Log to daily-rotated files in this directory instead of stderr.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
            directives: Vec::new(),
            directory: None,
        }
    }
}

impl LoggingSection {
    /// Build the telemetry configuration.
    #[must_use]
    pub fn to_log_config(&self) -> LogConfig {
        let mut config = LogConfig::new(self.level.clone()).with_format(self.format);
        for directive in &self.directives {
            config = config.with_directive(directive.clone());
        }
        if let Some(directory) = &self.directory {
            config = config.with_file_logging(directory.clone(), FileRotation::Daily);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hookwire_telemetry::LogTarget;

    #[test]
    fn test_default_dispatch_param() {
        assert_eq!(Config::default().dispatch.request_param, "sa");
    }

    #[test]
    fn test_registration_descriptor() {
        let registration = HandlerRegistration {
            position: "post_save".to_string(),
            handler: "mentions".to_string(),
            entry_point: "on_save".to_string(),
            dependencies: vec!["msg_options".to_string()],
            priority: 4,
        };
        let descriptor = registration.to_descriptor();
        assert_eq!(descriptor.handler_id, "mentions");
        assert_eq!(descriptor.dependencies, vec!["msg_options"]);
        assert_eq!(descriptor.priority, 4);
    }

    #[test]
    fn test_to_log_config() {
        let section = LoggingSection {
            level: "debug".to_string(),
            format: LogFormat::Json,
            directives: vec!["hookwire_events=trace".to_string()],
            directory: Some(PathBuf::from("/var/log/hookwire")),
        };
        let config = section.to_log_config();

        assert_eq!(config.level, "debug");
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.directives, vec!["hookwire_events=trace"]);
        assert_eq!(
            config.target,
            LogTarget::File(PathBuf::from("/var/log/hookwire"))
        );
    }

    #[test]
    fn test_apply_to_registry() {
        let config: Config = toml::from_str(
            r#"
            [[events.handlers]]
            position = "display_topic"
            handler = "badges"
            entry_point = "render"
            priority = 2

            [[events.handlers]]
            position = "display_topic"
            handler = "polls"
            entry_point = "render"
            "#,
        )
        .unwrap();

        let mut registry = EventRegistry::default();
        assert_eq!(config.apply_to(&mut registry), 2);
        assert_eq!(registry.handler_ids("display_topic"), vec!["polls", "badges"]);
    }

    #[test]
    fn test_configure_dispatcher() {
        let mut config = Config::default();
        config.dispatch.request_param = "area".to_string();

        let dispatcher = config.configure_dispatcher(ActionDispatcher::default());
        assert_eq!(dispatcher.request_param(), "area");
    }
}
