//! Post-merge validation.

use crate::error::{ConfigError, ConfigResult};
use crate::types::Config;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Validate a merged configuration.
///
/// # Errors
///
/// Returns the first validation error found.
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_dispatch(config)?;
    validate_events(config)?;
    validate_logging(config)?;
    Ok(())
}

fn validate_dispatch(config: &Config) -> ConfigResult<()> {
    let dispatch = &config.dispatch;

    if dispatch.request_param.is_empty() {
        return Err(ConfigError::invalid(
            "dispatch.request_param",
            "must not be empty",
        ));
    }
    if dispatch.request_param.chars().any(char::is_whitespace) {
        return Err(ConfigError::invalid(
            "dispatch.request_param",
            format!("'{}' contains whitespace", dispatch.request_param),
        ));
    }
    if dispatch.default_sub_action.chars().any(char::is_whitespace) {
        return Err(ConfigError::invalid(
            "dispatch.default_sub_action",
            format!("'{}' contains whitespace", dispatch.default_sub_action),
        ));
    }
    Ok(())
}

fn validate_events(config: &Config) -> ConfigResult<()> {
    if config.events.handler_sets.iter().any(|id| id.trim().is_empty()) {
        return Err(ConfigError::invalid(
            "events.handler_sets",
            "handler ids must not be empty",
        ));
    }

    for (index, handler) in config.events.handlers.iter().enumerate() {
        let required = [
            ("position", &handler.position),
            ("handler", &handler.handler),
            ("entry_point", &handler.entry_point),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::invalid(
                    format!("events.handlers[{index}].{name}"),
                    "must not be empty",
                ));
            }
        }
        if handler.dependencies.iter().any(|d| d.trim().is_empty()) {
            return Err(ConfigError::invalid(
                format!("events.handlers[{index}].dependencies"),
                "dependency names must not be empty",
            ));
        }
    }
    Ok(())
}

fn validate_logging(config: &Config) -> ConfigResult<()> {
    let level = config.logging.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        return Err(ConfigError::invalid(
            "logging.level",
            format!(
                "unknown level '{}'; expected one of: {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HandlerRegistration;

    fn registration(position: &str, handler: &str, entry_point: &str) -> HandlerRegistration {
        HandlerRegistration {
            position: position.to_string(),
            handler: handler.to_string(),
            entry_point: entry_point.to_string(),
            dependencies: Vec::new(),
            priority: 0,
        }
    }

    fn field_of(result: ConfigResult<()>) -> String {
        match result {
            Err(ConfigError::ValidationError { field, .. }) => field,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_request_param_rules() {
        let mut config = Config::default();
        config.dispatch.request_param = String::new();
        assert_eq!(field_of(validate(&config)), "dispatch.request_param");

        config.dispatch.request_param = "s a".to_string();
        assert_eq!(field_of(validate(&config)), "dispatch.request_param");
    }

    #[test]
    fn test_handler_fields_required() {
        let mut config = Config::default();
        config.events.handlers = vec![
            registration("p", "h", "run"),
            registration("p", "", "run"),
        ];
        assert_eq!(field_of(validate(&config)), "events.handlers[1].handler");
    }

    #[test]
    fn test_blank_dependency_rejected() {
        let mut config = Config::default();
        let mut handler = registration("p", "h", "run");
        handler.dependencies = vec!["x".to_string(), " ".to_string()];
        config.events.handlers = vec![handler];
        assert_eq!(
            field_of(validate(&config)),
            "events.handlers[0].dependencies"
        );
    }

    #[test]
    fn test_log_level() {
        let mut config = Config::default();
        config.logging.level = "WARN".to_string();
        assert!(validate(&config).is_ok());

        config.logging.level = "loud".to_string();
        assert_eq!(field_of(validate(&config)), "logging.level");
    }
}
