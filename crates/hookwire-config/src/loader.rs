//! Layered configuration loading.
//!
//! `Config::load()`:
//! 1. Parse the embedded `defaults.toml`
//! 2. Merge the config file, if one is given and exists
//! 3. Apply `HOOKWIRE_*` env var fallbacks for fields the file left unset
//! 4. Deserialize and validate

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, info};

use crate::env::{apply_env_fallbacks, collect_env_vars};
use crate::error::{ConfigError, ConfigResult};
use crate::merge::{SetFields, deep_merge};
use crate::types::Config;
use crate::validate;

/// Embedded default configuration.
const DEFAULTS_TOML: &str = include_str!("defaults.toml");

/// Largest config file accepted (1 MB).
const MAX_CONFIG_FILE_SIZE: usize = 1_048_576;

impl Config {
    /// Load defaults, the optional file at `path`, and env fallbacks.
    ///
    /// A missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file is unreadable or malformed, an
    /// env var is blank, or the result fails validation.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        Self::load_with_env(path, &collect_env_vars())
    }

    /// [`Config::load`] with an explicit environment.
    ///
    /// # Errors
    ///
    /// See [`Config::load`].
    pub fn load_with_env<S: std::hash::BuildHasher>(
        path: Option<&Path>,
        env_vars: &HashMap<String, String, S>,
    ) -> ConfigResult<Self> {
        let mut merged = parse_toml(DEFAULTS_TOML, "<embedded defaults>")?;
        let mut set = SetFields::new();

        if let Some(path) = path
            && let Some(overlay) = try_load_file(path)?
        {
            deep_merge(&mut merged, &overlay, "", &mut set);
            info!(path = %path.display(), "loaded config file");
        }

        let applied = apply_env_fallbacks(&mut merged, &set, env_vars)?;
        if applied > 0 {
            debug!(count = applied, "applied environment variable fallbacks");
        }

        let config: Self = merged
            .try_into()
            .map_err(|e: toml::de::Error| ConfigError::ParseError {
                path: "<merged config>".to_owned(),
                source: e,
            })?;

        validate::validate(&config)?;
        Ok(config)
    }

    /// Load a single file with no layering.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read, parsed or
    /// validated.
    pub fn load_file(path: &Path) -> ConfigResult<Self> {
        let content = read_limited(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            source: e,
        })?;
        validate::validate(&config)?;
        Ok(config)
    }
}

fn parse_toml(content: &str, origin: &str) -> ConfigResult<toml::Value> {
    toml::from_str(content).map_err(|e| ConfigError::ParseError {
        path: origin.to_owned(),
        source: e,
    })
}

/// Read a file, `None` if it does not exist.
fn try_load_file(path: &Path) -> ConfigResult<Option<toml::Value>> {
    match read_limited(path) {
        Ok(content) => parse_toml(&content, &path.display().to_string()).map(Some),
        Err(ConfigError::ReadError { source, .. })
            if source.kind() == std::io::ErrorKind::NotFound =>
        {
            debug!(path = %path.display(), "config file not found, skipping");
            Ok(None)
        },
        Err(e) => Err(e),
    }
}

fn read_limited(path: &Path) -> ConfigResult<String> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    if content.len() > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::invalid(
            path.display().to_string(),
            format!(
                "config file is {} bytes, exceeding the {MAX_CONFIG_FILE_SIZE} byte limit",
                content.len()
            ),
        ));
    }
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hookwire_telemetry::LogFormat;

    fn no_env() -> HashMap<String, String> {
        HashMap::new()
    }

    fn write(dir: &tempfile::TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("hookwire.toml");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_defaults_deserialize() {
        let config: Config = toml::from_str(DEFAULTS_TOML).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_without_file() {
        let config = Config::load_with_env(None, &no_env()).unwrap();
        assert_eq!(config.dispatch.request_param, "sa");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_missing_file_is_skipped() {
        let config =
            Config::load_with_env(Some(Path::new("/nonexistent/hookwire.toml")), &no_env())
                .unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            r#"
            [dispatch]
            default_sub_action = "index"

            [events]
            handler_sets = ["mentions"]

            [[events.handlers]]
            position = "post_save"
            handler = "notify"
            entry_point = "on_save"
            dependencies = ["msg_options"]
            priority = 3

            [logging]
            format = "json"
            "#,
        );

        let config = Config::load_with_env(Some(&path), &no_env()).unwrap();
        assert_eq!(config.dispatch.request_param, "sa");
        assert_eq!(config.dispatch.default_sub_action, "index");
        assert_eq!(config.events.handler_sets, vec!["mentions"]);
        assert_eq!(config.events.handlers.len(), 1);
        assert_eq!(config.events.handlers[0].priority, 3);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_env_fills_but_never_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            r#"
            [logging]
            level = "warn"
            "#,
        );
        let env: HashMap<String, String> = [
            ("HOOKWIRE_LOG_LEVEL", "trace"),
            ("HOOKWIRE_REQUEST_PARAM", "area"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_owned(), v.to_owned()))
        .collect();

        let config = Config::load_with_env(Some(&path), &env).unwrap();
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.dispatch.request_param, "area");
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "[dispatch\nrequest_param = ");

        assert!(matches!(
            Config::load_with_env(Some(&path), &no_env()),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            r#"
            [logging]
            level = "chatty"
            "#,
        );

        assert!(matches!(
            Config::load_with_env(Some(&path), &no_env()),
            Err(ConfigError::ValidationError { field, .. }) if field == "logging.level"
        ));
    }

    #[test]
    fn test_load_file_nonexistent() {
        assert!(matches!(
            Config::load_file(Path::new("/nonexistent/hookwire.toml")),
            Err(ConfigError::ReadError { .. })
        ));
    }

    #[test]
    fn test_oversized_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let data = format!("x = \"{}\"", "a".repeat(1_100_000));
        let path = write(&dir, &data);

        assert!(matches!(
            Config::load_file(&path),
            Err(ConfigError::ValidationError { .. })
        ));
    }
}
