//! Environment variable fallbacks.
//!
//! Variables only fill fields that no config file set; they never override a
//! file.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::merge::SetFields;

struct EnvMapping {
    var_name: &'static str,
    field_path: &'static str,
}

const ENV_MAPPINGS: &[EnvMapping] = &[
    EnvMapping {
        var_name: "HOOKWIRE_REQUEST_PARAM",
        field_path: "dispatch.request_param",
    },
    EnvMapping {
        var_name: "HOOKWIRE_DEFAULT_SUB_ACTION",
        field_path: "dispatch.default_sub_action",
    },
    EnvMapping {
        var_name: "HOOKWIRE_LOG_LEVEL",
        field_path: "logging.level",
    },
    EnvMapping {
        var_name: "HOOKWIRE_LOG_FORMAT",
        field_path: "logging.format",
    },
    EnvMapping {
        var_name: "HOOKWIRE_LOG_DIR",
        field_path: "logging.directory",
    },
];

/// Fill unset fields from `env_vars`. Returns how many were applied.
///
/// # Errors
///
/// Returns [`ConfigError::EnvError`] for a mapped variable that is set but
/// blank.
pub(crate) fn apply_env_fallbacks<S: std::hash::BuildHasher>(
    merged: &mut toml::Value,
    set: &SetFields,
    env_vars: &HashMap<String, String, S>,
) -> ConfigResult<usize> {
    let mut count: usize = 0;

    for mapping in ENV_MAPPINGS {
        if set.contains(mapping.field_path) {
            continue;
        }
        let Some(value) = env_vars.get(mapping.var_name) else {
            continue;
        };
        if value.trim().is_empty() {
            return Err(ConfigError::EnvError {
                var_name: mapping.var_name.to_owned(),
                message: "value is empty".to_owned(),
            });
        }

        debug!(
            var = mapping.var_name,
            field = mapping.field_path,
            "applying env var fallback"
        );
        set_field(merged, mapping.field_path, value.trim());
        count = count.saturating_add(1);
    }

    Ok(count)
}

/// Set a string leaf at a dotted path, creating intermediate tables.
fn set_field(root: &mut toml::Value, path: &str, value: &str) {
    let (parents, leaf) = path.rsplit_once('.').unwrap_or(("", path));

    let mut current = root;
    for segment in parents.split('.').filter(|s| !s.is_empty()) {
        let Some(table) = current.as_table_mut() else {
            return;
        };
        current = table
            .entry(segment)
            .or_insert(toml::Value::Table(toml::map::Map::new()));
    }

    if let Some(table) = current.as_table_mut() {
        table.insert(leaf.to_owned(), toml::Value::String(value.to_owned()));
    }
}

/// Snapshot the process environment.
#[must_use]
pub(crate) fn collect_env_vars() -> HashMap<String, String> {
    std::env::vars().collect()
}
