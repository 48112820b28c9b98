//! Deep merge of TOML trees.

use std::collections::HashSet;

/// Dotted paths of the leaves some config file set.
pub(crate) type SetFields = HashSet<String>;

/// Merge `overlay` into `base`. Tables merge key by key; any other overlay
/// value replaces the base value, arrays included. Every leaf the overlay
/// touches is recorded in `set`.
pub(crate) fn deep_merge(
    base: &mut toml::Value,
    overlay: &toml::Value,
    prefix: &str,
    set: &mut SetFields,
) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let path = join(prefix, key);
                match base_table.get_mut(key) {
                    Some(base_val) if overlay_val.is_table() => {
                        deep_merge(base_val, overlay_val, &path, set);
                    },
                    Some(base_val) => {
                        *base_val = overlay_val.clone();
                        set.insert(path);
                    },
                    None => {
                        base_table.insert(key.clone(), overlay_val.clone());
                        record_leaves(overlay_val, &path, set);
                    },
                }
            }
        },
        (base, overlay) => {
            *base = overlay.clone();
            set.insert(prefix.to_owned());
        },
    }
}

fn record_leaves(value: &toml::Value, prefix: &str, set: &mut SetFields) {
    if let toml::Value::Table(table) = value {
        for (key, child) in table {
            record_leaves(child, &join(prefix, key), set);
        }
    } else {
        set.insert(prefix.to_owned());
    }
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_owned()
    } else {
        format!("{prefix}.{key}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> toml::Value {
        toml::from_str(s).unwrap()
    }

    #[test]
    fn test_merge_nested_tables() {
        let mut base = parse(
            r#"
            [dispatch]
            request_param = "sa"
            default_sub_action = ""
            "#,
        );
        let overlay = parse(
            r#"
            [dispatch]
            default_sub_action = "index"
            "#,
        );
        let mut set = SetFields::new();
        deep_merge(&mut base, &overlay, "", &mut set);

        assert_eq!(base["dispatch"]["request_param"].as_str(), Some("sa"));
        assert_eq!(base["dispatch"]["default_sub_action"].as_str(), Some("index"));
        assert!(set.contains("dispatch.default_sub_action"));
        assert!(!set.contains("dispatch.request_param"));
    }

    #[test]
    fn test_arrays_replace() {
        let mut base = parse(r#"handler_sets = ["a", "b"]"#);
        let overlay = parse(r#"handler_sets = ["c"]"#);
        let mut set = SetFields::new();
        deep_merge(&mut base, &overlay, "", &mut set);

        assert_eq!(base["handler_sets"].as_array().map(Vec::len), Some(1));
        assert!(set.contains("handler_sets"));
    }

    #[test]
    fn test_new_table_records_leaves() {
        let mut base = parse("");
        let overlay = parse(
            r#"
            [logging]
            level = "debug"
            "#,
        );
        let mut set = SetFields::new();
        deep_merge(&mut base, &overlay, "", &mut set);

        assert!(set.contains("logging.level"));
    }
}
