//! Request and user context handed to handlers and controllers.
//!
//! Both structs are built once per request by the host and shared read-only
//! (behind an `Arc`) with everything the kernel instantiates.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::types::Value;

/// Key-value view of the current request.
///
/// `params` holds raw request input (query string or form fields), `settings`
/// holds application settings the host chose to expose.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestContext {
    /// Raw request parameters.
    #[serde(default)]
    pub params: HashMap<String, String>,
    /// Application settings.
    #[serde(default)]
    pub settings: HashMap<String, Value>,
}

impl RequestContext {
    /// Create an empty request context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a request parameter.
    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Add an application setting.
    #[must_use]
    pub fn with_setting(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.settings.insert(name.into(), value.into());
        self
    }

    /// Get a request parameter with surrounding whitespace removed.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(|v| v.trim())
    }

    /// Get an application setting.
    #[must_use]
    pub fn setting(&self, name: &str) -> Option<&Value> {
        self.settings.get(name)
    }
}

/// The user on whose behalf the request runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserContext {
    /// Numeric member id (0 for guests).
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Whether the user is a guest.
    pub is_guest: bool,
    /// Administrators pass every permission check.
    #[serde(default)]
    pub is_admin: bool,
    /// Granted permission keys.
    #[serde(default)]
    pub permissions: HashSet<String>,
}

impl UserContext {
    /// Create a guest user.
    #[must_use]
    pub fn guest() -> Self {
        Self {
            id: 0,
            name: "Guest".to_string(),
            is_guest: true,
            is_admin: false,
            permissions: HashSet::new(),
        }
    }

    /// Create a registered member.
    #[must_use]
    pub fn member(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            is_guest: false,
            is_admin: false,
            permissions: HashSet::new(),
        }
    }

    /// Mark the user as an administrator.
    #[must_use]
    pub fn admin(mut self) -> Self {
        self.is_admin = true;
        self
    }

    /// Grant a permission key.
    #[must_use]
    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.permissions.insert(permission.into());
        self
    }
}

impl Default for UserContext {
    fn default() -> Self {
        Self::guest()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_is_trimmed() {
        let request = RequestContext::new().with_param("sa", "  browse \n");
        assert_eq!(request.param("sa"), Some("browse"));
        assert_eq!(request.param("missing"), None);
    }

    #[test]
    fn test_settings() {
        let request = RequestContext::new()
            .with_setting("enable_calendar", true)
            .with_setting("posts_per_page", 20);

        assert_eq!(request.setting("enable_calendar"), Some(&Value::Bool(true)));
        assert_eq!(request.setting("posts_per_page"), Some(&Value::from(20)));
    }

    #[test]
    fn test_user_builders() {
        let guest = UserContext::default();
        assert!(guest.is_guest);
        assert_eq!(guest.id, 0);

        let member = UserContext::member(7, "alice").with_permission("post_new");
        assert!(!member.is_guest);
        assert!(!member.is_admin);
        assert!(member.permissions.contains("post_new"));
    }

    #[test]
    fn test_serialization() {
        let request = RequestContext::new().with_param("action", "profile");
        let json = serde_json::to_string(&request).unwrap();
        let parsed: RequestContext = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, request);
    }
}
