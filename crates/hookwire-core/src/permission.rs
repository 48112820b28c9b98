//! Permission checks consumed by the action dispatcher.

use std::sync::Arc;

use tracing::warn;

use crate::context::UserContext;
use crate::error::{HookwireError, HookwireResult};

/// Answers whether the current user holds a permission key.
pub trait PermissionChecker {
    /// Whether the permission is granted.
    fn is_allowed(&self, permission: &str) -> bool;

    /// Enforce a permission.
    ///
    /// # Errors
    ///
    /// Returns [`HookwireError::PermissionDenied`] when the permission is not
    /// granted. The error is fatal for the current request.
    fn check(&self, permission: &str) -> HookwireResult<()> {
        if self.is_allowed(permission) {
            Ok(())
        } else {
            warn!(permission, "Permission denied");
            Err(HookwireError::PermissionDenied {
                permission: permission.to_string(),
            })
        }
    }
}

/// Grants every permission.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl PermissionChecker for AllowAll {
    fn is_allowed(&self, _permission: &str) -> bool {
        true
    }
}

/// Denies every permission.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenyAll;

impl PermissionChecker for DenyAll {
    fn is_allowed(&self, _permission: &str) -> bool {
        false
    }
}

impl PermissionChecker for UserContext {
    fn is_allowed(&self, permission: &str) -> bool {
        self.is_admin || self.permissions.contains(permission)
    }
}

impl<T: PermissionChecker + ?Sized> PermissionChecker for Arc<T> {
    fn is_allowed(&self, permission: &str) -> bool {
        (**self).is_allowed(permission)
    }
}
