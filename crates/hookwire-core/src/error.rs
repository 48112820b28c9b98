//! Error types shared across Hookwire crates.

use thiserror::Error;

/// Errors raised by the collaborators the kernel consumes.
#[derive(Debug, Error)]
pub enum HookwireError {
    /// The permission collaborator refused access.
    ///
    /// This is the only user-visible failure of the kernel. Callers must abort
    /// the current request when they see it.
    #[error("access denied: missing permission {permission}")]
    PermissionDenied {
        /// The permission key that was checked.
        permission: String,
    },

    /// Invalid input format
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type for collaborator operations.
pub type HookwireResult<T> = Result<T, HookwireError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HookwireError::PermissionDenied {
            permission: "admin_forum".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "access denied: missing permission admin_forum"
        );

        let err = HookwireError::InvalidInput("empty key".to_string());
        assert_eq!(err.to_string(), "invalid input: empty key");
    }
}
