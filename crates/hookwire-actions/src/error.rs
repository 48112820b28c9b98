//! Dispatch error types.

use hookwire_core::{BoxError, HookwireError};
use thiserror::Error;

/// Errors that can occur while resolving or dispatching a sub-action.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The user lacks the permission the sub-action requires.
    ///
    /// Fatal: the request must be aborted and "access denied" shown.
    #[error("access denied: sub-action {key} requires permission {permission}")]
    PermissionDenied {
        /// The sub-action key.
        key: String,
        /// The missing permission.
        permission: String,
    },

    /// The permission collaborator failed for a reason other than a denial.
    ///
    /// Fatal like [`PermissionDenied`](Self::PermissionDenied): access was
    /// not established.
    #[error("permission check for sub-action {key} failed: {source}")]
    PermissionCheck {
        /// The sub-action key.
        key: String,
        /// The collaborator's error.
        #[source]
        source: HookwireError,
    },

    /// A sub-action entry cannot be dispatched as declared.
    #[error("invalid sub-action {key}: {message}")]
    Configuration {
        /// The sub-action key.
        key: String,
        /// What is wrong with it.
        message: String,
    },

    /// Neither the requested key nor the default key is in the table.
    #[error("unknown sub-action: {0}")]
    UnknownSubAction(String),

    /// The shared controller is already borrowed by a running dispatch.
    #[error("controller for sub-action {0} is busy")]
    ControllerBusy(String),

    /// The target returned an error.
    #[error("sub-action {key} failed: {source}")]
    Action {
        /// The sub-action key.
        key: String,
        /// The error raised by the target.
        #[source]
        source: BoxError,
    },

    /// A controller failed while preparing its environment.
    #[error("controller {controller} setup failed: {source}")]
    Setup {
        /// The controller class name.
        controller: String,
        /// The error raised during setup.
        #[source]
        source: BoxError,
    },
}

impl DispatchError {
    /// Whether the error must abort the whole request.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::PermissionDenied { .. } | Self::PermissionCheck { .. }
        )
    }

    pub(crate) fn configuration(key: &str, message: impl Into<String>) -> Self {
        Self::Configuration {
            key: key.to_string(),
            message: message.into(),
        }
    }
}

/// Result type for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;
