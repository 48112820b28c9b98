//! Prelude module - commonly used test utilities.

pub use crate::fixtures::{
    init_test_logging, test_args, test_env, test_provider, test_request, test_user,
};
pub use crate::mocks::{
    CallLog, CountingController, RecordedCall, RecordingHandler, ScriptedPermissions,
};
