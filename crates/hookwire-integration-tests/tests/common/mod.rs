//! Shared setup for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use hookwire_events::{EventRegistry, HandlerCatalog, HandlerEnv};
use hookwire_test::{CallLog, RecordingHandler};

/// Build a registry whose catalog holds one recording handler per id, each
/// with a one-parameter `run` and a zero-parameter `ping` entry point.
pub fn recording_registry(ids: &[&str], log: &CallLog, env: HandlerEnv) -> EventRegistry {
    let mut catalog = HandlerCatalog::new();
    for id in ids {
        RecordingHandler::new(*id, log)
            .with_entry_point("run", 1)
            .with_entry_point("ping", 0)
            .install(&mut catalog);
    }
    EventRegistry::new(Arc::new(catalog), env)
}
