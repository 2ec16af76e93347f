//! Counter metrics

use super::labels;

pub fn session_connected() {
    metrics::counter!(labels::SESSIONS_CONNECTED).increment(1);
}

pub fn session_shutdown() {
    metrics::counter!(labels::SESSIONS_SHUTDOWN).increment(1);
}

pub fn pool_operation(op: &'static str, outcome: &'static str) {
    metrics::counter!(labels::POOL_OPERATIONS, "op" => op, "outcome" => outcome).increment(1);
}

/// Native call returned a failure status
pub fn native_failure(op: &'static str, status: i32) {
    metrics::counter!(
        labels::NATIVE_FAILURES,
        "op" => op,
        "status" => status.to_string()
    )
    .increment(1);
}

pub fn list_probe() {
    metrics::counter!(labels::LIST_PROBES).increment(1);
}

pub fn context_created() {
    metrics::counter!(labels::CONTEXTS_CREATED).increment(1);
}

pub fn context_destroyed() {
    metrics::counter!(labels::CONTEXTS_DESTROYED).increment(1);
}
