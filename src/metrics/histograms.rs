//! Histogram metrics

use super::labels;

pub fn list_payload_bytes(bytes: usize) {
    metrics::histogram!(labels::LIST_PAYLOAD_BYTES).record(bytes as f64);
}

pub fn list_probes_per_call(probes: usize) {
    metrics::histogram!(labels::LIST_PROBES_PER_CALL).record(probes as f64);
}

pub fn list_pool_count(count: usize) {
    metrics::histogram!(labels::LIST_POOL_COUNT).record(count as f64);
}
