//! Recorder that captures counter registrations for assertions

use metrics::{Counter, Gauge, Histogram, Key, KeyName, Metadata, Recorder, SharedString, Unit};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct CapturingRecorder {
    counters: Arc<Mutex<Vec<String>>>,
}

impl Recorder for CapturingRecorder {
    fn describe_counter(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
    fn describe_gauge(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
    fn describe_histogram(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}

    fn register_counter(&self, key: &Key, _: &Metadata<'_>) -> Counter {
        let labels: Vec<String> = key
            .labels()
            .map(|label| format!("{}={}", label.key(), label.value()))
            .collect();
        self.counters
            .lock()
            .unwrap()
            .push(format!("{}{{{}}}", key.name(), labels.join(",")));
        Counter::noop()
    }

    fn register_gauge(&self, _: &Key, _: &Metadata<'_>) -> Gauge {
        Gauge::noop()
    }

    fn register_histogram(&self, _: &Key, _: &Metadata<'_>) -> Histogram {
        Histogram::noop()
    }
}

/// Run `f` and return its result with every counter it touched, rendered as
/// `name{label=value,...}`
pub(crate) fn capture_counters<T>(f: impl FnOnce() -> T) -> (T, Vec<String>) {
    let recorder = CapturingRecorder::default();
    let counters = Arc::clone(&recorder.counters);
    let out = metrics::with_local_recorder(&recorder, f);
    let captured = counters.lock().unwrap().clone();
    (out, captured)
}
