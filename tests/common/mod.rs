//! Shared helpers for integration tests

#![allow(dead_code)]

use rados_pools::{MemoryCluster, Session};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

static CONF_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Install a test subscriber once; honors `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Write a throwaway cluster configuration file
pub fn write_conf() -> PathBuf {
    let n = CONF_COUNTER.fetch_add(1, Ordering::Relaxed);
    let path = std::env::temp_dir().join(format!(
        "rados-pools-test-{}-{}.conf",
        std::process::id(),
        n
    ));
    std::fs::write(&path, "[global]\nmon_host = 127.0.0.1\n").expect("write test conf");
    path
}

/// Configured and connected session against `cluster`
pub fn connected(cluster: &MemoryCluster) -> Session<MemoryCluster> {
    init_tracing();
    let mut session = Session::configure_file(cluster.clone(), write_conf()).expect("configure");
    session.connect().expect("connect");
    session
}

/// Compare two name lists as multisets
pub fn assert_same_pools(got: &[String], expected: &[&str]) {
    let mut got: Vec<&str> = got.iter().map(String::as_str).collect();
    let mut expected = expected.to_vec();
    got.sort_unstable();
    expected.sort_unstable();
    assert_eq!(got, expected);
}
