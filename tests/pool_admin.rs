//! Pool administration and enumeration against the in-memory cluster

mod common;

use common::{assert_same_pools, connected};
use rados_pools::{IoContextFactory, MemoryCluster, SharedSession};

#[test]
fn test_create_delete_pool() {
    let cluster = MemoryCluster::new();
    let session = connected(&cluster);
    let pool = "test_createpool";

    session.create_pool(pool).unwrap();
    assert!(cluster.pool_names().contains(&pool.to_string()));
    assert!(session.pool_exists(pool).unwrap());

    session.delete_pool(pool).unwrap();
    assert!(!cluster.pool_names().contains(&pool.to_string()));
    assert!(!session.pool_exists(pool).unwrap());
}

#[test]
fn test_list_pools() {
    let cluster = MemoryCluster::new();
    let session = connected(&cluster);

    for pool in ["one", "two", "three"] {
        session.create_pool(pool).unwrap();
    }
    assert_same_pools(&session.list_pools().unwrap(), &["one", "two", "three"]);

    for pool in ["one", "two", "three"] {
        session.delete_pool(pool).unwrap();
    }
    assert!(session.list_pools().unwrap().is_empty());
}

#[test]
fn test_list_no_pool() {
    let cluster = MemoryCluster::new();
    let session = connected(&cluster);

    assert!(session.list_pools().unwrap().is_empty());
    assert_eq!(cluster.list_calls(), 1);
}

#[test]
fn test_list_empty_pool_name() {
    let cluster = MemoryCluster::new();
    let session = connected(&cluster);

    session.create_pool("").unwrap();
    assert_eq!(session.list_pools().unwrap(), vec![String::new()]);
}

#[test]
fn test_list_empty_pool_name_with_non_empty() {
    let cluster = MemoryCluster::new();
    let session = connected(&cluster);

    session.create_pool("t").unwrap();
    session.create_pool("").unwrap();
    assert_same_pools(&session.list_pools().unwrap(), &["t", ""]);

    session.delete_pool("").unwrap();
    assert_same_pools(&session.list_pools().unwrap(), &["t"]);
}

#[test]
fn test_list_large_listing() {
    let names: Vec<String> = (0..500)
        .map(|i| format!("pool-{:04}-{}", i, "x".repeat(i % 37)))
        .collect();
    let cluster = MemoryCluster::with_pools(names.clone());
    let session = connected(&cluster);

    assert_eq!(session.list_pools().unwrap(), names);
    // one probe, one exact-size fetch
    assert_eq!(cluster.list_calls(), 2);
}

#[test]
fn test_list_preserves_native_order() {
    let cluster = MemoryCluster::with_pools(["zeta", "", "alpha"]);
    let session = connected(&cluster);
    assert_eq!(session.list_pools().unwrap(), vec!["zeta", "", "alpha"]);
}

#[test]
fn test_multiple_contexts() {
    let cluster = MemoryCluster::with_pools(["rbd", "images"]);
    let session = connected(&cluster);

    let rbd = session.create_context("rbd").unwrap();
    let images = session.create_context("images").unwrap();
    assert_ne!(rbd.as_raw(), images.as_raw());
    assert_eq!(cluster.live_contexts(), 2);

    session.destroy_context(images);
    session.destroy_context(rbd);
    assert_eq!(cluster.live_contexts(), 0);
}

#[test]
fn test_shared_session_contexts() {
    let cluster = MemoryCluster::with_pools(["rbd"]);
    let shared = SharedSession::new(connected(&cluster));

    {
        let guard = shared.scoped_context("rbd").unwrap();
        assert_eq!(guard.pool(), "rbd");
        assert_eq!(cluster.live_contexts(), 1);
    }
    assert_eq!(cluster.live_contexts(), 0);
}
