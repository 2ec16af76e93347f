//! In-process cluster
//!
//! [`MemoryCluster`] keeps pools in memory and answers every [`ClusterBinding`]
//! call with the same status codes and buffer layout `librados` uses, including
//! the partial fill of an undersized `pool_list` buffer. Clones share state, so
//! several sessions can talk to one cluster.
//!
//! Configuration files are read from disk: a path that cannot be read fails
//! with the corresponding negated errno, the contents are not interpreted.

use super::status::{from_io_error, EBADF, EEXIST, EISCONN, ENOENT, ENOTCONN};
use super::{ClusterBinding, RawHandle};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Native call that can be made to fail with [`MemoryCluster::fail_next`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultPoint {
    /// `create_handle`
    CreateHandle,
    /// `conf_read_file`
    ConfRead,
    /// `connect`
    Connect,
    /// `pool_lookup`
    PoolLookup,
    /// `pool_create`
    PoolCreate,
    /// `pool_delete`
    PoolDelete,
    /// `pool_list`
    PoolList,
    /// `ioctx_create`
    IoCtxCreate,
}

#[derive(Debug)]
struct Pool {
    id: i64,
    name: String,
}

#[derive(Debug, Default)]
struct ClusterEntry {
    configured: bool,
    connected: bool,
}

#[derive(Debug)]
struct IoCtxEntry {
    flushes: usize,
}

#[derive(Debug)]
struct Inner {
    version: (i32, i32, i32),
    pools: Vec<Pool>,
    next_pool_id: i64,
    next_handle: usize,
    clusters: HashMap<RawHandle, ClusterEntry>,
    ioctxs: HashMap<RawHandle, IoCtxEntry>,
    destroyed: HashMap<RawHandle, bool>,
    faults: HashMap<FaultPoint, i32>,
    null_handle_next: bool,
    runaway_list: bool,
    list_calls: usize,
}

impl Default for Inner {
    fn default() -> Self {
        Self {
            version: (0, 69, 1),
            pools: Vec::new(),
            next_pool_id: 1,
            next_handle: 0x1000,
            clusters: HashMap::new(),
            ioctxs: HashMap::new(),
            destroyed: HashMap::new(),
            faults: HashMap::new(),
            null_handle_next: false,
            runaway_list: false,
            list_calls: 0,
        }
    }
}

impl Inner {
    fn mint_handle(&mut self) -> RawHandle {
        let handle = RawHandle::from_raw(self.next_handle);
        self.next_handle += 0x10;
        handle
    }

    fn take_fault(&mut self, point: FaultPoint) -> Option<i32> {
        self.faults.remove(&point)
    }

    fn require_connected(&self, cluster: RawHandle) -> Result<(), i32> {
        match self.clusters.get(&cluster) {
            Some(entry) if entry.connected => Ok(()),
            _ => Err(-ENOTCONN),
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.pools.iter().position(|pool| pool.name == name)
    }
}

/// In-memory [`ClusterBinding`]
#[derive(Debug, Clone, Default)]
pub struct MemoryCluster {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryCluster {
    /// Create an empty cluster
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cluster that already holds the given pools, in order
    pub fn with_pools<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let cluster = Self::new();
        {
            let mut inner = cluster.lock();
            for name in names {
                let id = inner.next_pool_id;
                inner.next_pool_id += 1;
                inner.pools.push(Pool {
                    id,
                    name: name.into(),
                });
            }
        }
        cluster
    }

    /// Set the version reported by [`ClusterBinding::version`]
    pub fn set_version(&self, major: i32, minor: i32, extra: i32) {
        self.lock().version = (major, minor, extra);
    }

    /// Make the next call at `point` fail with `status`
    pub fn fail_next(&self, point: FaultPoint, status: i32) {
        self.lock().faults.insert(point, status);
    }

    /// Make the next `create_handle` succeed with a null handle
    pub fn hand_out_null_handle(&self) {
        self.lock().null_handle_next = true;
    }

    /// Report a required size one byte larger than every buffer offered
    pub fn set_runaway_list(&self, enabled: bool) {
        self.lock().runaway_list = enabled;
    }

    /// Pool names in creation order
    pub fn pool_names(&self) -> Vec<String> {
        self.lock().pools.iter().map(|p| p.name.clone()).collect()
    }

    /// Number of cluster handles created and not yet shut down
    pub fn live_handles(&self) -> usize {
        self.lock().clusters.len()
    }

    /// Number of I/O contexts created and not yet destroyed
    pub fn live_contexts(&self) -> usize {
        self.lock().ioctxs.len()
    }

    /// Number of `pool_list` calls served so far
    pub fn list_calls(&self) -> usize {
        self.lock().list_calls
    }

    /// For a destroyed context, whether it was flushed before being destroyed
    pub fn flushed_before_destroy(&self, ioctx: RawHandle) -> Option<bool> {
        self.lock().destroyed.get(&ioctx).copied()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ClusterBinding for MemoryCluster {
    fn create_handle(&self, _client_id: Option<&str>) -> Result<RawHandle, i32> {
        let mut inner = self.lock();
        if let Some(status) = inner.take_fault(FaultPoint::CreateHandle) {
            return Err(status);
        }
        if std::mem::take(&mut inner.null_handle_next) {
            return Ok(RawHandle::NULL);
        }
        let handle = inner.mint_handle();
        inner.clusters.insert(handle, ClusterEntry::default());
        Ok(handle)
    }

    fn conf_read_file(&self, cluster: RawHandle, path: &str) -> i32 {
        let mut inner = self.lock();
        if !inner.clusters.contains_key(&cluster) {
            return -EBADF;
        }
        if let Some(status) = inner.take_fault(FaultPoint::ConfRead) {
            return status;
        }
        if let Err(e) = std::fs::read_to_string(path) {
            return from_io_error(&e);
        }
        if let Some(entry) = inner.clusters.get_mut(&cluster) {
            entry.configured = true;
        }
        0
    }

    fn connect(&self, cluster: RawHandle) -> i32 {
        let mut inner = self.lock();
        let Some(entry) = inner.clusters.get(&cluster) else {
            return -EBADF;
        };
        if entry.connected {
            return -EISCONN;
        }
        if !entry.configured {
            return -ENOENT;
        }
        if let Some(status) = inner.take_fault(FaultPoint::Connect) {
            return status;
        }
        if let Some(entry) = inner.clusters.get_mut(&cluster) {
            entry.connected = true;
        }
        0
    }

    fn shutdown(&self, cluster: RawHandle) {
        self.lock().clusters.remove(&cluster);
    }

    fn version(&self) -> (i32, i32, i32) {
        self.lock().version
    }

    fn pool_lookup(&self, cluster: RawHandle, name: &str) -> i64 {
        let mut inner = self.lock();
        if let Err(status) = inner.require_connected(cluster) {
            return i64::from(status);
        }
        if let Some(status) = inner.take_fault(FaultPoint::PoolLookup) {
            return i64::from(status);
        }
        match inner.position(name) {
            Some(idx) => inner.pools[idx].id,
            None => -i64::from(ENOENT),
        }
    }

    fn pool_create(&self, cluster: RawHandle, name: &str) -> i32 {
        let mut inner = self.lock();
        if let Err(status) = inner.require_connected(cluster) {
            return status;
        }
        if let Some(status) = inner.take_fault(FaultPoint::PoolCreate) {
            return status;
        }
        if inner.position(name).is_some() {
            return -EEXIST;
        }
        let id = inner.next_pool_id;
        inner.next_pool_id += 1;
        inner.pools.push(Pool {
            id,
            name: name.to_string(),
        });
        0
    }

    fn pool_delete(&self, cluster: RawHandle, name: &str) -> i32 {
        let mut inner = self.lock();
        if let Err(status) = inner.require_connected(cluster) {
            return status;
        }
        if let Some(status) = inner.take_fault(FaultPoint::PoolDelete) {
            return status;
        }
        match inner.position(name) {
            Some(idx) => {
                inner.pools.remove(idx);
                0
            }
            None => -ENOENT,
        }
    }

    fn pool_list(&self, cluster: RawHandle, buf: &mut [u8]) -> i32 {
        let mut inner = self.lock();
        inner.list_calls += 1;
        if let Err(status) = inner.require_connected(cluster) {
            return status;
        }
        if let Some(status) = inner.take_fault(FaultPoint::PoolList) {
            return status;
        }
        if inner.runaway_list {
            return i32::try_from(buf.len() + 1).unwrap_or(i32::MAX);
        }

        // Same layout as librados: names that fit are copied in order, the
        // rest only count toward the required size.
        buf.fill(0);
        let mut offset = 0;
        let mut needed = 0;
        let mut fits = true;
        for pool in &inner.pools {
            let len = pool.name.len() + 1;
            if fits && buf.len() - offset >= len {
                buf[offset..offset + pool.name.len()].copy_from_slice(pool.name.as_bytes());
                offset += len;
            } else {
                fits = false;
            }
            needed += len;
        }
        i32::try_from(needed + 1).unwrap_or(i32::MAX)
    }

    fn ioctx_create(&self, cluster: RawHandle, pool: &str) -> Result<RawHandle, i32> {
        let mut inner = self.lock();
        inner.require_connected(cluster)?;
        if let Some(status) = inner.take_fault(FaultPoint::IoCtxCreate) {
            return Err(status);
        }
        if inner.position(pool).is_none() {
            return Err(-ENOENT);
        }
        let handle = inner.mint_handle();
        inner.ioctxs.insert(handle, IoCtxEntry { flushes: 0 });
        Ok(handle)
    }

    fn ioctx_flush(&self, ioctx: RawHandle) {
        if let Some(entry) = self.lock().ioctxs.get_mut(&ioctx) {
            entry.flushes += 1;
        }
    }

    fn ioctx_destroy(&self, ioctx: RawHandle) {
        let mut inner = self.lock();
        if let Some(entry) = inner.ioctxs.remove(&ioctx) {
            inner.destroyed.insert(ioctx, entry.flushes > 0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connected(cluster: &MemoryCluster) -> RawHandle {
        let handle = cluster.create_handle(None).unwrap();
        let path = env!("CARGO_MANIFEST_DIR").to_string() + "/Cargo.toml";
        assert_eq!(cluster.conf_read_file(handle, &path), 0);
        assert_eq!(cluster.connect(handle), 0);
        handle
    }

    #[test]
    fn test_pool_list_without_pools() {
        let cluster = MemoryCluster::new();
        let handle = connected(&cluster);
        let mut buf = [0xffu8; 1];
        assert_eq!(cluster.pool_list(handle, &mut buf), 1);
        assert_eq!(buf, [0]);
    }

    #[test]
    fn test_pool_list_reports_required_size() {
        let cluster = MemoryCluster::with_pools(["a", "bc"]);
        let handle = connected(&cluster);

        let mut small = [0u8; 1];
        assert_eq!(cluster.pool_list(handle, &mut small), 6);

        let mut exact = [0xffu8; 6];
        assert_eq!(cluster.pool_list(handle, &mut exact), 6);
        assert_eq!(&exact, b"a\0bc\0\0");
    }

    #[test]
    fn test_pool_list_partial_fill() {
        let cluster = MemoryCluster::with_pools(["a", "bcd"]);
        let handle = connected(&cluster);
        let mut buf = [0xffu8; 4];
        assert_eq!(cluster.pool_list(handle, &mut buf), 7);
        assert_eq!(&buf, b"a\0\0\0");
    }

    #[test]
    fn test_pool_list_empty_name() {
        let cluster = MemoryCluster::with_pools([""]);
        let handle = connected(&cluster);
        let mut buf = [0xffu8; 2];
        assert_eq!(cluster.pool_list(handle, &mut buf), 2);
        assert_eq!(&buf, b"\0\0");
    }

    #[test]
    fn test_operations_require_connect() {
        let cluster = MemoryCluster::with_pools(["rbd"]);
        let handle = cluster.create_handle(None).unwrap();
        assert_eq!(cluster.pool_lookup(handle, "rbd"), -i64::from(ENOTCONN));
        assert_eq!(cluster.pool_create(handle, "x"), -ENOTCONN);
        assert_eq!(cluster.pool_list(handle, &mut [0u8; 1]), -ENOTCONN);
        assert_eq!(cluster.ioctx_create(handle, "rbd"), Err(-ENOTCONN));
        assert_eq!(cluster.pool_names(), vec!["rbd".to_string()]);
    }

    #[test]
    fn test_connect_requires_configuration() {
        let cluster = MemoryCluster::new();
        let handle = cluster.create_handle(None).unwrap();
        assert_eq!(cluster.connect(handle), -ENOENT);
    }

    #[test]
    fn test_conf_read_missing_file() {
        let cluster = MemoryCluster::new();
        let handle = cluster.create_handle(None).unwrap();
        assert_eq!(
            cluster.conf_read_file(handle, "./unexistant_conf_file"),
            -ENOENT
        );
    }

    #[test]
    fn test_faults_are_one_shot() {
        let cluster = MemoryCluster::new();
        let handle = connected(&cluster);
        cluster.fail_next(FaultPoint::PoolCreate, -5);
        assert_eq!(cluster.pool_create(handle, "p"), -5);
        assert_eq!(cluster.pool_create(handle, "p"), 0);
        assert_eq!(cluster.pool_create(handle, "p"), -EEXIST);
    }

    #[test]
    fn test_clones_share_state() {
        let cluster = MemoryCluster::new();
        let other = cluster.clone();
        let handle = connected(&cluster);
        assert_eq!(cluster.pool_create(handle, "shared"), 0);
        assert_eq!(other.pool_names(), vec!["shared".to_string()]);
        cluster.shutdown(handle);
        assert_eq!(other.live_handles(), 0);
    }

    #[test]
    fn test_ioctx_flush_tracking() {
        let cluster = MemoryCluster::with_pools(["rbd"]);
        let handle = connected(&cluster);
        let ioctx = cluster.ioctx_create(handle, "rbd").unwrap();
        assert_eq!(cluster.live_contexts(), 1);
        cluster.ioctx_destroy(ioctx);
        assert_eq!(cluster.flushed_before_destroy(ioctx), Some(false));
        assert_eq!(cluster.live_contexts(), 0);
    }
}
