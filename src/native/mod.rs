//! Native cluster binding
//!
//! This module handles:
//! * The contract a cluster client runtime must satisfy ([`ClusterBinding`])
//! * Opaque native handles ([`RawHandle`])
//! * Status code conventions ([`status`])
//! * The system `librados` binding (feature `librados`)
//! * An in-process cluster ([`MemoryCluster`])

#[cfg(feature = "librados")]
mod librados;
mod memory;
pub mod status;

#[cfg(feature = "librados")]
pub use librados::Librados;
pub use memory::{FaultPoint, MemoryCluster};

/// Opaque handle value minted by the native layer
///
/// Wraps a pointer-sized value without exposing any structure. A zero value is
/// the null handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawHandle(usize);

impl RawHandle {
    /// The null handle
    pub const NULL: RawHandle = RawHandle(0);

    /// Wrap a raw handle value
    pub const fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    /// Raw handle value
    pub const fn into_raw(self) -> usize {
        self.0
    }

    /// Whether this is the null handle
    pub const fn is_null(&self) -> bool {
        self.0 == 0
    }
}

impl std::fmt::Display for RawHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Client runtime that performs the actual cluster communication
///
/// Methods mirror the `librados` C entry points and keep their conventions:
/// status-returning calls yield `0` (or a non-negative value) on success and a
/// negated `errno` on failure. Implementations must not panic on a status
/// they cannot honor; they report it instead.
pub trait ClusterBinding {
    /// Create a cluster handle, optionally for a specific client id
    fn create_handle(&self, client_id: Option<&str>) -> Result<RawHandle, i32>;

    /// Load a configuration file into the handle
    fn conf_read_file(&self, cluster: RawHandle, path: &str) -> i32;

    /// Connect the handle to the cluster
    fn connect(&self, cluster: RawHandle) -> i32;

    /// Disconnect and release the handle
    fn shutdown(&self, cluster: RawHandle);

    /// Client library version as `(major, minor, extra)`
    fn version(&self) -> (i32, i32, i32);

    /// Look up a pool id; negative status when it cannot be resolved
    fn pool_lookup(&self, cluster: RawHandle, name: &str) -> i64;

    /// Create a pool
    fn pool_create(&self, cluster: RawHandle, name: &str) -> i32;

    /// Delete a pool
    fn pool_delete(&self, cluster: RawHandle, name: &str) -> i32;

    /// Fill `buf` with NUL-separated, double-NUL-terminated pool names
    ///
    /// Returns the number of bytes the full listing needs. When that exceeds
    /// `buf.len()` the buffer contents are not a complete listing.
    fn pool_list(&self, cluster: RawHandle, buf: &mut [u8]) -> i32;

    /// Create an I/O context bound to a pool
    fn ioctx_create(&self, cluster: RawHandle, pool: &str) -> Result<RawHandle, i32>;

    /// Block until pending asynchronous operations on the context complete
    fn ioctx_flush(&self, ioctx: RawHandle);

    /// Release an I/O context
    fn ioctx_destroy(&self, ioctx: RawHandle);
}
