//! `librados` binding
//!
//! Calls go through the `rados_*` declarations of the `ceph` crate; this module
//! only converts strings and handles at the C boundary.

use super::status::EINVAL;
use super::{ClusterBinding, RawHandle};
use ceph::rados::{self, rados_ioctx_t, rados_t};
use std::ffi::{c_char, CString};
use std::ptr;

fn cluster_ptr(handle: RawHandle) -> rados_t {
    handle.into_raw() as rados_t
}

/// Binding to the system `librados`
///
/// Strings containing interior NUL bytes cannot cross the C boundary and are
/// reported as `-EINVAL` without calling into the library.
#[derive(Debug, Clone, Copy, Default)]
pub struct Librados;

impl ClusterBinding for Librados {
    fn create_handle(&self, client_id: Option<&str>) -> Result<RawHandle, i32> {
        let id = client_id
            .map(CString::new)
            .transpose()
            .map_err(|_| -EINVAL)?;
        let mut cluster: rados_t = ptr::null_mut();
        let ret = unsafe {
            rados::rados_create(
                &mut cluster,
                id.as_ref().map_or(ptr::null(), |id| id.as_ptr()),
            )
        };
        if ret < 0 {
            return Err(ret);
        }
        Ok(RawHandle::from_raw(cluster as usize))
    }

    fn conf_read_file(&self, cluster: RawHandle, path: &str) -> i32 {
        let Ok(path) = CString::new(path) else {
            return -EINVAL;
        };
        unsafe { rados::rados_conf_read_file(cluster_ptr(cluster), path.as_ptr()) }
    }

    fn connect(&self, cluster: RawHandle) -> i32 {
        unsafe { rados::rados_connect(cluster_ptr(cluster)) }
    }

    fn shutdown(&self, cluster: RawHandle) {
        unsafe { rados::rados_shutdown(cluster_ptr(cluster)) }
    }

    fn version(&self) -> (i32, i32, i32) {
        let (mut major, mut minor, mut extra) = (0, 0, 0);
        unsafe { rados::rados_version(&mut major, &mut minor, &mut extra) };
        (major, minor, extra)
    }

    fn pool_lookup(&self, cluster: RawHandle, name: &str) -> i64 {
        let Ok(name) = CString::new(name) else {
            return -i64::from(EINVAL);
        };
        unsafe { rados::rados_pool_lookup(cluster_ptr(cluster), name.as_ptr()) }
    }

    fn pool_create(&self, cluster: RawHandle, name: &str) -> i32 {
        let Ok(name) = CString::new(name) else {
            return -EINVAL;
        };
        unsafe { rados::rados_pool_create(cluster_ptr(cluster), name.as_ptr()) }
    }

    fn pool_delete(&self, cluster: RawHandle, name: &str) -> i32 {
        let Ok(name) = CString::new(name) else {
            return -EINVAL;
        };
        unsafe { rados::rados_pool_delete(cluster_ptr(cluster), name.as_ptr()) }
    }

    fn pool_list(&self, cluster: RawHandle, buf: &mut [u8]) -> i32 {
        unsafe {
            rados::rados_pool_list(
                cluster_ptr(cluster),
                buf.as_mut_ptr() as *mut c_char,
                buf.len(),
            )
        }
    }

    fn ioctx_create(&self, cluster: RawHandle, pool: &str) -> Result<RawHandle, i32> {
        let pool = CString::new(pool).map_err(|_| -EINVAL)?;
        let mut ioctx: rados_ioctx_t = ptr::null_mut();
        let ret = unsafe {
            rados::rados_ioctx_create(cluster_ptr(cluster), pool.as_ptr(), &mut ioctx)
        };
        if ret < 0 {
            return Err(ret);
        }
        Ok(RawHandle::from_raw(ioctx as usize))
    }

    fn ioctx_flush(&self, ioctx: RawHandle) {
        let ret = unsafe { rados::rados_aio_flush(ioctx.into_raw() as rados_ioctx_t) };
        if ret < 0 {
            tracing::warn!(status = ret, "rados_aio_flush failed");
        }
    }

    fn ioctx_destroy(&self, ioctx: RawHandle) {
        unsafe { rados::rados_ioctx_destroy(ioctx.into_raw() as rados_ioctx_t) }
    }
}
