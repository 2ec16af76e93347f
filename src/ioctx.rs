//! Per-pool I/O contexts
//!
//! An [`IoContext`] scopes data-path operations to one pool. This crate only
//! mints and releases them; reads and writes happen in whatever layer the
//! opaque handle is passed to.
//!
//! Contexts are owned by the caller and are not tracked by the session:
//! shutting a session down does not release them. A context borrows the
//! factory that minted it, so a [`Session`] cannot be shut down while any of
//! its contexts is alive:
//!
//! ```compile_fail
//! use rados_pools::{IoContextFactory, MemoryCluster, Session};
//!
//! let cluster = MemoryCluster::with_pools(["rbd"]);
//! let mut session = Session::configure_file(cluster, "/etc/ceph/ceph.conf").unwrap();
//! session.connect().unwrap();
//! let ctx = session.create_context("rbd").unwrap();
//! session.shutdown();
//! session.destroy_context(ctx);
//! ```
//!
//! A [`SharedSession`] can still be shut down through another clone; contexts
//! destroyed after that are not passed to the native layer.

use crate::connection::{Session, SharedSession};
use crate::metrics::{counters, labels};
use crate::native::status::EINVAL;
use crate::native::{ClusterBinding, RawHandle};
use crate::{Error, Result};
use std::marker::PhantomData;
use std::mem::ManuallyDrop;

/// Opaque I/O context bound to one pool
///
/// Not `Clone`: destroying a context consumes it, so it can be released at
/// most once.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "an I/O context leaks unless passed to destroy_context"]
pub struct IoContext<'s> {
    raw: RawHandle,
    pool: String,
    _factory: PhantomData<&'s ()>,
}

impl<'s> IoContext<'s> {
    fn new(raw: RawHandle, pool: &str) -> Self {
        Self {
            raw,
            pool: pool.to_string(),
            _factory: PhantomData,
        }
    }

    /// Opaque handle value for the data-path collaborator
    pub fn as_raw(&self) -> RawHandle {
        self.raw
    }

    /// Pool the context is bound to
    pub fn pool(&self) -> &str {
        &self.pool
    }

    fn rebind<'t>(self) -> IoContext<'t> {
        IoContext {
            raw: self.raw,
            pool: self.pool,
            _factory: PhantomData,
        }
    }
}

/// Creates and destroys I/O contexts
pub trait IoContextFactory {
    /// Bind a new context to `pool`; ownership passes to the caller
    fn create_context(&self, pool: &str) -> Result<IoContext<'_>>;

    /// Flush pending asynchronous operations on the context, then release it
    fn destroy_context(&self, ctx: IoContext<'_>);

    /// Create a context that is flushed and destroyed when the guard drops
    fn scoped_context(&self, pool: &str) -> Result<ContextGuard<'_, Self>>
    where
        Self: Sized,
    {
        let ctx = self.create_context(pool)?;
        Ok(ContextGuard {
            factory: self,
            ctx: ManuallyDrop::new(ctx),
        })
    }
}

impl<B: ClusterBinding> IoContextFactory for Session<B> {
    /// # Errors
    ///
    /// * [`Error::NotConnected`] unless the session is connected
    /// * [`Error::ContextCreate`] with the native status, e.g. `-ENOENT` for a
    ///   missing pool
    fn create_context(&self, pool: &str) -> Result<IoContext<'_>> {
        self.require_connected()?;

        let status = match self.binding().ioctx_create(self.handle(), pool) {
            Ok(raw) if !raw.is_null() => {
                counters::context_created();
                tracing::debug!(pool, ioctx = %raw, "I/O context created");
                return Ok(IoContext::new(raw, pool));
            }
            Ok(_) => -EINVAL,
            Err(status) => status,
        };

        counters::native_failure(labels::OP_IOCTX_CREATE, status);
        Err(Error::ContextCreate {
            pool: pool.to_string(),
            status,
        })
    }

    /// Once the cluster handle is released the context is dropped without
    /// touching the native layer.
    fn destroy_context(&self, ctx: IoContext<'_>) {
        if !self.state().is_connected() {
            tracing::warn!(
                pool = %ctx.pool,
                ioctx = %ctx.raw,
                state = %self.state(),
                "I/O context outlived its cluster handle, not released"
            );
            return;
        }

        self.binding().ioctx_flush(ctx.raw);
        self.binding().ioctx_destroy(ctx.raw);
        counters::context_destroyed();
        tracing::debug!(pool = %ctx.pool, ioctx = %ctx.raw, "I/O context destroyed");
    }
}

impl<B: ClusterBinding> IoContextFactory for SharedSession<B> {
    fn create_context(&self, pool: &str) -> Result<IoContext<'_>> {
        self.lock().create_context(pool).map(IoContext::rebind)
    }

    fn destroy_context(&self, ctx: IoContext<'_>) {
        self.lock().destroy_context(ctx)
    }
}

/// I/O context that is flushed and destroyed on drop
pub struct ContextGuard<'a, F: IoContextFactory> {
    factory: &'a F,
    ctx: ManuallyDrop<IoContext<'a>>,
}

impl<'a, F: IoContextFactory> ContextGuard<'a, F> {
    /// Take the context out of the guard; the caller becomes responsible for
    /// destroying it
    pub fn into_inner(self) -> IoContext<'a> {
        let mut guard = ManuallyDrop::new(self);
        // SAFETY: the guard is never dropped, so `ctx` is taken exactly once
        unsafe { ManuallyDrop::take(&mut guard.ctx) }
    }
}

impl<'a, F: IoContextFactory> std::ops::Deref for ContextGuard<'a, F> {
    type Target = IoContext<'a>;

    fn deref(&self) -> &IoContext<'a> {
        &self.ctx
    }
}

impl<F: IoContextFactory> std::fmt::Debug for ContextGuard<'_, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextGuard").field("ctx", &*self.ctx).finish()
    }
}

impl<F: IoContextFactory> Drop for ContextGuard<'_, F> {
    fn drop(&mut self) {
        // SAFETY: `ctx` is only taken here or in `into_inner`, which skips drop
        let ctx = unsafe { ManuallyDrop::take(&mut self.ctx) };
        self.factory.destroy_context(ctx);
    }
}
