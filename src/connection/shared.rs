//! Thread-safe session handle

use super::session::{Session, Version};
use super::state::SessionState;
use crate::native::ClusterBinding;
use crate::Result;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Cloneable handle to a session guarded by a mutex
///
/// Every operation, state transitions included, runs while holding the lock,
/// so callers on different threads observe transitions atomically. Operations
/// block each other for the duration of the native round trip.
pub struct SharedSession<B: ClusterBinding> {
    inner: Arc<Mutex<Session<B>>>,
}

impl<B: ClusterBinding> SharedSession<B> {
    /// Wrap a session
    pub fn new(session: Session<B>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    /// Run `f` with exclusive access to the session
    ///
    /// The lock is held while `f` runs. Calling back into this
    /// `SharedSession` (or a clone of it) from inside `f`, including
    /// [`IoContextFactory`](crate::IoContextFactory) methods, deadlocks or
    /// panics; use the `&mut Session` argument instead.
    pub fn with<R>(&self, f: impl FnOnce(&mut Session<B>) -> R) -> R {
        f(&mut self.lock())
    }

    /// See [`Session::connect`]
    pub fn connect(&self) -> Result<()> {
        self.lock().connect()
    }

    /// See [`Session::shutdown`]
    pub fn shutdown(&self) {
        self.lock().shutdown()
    }

    /// Current session state
    pub fn state(&self) -> SessionState {
        self.lock().state()
    }

    /// See [`Session::version`]
    pub fn version(&self) -> Version {
        self.lock().version()
    }

    /// See [`Session::pool_exists`]
    pub fn pool_exists(&self, name: &str) -> Result<bool> {
        self.lock().pool_exists(name)
    }

    /// See [`Session::create_pool`]
    pub fn create_pool(&self, name: &str) -> Result<()> {
        self.lock().create_pool(name)
    }

    /// See [`Session::delete_pool`]
    pub fn delete_pool(&self, name: &str) -> Result<()> {
        self.lock().delete_pool(name)
    }

    /// See [`Session::list_pools`]
    pub fn list_pools(&self) -> Result<Vec<String>> {
        self.lock().list_pools()
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, Session<B>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<B: ClusterBinding> Clone for SharedSession<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<B: ClusterBinding> std::fmt::Debug for SharedSession<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SharedSession").field(&*self.lock()).finish()
    }
}

impl<B: ClusterBinding> From<Session<B>> for SharedSession<B> {
    fn from(session: Session<B>) -> Self {
        Self::new(session)
    }
}
