//! Cluster session

use super::state::SessionState;
use crate::config::SessionConfig;
use crate::metrics::{counters, labels};
use crate::native::{ClusterBinding, RawHandle};
use crate::{Error, Result};
use serde::Serialize;

/// Native client library version
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Version {
    /// Major version
    pub major: i32,
    /// Minor version
    pub minor: i32,
    /// Extra (patch) version
    pub extra: i32,
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.extra)
    }
}

/// A session with one cluster
///
/// Owns exactly one native cluster handle. The handle is released by
/// [`Session::shutdown`], or when the session is dropped.
///
/// Pool and context operations require the session to be connected; they fail
/// with [`Error::NotConnected`] before [`Session::connect`] and after shutdown.
///
/// State transitions take `&mut self`; share a session between threads through
/// [`SharedSession`](super::SharedSession).
pub struct Session<B: ClusterBinding> {
    binding: B,
    handle: RawHandle,
    state: SessionState,
    config: SessionConfig,
}

impl<B: ClusterBinding> Session<B> {
    /// Create a handle and load the configuration file into it
    ///
    /// # Errors
    ///
    /// * [`Error::Initialization`] if the native layer cannot create a handle
    /// * [`Error::InvalidHandle`] if it hands back a null handle
    /// * [`Error::Configuration`] if the configuration file cannot be read; the
    ///   handle is released before returning
    pub fn configure(binding: B, config: &SessionConfig) -> Result<Self> {
        let _span = tracing::debug_span!(
            "configure",
            conf_file = %config.conf_file.display()
        )
        .entered();

        let handle = binding
            .create_handle(config.client_id.as_deref())
            .map_err(|status| {
                counters::native_failure(labels::OP_CREATE_HANDLE, status);
                Error::Initialization { status }
            })?;
        if handle.is_null() {
            return Err(Error::InvalidHandle);
        }

        let mut session = Self {
            binding,
            handle,
            state: SessionState::Uninitialized,
            config: config.clone(),
        };

        let path = config.conf_file_str();
        let ret = session.binding.conf_read_file(handle, &path);
        if ret < 0 {
            counters::native_failure(labels::OP_CONF_READ, ret);
            tracing::debug!(status = ret, "configuration rejected, releasing handle");
            session.shutdown();
            return Err(Error::Configuration {
                path: path.into_owned(),
                status: ret,
            });
        }

        session.state.transition(SessionState::Configured)?;
        tracing::debug!(handle = %handle, "session configured");
        Ok(session)
    }

    /// Shorthand for [`Session::configure`] with default settings
    pub fn configure_file(binding: B, conf_file: impl AsRef<std::path::Path>) -> Result<Self> {
        Self::configure(binding, &SessionConfig::new(conf_file))
    }

    /// Get current session state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Configuration the session was created with
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Connect to the cluster
    ///
    /// On failure the session stays configured and `connect` may be retried.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidState`] unless the session is configured
    /// * [`Error::Connection`] with the native status if connecting fails
    pub fn connect(&mut self) -> Result<()> {
        if !self.state.can_transition_to(SessionState::Connected) {
            return Err(Error::InvalidState {
                from: self.state,
                to: SessionState::Connected,
            });
        }

        let ret = self.binding.connect(self.handle);
        if ret < 0 {
            counters::native_failure(labels::OP_CONNECT, ret);
            tracing::warn!(status = ret, "connect failed");
            return Err(Error::Connection { status: ret });
        }

        self.state.transition(SessionState::Connected)?;
        counters::session_connected();
        tracing::info!(handle = %self.handle, "connected to cluster");
        Ok(())
    }

    /// Disconnect and release the native handle
    ///
    /// Safe to call in any state and any number of times; only the first call
    /// reaches the native layer.
    pub fn shutdown(&mut self) {
        if self.state == SessionState::Shutdown {
            return;
        }
        self.binding.shutdown(self.handle);
        self.state = SessionState::Shutdown;
        counters::session_shutdown();
        tracing::info!(handle = %self.handle, "session shut down");
    }

    /// Fail with [`Error::NotConnected`] unless the session is connected
    pub fn require_connected(&self) -> Result<()> {
        if !self.state.is_connected() {
            return Err(Error::NotConnected { state: self.state });
        }
        Ok(())
    }

    /// Native client library version (no state precondition)
    pub fn version(&self) -> Version {
        let (major, minor, extra) = self.binding.version();
        Version {
            major,
            minor,
            extra,
        }
    }

    pub(crate) fn binding(&self) -> &B {
        &self.binding
    }

    pub(crate) fn handle(&self) -> RawHandle {
        self.handle
    }
}

impl<B: ClusterBinding> std::fmt::Debug for Session<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("handle", &self.handle)
            .field("state", &self.state)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<B: ClusterBinding> Drop for Session<B> {
    fn drop(&mut self) {
        if self.state != SessionState::Shutdown {
            tracing::debug!(state = %self.state, "session dropped without shutdown");
            self.shutdown();
        }
    }
}
