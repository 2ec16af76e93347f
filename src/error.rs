//! Error types

use crate::connection::SessionState;
use crate::native::status::describe;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by session, pool and context operations
///
/// Every variant that originates in the native layer carries the raw status
/// code it returned.
#[derive(Debug, Error)]
pub enum Error {
    /// The native layer could not create a cluster handle
    #[error("cluster handle creation failed: {}", describe(.status))]
    Initialization {
        /// Native status code
        status: i32,
    },

    /// The configuration file could not be read or parsed
    #[error("failed to read configuration '{path}': {}", describe(.status))]
    Configuration {
        /// Configuration source that was rejected
        path: String,
        /// Native status code
        status: i32,
    },

    /// The native layer reported success but handed back a null handle
    #[error("could not get a valid handle to the cluster")]
    InvalidHandle,

    /// Connecting to the cluster failed
    #[error("connect failed: {}", describe(.status))]
    Connection {
        /// Native status code
        status: i32,
    },

    /// Operation requires a connected session
    #[error("session not connected (state: {state})")]
    NotConnected {
        /// State the session was in
        state: SessionState,
    },

    /// Requested lifecycle transition is not allowed
    #[error("invalid session transition from {from} to {to}")]
    InvalidState {
        /// Current state
        from: SessionState,
        /// Requested state
        to: SessionState,
    },

    /// Pool lookup returned something other than found / not found
    #[error("problem getting status of pool '{pool}': {}", describe(.status))]
    PoolStatus {
        /// Pool name
        pool: String,
        /// Native status code
        status: i32,
    },

    /// Pool creation failed
    #[error("cannot create pool '{pool}': {}", describe(.status))]
    PoolCreate {
        /// Pool name
        pool: String,
        /// Native status code
        status: i32,
    },

    /// Pool deletion failed
    #[error("cannot delete pool '{pool}': {}", describe(.status))]
    PoolDelete {
        /// Pool name
        pool: String,
        /// Native status code
        status: i32,
    },

    /// Pool enumeration failed, either in the native call or while parsing
    #[error("pool enumeration failed ({}): {reason}", describe(.status))]
    Enumeration {
        /// Last value returned by the native list call
        status: i32,
        /// What went wrong
        reason: String,
    },

    /// I/O context creation failed
    #[error("cannot create I/O context for pool '{pool}': {}", describe(.status))]
    ContextCreate {
        /// Pool name
        pool: String,
        /// Native status code
        status: i32,
    },
}

impl Error {
    /// Raw native status code, when the error came from the native layer
    pub fn status(&self) -> Option<i32> {
        match self {
            Error::Initialization { status }
            | Error::Configuration { status, .. }
            | Error::Connection { status }
            | Error::PoolStatus { status, .. }
            | Error::PoolCreate { status, .. }
            | Error::PoolDelete { status, .. }
            | Error::Enumeration { status, .. }
            | Error::ContextCreate { status, .. } => Some(*status),
            Error::InvalidHandle | Error::NotConnected { .. } | Error::InvalidState { .. } => {
                None
            }
        }
    }

    /// Pool name the failing operation targeted
    pub fn pool(&self) -> Option<&str> {
        match self {
            Error::PoolStatus { pool, .. }
            | Error::PoolCreate { pool, .. }
            | Error::PoolDelete { pool, .. }
            | Error::ContextCreate { pool, .. } => Some(pool),
            _ => None,
        }
    }

    /// Whether the operation was rejected because the session was not connected
    pub fn is_not_connected(&self) -> bool {
        matches!(self, Error::NotConnected { .. })
    }
}
