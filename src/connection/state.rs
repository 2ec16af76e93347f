//! Session state machine

use crate::{Error, Result};
use serde::Serialize;

/// Session lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No native handle yet
    Uninitialized,

    /// Handle created and configuration loaded
    Configured,

    /// Connected to the cluster (ready for pool operations)
    Connected,

    /// Handle released
    Shutdown,
}

impl SessionState {
    /// Check if transition is valid
    pub fn can_transition_to(&self, next: SessionState) -> bool {
        use SessionState::*;

        matches!(
            (self, next),
            (Uninitialized, Configured) | (Configured, Connected) | (_, Shutdown)
        )
    }

    /// Transition to new state
    pub fn transition(&mut self, next: SessionState) -> Result<()> {
        if !self.can_transition_to(next) {
            return Err(Error::InvalidState {
                from: *self,
                to: next,
            });
        }
        *self = next;
        Ok(())
    }

    /// Whether pool operations are allowed
    pub fn is_connected(&self) -> bool {
        matches!(self, SessionState::Connected)
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Uninitialized => write!(f, "uninitialized"),
            Self::Configured => write!(f, "configured"),
            Self::Connected => write!(f, "connected"),
            Self::Shutdown => write!(f, "shutdown"),
        }
    }
}
