//! Session management
//!
//! This module handles:
//! * Session lifecycle (configure, connect, shutdown)
//! * State machine enforcement
//! * Sharing one session between threads

mod session;
mod shared;
mod state;

pub use session::{Session, Version};
pub use shared::SharedSession;
pub use state::SessionState;
