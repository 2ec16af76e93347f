//! Session lifecycle and pool administration for Ceph RADOS clusters.
//!
//! This crate models the client side of a small slice of `librados`:
//!
//! * a [`Session`] that walks the configure → connect → shutdown state machine
//! * pool create / exists / delete, gated on a connected session
//! * pool enumeration through the native growable-buffer protocol
//! * opaque per-pool I/O contexts handed to a data-path collaborator
//!
//! All cluster communication goes through a [`ClusterBinding`]. Enable the
//! `librados` feature for the system library; [`MemoryCluster`] implements the
//! same contract in-process.
//!
//! # Examples
//!
//! ```no_run
//! # fn example() -> rados_pools::Result<()> {
//! use rados_pools::{MemoryCluster, Session, SessionConfig};
//!
//! let config = SessionConfig::new("/etc/ceph/ceph.conf");
//! let mut session = Session::configure(MemoryCluster::new(), &config)?;
//! session.connect()?;
//!
//! if !session.pool_exists("images")? {
//!     session.create_pool("images")?;
//! }
//! for pool in session.list_pools()? {
//!     println!("pool: {:?}", pool);
//! }
//!
//! session.shutdown();
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod connection;
pub mod error;
pub mod ioctx;
pub mod native;
pub mod pool;

mod metrics;

pub use config::{SessionConfig, SessionConfigBuilder};
pub use connection::{Session, SessionState, SharedSession, Version};
pub use error::{Error, Result};
pub use ioctx::{ContextGuard, IoContext, IoContextFactory};
pub use native::{ClusterBinding, MemoryCluster, RawHandle};
pub use pool::parse_pool_list;

#[cfg(feature = "librados")]
pub use native::Librados;
