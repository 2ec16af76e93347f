//! Session configuration
//!
//! The cluster configuration file itself is opaque to this crate: its path is
//! handed to the native layer, which parses it.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration file used when `CEPH_CONF` is not set
pub const DEFAULT_CONF_FILE: &str = "/etc/ceph/ceph.conf";

/// Default cap on `pool_list` calls for one enumeration
pub const DEFAULT_MAX_LIST_PROBES: usize = 16;

fn default_max_list_probes() -> usize {
    DEFAULT_MAX_LIST_PROBES
}

/// Session configuration
///
/// Use `SessionConfig::builder()` to set a client id or the enumeration cap.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SessionConfig {
    /// Path to the cluster configuration file
    pub conf_file: PathBuf,
    /// Client id to authenticate as (native default when unset)
    #[serde(default)]
    pub client_id: Option<String>,
    /// Maximum number of `pool_list` calls a single enumeration may make
    #[serde(default = "default_max_list_probes")]
    pub max_list_probes: usize,
}

impl SessionConfig {
    /// Create new configuration with defaults
    ///
    /// # Defaults
    ///
    /// - `client_id`: None
    /// - `max_list_probes`: 16
    pub fn new(conf_file: impl AsRef<Path>) -> Self {
        Self {
            conf_file: conf_file.as_ref().to_path_buf(),
            client_id: None,
            max_list_probes: DEFAULT_MAX_LIST_PROBES,
        }
    }

    /// Create a builder for advanced configuration
    ///
    /// # Examples
    ///
    /// ```
    /// use rados_pools::SessionConfig;
    ///
    /// let config = SessionConfig::builder("/etc/ceph/ceph.conf")
    ///     .client_id("admin")
    ///     .max_list_probes(4)
    ///     .build();
    /// assert_eq!(config.max_list_probes, 4);
    /// ```
    pub fn builder(conf_file: impl AsRef<Path>) -> SessionConfigBuilder {
        SessionConfigBuilder {
            config: Self::new(conf_file),
        }
    }

    /// Build configuration from the environment
    ///
    /// Reads `CEPH_CONF` (falling back to [`DEFAULT_CONF_FILE`]) and
    /// `CEPH_CLIENT_ID`.
    pub fn from_env() -> Self {
        let conf_file =
            std::env::var_os("CEPH_CONF").map_or_else(|| PathBuf::from(DEFAULT_CONF_FILE), PathBuf::from);
        let client_id = std::env::var("CEPH_CLIENT_ID")
            .ok()
            .filter(|id| !id.is_empty());
        Self {
            conf_file,
            client_id,
            max_list_probes: DEFAULT_MAX_LIST_PROBES,
        }
    }

    /// Configuration file path as handed to the native layer
    pub fn conf_file_str(&self) -> std::borrow::Cow<'_, str> {
        self.conf_file.to_string_lossy()
    }
}

/// Builder for creating `SessionConfig`
#[derive(Debug, Clone)]
pub struct SessionConfigBuilder {
    config: SessionConfig,
}

impl SessionConfigBuilder {
    /// Set the client id
    pub fn client_id(mut self, id: impl Into<String>) -> Self {
        self.config.client_id = Some(id.into());
        self
    }

    /// Set the cap on `pool_list` calls per enumeration
    ///
    /// Values below 1 are raised to 1.
    pub fn max_list_probes(mut self, probes: usize) -> Self {
        self.config.max_list_probes = probes.max(1);
        self
    }

    /// Build the configuration
    pub fn build(self) -> SessionConfig {
        self.config
    }
}
