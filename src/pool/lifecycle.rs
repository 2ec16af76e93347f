//! Pool create / exists / delete

use crate::connection::Session;
use crate::metrics::{counters, labels};
use crate::native::status::ENOENT;
use crate::native::ClusterBinding;
use crate::{Error, Result};

impl<B: ClusterBinding> Session<B> {
    /// Check whether a pool exists
    ///
    /// Every call is a live lookup; nothing is cached. The empty string is a
    /// valid pool name.
    ///
    /// # Errors
    ///
    /// * [`Error::NotConnected`] unless the session is connected
    /// * [`Error::PoolStatus`] if the lookup fails for any reason other than
    ///   the pool not existing
    pub fn pool_exists(&self, name: &str) -> Result<bool> {
        self.require_connected()?;

        let ret = self.binding().pool_lookup(self.handle(), name);
        if ret >= 0 {
            counters::pool_operation(labels::OP_POOL_LOOKUP, labels::OUTCOME_OK);
            tracing::debug!(pool = name, id = ret, "pool found");
            return Ok(true);
        }
        if ret == -i64::from(ENOENT) {
            counters::pool_operation(labels::OP_POOL_LOOKUP, labels::OUTCOME_OK);
            tracing::debug!(pool = name, "pool not found");
            return Ok(false);
        }

        let status = i32::try_from(ret).unwrap_or(i32::MIN);
        counters::native_failure(labels::OP_POOL_LOOKUP, status);
        counters::pool_operation(labels::OP_POOL_LOOKUP, labels::OUTCOME_ERROR);
        Err(Error::PoolStatus {
            pool: name.to_string(),
            status,
        })
    }

    /// Create a pool
    ///
    /// # Errors
    ///
    /// * [`Error::NotConnected`] unless the session is connected
    /// * [`Error::PoolCreate`] with the native status, e.g. `-EEXIST`
    pub fn create_pool(&self, name: &str) -> Result<()> {
        self.require_connected()?;

        let ret = self.binding().pool_create(self.handle(), name);
        if ret < 0 {
            counters::native_failure(labels::OP_POOL_CREATE, ret);
            counters::pool_operation(labels::OP_POOL_CREATE, labels::OUTCOME_ERROR);
            return Err(Error::PoolCreate {
                pool: name.to_string(),
                status: ret,
            });
        }

        counters::pool_operation(labels::OP_POOL_CREATE, labels::OUTCOME_OK);
        tracing::debug!(pool = name, "pool created");
        Ok(())
    }

    /// Delete a pool
    ///
    /// # Errors
    ///
    /// * [`Error::NotConnected`] unless the session is connected
    /// * [`Error::PoolDelete`] with the native status, e.g. `-ENOENT`
    pub fn delete_pool(&self, name: &str) -> Result<()> {
        self.require_connected()?;

        let ret = self.binding().pool_delete(self.handle(), name);
        if ret < 0 {
            counters::native_failure(labels::OP_POOL_DELETE, ret);
            counters::pool_operation(labels::OP_POOL_DELETE, labels::OUTCOME_ERROR);
            return Err(Error::PoolDelete {
                pool: name.to_string(),
                status: ret,
            });
        }

        counters::pool_operation(labels::OP_POOL_DELETE, labels::OUTCOME_OK);
        tracing::debug!(pool = name, "pool deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::testing::capture_counters;
    use crate::native::status::{EEXIST, EIO};
    use crate::native::{FaultPoint, MemoryCluster};

    fn connected(cluster: &MemoryCluster) -> Session<MemoryCluster> {
        let conf = env!("CARGO_MANIFEST_DIR").to_string() + "/Cargo.toml";
        let mut session = Session::configure_file(cluster.clone(), conf).unwrap();
        session.connect().unwrap();
        session
    }

    #[test]
    fn test_create_exists_delete() {
        let cluster = MemoryCluster::new();
        let session = connected(&cluster);

        assert!(!session.pool_exists("test_createpool").unwrap());
        session.create_pool("test_createpool").unwrap();
        assert!(session.pool_exists("test_createpool").unwrap());
        session.delete_pool("test_createpool").unwrap();
        assert!(!session.pool_exists("test_createpool").unwrap());
    }

    #[test]
    fn test_empty_pool_name() {
        let cluster = MemoryCluster::new();
        let session = connected(&cluster);

        session.create_pool("").unwrap();
        assert!(session.pool_exists("").unwrap());
        session.delete_pool("").unwrap();
        assert!(!session.pool_exists("").unwrap());
    }

    #[test]
    fn test_create_existing_pool() {
        let cluster = MemoryCluster::with_pools(["rbd"]);
        let session = connected(&cluster);

        let err = session.create_pool("rbd").unwrap_err();
        assert_eq!(err.pool(), Some("rbd"));
        assert_eq!(err.status(), Some(-EEXIST));
        assert!(matches!(err, Error::PoolCreate { .. }));
    }

    #[test]
    fn test_delete_missing_pool() {
        let cluster = MemoryCluster::new();
        let session = connected(&cluster);

        let err = session.delete_pool("ghost").unwrap_err();
        assert!(matches!(err, Error::PoolDelete { ref pool, status } if pool == "ghost" && status == -ENOENT));
    }

    #[test]
    fn test_lookup_failure_is_not_absence() {
        let cluster = MemoryCluster::with_pools(["rbd"]);
        let session = connected(&cluster);
        cluster.fail_next(FaultPoint::PoolLookup, -EIO);

        let err = session.pool_exists("rbd").unwrap_err();
        assert!(matches!(err, Error::PoolStatus { ref pool, status } if pool == "rbd" && status == -EIO));
    }

    #[test]
    fn test_not_connected_never_false() {
        let cluster = MemoryCluster::with_pools(["rbd"]);
        let mut session = connected(&cluster);
        session.shutdown();

        assert!(session.pool_exists("rbd").unwrap_err().is_not_connected());
        assert!(session.create_pool("new").unwrap_err().is_not_connected());
        assert!(session.delete_pool("rbd").unwrap_err().is_not_connected());
        assert_eq!(cluster.pool_names(), vec!["rbd".to_string()]);
    }

    #[test]
    fn test_lookup_records_outcome() {
        let cluster = MemoryCluster::with_pools(["rbd"]);
        let session = connected(&cluster);

        let (found, counters) = capture_counters(|| session.pool_exists("rbd"));
        assert!(found.unwrap());
        assert!(counters.contains(&format!(
            "{}{{op=pool_lookup,outcome=ok}}",
            labels::POOL_OPERATIONS
        )));

        cluster.fail_next(FaultPoint::PoolLookup, -EIO);
        let (failed, counters) = capture_counters(|| session.pool_exists("rbd"));
        assert!(failed.is_err());
        assert!(counters.contains(&format!(
            "{}{{op=pool_lookup,outcome=error}}",
            labels::POOL_OPERATIONS
        )));
    }
}
