//! Pool enumeration
//!
//! `pool_list` fills a caller-provided buffer with every pool name followed by
//! a NUL, plus one trailing NUL (`"a\0b\0c\0\0"`), and returns the size the
//! full listing needs. The caller cannot know that size in advance, so the
//! buffer starts at one byte and is resized to the reported size until a call
//! fits. With no pools the listing is a single NUL byte.

use crate::connection::Session;
use crate::metrics::{counters, histograms, labels};
use crate::native::{ClusterBinding, RawHandle};
use crate::{Error, Result};
use bytes::{Bytes, BytesMut};

/// Buffer size of the first `pool_list` probe
pub const INITIAL_LIST_CAPACITY: usize = 1;

const NUL: u8 = 0;

const TERMINATOR: &[u8] = &[NUL, NUL];

impl<B: ClusterBinding> Session<B> {
    /// List all pools
    ///
    /// Names are returned in the order the cluster reports them. An empty
    /// string is a pool named `""`, not a missing entry.
    ///
    /// # Errors
    ///
    /// * [`Error::NotConnected`] unless the session is connected
    /// * [`Error::Enumeration`] if the native call fails, the required size
    ///   keeps growing past `max_list_probes`, or the listing is malformed
    pub fn list_pools(&self) -> Result<Vec<String>> {
        self.require_connected()?;
        let _span = tracing::debug_span!("list_pools").entered();

        let payload = fetch_pool_list(
            self.binding(),
            self.handle(),
            self.config().max_list_probes,
        )?;
        let pools = parse_pool_list(&payload).map_err(|err| {
            counters::pool_operation(labels::OP_POOL_LIST, labels::OUTCOME_ERROR);
            err
        })?;

        histograms::list_pool_count(pools.len());
        counters::pool_operation(labels::OP_POOL_LIST, labels::OUTCOME_OK);
        tracing::debug!(count = pools.len(), "pools listed");
        Ok(pools)
    }
}

/// Run the `pool_list` size negotiation and return the raw listing
///
/// The returned bytes are exactly the payload the final call reported, never
/// trailing slack from an oversized buffer.
pub fn fetch_pool_list<B: ClusterBinding + ?Sized>(
    binding: &B,
    cluster: RawHandle,
    max_probes: usize,
) -> Result<Bytes> {
    let max_probes = max_probes.max(1);
    let mut buf = BytesMut::zeroed(INITIAL_LIST_CAPACITY);
    let mut last = 0;

    for probe in 1..=max_probes {
        counters::list_probe();
        let ret = binding.pool_list(cluster, &mut buf);
        if ret < 0 {
            counters::native_failure(labels::OP_POOL_LIST, ret);
            counters::pool_operation(labels::OP_POOL_LIST, labels::OUTCOME_ERROR);
            return Err(Error::Enumeration {
                status: ret,
                reason: "native pool_list call failed".into(),
            });
        }
        last = ret;

        let required = ret as usize;
        tracing::debug!(probe, capacity = buf.len(), required, "pool_list probe");
        if required > buf.len() {
            buf.clear();
            buf.resize(required, NUL);
            continue;
        }

        buf.truncate(required);
        histograms::list_probes_per_call(probe);
        histograms::list_payload_bytes(required);
        return Ok(buf.freeze());
    }

    counters::pool_operation(labels::OP_POOL_LIST, labels::OUTCOME_ERROR);
    tracing::warn!(max_probes, required = last, "pool_list size never settled");
    Err(Error::Enumeration {
        status: last,
        reason: format!("required size still growing after {} probes", max_probes),
    })
}

/// Split a raw `pool_list` payload into pool names
///
/// * `"\0"` is the empty listing
/// * otherwise the trailing `"\0\0"` is stripped and the rest split on NUL,
///   keeping zero-length runs as empty names
///
/// # Examples
///
/// ```
/// use rados_pools::parse_pool_list;
///
/// assert!(parse_pool_list(b"\0").unwrap().is_empty());
/// assert_eq!(parse_pool_list(b"\0\0").unwrap(), vec![""]);
/// assert_eq!(parse_pool_list(b"a\0b\0\0").unwrap(), vec!["a", "b"]);
/// ```
///
/// # Errors
///
/// [`Error::Enumeration`] (carrying the payload length as status) if the
/// payload is empty, not double-NUL terminated, or a name is not UTF-8.
pub fn parse_pool_list(data: &[u8]) -> Result<Vec<String>> {
    let malformed = |reason: String| Error::Enumeration {
        status: i32::try_from(data.len()).unwrap_or(i32::MAX),
        reason,
    };

    if data == [NUL] {
        return Ok(Vec::new());
    }
    if data.is_empty() {
        return Err(malformed("empty pool list payload".into()));
    }
    let Some(names) = data.strip_suffix(TERMINATOR) else {
        return Err(malformed(
            "pool list payload is not double-NUL terminated".into(),
        ));
    };

    names
        .split(|&b| b == NUL)
        .enumerate()
        .map(|(idx, name)| {
            String::from_utf8(name.to_vec())
                .map_err(|_| malformed(format!("pool name #{} is not valid UTF-8", idx)))
        })
        .collect()
}
