//! Metrics for session and pool operations
//!
//! Recorded through the `metrics` facade; nothing is exported unless the
//! application installs a recorder.

pub(crate) mod counters;
pub(crate) mod histograms;
pub(crate) mod labels;

#[cfg(test)]
pub(crate) mod testing;
