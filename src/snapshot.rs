use crate::errors::SnapshotError;
use crate::Histogram;
use serde::{Deserialize, Serialize};
use std::sync::atomic::AtomicI64;

/// The complete state of a [`Histogram`] as plain data.
///
/// This is what callers reach for when they want to ship a histogram somewhere: it implements
/// serde's `Serialize` and `Deserialize`, so any serde format will do. Taking a snapshot while
/// other threads are calling [`Histogram::atomic_increment`] may capture counters that do not
/// agree with each other; [`Histogram::from_snapshot`] will then refuse it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Bucket boundaries, strictly increasing.
    pub boundaries: Vec<i64>,
    /// Per-bucket sample counts, one more than there are boundaries.
    pub counts: Vec<i64>,
    /// Per-bucket sample totals, one more than there are boundaries.
    pub totals: Vec<i64>,
    /// Number of samples across all buckets.
    pub count: i64,
    /// Sum of samples across all buckets.
    pub total: i64,
}

impl Histogram {
    /// Capture the boundaries and every counter of this histogram.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            boundaries: self.boundaries.clone(),
            counts: self.bucket_counts(),
            totals: self.bucket_totals(),
            count: self.count(),
            total: self.total(),
        }
    }

    /// Rebuild a histogram from a snapshot.
    ///
    /// The boundaries go through the same validation as [`Histogram::new`]. The counter vectors
    /// must have one entry per bucket, and the global count and total must equal the (wrapping)
    /// sums of the per-bucket values.
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Histogram, SnapshotError> {
        let Snapshot {
            boundaries,
            counts,
            totals,
            count,
            total,
        } = snapshot;

        let buckets = boundaries.len() + 1;
        if counts.len() != buckets || totals.len() != buckets {
            tracing::debug!(
                buckets,
                counts = counts.len(),
                totals = totals.len(),
                "rejecting snapshot with mismatched counter lengths"
            );
            return Err(SnapshotError::LengthMismatch {
                buckets,
                counts: counts.len(),
                totals: totals.len(),
            });
        }

        let sum = |v: &[i64]| v.iter().fold(0i64, |acc, x| acc.wrapping_add(*x));
        if sum(&counts[..]) != count || sum(&totals[..]) != total {
            tracing::debug!(count, total, "rejecting snapshot with inconsistent totals");
            return Err(SnapshotError::InconsistentTotals);
        }

        let mut h = Histogram::new(boundaries)?;
        h.counts = counts.into_iter().map(AtomicI64::new).collect();
        h.totals = totals.into_iter().map(AtomicI64::new).collect();
        h.count = AtomicI64::new(count);
        h.total = AtomicI64::new(total);
        Ok(h)
    }
}

impl From<&Histogram> for Snapshot {
    fn from(h: &Histogram) -> Self {
        h.snapshot()
    }
}
