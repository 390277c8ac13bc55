//! A fixed-bucket histogram for signed integer samples. It classifies a stream of values into a
//! small, statically defined set of contiguous ranges ("buckets") and tracks, for every bucket,
//! how many samples landed in it and what they summed to. From those counters it derives the
//! global sample count, the global total, and averages across the whole stream or per bucket.
//!
//! The histogram is meant as a building block for telemetry: latency distributions, request
//! sizes, queue depths, and so on, where the interesting ranges are known up front and recording
//! must be cheap. Recording a value costs one binary search over the boundaries plus four integer
//! additions, and the memory footprint never changes after construction.
//!
//! # Buckets
//!
//! A histogram is defined by `N` strictly increasing boundaries, which split the `i64` line into
//! `N + 1` buckets:
//!
//!  - bucket `0` holds everything below `boundaries[0]`,
//!  - bucket `i` for `0 < i < N` holds the half-open range `[boundaries[i - 1], boundaries[i])`,
//!  - bucket `N` holds everything at or above `boundaries[N - 1]`.
//!
//! Negative boundaries are fine. When reporting the range of the two open-ended buckets,
//! `i64::MIN` and `i64::MAX` stand in for minus and plus infinity.
//!
//! # Interacting with the library
//!
//! ## Recording samples
//!
//! A histogram is created with [`Histogram::new`], which takes ownership of the boundary vector
//! and validates it. Evenly spaced boundaries can be generated with [`range`]:
//!
//! ```
//! use bucket_histogram::{range, Histogram};
//!
//! // buckets: (-inf, 0), [0, 10), [10, 20), ..., [90, 100), [100, +inf)
//! let mut hist = Histogram::new(range(0, 100, 10)).unwrap();
//!
//! hist.increment(42);
//!
//! // for ergonomics, samples can also be recorded with +=
//! hist += 7;
//! hist += -3;
//!
//! assert_eq!(hist.count(), 3);
//! assert_eq!(hist.bucket_count(0), 1);
//! assert_eq!(hist.bucket_count(1), 1);
//! assert_eq!(hist.bucket_count(5), 1);
//! ```
//!
//! [`Histogram::increment`] needs exclusive access. When several threads must record into the
//! same histogram, share it (for example through an `Arc`) and use
//! [`Histogram::atomic_increment`] instead:
//!
//! ```
//! use bucket_histogram::Histogram;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let hist = Arc::new(Histogram::new(vec![10, 100, 1000]).unwrap());
//! let writers: Vec<_> = (0..4)
//!     .map(|_| {
//!         let hist = Arc::clone(&hist);
//!         thread::spawn(move || {
//!             for v in 0..1000 {
//!                 hist.atomic_increment(v);
//!             }
//!         })
//!     })
//!     .collect();
//! for w in writers {
//!     w.join().unwrap();
//! }
//! assert_eq!(hist.count(), 4000);
//! ```
//!
//! Every counter update on that path is atomic on its own, but the four updates that make up a
//! single increment are not one transaction. A reader running concurrently with writers may see
//! a bucket count that already includes a sample whose value has not yet reached the global
//! total. Read once the writers are quiescent if you need the counters to agree with each other,
//! or use the phase-shifting [`sync::SyncHistogram`] (behind the `sync` feature) which only ever
//! exposes fully merged state.
//!
//! ## Querying samples
//!
//! At any time the histogram can be queried for its counters and derived statistics:
//!
//! ```
//! use bucket_histogram::Histogram;
//! let mut hist = Histogram::new(vec![1, 2, 3, 4]).unwrap();
//! for v in &[1, 1, 2, 3, 0, 4] {
//!     hist += *v;
//! }
//!
//! assert_eq!(hist.num_buckets(), 5);
//! assert_eq!(hist.bucket_counts(), vec![1, 2, 1, 1, 1]);
//! assert_eq!(hist.bucket_range(0), (i64::MIN, 1));
//! assert_eq!(hist.bucket_range(4), (4, i64::MAX));
//!
//! for bucket in hist.iter_buckets() {
//!     println!("[{}, {}): {} samples, mean {}", bucket.lower, bucket.upper, bucket.count, bucket.mean());
//! }
//! ```
//!
//! ## Combining histograms
//!
//! Histograms with the same number of boundaries can be added to and subtracted from each other,
//! either through [`Histogram::add`] and [`Histogram::subtract`], which report a mismatch as an
//! error, or through `+=` and `-=`, which panic on one. Subtraction does not check that the
//! subtrahend was ever added, so counts may become negative.
//!
//! # Limitations and Caveats
//!
//!  - Only the number of boundaries is checked when combining histograms, not their values.
//!  - All counters are `i64` and wrap on overflow, on both the plain and the atomic path.
//!  - Indexed accessors panic on an out-of-range index. Use [`Histogram::bucket`] for a checked
//!    lookup.
//!  - There is no byte-level serialization format. [`Snapshot`] exposes the counters as plain
//!    data (and implements serde's traits) for callers to encode however they like.

#![deny(missing_docs, trivial_casts, unused_import_braces, unused_qualifications)]

use std::borrow::Borrow;
use std::ops::{AddAssign, SubAssign};
use std::sync::atomic::{AtomicI64, Ordering};

pub mod errors;
pub mod iterators;
mod range;
mod snapshot;
#[cfg(feature = "sync")]
pub mod sync;

pub use crate::errors::*;
pub use crate::iterators::Bucket;
pub use crate::range::range;
pub use crate::snapshot::Snapshot;

/// `Histogram` is the core data structure of this crate. It counts and sums the samples that land
/// in each of a fixed set of buckets.
///
/// All mutating operations except [`Histogram::atomic_increment`] take `&mut self`, so the borrow
/// checker keeps them from racing with each other or with concurrent atomic increments.
#[derive(Debug)]
pub struct Histogram {
    boundaries: Vec<i64>,
    counts: Vec<AtomicI64>,
    totals: Vec<AtomicI64>,
    count: AtomicI64,
    total: AtomicI64,
}

#[inline]
fn load(c: &AtomicI64) -> i64 {
    c.load(Ordering::Relaxed)
}

#[inline]
fn bump(c: &mut AtomicI64, delta: i64) {
    let c = c.get_mut();
    *c = c.wrapping_add(delta);
}

fn zeroed(len: usize) -> Vec<AtomicI64> {
    (0..len).map(|_| AtomicI64::new(0)).collect()
}

// construction

impl Histogram {
    /// Construct a histogram from the given bucket boundaries.
    ///
    /// `boundaries` may be a `Vec<i64>` or an `Option<Vec<i64>>`, which lets the output of
    /// [`range`] be passed straight through. The vector is moved into the histogram as-is.
    ///
    /// Fails with [`CreationError::EmptyInput`] if no boundaries are given (`None`), and with
    /// [`CreationError::InvalidBoundaries`] if they are not strictly increasing. An empty vector
    /// is accepted and yields a single bucket spanning every `i64`.
    pub fn new<B: Into<Option<Vec<i64>>>>(boundaries: B) -> Result<Histogram, CreationError> {
        let boundaries = match boundaries.into() {
            Some(b) => b,
            None => {
                tracing::debug!("rejecting histogram without bucket boundaries");
                return Err(CreationError::EmptyInput);
            }
        };

        if let Some(i) = boundaries.windows(2).position(|w| w[0] >= w[1]) {
            tracing::debug!(
                index = i + 1,
                previous = boundaries[i],
                value = boundaries[i + 1],
                "rejecting bucket boundaries that are not strictly increasing"
            );
            return Err(CreationError::InvalidBoundaries { index: i + 1 });
        }

        let len = boundaries.len() + 1;
        Ok(Histogram {
            boundaries,
            counts: zeroed(len),
            totals: zeroed(len),
            count: AtomicI64::new(0),
            total: AtomicI64::new(0),
        })
    }

    /// Construct an empty histogram with the same boundaries as the `source` histogram.
    pub fn new_from(source: &Histogram) -> Histogram {
        let len = source.num_buckets();
        Histogram {
            boundaries: source.boundaries.clone(),
            counts: zeroed(len),
            totals: zeroed(len),
            count: AtomicI64::new(0),
            total: AtomicI64::new(0),
        }
    }
}

// lookups

impl Histogram {
    /// Find the bucket a value belongs to: the smallest index `i` such that `boundaries[i]` is
    /// greater than `value`, or the last bucket if no boundary is.
    ///
    /// Both increment paths go through this.
    #[inline]
    pub fn index_of(&self, value: i64) -> usize {
        self.boundaries.partition_point(|&b| b <= value)
    }
}

// recording

impl Histogram {
    /// Record a single sample.
    pub fn increment(&mut self, value: i64) {
        let index = self.index_of(value);
        bump(&mut self.counts[index], 1);
        bump(&mut self.totals[index], value);
        bump(&mut self.count, 1);
        bump(&mut self.total, value);
    }

    /// Record a single sample through a shared reference.
    ///
    /// This is safe to call from any number of threads at once and no update is ever lost. The
    /// four counters involved (bucket count, bucket total, global count, global total) are each
    /// updated atomically, but independently of one another: a concurrent reader may observe
    /// some of them already updated and others not. Once all writers are done, the counters are
    /// consistent again.
    pub fn atomic_increment(&self, value: i64) {
        let index = self.index_of(value);
        self.counts[index].fetch_add(1, Ordering::Relaxed);
        self.totals[index].fetch_add(value, Ordering::Relaxed);
        self.count.fetch_add(1, Ordering::Relaxed);
        self.total.fetch_add(value, Ordering::Relaxed);
    }
}

// make it more ergonomic to record samples
impl AddAssign<i64> for Histogram {
    fn add_assign(&mut self, value: i64) {
        self.increment(value);
    }
}

// accessors

impl Histogram {
    /// The bucket boundaries this histogram was built with.
    pub fn boundaries(&self) -> &[i64] {
        &self.boundaries
    }

    /// Number of buckets, which is always one more than the number of boundaries.
    pub fn num_buckets(&self) -> usize {
        debug_assert_eq!(self.counts.len(), self.totals.len());
        self.counts.len()
    }

    /// The lower (inclusive) and upper (exclusive) bound of the bucket at `index`.
    ///
    /// The first bucket reports `i64::MIN` as its lower bound and the last bucket reports
    /// `i64::MAX` as its upper bound.
    ///
    /// # Panics
    ///
    /// If `index` is not smaller than [`Histogram::num_buckets`].
    pub fn bucket_range(&self, index: usize) -> (i64, i64) {
        let n = self.boundaries.len();
        assert!(
            index <= n,
            "bucket index {} out of range for histogram with {} buckets",
            index,
            n + 1
        );

        let lower = if index == 0 {
            i64::MIN
        } else {
            self.boundaries[index - 1]
        };
        let upper = if index == n {
            i64::MAX
        } else {
            self.boundaries[index]
        };
        (lower, upper)
    }

    /// Number of samples recorded in the bucket at `index`.
    ///
    /// Panics if `index` is out of range.
    pub fn bucket_count(&self, index: usize) -> i64 {
        load(&self.counts[index])
    }

    /// Sum of the samples recorded in the bucket at `index`.
    ///
    /// Panics if `index` is out of range.
    pub fn bucket_total(&self, index: usize) -> i64 {
        load(&self.totals[index])
    }

    /// Average of the samples recorded in the bucket at `index`, or `0.0` if it is empty.
    ///
    /// Panics if `index` is out of range.
    pub fn bucket_mean(&self, index: usize) -> f64 {
        mean(self.bucket_total(index), self.bucket_count(index))
    }

    /// A view of the bucket at `index`, or `None` if there is no such bucket.
    pub fn bucket(&self, index: usize) -> Option<Bucket> {
        if index >= self.num_buckets() {
            return None;
        }
        let (lower, upper) = self.bucket_range(index);
        Some(Bucket {
            index,
            lower,
            upper,
            count: self.bucket_count(index),
            total: self.bucket_total(index),
        })
    }

    /// A copy of every bucket's count, in bucket order.
    pub fn bucket_counts(&self) -> Vec<i64> {
        self.counts.iter().map(load).collect()
    }

    /// A copy of every bucket's total, in bucket order.
    pub fn bucket_totals(&self) -> Vec<i64> {
        self.totals.iter().map(load).collect()
    }

    /// Total number of samples recorded.
    pub fn count(&self) -> i64 {
        load(&self.count)
    }

    /// Sum of all samples recorded.
    pub fn total(&self) -> i64 {
        load(&self.total)
    }

    /// Average of all samples recorded, or `0.0` if there are none.
    pub fn mean(&self) -> f64 {
        mean(self.total(), self.count())
    }

    /// Returns `true` if no samples have been recorded.
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Iterate over every bucket in order, lowest values first.
    pub fn iter_buckets(&self) -> iterators::Buckets<'_> {
        iterators::Buckets::new(self)
    }
}

pub(crate) fn mean(total: i64, count: i64) -> f64 {
    if count == 0 {
        0.0
    } else {
        total as f64 / count as f64
    }
}

// administrative (clear, combine)

impl Histogram {
    /// Reset every counter to zero. The boundaries are left as they are.
    pub fn clear(&mut self) {
        for c in self.counts.iter_mut().chain(self.totals.iter_mut()) {
            *c.get_mut() = 0;
        }
        *self.count.get_mut() = 0;
        *self.total.get_mut() = 0;
    }

    /// Add the contents of another histogram to this one.
    ///
    /// Both histograms must have the same number of boundaries. Only the number is checked; adding
    /// a histogram with different boundary values gives meaningless results.
    pub fn add<B: Borrow<Histogram>>(&mut self, source: B) -> Result<(), AdditionError> {
        let source = source.borrow();
        if source.boundaries.len() != self.boundaries.len() {
            return Err(AdditionError::BoundaryCountMismatch {
                expected: self.boundaries.len(),
                found: source.boundaries.len(),
            });
        }

        self.combine(source, 1);
        Ok(())
    }

    /// Subtract the contents of another histogram from this one.
    ///
    /// This undoes a previous [`Histogram::add`] of the same histogram exactly. Nothing stops the
    /// counters from going negative if `subtrahend` was never added in the first place.
    pub fn subtract<B: Borrow<Histogram>>(
        &mut self,
        subtrahend: B,
    ) -> Result<(), SubtractionError> {
        let subtrahend = subtrahend.borrow();
        if subtrahend.boundaries.len() != self.boundaries.len() {
            return Err(SubtractionError::BoundaryCountMismatch {
                expected: self.boundaries.len(),
                found: subtrahend.boundaries.len(),
            });
        }

        self.combine(subtrahend, -1);
        Ok(())
    }

    // sign is 1 or -1; wrapping_mul keeps i64::MIN intact when negated
    fn combine(&mut self, other: &Histogram, sign: i64) {
        for (c, o) in self.counts.iter_mut().zip(other.counts.iter()) {
            bump(c, load(o).wrapping_mul(sign));
        }
        for (t, o) in self.totals.iter_mut().zip(other.totals.iter()) {
            bump(t, load(o).wrapping_mul(sign));
        }
        bump(&mut self.count, other.count().wrapping_mul(sign));
        bump(&mut self.total, other.total().wrapping_mul(sign));
    }
}

impl<'a> AddAssign<&'a Histogram> for Histogram {
    fn add_assign(&mut self, source: &'a Histogram) {
        if let Err(e) = self.add(source) {
            panic!("{}", e);
        }
    }
}

impl<'a> SubAssign<&'a Histogram> for Histogram {
    fn sub_assign(&mut self, other: &'a Histogram) {
        if let Err(e) = self.subtract(other) {
            panic!("{}", e);
        }
    }
}

impl Clone for Histogram {
    fn clone(&self) -> Self {
        Histogram {
            boundaries: self.boundaries.clone(),
            counts: self.counts.iter().map(|c| AtomicI64::new(load(c))).collect(),
            totals: self.totals.iter().map(|t| AtomicI64::new(load(t))).collect(),
            count: AtomicI64::new(self.count()),
            total: AtomicI64::new(self.total()),
        }
    }
}

// comparison

impl PartialEq for Histogram {
    fn eq(&self, other: &Histogram) -> bool {
        self.boundaries == other.boundaries
            && self.count() == other.count()
            && self.total() == other.total()
            && self.counts.iter().map(load).eq(other.counts.iter().map(load))
            && self.totals.iter().map(load).eq(other.totals.iter().map(load))
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
