//! Iteration over the buckets of a [`Histogram`].

use crate::Histogram;
use std::ops::Range;

/// A point-in-time view of a single bucket.
///
/// The bucket covers the half-open range `[lower, upper)`. The first bucket reports `i64::MIN` as
/// its `lower` and the last reports `i64::MAX` as its `upper`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// Position of this bucket in the histogram.
    pub index: usize,
    /// Inclusive lower bound.
    pub lower: i64,
    /// Exclusive upper bound.
    pub upper: i64,
    /// Number of samples in this bucket.
    pub count: i64,
    /// Sum of the samples in this bucket.
    pub total: i64,
}

impl Bucket {
    /// Average of the samples in this bucket, or `0.0` if it is empty.
    pub fn mean(&self) -> f64 {
        crate::mean(self.total, self.count)
    }
}

/// Iterator over every bucket of a histogram, returned by [`Histogram::iter_buckets`].
#[derive(Debug, Clone)]
pub struct Buckets<'a> {
    hist: &'a Histogram,
    indices: Range<usize>,
}

impl<'a> Buckets<'a> {
    pub(crate) fn new(hist: &'a Histogram) -> Buckets<'a> {
        Buckets {
            hist,
            indices: 0..hist.num_buckets(),
        }
    }
}

impl<'a> Iterator for Buckets<'a> {
    type Item = Bucket;

    fn next(&mut self) -> Option<Self::Item> {
        let hist = self.hist;
        self.indices.next().and_then(|i| hist.bucket(i))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indices.size_hint()
    }
}

impl<'a> DoubleEndedIterator for Buckets<'a> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let hist = self.hist;
        self.indices.next_back().and_then(|i| hist.bucket(i))
    }
}

impl<'a> ExactSizeIterator for Buckets<'a> {}
