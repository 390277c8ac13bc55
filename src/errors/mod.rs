//! Error types used throughout this library.

use std::{error, fmt};

/// Errors that can occur when creating a histogram.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum CreationError {
    /// No boundary sequence was supplied at all. An explicitly empty sequence is accepted and
    /// produces a single bucket; only an absent one is rejected. This is also what you get when
    /// feeding a degenerate [`range`](crate::range) straight into [`Histogram::new`](crate::Histogram::new).
    EmptyInput,
    /// Boundaries must be strictly increasing. `index` is the position of the first boundary that
    /// is not larger than its predecessor.
    InvalidBoundaries {
        /// Index of the offending boundary.
        index: usize,
    },
}

impl fmt::Display for CreationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CreationError::EmptyInput => write!(f, "No bucket boundaries were supplied"),
            CreationError::InvalidBoundaries { index } => write!(
                f,
                "Bucket boundaries are not strictly increasing at index {}",
                index
            ),
        }
    }
}

impl error::Error for CreationError {}

/// Errors that can occur when adding another histogram.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum AdditionError {
    /// The other histogram was built with a different number of boundaries, so its buckets do
    /// not line up with this histogram's buckets. Boundary values are not compared.
    BoundaryCountMismatch {
        /// Number of boundaries in this histogram.
        expected: usize,
        /// Number of boundaries in the other histogram.
        found: usize,
    },
}

impl fmt::Display for AdditionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AdditionError::BoundaryCountMismatch { expected, found } => write!(
                f,
                "Cannot add a histogram with {} boundaries to one with {}",
                found, expected
            ),
        }
    }
}

impl error::Error for AdditionError {}

/// Errors that can occur when subtracting another histogram.
///
/// Counts are allowed to go negative, so the only failure is a structural one.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum SubtractionError {
    /// The subtrahend was built with a different number of boundaries than the minuend.
    BoundaryCountMismatch {
        /// Number of boundaries in the minuend.
        expected: usize,
        /// Number of boundaries in the subtrahend.
        found: usize,
    },
}

impl fmt::Display for SubtractionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SubtractionError::BoundaryCountMismatch { expected, found } => write!(
                f,
                "Cannot subtract a histogram with {} boundaries from one with {}",
                found, expected
            ),
        }
    }
}

impl error::Error for SubtractionError {}

/// Errors that can occur when rebuilding a histogram from a [`Snapshot`](crate::Snapshot).
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum SnapshotError {
    /// The snapshot's boundaries were rejected.
    Creation(CreationError),
    /// The count or total vectors do not have one more entry than the boundaries.
    LengthMismatch {
        /// Number of buckets implied by the boundaries.
        buckets: usize,
        /// Length of the count vector.
        counts: usize,
        /// Length of the total vector.
        totals: usize,
    },
    /// The global count or total does not equal the sum of the per-bucket values.
    InconsistentTotals,
}

impl From<CreationError> for SnapshotError {
    fn from(e: CreationError) -> Self {
        SnapshotError::Creation(e)
    }
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SnapshotError::Creation(e) => write!(f, "Invalid snapshot boundaries: {}", e),
            SnapshotError::LengthMismatch {
                buckets,
                counts,
                totals,
            } => write!(
                f,
                "Snapshot has {} counts and {} totals for {} buckets",
                counts, totals, buckets
            ),
            SnapshotError::InconsistentTotals => write!(
                f,
                "Snapshot global count or total does not match its buckets"
            ),
        }
    }
}

impl error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            SnapshotError::Creation(e) => Some(e),
            _ => None,
        }
    }
}
