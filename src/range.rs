//! Evenly spaced boundary sequences.

use std::convert::TryFrom;

/// Produce the sequence `start, start + step, start + 2 * step, ...` up to and including `stop`
/// if `stop - start` is a multiple of `step`, or the last value short of `stop` otherwise.
///
/// Returns `None` when the inputs describe no sequence at all: a zero `step`, or a `step` whose
/// sign points away from `stop`. Passing that `None` on to [`Histogram::new`] yields
/// [`CreationError::EmptyInput`].
///
/// ```
/// use bucket_histogram::range;
///
/// assert_eq!(range(1, 10, 3), Some(vec![1, 4, 7, 10]));
/// assert_eq!(range(10, 1, -3), Some(vec![10, 7, 4, 1]));
/// assert_eq!(range(1, 10, -3), None);
/// ```
///
/// [`Histogram::new`]: crate::Histogram::new
/// [`CreationError::EmptyInput`]: crate::CreationError::EmptyInput
pub fn range(start: i64, stop: i64, step: i64) -> Option<Vec<i64>> {
    if step == 0 || (step > 0 && start > stop) || (step < 0 && start < stop) {
        return None;
    }

    // widen so that e.g. range(i64::MIN, i64::MAX, i64::MAX) cannot overflow the span
    let len = (i128::from(stop) - i128::from(start)) / i128::from(step) + 1;
    let len = usize::try_from(len).ok()?;

    Some(
        std::iter::successors(Some(start), |v| v.checked_add(step))
            .take(len)
            .collect(),
    )
}
