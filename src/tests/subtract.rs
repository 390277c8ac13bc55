use crate::tests::helpers::{assert_consistent, histo};
use crate::{AdditionError, Histogram, SubtractionError};

const TEST_VALUE_LEVEL: i64 = 4;

#[test]
fn subtract_after_add() {
    let mut h1 = histo(&[10, 100, 1_000]);
    let mut h2 = histo(&[10, 100, 1_000]);

    h1 += TEST_VALUE_LEVEL;
    h1 += 1000 * TEST_VALUE_LEVEL;
    h2 += TEST_VALUE_LEVEL;
    h2 += 1000 * TEST_VALUE_LEVEL;

    h1.add(&h2).unwrap();
    assert_eq!(h1.bucket_count(0), 2);
    assert_eq!(h1.bucket_count(3), 2);
    assert_eq!(h1.count(), 4);

    h1 += &h2;
    assert_eq!(h1.bucket_count(0), 3);
    assert_eq!(h1.bucket_count(3), 3);
    assert_eq!(h1.count(), 6);
    assert_eq!(h1.total(), 3 * 1001 * TEST_VALUE_LEVEL);

    h1.subtract(&h2).unwrap();
    assert_eq!(h1.bucket_count(0), 2);
    assert_eq!(h1.bucket_count(3), 2);
    assert_eq!(h1.count(), 4);

    assert_consistent(&h1);
    assert_consistent(&h2);
}

#[test]
fn subtract_to_zero_counts() {
    let mut h1 = histo(&[10, 100, 1_000]);

    h1 += TEST_VALUE_LEVEL;
    h1 += 1000 * TEST_VALUE_LEVEL;

    let clone = h1.clone();
    h1.subtract(&clone).unwrap();
    assert_eq!(h1.bucket_counts(), vec![0; 4]);
    assert_eq!(h1.bucket_totals(), vec![0; 4]);
    assert_eq!(h1.count(), 0);
    assert_eq!(h1.total(), 0);

    assert_consistent(&h1);
}

#[test]
fn subtract_goes_negative() {
    let mut h1 = histo(&[10, 100, 1_000]);
    let mut h2 = histo(&[10, 100, 1_000]);
    h2 += 50;
    h2 += 60;

    h1 -= &h2;
    assert_eq!(h1.bucket_count(1), -2);
    assert_eq!(h1.bucket_total(1), -110);
    assert_eq!(h1.count(), -2);
    assert_eq!(h1.total(), -110);
    assert_eq!(h1.bucket_mean(1), 55.0);

    assert_consistent(&h1);
}

#[test]
fn add_ignores_boundary_values() {
    let mut h1 = histo(&[10, 100, 1_000]);
    let mut h2 = histo(&[1, 2, 3]);
    h2 += 2;

    h1.add(&h2).unwrap();
    assert_eq!(h1.bucket_count(2), 1);
    assert_eq!(h1.bucket_total(2), 2);
}

#[test]
fn add_boundary_count_mismatch() {
    let mut h1 = histo(&[10, 100, 1_000]);
    let h2 = histo(&[10, 100]);

    assert_eq!(
        Err(AdditionError::BoundaryCountMismatch {
            expected: 3,
            found: 2
        }),
        h1.add(&h2)
    );
    assert_eq!(
        Err(SubtractionError::BoundaryCountMismatch {
            expected: 3,
            found: 2
        }),
        h1.subtract(&h2)
    );
}

#[test]
#[should_panic]
fn add_assign_boundary_count_mismatch() {
    let mut h1 = histo(&[10, 100, 1_000]);
    let h2 = histo(&[10]);
    h1 += &h2;
}

#[test]
fn subtract_wraps_instead_of_overflowing() {
    let mut h1 = histo(&[0]);
    let mut h2 = histo(&[0]);
    h2 += i64::MIN;

    h1.subtract(&h2).unwrap();
    assert_eq!(h1.bucket_total(0), i64::MIN);
    h1.add(&h2).unwrap();
    assert_eq!(h1, Histogram::new(vec![0]).unwrap());
}
