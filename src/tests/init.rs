use crate::tests::helpers::histo;
use crate::{range, CreationError, Histogram};

#[test]
fn init_fields_single_boundary() {
    let h = histo(&[0]);

    assert_eq!(vec![0], h.boundaries().to_vec());
    assert_eq!(2, h.counts.len());
    assert_eq!(2, h.totals.len());
    assert_eq!(0, h.count());
    assert_eq!(0, h.total());
}

#[test]
fn init_fields_zeroed() {
    let h = histo(&[1, 2, 3, 4]);

    assert_eq!(5, h.num_buckets());
    assert_eq!(vec![0; 5], h.bucket_counts());
    assert_eq!(vec![0; 5], h.bucket_totals());
    assert!(h.is_empty());
}

#[test]
fn init_empty_vec_is_one_bucket() {
    let h = Histogram::new(Vec::new()).unwrap();

    assert_eq!(1, h.num_buckets());
    assert_eq!((i64::MIN, i64::MAX), h.bucket_range(0));
    assert_eq!(0, h.index_of(i64::MIN));
    assert_eq!(0, h.index_of(i64::MAX));
}

#[test]
fn init_negative_boundaries() {
    let h = histo(&[-100, -10, 0, 10]);
    assert_eq!(5, h.num_buckets());
    assert_eq!((-100, -10), h.bucket_range(1));
}

#[test]
fn init_extreme_boundaries() {
    let h = histo(&[i64::MIN, i64::MAX]);
    assert_eq!(3, h.num_buckets());
    assert_eq!((i64::MIN, i64::MIN), h.bucket_range(0));
    assert_eq!((i64::MIN, i64::MAX), h.bucket_range(1));
    assert_eq!((i64::MAX, i64::MAX), h.bucket_range(2));
}

#[test]
fn init_err_out_of_order() {
    assert_eq!(
        CreationError::InvalidBoundaries { index: 2 },
        Histogram::new(vec![10, 24, 1, 4]).unwrap_err()
    );
}

#[test]
fn init_err_first_pair_equal() {
    assert_eq!(
        CreationError::InvalidBoundaries { index: 1 },
        Histogram::new(vec![5, 5]).unwrap_err()
    );
}

#[test]
fn init_from_degenerate_range() {
    assert_eq!(
        CreationError::EmptyInput,
        Histogram::new(range(10, 1, 3)).unwrap_err()
    );
    assert_eq!(6, Histogram::new(range(0, 100, 25)).unwrap().num_buckets());
}

#[test]
fn new_from_copies_boundaries_only() {
    let mut h = histo(&[1, 2, 3]);
    h += 2;
    h += 7;

    let empty = Histogram::new_from(&h);
    assert_eq!(h.boundaries(), empty.boundaries());
    assert_eq!(0, empty.count());
    assert_eq!(vec![0; 4], empty.bucket_counts());
}
