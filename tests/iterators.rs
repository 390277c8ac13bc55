use bucket_histogram::{Bucket, Histogram};

#[test]
fn iter_buckets_yields_every_bucket() {
    let mut h = Histogram::new(vec![0, 10, 20]).unwrap();
    h += -5;
    h += 5;
    h += 15;
    h += 15;

    let buckets: Vec<Bucket> = h.iter_buckets().collect();
    assert_eq!(
        buckets,
        vec![
            Bucket {
                index: 0,
                lower: i64::MIN,
                upper: 0,
                count: 1,
                total: -5
            },
            Bucket {
                index: 1,
                lower: 0,
                upper: 10,
                count: 1,
                total: 5
            },
            Bucket {
                index: 2,
                lower: 10,
                upper: 20,
                count: 2,
                total: 30
            },
            Bucket {
                index: 3,
                lower: 20,
                upper: i64::MAX,
                count: 0,
                total: 0
            },
        ]
    );
}

#[test]
fn iter_buckets_is_exact_size_and_reversible() {
    let h = Histogram::new(vec![1, 2, 3]).unwrap();
    let mut it = h.iter_buckets();
    assert_eq!(it.len(), 4);

    assert_eq!(it.next_back().map(|b| b.index), Some(3));
    assert_eq!(it.next().map(|b| b.index), Some(0));
    assert_eq!(it.len(), 2);
}

#[test]
fn bucket_mean() {
    let mut h = Histogram::new(vec![100]).unwrap();
    h += 1;
    h += 2;

    let b = h.bucket(0).unwrap();
    assert_eq!(b.mean(), 1.5);
    assert_eq!(h.bucket(1).unwrap().mean(), 0.0);
}

#[test]
fn iter_buckets_on_single_bucket() {
    let mut h = Histogram::new(Vec::new()).unwrap();
    h += i64::MIN;
    h += i64::MAX;

    let buckets: Vec<_> = h.iter_buckets().collect();
    assert_eq!(buckets.len(), 1);
    assert_eq!(buckets[0].count, 2);
    assert_eq!(buckets[0].total, -1);
}
