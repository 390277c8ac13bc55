use super::Histogram;

#[cfg(test)]
pub fn histo(boundaries: &[i64]) -> Histogram {
    Histogram::new(boundaries.to_vec()).unwrap()
}

/// Check that the global counters agree with the per-bucket ones.
#[cfg(test)]
pub fn assert_consistent(h: &Histogram) {
    let counts: i64 = h.bucket_counts().iter().sum();
    let totals: i64 = h.bucket_totals().iter().sum();
    assert_eq!(counts, h.count());
    assert_eq!(totals, h.total());
    assert_eq!(h.boundaries().len() + 1, h.num_buckets());
    assert_eq!(h.counts.len(), h.totals.len());
}
