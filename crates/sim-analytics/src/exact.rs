//! Exact nearest-rank quantile over an already-sorted slice, using the
//! `k = ceil(p/100 * n) - 1` rank definition shared by the monthly
//! analyzer's exact-quantile test fallback and the standalone `quantile`
//! CLI utility.

/// `sorted` must already be in ascending order. `p` is a percentage in
/// `(0, 100]`. Returns `None` for an empty slice.
pub fn quantile_at(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let n = sorted.len();
    let mut k = ((p / 100.0) * n as f64).ceil() as isize - 1;
    if k < 0 {
        k = 0;
    }
    if k as usize >= n {
        k = n as isize - 1;
    }
    Some(sorted[k as usize])
}

/// Value -> percentile, matching `percentis2.py`'s default mode: exact
/// match within `tol` reports the 1-based position of the first
/// occurrence; otherwise an approximate percentile from the count below.
pub fn percentile_of(sorted: &[f64], value: f64, tol: f64) -> Option<(f64, bool)> {
    if sorted.is_empty() {
        return None;
    }
    let total = sorted.len();
    let count_lt = sorted.iter().filter(|&&x| x < value - tol).count();
    let count_eq = sorted
        .iter()
        .filter(|&&x| (x - value).abs() <= tol)
        .count();
    if count_eq > 0 {
        let pos = count_lt + 1;
        Some((pos as f64 / total as f64 * 100.0, true))
    } else {
        let count_below = sorted.iter().filter(|&&x| x < value).count();
        Some((count_below as f64 / total as f64 * 100.0, false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantile_at_matches_nearest_rank() {
        let data: Vec<f64> = (1..=10).map(|x| x as f64).collect();
        assert_eq!(quantile_at(&data, 50.0), Some(5.0));
        assert_eq!(quantile_at(&data, 100.0), Some(10.0));
    }

    #[test]
    fn quantile_at_empty_is_none() {
        assert_eq!(quantile_at(&[], 50.0), None);
    }

    #[test]
    fn percentile_of_exact_match() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let (p, found) = percentile_of(&data, 3.0, 0.0).unwrap();
        assert!(found);
        assert_eq!(p, 60.0);
    }

    #[test]
    fn percentile_of_approximate_when_absent() {
        let data = vec![1.0, 2.0, 4.0, 5.0];
        let (p, found) = percentile_of(&data, 3.0, 0.0).unwrap();
        assert!(!found);
        assert_eq!(p, 50.0);
    }
}
