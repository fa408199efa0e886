/// Sorted copy of `values` in `f64::total_cmp` order (NaN above every number)
pub fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Type-7 quantile of already sorted values
///
/// For `n` sorted values the 0-based position is `h = (n - 1) * q`; the result
/// interpolates linearly between `sorted[floor(h)]` and the next element.
/// `q` is clamped to `[0, 1]`. Returns `None` for an empty slice.
pub fn quantile_type7(sorted: &[f64], q: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    if n == 1 {
        return Some(sorted[0]);
    }

    let h = (n - 1) as f64 * q.clamp(0.0, 1.0);
    let lower_idx = h.floor() as usize;
    let upper_idx = (lower_idx + 1).min(n - 1);
    let fraction = h - lower_idx as f64;

    Some(sorted[lower_idx] + fraction * (sorted[upper_idx] - sorted[lower_idx]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quartiles_of_five_values() {
        let sorted = [1.0, 1.5, 2.0, 2.5, 100.0];
        assert_eq!(quantile_type7(&sorted, 0.25), Some(1.5));
        assert_eq!(quantile_type7(&sorted, 0.5), Some(2.0));
        assert_eq!(quantile_type7(&sorted, 0.75), Some(2.5));
    }

    #[test]
    fn test_interpolates_between_ranks() {
        // h = 3 * 0.25 = 0.75 -> 1 + 0.75 * (2 - 1)
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile_type7(&sorted, 0.25), Some(1.75));
        assert_eq!(quantile_type7(&sorted, 0.75), Some(3.25));
    }

    #[test]
    fn test_extremes() {
        let sorted = [3.0, 7.0, 9.0];
        assert_eq!(quantile_type7(&sorted, 0.0), Some(3.0));
        assert_eq!(quantile_type7(&sorted, 1.0), Some(9.0));
        assert_eq!(quantile_type7(&sorted, 2.0), Some(9.0));
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(quantile_type7(&[], 0.5), None);
        assert_eq!(quantile_type7(&[42.0], 0.25), Some(42.0));
    }

    #[test]
    fn test_sorted_copy() {
        assert_eq!(sorted_copy(&[3.0, -1.0, 2.0]), vec![-1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_sorted_copy_puts_nan_last() {
        let sorted = sorted_copy(&[2.0, f64::NAN, -1.0]);
        assert_eq!(&sorted[..2], &[-1.0, 2.0]);
        assert!(sorted[2].is_nan());
    }
}
