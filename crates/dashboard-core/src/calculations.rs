//! Pure numeric building blocks shared by the aggregation engine and the
//! insight generator.

/// Trailing simple moving average with a partial window at the start.
///
/// The i-th output point averages the `min(i + 1, window)` most recent
/// input points, so the first points carry a value instead of a startup
/// gap. A `window` of 0 is treated as 1.
///
/// # Examples
///
/// ```
/// use dashboard_core::calculations::moving_average;
///
/// assert_eq!(moving_average(&[10.0, 20.0, 30.0, 40.0], 3), vec![10.0, 15.0, 20.0, 30.0]);
/// assert!(moving_average(&[], 3).is_empty());
/// ```
pub fn moving_average(series: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);
    series
        .iter()
        .enumerate()
        .map(|(i, _)| {
            let start = (i + 1).saturating_sub(window);
            let slice = &series[start..=i];
            slice.iter().sum::<f64>() / slice.len() as f64
        })
        .collect()
}

/// Percent change from `previous` to `current`.
///
/// Returns `None` as the explicit undefined marker when `previous` is 0,
/// never infinity and never a panic.
///
/// # Examples
///
/// ```
/// use dashboard_core::calculations::percent_change;
///
/// assert_eq!(percent_change(110.0, 100.0), Some(10.0));
/// assert_eq!(percent_change(5.0, 0.0), None);
/// ```
pub fn percent_change(current: f64, previous: f64) -> Option<f64> {
    if previous == 0.0 {
        return None;
    }
    Some((current - previous) / previous * 100.0)
}

/// Round to two decimal places, the resolution of a monetary amount.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── moving_average ────────────────────────────────────────────────────

    #[test]
    fn test_moving_average_partial_start_window() {
        let out = moving_average(&[10.0, 20.0, 30.0, 40.0], 3);
        assert_eq!(out, vec![10.0, 15.0, 20.0, 30.0]);
    }

    #[test]
    fn test_moving_average_window_one_is_identity() {
        let series = [5.0, 7.0, 9.0];
        assert_eq!(moving_average(&series, 1), series.to_vec());
    }

    #[test]
    fn test_moving_average_window_larger_than_series() {
        let out = moving_average(&[10.0, 20.0], 10);
        assert_eq!(out, vec![10.0, 15.0]);
    }

    #[test]
    fn test_moving_average_zero_window_treated_as_one() {
        let series = [1.0, 2.0];
        assert_eq!(moving_average(&series, 0), series.to_vec());
    }

    #[test]
    fn test_moving_average_empty_series() {
        assert!(moving_average(&[], 3).is_empty());
    }

    // ── percent_change ────────────────────────────────────────────────────

    #[test]
    fn test_percent_change_basic() {
        assert_eq!(percent_change(110.0, 100.0), Some(10.0));
    }

    #[test]
    fn test_percent_change_negative() {
        assert_eq!(percent_change(50.0, 100.0), Some(-50.0));
    }

    #[test]
    fn test_percent_change_zero_previous_is_undefined() {
        assert_eq!(percent_change(5.0, 0.0), None);
        assert_eq!(percent_change(0.0, 0.0), None);
    }

    // ── round2 ────────────────────────────────────────────────────────────

    #[test]
    fn test_round2() {
        assert!((round2(10.004) - 10.0).abs() < 1e-9);
        assert!((round2(10.567) - 10.57).abs() < 1e-9);
        assert!((round2(-1.239) + 1.24).abs() < 1e-9);
    }
}
