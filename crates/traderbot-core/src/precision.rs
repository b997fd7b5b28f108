//! Fixed decimal-place rounding for reported floats.

/// Round `value` half away from zero to `dp` decimal places.
///
/// Non-finite values are returned unchanged.
pub fn round_dp(value: f64, dp: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(dp as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_four_places() {
        assert_eq!(round_dp(1.266_666_7, 4), 1.2667);
        assert_eq!(round_dp(1.2, 4), 1.2);
    }

    #[test]
    fn test_round_two_places() {
        assert_eq!(round_dp(0.624_9, 2), 0.62);
        assert_eq!(round_dp(0.676, 2), 0.68);
    }

    #[test]
    fn test_round_non_finite_passthrough() {
        assert!(round_dp(f64::NAN, 2).is_nan());
        assert_eq!(round_dp(f64::INFINITY, 2), f64::INFINITY);
    }
}
