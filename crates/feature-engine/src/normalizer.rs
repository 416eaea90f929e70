//! Min-Max Normalization

/// Scale `value` into the `[min, max]` range observed at fit time.
///
/// No clamping: values outside the fitted range map outside `[0, 1]`, and a
/// zero-width range yields NaN or an infinity which callers propagate.
#[inline]
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    (value - min) / (max - min)
}

/// Compute `(min, max)` over a column.
///
/// Any NaN makes both bounds NaN. An empty column yields `(inf, -inf)`.
pub fn bounds_of<I>(values: I) -> (f64, f64)
where
    I: IntoIterator<Item = f64>,
{
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for value in values {
        if value.is_nan() {
            return (f64::NAN, f64::NAN);
        }
        min = min.min(value);
        max = max.max(value);
    }
    (min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_range() {
        assert_eq!(normalize(0.0, 0.0, 4.0), 0.0);
        assert_eq!(normalize(2.0, 0.0, 4.0), 0.5);
        assert_eq!(normalize(4.0, 0.0, 4.0), 1.0);
    }

    #[test]
    fn test_normalize_does_not_clamp() {
        assert_eq!(normalize(8.0, 0.0, 4.0), 2.0);
        assert_eq!(normalize(-4.0, 0.0, 4.0), -1.0);
    }

    #[test]
    fn test_zero_width_range() {
        assert!(normalize(3.0, 3.0, 3.0).is_nan());
        assert_eq!(normalize(4.0, 3.0, 3.0), f64::INFINITY);
    }

    #[test]
    fn test_bounds_of() {
        assert_eq!(bounds_of([3.0, -1.0, 7.5, 0.0]), (-1.0, 7.5));
        assert_eq!(bounds_of([2.0]), (2.0, 2.0));
    }

    #[test]
    fn test_bounds_of_nan() {
        let (min, max) = bounds_of([1.0, f64::NAN, 3.0]);
        assert!(min.is_nan() && max.is_nan());
    }
}
