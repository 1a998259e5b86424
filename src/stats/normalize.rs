use crate::stats::fiterror::{FitError, FitResult};

use statrs::statistics::Statistics;

fn max_of(values: &[f64]) -> FitResult<f64> {
    if values.is_empty() {
        return Err(FitError::EmptyInput);
    }
    let max = Statistics::max(values);
    if !max.is_finite() {
        return Err(FitError::NumericOverflow("maximum is not finite"));
    }
    Ok(max)
}

/// Divides every value by the largest one.
pub fn normalize(values: &[f64]) -> FitResult<Vec<f64>> {
    let max = max_of(values)?;
    if max == 0.0 {
        return Err(FitError::DivisionByZero("maximum value is zero"));
    }

    let scaled: Vec<f64> = values.iter().map(|v| v / max).collect();
    if scaled.iter().any(|v| !v.is_finite()) {
        return Err(FitError::NumericOverflow("normalized value is not finite"));
    }
    Ok(scaled)
}

/// Maps parameters fitted on `normalize(x)`, `normalize(y)` back onto the scale of `x` and `y`.
pub fn denormalize(t0: f64, t1: f64, x: &[f64], y: &[f64]) -> FitResult<(f64, f64)> {
    let max_x = max_of(x)?;
    let max_y = max_of(y)?;
    if max_x == 0.0 {
        return Err(FitError::DivisionByZero("maximum x is zero"));
    }

    let real_t0 = t0 * max_y;
    let real_t1 = t1 * max_y / max_x;
    if !real_t0.is_finite() || !real_t1.is_finite() {
        return Err(FitError::NumericOverflow("denormalized parameters are not finite"));
    }
    Ok((real_t0, real_t1))
}

#[cfg(test)]
mod tests {
    use super::{denormalize, normalize};
    use crate::stats::fiterror::FitError;

    #[test]
    fn test_normalize_max_is_one() {
        let values = [2., 8., 4., 0.5];
        let scaled = normalize(&values).unwrap();

        assert_eq!(scaled, vec![0.25, 1., 0.5, 0.0625]);
        assert_eq!(scaled.iter().cloned().fold(f64::NEG_INFINITY, f64::max), 1.);
    }

    #[test]
    fn test_normalize_zero_max() {
        let values = [0., -1., -3.];
        assert!(matches!(normalize(&values), Err(FitError::DivisionByZero(_))));
    }

    #[test]
    fn test_normalize_all_zero() {
        let values = [0., 0., 0.];
        assert!(matches!(normalize(&values), Err(FitError::DivisionByZero(_))));
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize(&[]), Err(FitError::EmptyInput));
    }

    #[test]
    fn test_normalize_infinite() {
        let values = [1., f64::INFINITY];
        assert!(matches!(normalize(&values), Err(FitError::NumericOverflow(_))));
    }

    #[test]
    fn test_denormalize_scales_back() {
        let x = [1., 2., 4.];
        let y = [10., 20., 30.];

        let (t0, t1) = denormalize(0.5, 0.25, &x, &y).unwrap();
        assert_eq!(t0, 15.);
        assert_eq!(t1, 0.25 * 30. / 4.);
    }

    #[test]
    fn test_denormalize_inverts_normalized_fit() {
        // y = 3 + 2x, fitted exactly in normalized space
        let x = [1., 2., 5.];
        let y: Vec<f64> = x.iter().map(|v| 3. + 2. * v).collect();
        let (max_x, max_y) = (5., 13.);
        let t0_norm = 3. / max_y;
        let t1_norm = 2. * max_x / max_y;

        let (t0, t1) = denormalize(t0_norm, t1_norm, &x, &y).unwrap();
        assert!((t0 - 3.).abs() < 1e-12);
        assert!((t1 - 2.).abs() < 1e-12);
    }

    #[test]
    fn test_denormalize_zero_x() {
        let x = [0., 0.];
        let y = [1., 2.];
        assert!(matches!(denormalize(1., 1., &x, &y), Err(FitError::DivisionByZero(_))));
    }
}
