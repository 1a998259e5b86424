use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinReg {
    pub intercept: f64,
    pub slope: f64,
}

impl fmt::Display for LinReg {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "y = {} + {} * x", self.intercept, self.slope)
    }
}

impl Default for LinReg {
    fn default() -> Self {
        Self::new()
    }
}

impl LinReg {
    pub fn new() -> Self {
        Self { intercept: 0., slope: 0. }
    }
    /// Estimated y for `x`.
    pub fn calculate(&self, x: f64) -> f64 {
        estimate(self.intercept, self.slope, x)
    }
    pub fn from_val(intercept: f64, slope: f64) -> Self {
        Self { intercept, slope }
    }

    /// Closed-form ordinary least squares. Returns `None` when x has no variance.
    pub fn least_squares(x: &[f64], y: &[f64]) -> Option<Self> {
        if x.len() != y.len() || x.len() < 2 {
            return None;
        }

        let n = x.len() as f64;
        let avg_x: f64 = x.iter().sum::<f64>() / n;
        let avg_y: f64 = y.iter().sum::<f64>() / n;

        let ss_xx: f64 = x.iter().map(|value| (value - avg_x).powi(2)).sum();
        let ss_xy: f64 =
            x.iter().zip(y.iter()).map(|(xi, yi)| (xi - avg_x) * (yi - avg_y)).sum();

        if ss_xx.abs() < 1e-12 {
            return None;
        }

        let slope = ss_xy / ss_xx;
        let intercept = avg_y - slope * avg_x;

        Some(Self { intercept, slope })
    }
}

pub fn estimate(t0: f64, t1: f64, x: f64) -> f64 {
    t0 + t1 * x
}

#[cfg(test)]
mod tests {
    use super::{estimate, LinReg};

    #[test]
    fn test_estimate_known_value() {
        assert_eq!(estimate(1., 2., 5.), 11.0);
        assert_eq!(LinReg::from_val(1., 2.).calculate(5.), 11.0);
    }

    #[test]
    fn test_estimate_is_linear() {
        let (t0, t1) = (-3.5, 0.75);
        for (a, b) in [(0., 1.), (10., -4.), (2.5, 2.5), (-100., 64.)] {
            let lhs = estimate(t0, t1, a) - estimate(t0, t1, b);
            assert!((lhs - t1 * (a - b)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_untrained_model_returns_zero() {
        let model = LinReg::default();
        assert_eq!(model.calculate(42.), 0.);
        assert_eq!(model.calculate(-7.), 0.);
    }

    #[test]
    fn test_least_squares_exact_line() {
        let x = [0.0, 1.0, 2.0, 3.0];
        let y = [1.0, 3.0, 5.0, 7.0];

        let model = LinReg::least_squares(&x, &y).unwrap();
        assert!((model.slope - 2.0).abs() < 1e-12);
        assert!((model.intercept - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_least_squares_constant_x() {
        let x = [1.0, 1.0, 1.0];
        let y = [1.0, 2.0, 3.0];

        assert_eq!(LinReg::least_squares(&x, &y), None);
    }
}
