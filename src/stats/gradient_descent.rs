use crate::stats::fiterror::{FitError, FitResult};
use crate::stats::linreg::LinReg;
use crate::stats::normalize::{denormalize, normalize};

use log::{debug, info, warn};
use std::fmt;

pub const DEFAULT_LEARNING_RATE: f64 = 0.1;
pub const DEFAULT_TOLERANCE: f64 = 1e-10;
pub const DEFAULT_MAX_ITERATIONS: usize = 1_000_000;

const MIN_SAMPLES: usize = 2;
const PROGRESS_EVERY: usize = 100_000;

/// Batch gradient descent settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientDescent {
    pub learning_rate: f64,
    /// Both parameters must move less than this in one step to count as converged.
    pub tolerance: f64,
    pub max_iterations: usize,
}

impl Default for GradientDescent {
    fn default() -> Self {
        Self {
            learning_rate: DEFAULT_LEARNING_RATE,
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Convergence {
    Converged { iterations: usize },
    IterationCap { iterations: usize },
}

impl Convergence {
    pub fn converged(&self) -> bool {
        matches!(self, Convergence::Converged { .. })
    }
    pub fn iterations(&self) -> usize {
        match self {
            Convergence::Converged { iterations } | Convergence::IterationCap { iterations } => {
                *iterations
            },
        }
    }
}

impl fmt::Display for Convergence {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Convergence::Converged { iterations } => {
                write!(f, "converged after {iterations} iterations")
            },
            Convergence::IterationCap { iterations } => {
                write!(f, "stopped at the iteration cap ({iterations}) without converging")
            },
        }
    }
}

/// Result of a training run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainedModel {
    /// Parameters on the scale of the original data.
    pub model: LinReg,
    /// Parameters as found on the normalized data.
    pub normalized: LinReg,
    pub convergence: Convergence,
}

/// Mean gradients of the squared error cost at (t0, t1).
pub fn gradients(model: &LinReg, x: &[f64], y: &[f64]) -> (f64, f64) {
    let n = x.len() as f64;
    let (sum0, sum1) = x.iter().zip(y).fold((0.0, 0.0), |(s0, s1), (&xi, &yi)| {
        let err = model.calculate(xi) - yi;
        (s0 + err, s1 + err * xi)
    });
    (sum0 / n, sum1 / n)
}

/// Rejects sample sets that have no well-defined fit.
pub fn validate_samples(x: &[f64], y: &[f64]) -> FitResult<()> {
    if x.len() != y.len() {
        return Err(FitError::LengthMismatch { len_x: x.len(), len_y: y.len() });
    }
    if x.len() < MIN_SAMPLES {
        return Err(FitError::NotEnoughPoints { len: x.len(), needed: MIN_SAMPLES });
    }
    if let Some(index) = x.iter().position(|v| !v.is_finite()) {
        return Err(FitError::NonFinite { axis: "x", index });
    }
    if let Some(index) = y.iter().position(|v| !v.is_finite()) {
        return Err(FitError::NonFinite { axis: "y", index });
    }
    if x.iter().all(|&v| v == x[0]) {
        return Err(FitError::Degenerate("x"));
    }
    if y.iter().all(|&v| v == y[0]) {
        return Err(FitError::Degenerate("y"));
    }
    Ok(())
}

impl GradientDescent {
    pub fn validate(&self) -> FitResult<()> {
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(FitError::InvalidConfig(format!(
                "learning rate must be positive, got {}",
                self.learning_rate
            )));
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(FitError::InvalidConfig(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(FitError::InvalidConfig("max iterations must be at least 1".to_owned()));
        }
        Ok(())
    }

    /// Runs the descent from (0, 0) on data that is already scaled.
    pub fn descend(&self, x: &[f64], y: &[f64]) -> FitResult<(LinReg, Convergence)> {
        let mut model = LinReg::new();

        for iteration in 1..=self.max_iterations {
            let (grad0, grad1) = gradients(&model, x, y);
            let next = LinReg::from_val(
                model.intercept - self.learning_rate * grad0,
                model.slope - self.learning_rate * grad1,
            );

            if !next.intercept.is_finite() || !next.slope.is_finite() {
                return Err(FitError::NumericOverflow("gradient descent diverged"));
            }

            let step0 = (next.intercept - model.intercept).abs();
            let step1 = (next.slope - model.slope).abs();
            model = next;

            if step0 < self.tolerance && step1 < self.tolerance {
                return Ok((model, Convergence::Converged { iterations: iteration }));
            }
            if iteration % PROGRESS_EVERY == 0 {
                debug!("iteration {iteration}: {model}, gradients ({grad0:e}, {grad1:e})");
            }
        }

        Ok((model, Convergence::IterationCap { iterations: self.max_iterations }))
    }

    /// Fits y = t0 + t1 * x: validate, normalize, descend, denormalize.
    pub fn train(&self, x: &[f64], y: &[f64]) -> FitResult<TrainedModel> {
        self.validate()?;
        validate_samples(x, y)?;

        let x_norm = normalize(x)?;
        let y_norm = normalize(y)?;

        let (normalized, convergence) = self.descend(&x_norm, &y_norm)?;
        let (t0, t1) = denormalize(normalized.intercept, normalized.slope, x, y)?;
        let model = LinReg::from_val(t0, t1);

        match convergence {
            Convergence::Converged { .. } => info!("Gradient descent {convergence}"),
            Convergence::IterationCap { .. } => warn!("Gradient descent {convergence}"),
        }
        if let Some(reference) = LinReg::least_squares(x, y) {
            debug!("gradient descent: {model}, closed form: {reference}");
        }

        Ok(TrainedModel { model, normalized, convergence })
    }
}

/// Trains with the default settings.
pub fn train(x: &[f64], y: &[f64]) -> FitResult<TrainedModel> {
    GradientDescent::default().train(x, y)
}

#[cfg(test)]
mod tests {
    use super::{gradients, train, validate_samples, Convergence, GradientDescent};
    use crate::stats::accuracy::Accuracy;
    use crate::stats::fiterror::FitError;
    use crate::stats::linreg::LinReg;

    #[test]
    fn test_doubling_line() {
        let x = [1., 2., 3.];
        let y = [2., 4., 6.];

        let fit = train(&x, &y).unwrap();
        assert!(fit.convergence.converged());
        assert!(fit.model.intercept.abs() < 1e-4, "{}", fit.model);
        assert!((fit.model.slope - 2.).abs() < 1e-4, "{}", fit.model);

        let acc = Accuracy::evaluate(&fit.model, &x, &y).unwrap();
        assert!(acc.mae < 1e-4);
        assert!(acc.mse < 1e-8);
        assert!(acc.rmse < 1e-4);
        assert!((acc.r2.unwrap() - 1.).abs() < 1e-6);
    }

    #[test]
    fn test_deterministic() {
        let x = [3., 7., 1., 9., 4., 6.];
        let y = [11.2, 20.5, 4.9, 28.1, 13.0, 18.7];

        let first = train(&x, &y).unwrap();
        let second = train(&x, &y).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_matches_least_squares() {
        let x = [12., 25., 33., 47., 51., 68., 74., 90.];
        let y = [240., 310., 325., 410., 405., 470., 520., 555.];

        let fit = train(&x, &y).unwrap();
        let reference = LinReg::least_squares(&x, &y).unwrap();

        assert!(fit.convergence.converged());
        assert!((fit.model.slope - reference.slope).abs() < 1e-4);
        assert!((fit.model.intercept - reference.intercept).abs() < 1e-2);
        for xi in [0., 50., 100.] {
            assert!((fit.model.calculate(xi) - reference.calculate(xi)).abs() < 1e-2);
        }
    }

    #[test]
    fn test_negative_slope() {
        let x = [1., 2., 3., 4., 5.];
        let y = [10., 8., 6., 4., 2.];

        let fit = train(&x, &y).unwrap();
        assert!((fit.model.slope + 2.).abs() < 1e-4);
        assert!((fit.model.intercept - 12.).abs() < 1e-3);
    }

    #[test]
    fn test_degenerate_input() {
        let x = [1., 1., 1.];
        let y = [2., 2., 2.];
        let err = train(&x, &y).unwrap_err();
        assert_eq!(err, FitError::Degenerate("x"));

        let x = [1., 2., 3.];
        assert_eq!(train(&x, &y).unwrap_err(), FitError::Degenerate("y"));
    }

    #[test]
    fn test_too_few_samples() {
        assert_eq!(
            train(&[1.], &[2.]).unwrap_err(),
            FitError::NotEnoughPoints { len: 1, needed: 2 }
        );
        assert_eq!(train(&[], &[]).unwrap_err(), FitError::NotEnoughPoints { len: 0, needed: 2 });
    }

    #[test]
    fn test_length_mismatch() {
        assert_eq!(
            validate_samples(&[1., 2., 3.], &[1., 2.]),
            Err(FitError::LengthMismatch { len_x: 3, len_y: 2 })
        );
    }

    #[test]
    fn test_non_finite_sample() {
        assert_eq!(
            validate_samples(&[1., 2., 3.], &[1., f64::NAN, 3.]),
            Err(FitError::NonFinite { axis: "y", index: 1 })
        );
    }

    #[test]
    fn test_zero_max_is_division_by_zero() {
        let x = [-3., -2., 0.];
        let y = [1., 2., 3.];
        assert!(matches!(train(&x, &y), Err(FitError::DivisionByZero(_))));
    }

    #[test]
    fn test_iteration_cap_is_not_fatal() {
        let gd = GradientDescent { max_iterations: 5, ..GradientDescent::default() };
        let fit = gd.train(&[1., 2., 3.], &[2., 4., 6.]).unwrap();

        assert_eq!(fit.convergence, Convergence::IterationCap { iterations: 5 });
        assert!(!fit.convergence.converged());
        assert!(fit.model.intercept.is_finite() && fit.model.slope.is_finite());
    }

    #[test]
    fn test_divergence_reported() {
        let gd = GradientDescent { learning_rate: 1e6, ..GradientDescent::default() };
        assert!(matches!(
            gd.train(&[1., 2., 3.], &[2., 4., 6.]),
            Err(FitError::NumericOverflow(_))
        ));
    }

    #[test]
    fn test_invalid_config() {
        for gd in [
            GradientDescent { learning_rate: 0., ..GradientDescent::default() },
            GradientDescent { learning_rate: f64::NAN, ..GradientDescent::default() },
            GradientDescent { tolerance: -1., ..GradientDescent::default() },
            GradientDescent { max_iterations: 0, ..GradientDescent::default() },
        ] {
            assert!(matches!(gd.validate(), Err(FitError::InvalidConfig(_))));
        }
    }

    #[test]
    fn test_gradients_zero_at_optimum() {
        let model = LinReg::from_val(1., 2.);
        let x = [0., 1., 2.];
        let y = [1., 3., 5.];
        assert_eq!(gradients(&model, &x, &y), (0., 0.));
    }
}
