use crate::stats::fiterror::{FitError, FitResult};
use crate::stats::linreg::LinReg;

use statrs::statistics::Statistics;

use std::fmt;

fn check_lengths(y: &[f64], y_hat: &[f64]) -> FitResult<()> {
    if y.len() != y_hat.len() {
        return Err(FitError::LengthMismatch { len_x: y_hat.len(), len_y: y.len() });
    }
    if y.is_empty() {
        return Err(FitError::EmptyInput);
    }
    Ok(())
}

fn residuals<'a>(y: &'a [f64], y_hat: &'a [f64]) -> impl Iterator<Item = f64> + 'a {
    y.iter().zip(y_hat).map(|(&yi, &yhi)| yi - yhi)
}

/// Mean absolute error.
pub fn mae(y: &[f64], y_hat: &[f64]) -> FitResult<f64> {
    check_lengths(y, y_hat)?;
    Ok(residuals(y, y_hat).map(f64::abs).sum::<f64>() / y.len() as f64)
}

/// Mean squared error.
pub fn mse(y: &[f64], y_hat: &[f64]) -> FitResult<f64> {
    check_lengths(y, y_hat)?;
    Ok(residuals(y, y_hat).map(|r| r.powi(2)).sum::<f64>() / y.len() as f64)
}

pub fn rmse(y: &[f64], y_hat: &[f64]) -> FitResult<f64> {
    Ok(mse(y, y_hat)?.sqrt())
}

/// Coefficient of determination. Fails when y has no variance.
pub fn r_squared(y: &[f64], y_hat: &[f64]) -> FitResult<f64> {
    check_lengths(y, y_hat)?;

    let y_mean = Statistics::mean(y);
    let ss_res: f64 = residuals(y, y_hat).map(|r| r.powi(2)).sum();
    let ss_tot: f64 = y.iter().map(|&yi| (yi - y_mean).powi(2)).sum();

    if ss_tot == 0.0 {
        return Err(FitError::DivisionByZero("target has zero variance"));
    }

    Ok(1.0 - ss_res / ss_tot)
}

/// Fit quality of a model against the samples it was trained on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Accuracy {
    pub mae: f64,
    pub mse: f64,
    pub rmse: f64,
    /// `None` when the target is constant and R² is undefined.
    pub r2: Option<f64>,
}

impl Accuracy {
    pub fn evaluate(model: &LinReg, x: &[f64], y: &[f64]) -> FitResult<Self> {
        if x.len() != y.len() {
            return Err(FitError::LengthMismatch { len_x: x.len(), len_y: y.len() });
        }
        let predicted: Vec<f64> = x.iter().map(|&xi| model.calculate(xi)).collect();

        let mse = mse(y, &predicted)?;
        let r2 = match r_squared(y, &predicted) {
            Ok(r2) => Some(r2),
            Err(FitError::DivisionByZero(_)) => None,
            Err(e) => return Err(e),
        };

        Ok(Self { mae: mae(y, &predicted)?, mse, rmse: mse.sqrt(), r2 })
    }
}

impl fmt::Display for Accuracy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Here are the various metrics for accuracy:")?;
        writeln!(f, "\tMAE (Mean Absolute Error) = {:.2}", self.mae)?;
        writeln!(f, "\tMSE (Mean Square Error) = {:.2}", self.mse)?;
        writeln!(f, "\tRMSE (Root Mean Squared Error) = {:.2}", self.rmse)?;
        match self.r2 {
            Some(r2) => write!(f, "\tR-squared (Coefficient of determination) = {:.2}", r2),
            None => write!(f, "\tR-squared (Coefficient of determination) = undefined"),
        }
    }
}
