use crate::params::{Params, ParamsError};
use crate::stats::LinReg;

use log::{info, warn};
use std::io::{BufRead, Write};
use std::path::Path;

#[derive(thiserror::Error, Debug)]
pub enum PredictError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("'{0}' is not a valid number")]
    InvalidInput(String),
    #[error(transparent)]
    Params(#[from] ParamsError),
}

/// Evaluates the persisted model, or the zero model if nothing was trained yet.
#[derive(Debug, Clone, PartialEq)]
pub struct Predictor {
    pub model: LinReg,
    pub xlabel: String,
    pub ylabel: String,
    pub trained: bool,
}

impl Default for Predictor {
    fn default() -> Self {
        Self::untrained()
    }
}

impl Predictor {
    pub fn untrained() -> Self {
        Self {
            model: LinReg::new(),
            xlabel: "xlabel".to_owned(),
            ylabel: "ylabel".to_owned(),
            trained: false,
        }
    }

    pub fn from_params(params: &Params) -> Self {
        Self {
            model: params.model(),
            xlabel: params.xlabel.clone(),
            ylabel: params.ylabel.clone(),
            trained: true,
        }
    }

    /// A missing parameter file is not an error: the predictor falls back to (0, 0).
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PredictError> {
        let path = path.as_ref();
        match Params::load(path)? {
            Some(params) => {
                info!("Loaded parameters from {}", path.display());
                Ok(Self::from_params(&params))
            },
            None => {
                warn!("{} not found, predicting with an untrained model", path.display());
                Ok(Self::untrained())
            },
        }
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.model.calculate(x)
    }
}

fn parse_x(line: &str) -> Result<f64, PredictError> {
    let trimmed = line.trim();
    match trimmed.parse::<f64>() {
        Ok(x) if x.is_finite() => Ok(x),
        _ => Err(PredictError::InvalidInput(trimmed.to_owned())),
    }
}

/// Prompts for x until `input` is exhausted, answering each with the estimated y.
pub fn run_session<R: BufRead, W: Write>(
    predictor: &Predictor,
    mut input: R,
    mut output: W,
) -> Result<(), PredictError> {
    writeln!(output, "Welcome to the linear regression predictor")?;
    if !predictor.trained {
        writeln!(output, "WARNING: no trained parameters found! Make sure to run train first.")?;
        writeln!(output, "Without training, predict will just return 0 no matter your input.")?;
    }

    let mut line = String::new();
    loop {
        write!(output, "Please, enter the value of x ({}) you want to test: ", predictor.xlabel)?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Ok(());
        }

        let x = parse_x(&line)?;
        writeln!(
            output,
            "For the given value of x, y ({}) would be: {:.2}",
            predictor.ylabel,
            predictor.predict(x)
        )?;
    }
}
