use crate::dataset::{Dataset, DatasetError};
use crate::fit_plot::draw_fit;
use crate::generate::{GenerateError, Generator};
use crate::params::{Params, ParamsError};
use crate::predict::{run_session, PredictError, Predictor};
use crate::stats::{Accuracy, Convergence, FitError, GradientDescent, TrainedModel};

use log::{info, warn};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/* =================== Public configuration types =================== */

#[derive(Debug, Clone)]
pub struct Config {
    pub params_path: PathBuf,
    pub action: Action,
}

#[derive(Debug, Clone)]
pub enum Action {
    Train(Train),
    Predict,
    Generate(Generate),
}

#[derive(Debug, Clone)]
pub struct Train {
    pub dataset: PathBuf,
    pub verbose: bool,
    pub plot: Option<PathBuf>,
    pub gradient_descent: GradientDescent,
}

#[derive(Debug, Clone)]
pub struct Generate {
    pub output: PathBuf,
    pub generator: Generator,
}

/* =================== Error type (no process::exit) =================== */

#[derive(thiserror::Error, Debug)]
pub enum CmdError {
    #[error("Error when reading the dataset: {0}")]
    Dataset(#[from] DatasetError),
    #[error("Error when processing the dataset: {0}")]
    Fit(#[from] FitError),
    #[error("Error with the parameter file: {0}")]
    Params(#[from] ParamsError),
    #[error("Error during prediction: {0}")]
    Predict(#[from] PredictError),
    #[error("Error when generating the dataset: {0}")]
    Generate(#[from] GenerateError),
    #[error("Error when drawing the plot: {0}")]
    Plot(String),
    #[error(
        "Error when drawing the plot: {} is the dataset, refusing to overwrite it",
        .0.display()
    )]
    PlotOverwritesDataset(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/* =================== Entry point =================== */

impl Config {
    pub fn run(&self) -> Result<(), CmdError> {
        match &self.action {
            Action::Train(t) => self.run_train(t, &mut io::stdout().lock()).map(|_| ()),
            Action::Predict => self.run_predict(),
            Action::Generate(g) => self.run_generate(g),
        }
    }
}

/* =================== Actions =================== */

impl Config {
    /// Trains on `t.dataset` and persists the result, reporting to `out`.
    pub fn run_train<W: Write>(&self, t: &Train, out: &mut W) -> Result<TrainedModel, CmdError> {
        if let Some(plot) = &t.plot {
            if same_file(plot, &t.dataset) {
                return Err(CmdError::PlotOverwritesDataset(plot.clone()));
            }
        }

        let dataset = Dataset::from_path(&t.dataset)?;
        info!("Loaded {} samples from {}", dataset.len(), t.dataset.display());

        let fit = t.gradient_descent.train(&dataset.x, &dataset.y)?;
        let model = fit.model;

        if t.verbose {
            writeln!(out, "With the given dataset, our two coefficients are:")?;
            writeln!(out, "\ttheta0 = {:.2}", model.intercept)?;
            writeln!(out, "\ttheta1 = {:.2}", model.slope)?;
            writeln!(
                out,
                "On the normalized data, after {} iterations: theta0 = {:.6}, theta1 = {:.6}",
                fit.convergence.iterations(),
                fit.normalized.intercept,
                fit.normalized.slope
            )?;
            let accuracy = Accuracy::evaluate(&model, &dataset.x, &dataset.y)?;
            writeln!(out, "{accuracy}")?;
        }
        if let Convergence::IterationCap { iterations } = fit.convergence {
            writeln!(
                out,
                "Note: gradient descent did not converge within {iterations} iterations, \
                 the stored parameters are the last estimate"
            )?;
        }

        Params::new(&model, &dataset.xlabel, &dataset.ylabel).save(&self.params_path)?;
        info!("Saved parameters to {}", self.params_path.display());

        if let Some(plot) = &t.plot {
            draw_fit(plot, &dataset, &model).map_err(|e| CmdError::Plot(e.to_string()))?;
            writeln!(out, "The plot has been stored in the file {}", plot.display())?;
        }

        writeln!(out, "Training successful, you can now use predict")?;
        Ok(fit)
    }

    fn run_predict(&self) -> Result<(), CmdError> {
        let predictor = Predictor::load(&self.params_path)?;
        if !predictor.trained {
            warn!("Running predict without trained parameters");
        }
        run_session(&predictor, io::stdin().lock(), io::stdout().lock())?;
        Ok(())
    }

    fn run_generate(&self, g: &Generate) -> Result<(), CmdError> {
        let written = g.generator.write_to_path(&g.output)?;
        info!("Wrote {written} samples");
        println!("The dataset has been generated and stored in the file {}", g.output.display());
        Ok(())
    }
}
