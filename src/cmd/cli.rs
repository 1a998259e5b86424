use clap::{Args, Parser, Subcommand, ValueHint};
use std::path::PathBuf;

use crate::cmd::config::{Action, Config, Generate as GenerateCfg, Train as TrainCfg};
use crate::dataset::DEFAULT_DATASET;
use crate::fit_plot::DEFAULT_PLOT;
use crate::generate::{Generator, DEFAULT_NOISE, DEFAULT_OUTPUT, DEFAULT_SAMPLES};
use crate::params::DEFAULT_PARAMS;
use crate::stats::gradient_descent::{
    GradientDescent, DEFAULT_LEARNING_RATE, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE,
};

#[derive(Debug, Parser)]
#[command(
    name = "linreg",
    about = "Univariate linear regression trained with gradient descent",
    version,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Path to the trained parameter file
    #[arg(long = "params", value_name = "PATH", default_value = DEFAULT_PARAMS, global = true)]
    pub params_path: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fit the model on a CSV dataset and store the parameters
    Train(TrainArgs),

    /// Read x values from stdin and print the estimated y
    Predict,

    /// Write a synthetic dataset with a linear trend and gaussian noise
    Generate(GenerateArgs),
}

/* ------------------------- train ------------------------- */

#[derive(Debug, Args)]
pub struct TrainArgs {
    /// CSV dataset with an x and a y column
    #[arg(default_value = DEFAULT_DATASET, value_hint = ValueHint::FilePath)]
    pub dataset: PathBuf,

    /// Print the coefficients and accuracy metrics
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Write a plot of the data and the fitted line
    #[arg(short = 'p', long = "plot")]
    pub plot: bool,

    /// SVG file the plot is written to
    #[arg(long = "plot-file", value_name = "SVG", default_value = DEFAULT_PLOT,
        value_hint = ValueHint::FilePath)]
    pub plot_file: PathBuf,

    /// Gradient descent step size
    #[arg(long = "learning-rate", default_value_t = DEFAULT_LEARNING_RATE)]
    pub learning_rate: f64,

    /// Convergence threshold on the change of both parameters
    #[arg(long = "tolerance", default_value_t = DEFAULT_TOLERANCE)]
    pub tolerance: f64,

    /// Give up converging after this many iterations
    #[arg(long = "max-iterations", default_value_t = DEFAULT_MAX_ITERATIONS)]
    pub max_iterations: usize,
}

/* ----------------------- generate ----------------------- */

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// CSV file to write
    #[arg(default_value = DEFAULT_OUTPUT, value_hint = ValueHint::FilePath)]
    pub output: PathBuf,

    /// Number of samples
    #[arg(short = 's', long = "samples", default_value_t = DEFAULT_SAMPLES)]
    pub samples: usize,

    /// Standard deviation of the noise applied to y
    #[arg(short = 'n', long = "noise", default_value_t = DEFAULT_NOISE)]
    pub noise: f64,

    /// Seed for reproducible output
    #[arg(long = "seed")]
    pub seed: Option<u64>,
}

// -------- Map CLI -> Config/Action types --------

impl Cli {
    pub fn into_config(self) -> Config {
        let params_path = self.params_path;

        match self.command {
            Commands::Train(args) => Config {
                params_path,
                action: Action::Train(TrainCfg {
                    dataset: args.dataset,
                    verbose: args.verbose,
                    plot: args.plot.then_some(args.plot_file),
                    gradient_descent: GradientDescent {
                        learning_rate: args.learning_rate,
                        tolerance: args.tolerance,
                        max_iterations: args.max_iterations,
                    },
                }),
            },

            Commands::Predict => Config { params_path, action: Action::Predict },

            Commands::Generate(args) => Config {
                params_path,
                action: Action::Generate(GenerateCfg {
                    output: args.output,
                    generator: Generator {
                        samples: args.samples,
                        noise: args.noise,
                        seed: args.seed,
                    },
                }),
            },
        }
    }
}
