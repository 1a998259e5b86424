pub mod cmd;
pub mod dataset;
pub mod fit_plot;
pub mod generate;
pub mod params;
pub mod predict;
pub mod stats;

pub use dataset::Dataset;
pub use params::Params;
pub use predict::Predictor;
pub use stats::{Accuracy, GradientDescent, LinReg};
