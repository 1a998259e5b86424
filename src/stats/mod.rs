pub mod accuracy;
pub mod fiterror;
pub mod gradient_descent;
pub mod linreg;
pub mod normalize;

pub use accuracy::{mae, mse, r_squared, rmse, Accuracy};
pub use fiterror::{FitError, FitResult};
pub use gradient_descent::{train, validate_samples, Convergence, GradientDescent, TrainedModel};
pub use linreg::{estimate, LinReg};
pub use normalize::{denormalize, normalize};
