#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum FitError {
    #[error("x and y have different lengths: {len_x} vs {len_y}")]
    LengthMismatch { len_x: usize, len_y: usize },
    #[error("not enough points: got {len}, need at least {needed}")]
    NotEnoughPoints { len: usize, needed: usize },
    #[error("non-finite {axis} value at index {index}")]
    NonFinite { axis: &'static str, index: usize },
    #[error("degenerate {0}: every value is identical")]
    Degenerate(&'static str),
    #[error("cannot operate on an empty sequence")]
    EmptyInput,
    #[error("division by zero: {0}")]
    DivisionByZero(&'static str),
    #[error("numeric overflow: {0}")]
    NumericOverflow(&'static str),
    #[error("invalid training configuration: {0}")]
    InvalidConfig(String),
}

pub type FitResult<T> = Result<T, FitError>;
