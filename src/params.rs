use crate::stats::LinReg;

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

pub const DEFAULT_PARAMS: &str = "values.json";
pub const PARAMS_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug)]
pub enum ParamsError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed parameter file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("parameter file version {found} is newer than supported version {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
}

fn default_version() -> u32 {
    PARAMS_VERSION
}

/// Trained coefficients handed from `train` to `predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Params {
    #[serde(default = "default_version")]
    pub version: u32,
    pub theta0: f64,
    pub theta1: f64,
    pub xlabel: String,
    pub ylabel: String,
}

impl Params {
    pub fn new(model: &LinReg, xlabel: &str, ylabel: &str) -> Self {
        Self {
            version: PARAMS_VERSION,
            theta0: model.intercept,
            theta1: model.slope,
            xlabel: xlabel.to_owned(),
            ylabel: ylabel.to_owned(),
        }
    }

    pub fn model(&self) -> LinReg {
        LinReg::from_val(self.theta0, self.theta1)
    }

    /// Overwrites `path` with these parameters.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ParamsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// `Ok(None)` when nothing has been saved at `path` yet.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Option<Self>, ParamsError> {
        let contents = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let params: Params = serde_json::from_str(&contents)?;
        if params.version > PARAMS_VERSION {
            return Err(ParamsError::UnsupportedVersion {
                found: params.version,
                supported: PARAMS_VERSION,
            });
        }
        Ok(Some(params))
    }
}
