use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal, NormalError};

use std::io::Write;
use std::path::Path;

pub const DEFAULT_OUTPUT: &str = "random.csv";
pub const DEFAULT_SAMPLES: usize = 100;
pub const DEFAULT_NOISE: f64 = 10.;
pub const HEADER: [&str; 2] = ["random x", "random y"];

const MAX_COEF: f64 = 100.;

#[derive(thiserror::Error, Debug)]
pub enum GenerateError {
    #[error("need at least 2 samples, got {0}")]
    TooFewSamples(usize),
    #[error("noise must be a finite, non-negative standard deviation, got {0}")]
    InvalidNoise(f64),
    #[error("distribution error: {0}")]
    Distribution(#[from] NormalError),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Generator {
    pub samples: usize,
    /// Standard deviation of the gaussian noise added to y.
    pub noise: f64,
    pub seed: Option<u64>,
}

impl Default for Generator {
    fn default() -> Self {
        Self { samples: DEFAULT_SAMPLES, noise: DEFAULT_NOISE, seed: None }
    }
}

impl Generator {
    fn validate(&self) -> Result<(), GenerateError> {
        if self.samples < 2 {
            return Err(GenerateError::TooFewSamples(self.samples));
        }
        if !self.noise.is_finite() || self.noise < 0. {
            return Err(GenerateError::InvalidNoise(self.noise));
        }
        Ok(())
    }

    /// Draws x from N(0, 1) and y = coef * x + N(0, noise), coef uniform in [0, 100).
    pub fn samples(&self) -> Result<Vec<(f64, f64)>, GenerateError> {
        self.validate()?;

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let feature = Normal::new(0., 1.)?;
        let noise = Normal::new(0., self.noise)?;
        let coef = rng.random::<f64>() * MAX_COEF;

        Ok((0..self.samples)
            .map(|_| {
                let x = feature.sample(&mut rng);
                (x, coef * x + noise.sample(&mut rng))
            })
            .collect())
    }

    pub fn write<W: Write>(&self, writer: W) -> Result<usize, GenerateError> {
        let samples = self.samples()?;
        let mut wtr = csv::Writer::from_writer(writer);

        wtr.write_record(HEADER)?;
        for (x, y) in &samples {
            wtr.write_record(&[x.to_string(), y.to_string()])?;
        }
        wtr.flush()?;
        Ok(samples.len())
    }

    pub fn write_to_path<P: AsRef<Path>>(&self, path: P) -> Result<usize, GenerateError> {
        let file = std::fs::File::create(path)?;
        self.write(file)
    }
}
