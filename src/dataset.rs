use std::fs::File;
use std::io::Read;
use std::path::Path;

pub const DEFAULT_DATASET: &str = "data.csv";

#[derive(thiserror::Error, Debug)]
pub enum DatasetError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("dataset has no header row")]
    MissingHeader,
    #[error("dataset needs two columns, found {0}")]
    TooFewColumns(usize),
    #[error("row {row}: missing value for '{column}'")]
    MissingValue { row: usize, column: String },
    #[error("row {row}: '{value}' is not a number ({column})")]
    BadValue { row: usize, column: String, value: String },
}

/// Two labelled columns of samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub xlabel: String,
    pub ylabel: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

fn parse_field(
    record: &csv::StringRecord,
    idx: usize,
    row: usize,
    column: &str,
) -> Result<f64, DatasetError> {
    let raw = record
        .get(idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| DatasetError::MissingValue { row, column: column.to_owned() })?;

    match raw.parse::<f64>() {
        Ok(val) if val.is_finite() => Ok(val),
        _ => Err(DatasetError::BadValue {
            row,
            column: column.to_owned(),
            value: raw.to_owned(),
        }),
    }
}

impl Dataset {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Reads a header row followed by x,y rows. Extra columns are ignored.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let header = rdr.headers()?.clone();
        if header.is_empty() {
            return Err(DatasetError::MissingHeader);
        }
        if header.len() < 2 {
            return Err(DatasetError::TooFewColumns(header.len()));
        }
        let xlabel = header[0].to_string();
        let ylabel = header[1].to_string();

        let mut x = Vec::new();
        let mut y = Vec::new();
        for (i, r) in rdr.records().enumerate() {
            let record = r?;
            // header is row 1
            let row = i + 2;
            x.push(parse_field(&record, 0, row, &xlabel)?);
            y.push(parse_field(&record, 1, row, &ylabel)?);
        }

        Ok(Self { xlabel, ylabel, x, y })
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}
