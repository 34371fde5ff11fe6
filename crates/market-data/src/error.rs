use core_types::CoreError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Required column '{0}' is missing from the header")]
    MissingColumn(String),

    #[error("Bad value on line {line}: {message}")]
    Parse { line: u64, message: String },

    #[error("Invalid price series: {0}")]
    Series(#[from] CoreError),
}
