use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum PersistenceError {
    /// The attendance source could not be opened at all.
    SourceUnavailable { path: PathBuf, source: io::Error },
    Io(io::Error),
    Csv(csv::Error),
}

impl PersistenceError {
    /// True when the failure came from reading the source rather than its content.
    pub fn is_source_unavailable(&self) -> bool {
        match self {
            PersistenceError::SourceUnavailable { .. } | PersistenceError::Io(_) => true,
            PersistenceError::Csv(err) => err.is_io_error(),
        }
    }
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::SourceUnavailable { path, source } => {
                write!(f, "attendance source {} unavailable: {source}", path.display())
            }
            PersistenceError::Io(err) => write!(f, "io error: {err}"),
            PersistenceError::Csv(err) => write!(f, "csv error: {err}"),
        }
    }
}

impl std::error::Error for PersistenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistenceError::SourceUnavailable { source, .. } => Some(source),
            PersistenceError::Io(err) => Some(err),
            PersistenceError::Csv(err) => Some(err),
        }
    }
}

impl From<io::Error> for PersistenceError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<csv::Error> for PersistenceError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

pub mod file;

pub use file::{
    MalformedRow, ParseReport, load_dataset_from_csv, read_dataset, read_dataset_with_report,
};
