use thiserror::Error;
use vng_core::error::CoreError;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("no files to analyze")]
    NoFiles,

    #[error("no metrics found in any of the {0} file(s)")]
    NoMetrics(usize),

    #[error("too many files: {count} exceeds the limit of {max}")]
    TooManyFiles { count: usize, max: usize },

    #[error("duplicate source name: {0}")]
    DuplicateSource(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}
