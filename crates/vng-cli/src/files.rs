//! Report file reading and validation.
//!
//! Files are read and parsed in parallel. A file that fails validation or
//! parsing is set aside with its reason; the rest carry on.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use thiserror::Error;
use tracing::warn;
use vng_core::models::report::ParsedFile;
use vng_parser::ParsingError;

use crate::config::CliConfig;

#[derive(Debug, Error)]
pub enum FileError {
    #[error("unsupported file type '{0}'")]
    UnsupportedExtension(String),

    #[error("file is {size} bytes, above the {max} byte limit")]
    TooLarge { size: u64, max: u64 },

    #[error("file is empty")]
    Empty,

    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Parse(#[from] ParsingError),
}

/// A file that could not be used, and why.
#[derive(Debug)]
pub struct Rejected {
    pub path: PathBuf,
    pub error: FileError,
}

#[derive(Debug, Default)]
pub struct LoadedReports {
    /// Parsed files in the order they were given.
    pub files: Vec<ParsedFile>,
    pub rejected: Vec<Rejected>,
}

/// Check a path against the configured extension and size limits, then
/// read it as text.
pub fn read_report(path: &Path, config: &CliConfig) -> Result<String, FileError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    if !config.allows_extension(ext) {
        return Err(FileError::UnsupportedExtension(ext.to_string()));
    }

    let size = std::fs::metadata(path)?.len();
    if size == 0 {
        return Err(FileError::Empty);
    }
    if size > config.max_file_size_bytes {
        return Err(FileError::TooLarge {
            size,
            max: config.max_file_size_bytes,
        });
    }

    let bytes = std::fs::read(path)?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => {
            warn!(path = %path.display(), "report is not valid UTF-8, decoding lossily");
            Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
        }
    }
}

/// Source names for `paths`: the file name, or the full path when two
/// files share a name.
pub fn source_names(paths: &[PathBuf]) -> Vec<String> {
    let mut seen = HashSet::new();
    paths
        .iter()
        .map(|path| {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            if seen.insert(name.clone()) {
                name
            } else {
                let full = path.display().to_string();
                seen.insert(full.clone());
                full
            }
        })
        .collect()
}

pub fn load_reports(paths: &[PathBuf], config: &CliConfig) -> LoadedReports {
    let names = source_names(paths);

    let outcomes: Vec<Result<ParsedFile, FileError>> = paths
        .par_iter()
        .zip(names.par_iter())
        .map(|(path, name)| {
            let text = read_report(path, config)?;
            Ok(vng_parser::parse(&text, name)?)
        })
        .collect();

    let mut loaded = LoadedReports::default();
    for (path, outcome) in paths.iter().zip(outcomes) {
        match outcome {
            Ok(file) => loaded.files.push(file),
            Err(error) => {
                warn!(path = %path.display(), %error, "skipping report");
                loaded.rejected.push(Rejected {
                    path: path.clone(),
                    error,
                });
            }
        }
    }
    loaded
}
