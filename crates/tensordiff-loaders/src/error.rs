//! Error types for the loader crate.

use std::path::PathBuf;

use tensordiff_types::ConversionError;
use thiserror::Error;

/// A file or directory could not be turned into a value tree.
///
/// Every variant carries the offending path; loading aborts on the first
/// failure with no partial result.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The path could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The path's extension matches no supported format.
    #[error("unsupported file format: {path}")]
    UnsupportedFormat { path: PathBuf },

    /// The file's content did not parse in its declared format.
    #[error("cannot parse {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    /// The file parsed, but contains structure the value model cannot hold.
    #[error("cannot represent {path}: {source}")]
    Conversion {
        path: PathBuf,
        #[source]
        source: ConversionError,
    },

    /// Two comparison roots of different kinds (one file, one directory).
    #[error("cannot compare a file with a directory: {old_path} vs {new_path}")]
    MixedRoots {
        old_path: PathBuf,
        new_path: PathBuf,
    },
}

impl LoadError {
    /// Attach a path to an I/O failure.
    pub fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        LoadError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Attach a path to a parse failure.
    pub fn parse(path: &std::path::Path, reason: impl Into<String>) -> Self {
        LoadError::Parse {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}
