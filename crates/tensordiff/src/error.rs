//! Top-level error type for the facade crate.

use tensordiff_loaders::LoadError;
use tensordiff_types::{ConfigError, ConversionError};
use thiserror::Error;

/// Any failure a tensordiff operation can surface.
///
/// The comparison itself is total; every variant comes from a boundary:
/// loading, conversion, or configuration.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Convenience alias for facade results.
pub type Result<T> = std::result::Result<T, Error>;
