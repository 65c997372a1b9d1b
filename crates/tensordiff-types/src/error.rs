//! Shared error types for the tensordiff crates.

use thiserror::Error;

/// A host structure could not be represented in the canonical value model.
///
/// Conversion is total for JSON-shaped data; only constructs outside the six
/// canonical tags are rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConversionError {
    /// A mapping key was not a scalar (string, number, or boolean).
    #[error("mapping key is not a scalar: {0}")]
    NonScalarKey(String),

    /// A node has no representation in the value model (e.g. a YAML tag).
    #[error("unsupported node: {0}")]
    UnsupportedNode(String),
}

/// An option value or format name was rejected before any comparison ran.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Numeric tolerance must be zero or positive.
    #[error("epsilon must be non-negative, got {0}")]
    NegativeEpsilon(f64),

    /// The requested output format is not one of the supported names.
    #[error("unsupported output format: {0:?} (expected \"diffai\", \"json\", or \"yaml\")")]
    UnknownFormat(String),

    /// The ignore-keys pattern failed to compile as a regular expression.
    #[error("invalid ignore-keys pattern: {0}")]
    InvalidIgnorePattern(String),

    /// The underlying serializer rejected the entry list.
    #[error("render error: {0}")]
    Render(String),
}

/// A rendered path string could not be parsed back into segments.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid path syntax in {path:?}: {reason}")]
pub struct PathParseError {
    /// The text that failed to parse.
    pub path: String,
    /// What was wrong with it.
    pub reason: String,
}
