//! Structural diff engine for AI/ML model artifacts and structured records.
//!
//! tensordiff compares two hierarchical snapshots — model checkpoints, tensor
//! archives, training configs, metadata documents — and reports per-field
//! changes instead of raw byte differences.
//!
//! # Entry Points
//!
//! - [`diff`] — Compare two in-memory [`Value`] trees
//! - [`diff_paths`] — Compare two files or two directories on disk
//! - [`format_output`] — Render a change list as diffai text, JSON, or YAML
//!
//! # Example
//!
//! ```
//! use tensordiff::{diff, DiffOptions};
//! use tensordiff::convert::from_json;
//! use serde_json::json;
//!
//! let old = from_json(json!({"lr": 0.01, "epochs": 10}));
//! let new = from_json(json!({"lr": 0.02, "epochs": 10}));
//!
//! let entries = diff(&old, &new, &DiffOptions::new());
//! assert_eq!(entries.len(), 1);
//! assert_eq!(entries[0].path().to_string(), "lr");
//! ```

pub mod error;
pub mod paths;

pub use error::{Error, Result};
pub use paths::diff_paths;
pub use tensordiff_engine::{diff, DiffEntry, DiffOptions};
pub use tensordiff_format::{format_output, render_line, OutputFormat};
pub use tensordiff_loaders::{is_loadable, load_path, FileKind, LoadError};
pub use tensordiff_types::convert;
pub use tensordiff_types::{ConfigError, ConversionError, Path, PathSegment, Value};
