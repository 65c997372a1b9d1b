//! Output rendering for tensordiff.
//!
//! Turns an ordered [`DiffEntry`] list into text. The `"json"` rendering is
//! the compatibility contract: it must stay a parseable JSON array whose
//! elements reconstruct the original entries.
//!
//! [`DiffEntry`]: tensordiff_engine::DiffEntry

pub mod output;

pub use output::{format_output, render_line, OutputFormat};
