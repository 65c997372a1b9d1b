//! File loaders for tensordiff.
//!
//! Each loader turns one on-disk artifact into a canonical
//! [`Value`](tensordiff_types::Value) tree. Structured text formats (JSON,
//! YAML, TOML) parse through their serde document models; binary tensor
//! formats (NumPy `.npy`/`.npz`, safetensors) are decoded directly, with
//! tensors expanded into nested sequences of numbers.
//!
//! Dispatch is by file extension via [`load_path`]. An unreadable or
//! malformed file is always an error, never an empty tree.

pub mod dtype;
pub mod error;
pub mod numpy;
pub mod safetensors;
pub mod text;

use std::path::Path;

use tensordiff_types::Value;

pub use error::LoadError;

/// File formats the loaders understand, keyed by extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileKind {
    Json,
    Yaml,
    Toml,
    Npy,
    Npz,
    Safetensors,
}

impl FileKind {
    /// Classify a path by its extension, if the extension is supported.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        match extension.to_ascii_lowercase().as_str() {
            "json" => Some(FileKind::Json),
            "yaml" | "yml" => Some(FileKind::Yaml),
            "toml" => Some(FileKind::Toml),
            "npy" => Some(FileKind::Npy),
            "npz" => Some(FileKind::Npz),
            "safetensors" => Some(FileKind::Safetensors),
            _ => None,
        }
    }
}

/// Returns `true` if `path` has an extension some loader handles.
pub fn is_loadable(path: &Path) -> bool {
    FileKind::from_path(path).is_some()
}

/// Load one file into a canonical value tree, dispatching on its extension.
pub fn load_path(path: &Path) -> Result<Value, LoadError> {
    let kind = FileKind::from_path(path).ok_or_else(|| LoadError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    tracing::debug!(path = %path.display(), kind = ?kind, "loading file");
    match kind {
        FileKind::Json => text::load_json(path),
        FileKind::Yaml => text::load_yaml(path),
        FileKind::Toml => text::load_toml(path),
        FileKind::Npy => numpy::load_npy(path),
        FileKind::Npz => numpy::load_npz(path),
        FileKind::Safetensors => safetensors::load_safetensors(path),
    }
}
