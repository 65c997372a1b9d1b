//! Loaders for structured text formats.

use std::fs;
use std::path::Path;

use tensordiff_types::{convert, Value};

use crate::error::LoadError;

/// Load a JSON document.
pub fn load_json(path: &Path) -> Result<Value, LoadError> {
    let text = fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
    let document: serde_json::Value =
        serde_json::from_str(&text).map_err(|e| LoadError::parse(path, e.to_string()))?;
    Ok(convert::from_json(document))
}

/// Load a YAML document.
pub fn load_yaml(path: &Path) -> Result<Value, LoadError> {
    let text = fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
    let document: serde_yaml::Value =
        serde_yaml::from_str(&text).map_err(|e| LoadError::parse(path, e.to_string()))?;
    convert::from_yaml(document).map_err(|source| LoadError::Conversion {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a TOML document.
pub fn load_toml(path: &Path) -> Result<Value, LoadError> {
    let text = fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
    let document: toml::Value =
        toml::from_str(&text).map_err(|e| LoadError::parse(path, e.to_string()))?;
    Ok(convert::from_toml(document))
}
