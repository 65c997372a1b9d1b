//! Safetensors checkpoint loader.
//!
//! Layout: an 8-byte little-endian header length, a JSON header mapping
//! tensor names to `{dtype, shape, data_offsets}` (plus an optional
//! `__metadata__` string map), then the concatenated tensor buffers. Offsets
//! are relative to the start of the data section.

use std::fs;
use std::path::Path;

use byteorder::{ByteOrder, LittleEndian};
use indexmap::IndexMap;
use tensordiff_types::{convert, Value};

use crate::dtype::{nest, ScalarType};
use crate::error::LoadError;

/// Load a safetensors checkpoint as a mapping from tensor name to nested
/// numeric sequences, in header order. `__metadata__` passes through as a
/// mapping of strings.
pub fn load_safetensors(path: &Path) -> Result<Value, LoadError> {
    let bytes = fs::read(path).map_err(|e| LoadError::io(path, e))?;
    parse_safetensors(path, &bytes)
}

fn parse_safetensors(path: &Path, bytes: &[u8]) -> Result<Value, LoadError> {
    if bytes.len() < 8 {
        return Err(LoadError::parse(path, "file too short for a safetensors header"));
    }
    let header_len = LittleEndian::read_u64(&bytes[..8]) as usize;
    let header_end = 8usize
        .checked_add(header_len)
        .filter(|end| *end <= bytes.len())
        .ok_or_else(|| LoadError::parse(path, "header length exceeds file size"))?;

    let header: serde_json::Value = serde_json::from_slice(&bytes[8..header_end])
        .map_err(|e| LoadError::parse(path, format!("header is not valid JSON: {e}")))?;
    let serde_json::Value::Object(entries) = header else {
        return Err(LoadError::parse(path, "header is not a JSON object"));
    };
    let data = &bytes[header_end..];

    let mut tensors = IndexMap::with_capacity(entries.len());
    for (name, desc) in entries {
        if name == "__metadata__" {
            tensors.insert(name, convert::from_json(desc));
            continue;
        }
        tensors.insert(name.clone(), decode_tensor(path, &name, &desc, data)?);
    }
    Ok(Value::Mapping(tensors))
}

fn decode_tensor(
    path: &Path,
    name: &str,
    desc: &serde_json::Value,
    data: &[u8],
) -> Result<Value, LoadError> {
    let dtype = desc
        .get("dtype")
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| LoadError::parse(path, format!("tensor {name:?}: missing dtype")))?;
    let scalar = ScalarType::from_safetensors_dtype(dtype).ok_or_else(|| {
        LoadError::parse(path, format!("tensor {name:?}: unsupported dtype {dtype}"))
    })?;

    let shape: Vec<usize> = desc
        .get("shape")
        .and_then(serde_json::Value::as_array)
        .map(|dims| {
            dims.iter()
                .map(|d| d.as_u64().map(|d| d as usize))
                .collect::<Option<Vec<_>>>()
        })
        .and_then(|dims| dims)
        .ok_or_else(|| LoadError::parse(path, format!("tensor {name:?}: malformed shape")))?;

    let (begin, end) = desc
        .get("data_offsets")
        .and_then(serde_json::Value::as_array)
        .and_then(|offsets| match offsets.as_slice() {
            [a, b] => Some((a.as_u64()? as usize, b.as_u64()? as usize)),
            _ => None,
        })
        .ok_or_else(|| LoadError::parse(path, format!("tensor {name:?}: malformed data_offsets")))?;
    if begin > end || end > data.len() {
        return Err(LoadError::parse(
            path,
            format!("tensor {name:?}: data_offsets [{begin}, {end}] out of bounds"),
        ));
    }

    let count: usize = shape.iter().product();
    let expected = count * scalar.size();
    if end - begin != expected {
        return Err(LoadError::parse(
            path,
            format!(
                "tensor {name:?}: buffer is {} bytes, shape needs {expected}",
                end - begin
            ),
        ));
    }

    let flat = scalar
        .decode_all(&data[begin..end])
        .ok_or_else(|| LoadError::parse(path, format!("tensor {name:?}: ragged buffer")))?;
    Ok(nest(&shape, &flat))
}
