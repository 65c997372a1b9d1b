//! NumPy array loaders: `.npy` single arrays and `.npz` archives.
//!
//! The `.npy` layout is magic + version + a Python-dict header describing
//! dtype, memory order, and shape, followed by the raw element buffer. Only
//! little-endian, C-order data is supported; anything else is a [`LoadError`],
//! not a silent reinterpretation.

use std::fs;
use std::io::Read;
use std::path::Path;

use byteorder::{ByteOrder, LittleEndian};
use indexmap::IndexMap;
use tensordiff_types::Value;

use crate::dtype::{nest, ScalarType};
use crate::error::LoadError;

const MAGIC: &[u8] = b"\x93NUMPY";

/// Load a single `.npy` array as nested sequences of numbers.
pub fn load_npy(path: &Path) -> Result<Value, LoadError> {
    let bytes = fs::read(path).map_err(|e| LoadError::io(path, e))?;
    parse_npy(path, &bytes)
}

/// Load an `.npz` archive as a mapping from member name to decoded array.
///
/// Members keep archive order. Non-`.npy` members are skipped.
pub fn load_npz(path: &Path) -> Result<Value, LoadError> {
    let file = fs::File::open(path).map_err(|e| LoadError::io(path, e))?;
    let mut archive =
        zip::ZipArchive::new(file).map_err(|e| LoadError::parse(path, e.to_string()))?;

    let mut members = IndexMap::new();
    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|e| LoadError::parse(path, e.to_string()))?;
        let name = entry.name().to_string();
        let Some(key) = name.strip_suffix(".npy") else {
            tracing::debug!(member = %name, "skipping non-array archive member");
            continue;
        };
        let mut bytes = Vec::with_capacity(entry.size() as usize);
        entry
            .read_to_end(&mut bytes)
            .map_err(|e| LoadError::io(path, e))?;
        let array = parse_npy(path, &bytes)
            .map_err(|e| LoadError::parse(path, format!("member {name}: {e}")))?;
        members.insert(key.to_string(), array);
    }
    Ok(Value::Mapping(members))
}

/// Decode one `.npy` image.
pub(crate) fn parse_npy(path: &Path, bytes: &[u8]) -> Result<Value, LoadError> {
    if bytes.len() < 10 || &bytes[..6] != MAGIC {
        return Err(LoadError::parse(path, "not an npy file (bad magic)"));
    }
    let version = bytes[6];
    let (header_len, header_start) = match version {
        1 => (LittleEndian::read_u16(&bytes[8..10]) as usize, 10),
        2 | 3 => {
            if bytes.len() < 12 {
                return Err(LoadError::parse(path, "truncated npy header length"));
            }
            (LittleEndian::read_u32(&bytes[8..12]) as usize, 12)
        }
        other => {
            return Err(LoadError::parse(
                path,
                format!("unsupported npy version {other}"),
            ))
        }
    };
    let header_end = header_start + header_len;
    if bytes.len() < header_end {
        return Err(LoadError::parse(path, "truncated npy header"));
    }
    let header = std::str::from_utf8(&bytes[header_start..header_end])
        .map_err(|_| LoadError::parse(path, "npy header is not valid UTF-8"))?;

    let descr = quoted_field(header, "descr")
        .ok_or_else(|| LoadError::parse(path, "npy header missing descr"))?;
    let scalar = ScalarType::from_npy_descr(descr).ok_or_else(|| {
        LoadError::parse(path, format!("unsupported npy dtype {descr:?}"))
    })?;
    if bool_field(header, "fortran_order")
        .ok_or_else(|| LoadError::parse(path, "npy header missing fortran_order"))?
    {
        return Err(LoadError::parse(path, "Fortran-order arrays are unsupported"));
    }
    let shape = shape_field(header)
        .ok_or_else(|| LoadError::parse(path, "npy header missing or malformed shape"))?;

    let count: usize = shape.iter().product();
    let expected = count * scalar.size();
    let data = &bytes[header_end..];
    if data.len() < expected {
        return Err(LoadError::parse(
            path,
            format!(
                "npy data too short: expected {expected} bytes, found {}",
                data.len()
            ),
        ));
    }
    let flat = scalar
        .decode_all(&data[..expected])
        .ok_or_else(|| LoadError::parse(path, "npy data is not a whole number of elements"))?;
    Ok(nest(&shape, &flat))
}

/// Extract a `'key': 'value'` entry from the header dict.
fn quoted_field<'a>(header: &'a str, key: &str) -> Option<&'a str> {
    let rest = field_value(header, key)?;
    let rest = rest.strip_prefix('\'')?;
    let end = rest.find('\'')?;
    Some(&rest[..end])
}

/// Extract a `'key': True/False` entry from the header dict.
fn bool_field(header: &str, key: &str) -> Option<bool> {
    let rest = field_value(header, key)?;
    if rest.starts_with("True") {
        Some(true)
    } else if rest.starts_with("False") {
        Some(false)
    } else {
        None
    }
}

/// Extract the `'shape': (...)` tuple from the header dict.
fn shape_field(header: &str) -> Option<Vec<usize>> {
    let rest = field_value(header, "shape")?;
    let rest = rest.strip_prefix('(')?;
    let end = rest.find(')')?;
    rest[..end]
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<usize>().ok())
        .collect()
}

fn field_value<'a>(header: &'a str, key: &str) -> Option<&'a str> {
    let marker = format!("'{key}':");
    let start = header.find(&marker)? + marker.len();
    Some(header[start..].trim_start())
}
