//! Scalar element types shared by the binary tensor loaders.
//!
//! All numeric leaves normalize to `f64` in the value model, so decoding is
//! one little-endian read plus a widening conversion per element. Integer
//! types above 53 bits lose precision in the widening cast, the same
//! normalization every other numeric source gets.

use byteorder::{ByteOrder, LittleEndian};
use half::{bf16, f16};
use tensordiff_types::Value;

/// Element type of a stored tensor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScalarType {
    F16,
    Bf16,
    F32,
    F64,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    Bool,
}

impl ScalarType {
    /// Size of one element in bytes.
    pub fn size(&self) -> usize {
        match self {
            ScalarType::I8 | ScalarType::U8 | ScalarType::Bool => 1,
            ScalarType::F16 | ScalarType::Bf16 | ScalarType::I16 | ScalarType::U16 => 2,
            ScalarType::F32 | ScalarType::I32 | ScalarType::U32 => 4,
            ScalarType::F64 | ScalarType::I64 | ScalarType::U64 => 8,
        }
    }

    /// NumPy dtype descriptor (e.g. `<f4`, `|u1`). Little-endian and
    /// byte-order-free descriptors only; big-endian data is unsupported.
    pub fn from_npy_descr(descr: &str) -> Option<Self> {
        let code = match descr.as_bytes().first()? {
            b'<' | b'|' | b'=' => &descr[1..],
            _ => return None,
        };
        match code {
            "f2" => Some(ScalarType::F16),
            "f4" => Some(ScalarType::F32),
            "f8" => Some(ScalarType::F64),
            "i1" => Some(ScalarType::I8),
            "i2" => Some(ScalarType::I16),
            "i4" => Some(ScalarType::I32),
            "i8" => Some(ScalarType::I64),
            "u1" => Some(ScalarType::U8),
            "u2" => Some(ScalarType::U16),
            "u4" => Some(ScalarType::U32),
            "u8" => Some(ScalarType::U64),
            "b1" => Some(ScalarType::Bool),
            _ => None,
        }
    }

    /// Safetensors dtype name (e.g. `F32`, `BF16`).
    pub fn from_safetensors_dtype(name: &str) -> Option<Self> {
        match name {
            "F16" => Some(ScalarType::F16),
            "BF16" => Some(ScalarType::Bf16),
            "F32" => Some(ScalarType::F32),
            "F64" => Some(ScalarType::F64),
            "I8" => Some(ScalarType::I8),
            "I16" => Some(ScalarType::I16),
            "I32" => Some(ScalarType::I32),
            "I64" => Some(ScalarType::I64),
            "U8" => Some(ScalarType::U8),
            "U16" => Some(ScalarType::U16),
            "U32" => Some(ScalarType::U32),
            "U64" => Some(ScalarType::U64),
            "BOOL" => Some(ScalarType::Bool),
            _ => None,
        }
    }

    /// Decode one element. `bytes` must be exactly [`Self::size`] long.
    fn decode_one(&self, bytes: &[u8]) -> f64 {
        match self {
            ScalarType::F16 => f16::from_le_bytes([bytes[0], bytes[1]]).to_f64(),
            ScalarType::Bf16 => bf16::from_le_bytes([bytes[0], bytes[1]]).to_f64(),
            ScalarType::F32 => LittleEndian::read_f32(bytes) as f64,
            ScalarType::F64 => LittleEndian::read_f64(bytes),
            ScalarType::I8 => bytes[0] as i8 as f64,
            ScalarType::I16 => LittleEndian::read_i16(bytes) as f64,
            ScalarType::I32 => LittleEndian::read_i32(bytes) as f64,
            ScalarType::I64 => LittleEndian::read_i64(bytes) as f64,
            ScalarType::U8 => bytes[0] as f64,
            ScalarType::U16 => LittleEndian::read_u16(bytes) as f64,
            ScalarType::U32 => LittleEndian::read_u32(bytes) as f64,
            ScalarType::U64 => LittleEndian::read_u64(bytes) as f64,
            ScalarType::Bool => (bytes[0] != 0) as u8 as f64,
        }
    }

    /// Decode a contiguous element buffer. `None` if the buffer length is not
    /// a whole number of elements.
    pub fn decode_all(&self, data: &[u8]) -> Option<Vec<f64>> {
        let size = self.size();
        if data.len() % size != 0 {
            return None;
        }
        Some(data.chunks_exact(size).map(|c| self.decode_one(c)).collect())
    }
}

/// Fold a flat element buffer into nested sequences per `shape`, C order.
///
/// An empty shape is a 0-d scalar and produces a bare number.
pub fn nest(shape: &[usize], flat: &[f64]) -> Value {
    match shape {
        [] => Value::Number(flat.first().copied().unwrap_or(f64::NAN)),
        [n] => Value::Sequence(flat.iter().take(*n).copied().map(Value::Number).collect()),
        [n, rest @ ..] => {
            let stride: usize = rest.iter().product();
            Value::Sequence(
                (0..*n)
                    .map(|i| nest(rest, &flat[i * stride..(i + 1) * stride]))
                    .collect(),
            )
        }
    }
}
