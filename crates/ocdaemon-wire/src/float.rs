//! Fixed-width little-endian IEEE-754 float fields.
//!
//! The daemon may have been built with a different floating-point width
//! than the host, so every float field occupies 8 bytes on the wire and is
//! self-describing: a 64-bit session writes the plain little-endian double,
//! a 32-bit session writes the 4-byte float surrounded by two zero bytes on
//! each side. The receiver detects the width from those sentinel positions.

use crate::error::WireError;

/// Bytes a float field occupies on the wire, regardless of session width.
pub const WIRE_LEN: usize = 8;

/// Per-session float width, probed once at session construction and
/// immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatWidth {
    /// 4-byte floats, zero-padded to 8 bytes on the wire.
    F32,
    /// Plain 8-byte doubles.
    F64,
}

impl FloatWidth {
    /// Probe the platform's native double encoding: serialize 1.0 and
    /// measure the byte length. Four bytes means a 32-bit float build,
    /// eight means 64-bit.
    pub fn probe() -> Self {
        match 1.0f64.to_le_bytes().len() {
            4 => FloatWidth::F32,
            _ => FloatWidth::F64,
        }
    }
}

/// Append a float field to `buf` using the session width.
pub fn put_float(buf: &mut Vec<u8>, width: FloatWidth, value: f64) {
    match width {
        FloatWidth::F64 => buf.extend_from_slice(&value.to_le_bytes()),
        FloatWidth::F32 => {
            buf.extend_from_slice(&[0x00, 0x00]);
            buf.extend_from_slice(&(value as f32).to_le_bytes());
            buf.extend_from_slice(&[0x00, 0x00]);
        }
    }
}

/// Decode a float field of the given session width, advancing `*offset`.
pub fn read_float(buf: &[u8], offset: &mut usize, width: FloatWidth) -> Result<f64, WireError> {
    let have = buf.len() - *offset;
    if have < WIRE_LEN {
        return Err(WireError::InsufficientData {
            need: WIRE_LEN,
            have,
        });
    }
    let field = &buf[*offset..*offset + WIRE_LEN];
    *offset += WIRE_LEN;
    match width {
        FloatWidth::F64 => Ok(f64::from_le_bytes(field.try_into().unwrap())),
        FloatWidth::F32 => Ok(f64::from(f32::from_le_bytes(
            field[2..6].try_into().unwrap(),
        ))),
    }
}
