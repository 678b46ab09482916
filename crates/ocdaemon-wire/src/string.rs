//! Length-prefixed byte strings.
//!
//! A string is the varint of its byte length followed by the raw bytes.
//! No terminator, no character-set conversion: whatever bytes are supplied
//! are written verbatim. The empty string encodes to the single byte 0x00.

use crate::error::WireError;
use crate::varint;

/// Append a length-prefixed byte string to `buf`.
pub fn put_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    varint::put_uvarint(buf, bytes.len() as u64);
    buf.extend_from_slice(bytes);
}

/// Append a length-prefixed string to `buf`.
pub fn put_str(buf: &mut Vec<u8>, s: &str) {
    put_bytes(buf, s.as_bytes());
}

/// Decode a length-prefixed byte string, advancing `*offset` past it.
pub fn read_bytes<'a>(buf: &'a [u8], offset: &mut usize) -> Result<&'a [u8], WireError> {
    let len = varint::read_uvarint(buf, offset)? as usize;
    let have = buf.len() - *offset;
    if have < len {
        return Err(WireError::InsufficientData { need: len, have });
    }
    let slice = &buf[*offset..*offset + len];
    *offset += len;
    Ok(slice)
}

/// Decode a length-prefixed string, validating UTF-8.
pub fn read_string(buf: &[u8], offset: &mut usize) -> Result<String, WireError> {
    let bytes = read_bytes(buf, offset)?;
    String::from_utf8(bytes.to_vec()).map_err(|_| WireError::InvalidUtf8)
}
