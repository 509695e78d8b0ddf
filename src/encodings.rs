//! Hex encodings of field matrices, seeds and salts.
//!
//! A field matrix serializes as `rows·cols·2` lowercase hex characters,
//! row-major, one byte per element. The format carries no dimensions, so
//! decoding requires the exact expected shape; wrong lengths, invalid
//! digits and elements with the top bit set are all rejected outright.

use crate::errors::{LuovError, Result};
use crate::matrix::Matrix;

/// Packs a field matrix row-major, two hex characters per element.
pub(crate) fn pack(mat: &Matrix) -> String {
    hex::encode(mat.as_bytes())
}

/// Unpacks a `rows × cols` field matrix.
///
/// # Errors
/// `MalformedEncoding` on a length other than `2·rows·cols`, on non-hex
/// input, or on an element outside `[0, mask]`.
pub(crate) fn unpack(hex_str: &str, rows: usize, cols: usize, mask: u8) -> Result<Matrix> {
    let expected = 2 * rows * cols;
    if hex_str.len() != expected {
        return Err(LuovError::MalformedEncoding(format!(
            "expected {expected} hex characters for a {rows}x{cols} matrix, got {}",
            hex_str.len()
        )));
    }
    let data = hex::decode(hex_str)
        .map_err(|e| LuovError::MalformedEncoding(format!("invalid hex: {e}")))?;
    if let Some(&bad) = data.iter().find(|&&b| b > mask) {
        return Err(LuovError::MalformedEncoding(format!(
            "element {bad:#04x} outside the field range"
        )));
    }
    Ok(Matrix::from_raw(rows, cols, data))
}

/// Decodes a fixed-length byte string (seed or salt) from hex.
///
/// # Errors
/// `MalformedEncoding` on wrong length or non-hex input.
pub(crate) fn unpack_bytes<const LEN: usize>(hex_str: &str, what: &str) -> Result<[u8; LEN]> {
    if hex_str.len() != 2 * LEN {
        return Err(LuovError::MalformedEncoding(format!(
            "expected {} hex characters for {what}, got {}",
            2 * LEN,
            hex_str.len()
        )));
    }
    let bytes = hex::decode(hex_str)
        .map_err(|e| LuovError::MalformedEncoding(format!("invalid hex: {e}")))?;
    Ok(<[u8; LEN]>::try_from(bytes).expect("length checked above"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_unpack_round_trip() {
        let m = Matrix::from_raw(2, 3, vec![0x00, 0x7f, 0x01, 0x30, 0x55, 0x0a]);
        let hex_str = pack(&m);
        assert_eq!(hex_str, "007f0130550a");
        assert_eq!(unpack(&hex_str, 2, 3, 0x7f).unwrap(), m);
    }

    #[test]
    fn unpack_requires_exact_shape() {
        // same bytes, different claimed shape: slicing differs, and a
        // mismatched length is rejected rather than truncated
        let hex_str = "007f0130550a";
        let wide = unpack(hex_str, 1, 6, 0x7f).unwrap();
        assert_eq!(wide.rows(), 1);
        assert!(matches!(
            unpack(hex_str, 2, 2, 0x7f),
            Err(LuovError::MalformedEncoding(_))
        ));
    }

    #[test]
    fn unpack_rejects_bad_input() {
        assert!(unpack("zz", 1, 1, 0x7f).is_err());
        // top bit set
        assert!(unpack("80", 1, 1, 0x7f).is_err());
        assert!(unpack("7f", 1, 1, 0x7f).is_ok());
    }

    #[test]
    fn byte_strings_round_trip() {
        let salt = [7u8; 16];
        let hex_str = hex::encode(salt);
        assert_eq!(unpack_bytes::<16>(&hex_str, "salt").unwrap(), salt);
        assert!(unpack_bytes::<16>("00", "salt").is_err());
        assert!(unpack_bytes::<16>(&"xx".repeat(16), "salt").is_err());
    }
}
