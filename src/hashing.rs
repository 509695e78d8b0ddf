//! Message hashing into field vectors.

use sha3::{Digest, Keccak512};

use crate::matrix::Matrix;
use crate::params::Params;

/// Keccak-512 digest of `message ∥ 0x00 ∥ salt`, truncated to `⌈r·m/8⌉`
/// bytes. Signing and verification call this with the same salt and must
/// arrive at the same bytes.
pub(crate) fn message_digest(params: &Params, message: &[u8], salt: &[u8]) -> Vec<u8> {
    let mut hasher = Keccak512::new();
    hasher.update(message);
    hasher.update([0u8]);
    hasher.update(salt);
    let digest = hasher.finalize();
    digest[..params.digest_len()].to_vec()
}

/// Unpacks a truncated digest into the m×1 message vector: big-endian r-bit
/// groups, after dropping the leading bits that pad `r·m` up to whole bytes.
pub(crate) fn digest_to_vector(params: &Params, digest: &[u8]) -> Matrix {
    let r = params.field_degree as usize;
    let m = params.oil;
    debug_assert_eq!(digest.len(), params.digest_len(), "digest length mismatch");

    let mut bit = digest.len() * 8 - r * m;
    let mut out = Vec::with_capacity(m);
    for _ in 0..m {
        let mut elem = 0u8;
        for _ in 0..r {
            elem = (elem << 1) | ((digest[bit / 8] >> (7 - bit % 8)) & 1);
            bit += 1;
        }
        out.push(elem);
    }
    Matrix::from_raw(m, 1, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{LUOV_7_57_197, LUOV_7_6_13};

    #[test]
    fn digest_is_salt_sensitive() {
        let params = &LUOV_7_57_197;
        let a = message_digest(params, b"test", &[0u8; 16]);
        let b = message_digest(params, b"test", &[1u8; 16]);
        assert_eq!(a.len(), 50);
        assert_ne!(a, b);
        assert_eq!(a, message_digest(params, b"test", &[0u8; 16]));
    }

    #[test]
    fn vector_unpack_takes_big_endian_groups() {
        // 6 bytes, r*m = 42 bits: the 6 leading bits are dropped, so the
        // first element is bit 6 of byte 0 followed by the top 5 bits of
        // byte 1 and so on
        let digest = [0b0000_0010, 0b1010_1010, 0xff, 0x00, 0x81, 0x7e];
        let h = digest_to_vector(&LUOV_7_6_13, &digest);
        assert_eq!((h.rows(), h.cols()), (6, 1));
        assert_eq!(h.get(0, 0), 0b101_0101);
        for i in 0..6 {
            assert!(h.get(i, 0) < 128);
        }
    }

    #[test]
    fn nearby_messages_hash_to_different_vectors() {
        let params = &LUOV_7_6_13;
        let h = digest_to_vector(params, &message_digest(params, b"abc", &[7u8; 16]));
        let other = digest_to_vector(params, &message_digest(params, b"abd", &[7u8; 16]));
        assert_ne!(h, other);
    }
}
