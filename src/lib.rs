#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, trivial_casts, unused_qualifications)]
#![doc = include_str!("../README.md")]

// Functionality map
//
// Field arithmetic GF(2^7)                 --> field.rs
// Matrix/vector algebra                    --> matrix.rs
// Gaussian elimination / inversion         --> solver.rs
// Seed expansion (public seed, T, C/L/Q1)  --> expand.rs
// Message hashing into field vectors       --> hashing.rs
// Q2 assembly and public-map evaluation    --> pubmap.rs
// Key generation, signing, verification    --> luov.rs
// Hex packing/unpacking                    --> encodings.rs
// Key/signature types                      --> types.rs
// Signer/Verifier/SerDes traits            --> traits.rs

/// The `rand_core` types are re-exported so that users of this crate do not
/// have to track the exact compatible version of `rand_core`.
pub use rand_core::{CryptoRng, CryptoRngCore, Error as RngError, RngCore};

mod encodings;
mod expand;
mod hashing;
mod luov;
mod pubmap;

pub mod errors;
pub mod field;
pub mod matrix;
pub mod params;
pub mod solver;
pub mod traits;
pub mod types;

pub use crate::errors::{LuovError, Result};
pub use crate::params::{Params, LUOV_7_57_197, LUOV_7_6_13, SALT_LEN, SEED_LEN};
pub use crate::types::{PrivateKey, PublicKey, Signature};

/// Generates a key pair under the given parameter set using the default OS
/// random number generator.
///
/// # Errors
/// Returns an error when the entropy source fails or the parameter set is
/// invalid.
///
/// # Examples
/// ```rust
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// # #[cfg(feature = "default-rng")] {
/// use luov::traits::{Signer, Verifier};
/// use luov::LUOV_7_6_13; // tiny test set; use LUOV_7_57_197 in production
///
/// let (pk, sk) = luov::try_keygen(&LUOV_7_6_13)?;
/// let sig = sk.try_sign(b"message")?;
/// assert!(pk.verify(b"message", &sig));
/// # }
/// # Ok(())}
/// ```
#[cfg(feature = "default-rng")]
pub fn try_keygen(params: &Params) -> Result<(PublicKey, PrivateKey)> {
    try_keygen_with_rng(&mut rand_core::OsRng, params)
}

/// Generates a key pair under the given parameter set using the supplied
/// random number generator.
///
/// # Errors
/// Returns an error when the random number generator fails or the parameter
/// set is invalid.
pub fn try_keygen_with_rng(
    rng: &mut impl CryptoRngCore, params: &Params,
) -> Result<(PublicKey, PrivateKey)> {
    luov::keygen(params, rng)
}

/// Deterministic key generation from an existing 32-byte private seed.
/// The same seed always reproduces a byte-identical key pair.
///
/// # Errors
/// Returns an error when the parameter set is invalid.
pub fn keygen_from_seed(params: &Params, seed: &[u8; SEED_LEN]) -> Result<(PublicKey, PrivateKey)> {
    luov::keygen_internal(params, seed)
}

impl traits::Signer for PrivateKey {
    type Signature = Signature;

    fn try_sign_with_rng(
        &self, rng: &mut impl CryptoRngCore, message: &[u8],
    ) -> Result<Signature> {
        luov::sign_internal(self, rng, message)
    }
}

impl traits::Verifier for PublicKey {
    type Signature = Signature;

    fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        luov::verify_internal(self, message, signature)
    }
}

#[cfg(test)]
mod tests {
    use super::traits::{SerDes, Signer, Verifier};
    use super::*;
    use rand_chacha::rand_core::SeedableRng;

    #[test]
    fn smoke_test() {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(123);
        let message1 = [0u8, 1, 2, 3, 4, 5, 6, 7];
        let message2 = [7u8, 7, 7, 7, 7, 7, 7, 7];

        for _ in 0..4 {
            let (pk, sk) = try_keygen_with_rng(&mut rng, &LUOV_7_6_13).unwrap();
            let sig = sk.try_sign_with_rng(&mut rng, &message1).unwrap();
            assert!(pk.verify(&message1, &sig));
            assert!(!pk.verify(&message2, &sig));
            assert_eq!(sk.public_key().unwrap().encode(), pk.encode());
        }

        let (pk, _) = keygen_from_seed(&LUOV_7_6_13, &[0x11u8; 32]).unwrap();
        let (pk2, _) = keygen_from_seed(&LUOV_7_6_13, &[0x11u8; 32]).unwrap();
        assert_eq!(pk.encode(), pk2.encode());
    }

    #[test]
    fn rejects_invalid_params() {
        let params = Params::new_unchecked(7, 131, 0, 197);
        assert!(keygen_from_seed(&params, &[0u8; 32]).is_err());
    }
}
