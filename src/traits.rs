//! Role traits implemented by the key and signature types.

use rand_core::CryptoRngCore;
#[cfg(feature = "default-rng")]
use rand_core::OsRng;

use crate::errors::Result;
use crate::params::Params;

/// Implemented by the private key: produces signatures over arbitrary
/// byte-string messages.
pub trait Signer {
    /// Signature type produced by this signer.
    type Signature;

    /// Signs a message using the default OS random number generator.
    ///
    /// # Errors
    /// Returns an error when the entropy source fails.
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
    /// let sig = sk.try_sign(b"attack at dawn")?;
    /// assert!(pk.verify(b"attack at dawn", &sig));
    /// # }
    /// # Ok(())}
    /// ```
    #[cfg(feature = "default-rng")]
    fn try_sign(&self, message: &[u8]) -> Result<Self::Signature> {
        self.try_sign_with_rng(&mut OsRng, message)
    }

    /// Signs a message using the supplied random number generator.
    ///
    /// # Errors
    /// Returns an error when the random number generator fails.
    fn try_sign_with_rng(
        &self, rng: &mut impl CryptoRngCore, message: &[u8],
    ) -> Result<Self::Signature>;
}

/// Implemented by the public key: checks signatures by exact recomputation.
pub trait Verifier {
    /// Signature type accepted by this verifier.
    type Signature;

    /// Verifies a signature over a message. A hash mismatch, including any
    /// tampering with the signature vector, the salt or the message, is a
    /// normal `false` outcome, not an error.
    ///
    /// # Examples
    /// ```rust
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use luov::traits::{Signer, Verifier};
    /// use luov::LUOV_7_6_13;
    /// use rand_chacha::rand_core::SeedableRng;
    ///
    /// let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(123);
    /// let (pk, sk) = luov::try_keygen_with_rng(&mut rng, &LUOV_7_6_13)?;
    /// let sig = sk.try_sign_with_rng(&mut rng, b"msg")?;
    /// assert!(pk.verify(b"msg", &sig));
    /// assert!(!pk.verify(b"other", &sig));
    /// # Ok(())}
    /// ```
    fn verify(&self, message: &[u8], signature: &Self::Signature) -> bool;
}

/// Hex serialization and validated deserialization.
///
/// Encodings carry no dimensions, so decoding takes the parameter set the
/// value was produced under and rejects anything that does not match it
/// exactly.
pub trait SerDes: Sized {
    /// Hex form of the value: a string for the private key, a pair of
    /// strings for the public key and the signature.
    type Encoded;

    /// Serializes into hex.
    fn encode(&self) -> Self::Encoded;

    /// Deserializes from hex, validating lengths and element ranges.
    ///
    /// # Errors
    /// Returns `MalformedEncoding` on any mismatch with the expected shape.
    ///
    /// # Examples
    /// ```rust
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use luov::traits::SerDes;
    /// use luov::{PublicKey, LUOV_7_6_13};
    /// use rand_chacha::rand_core::SeedableRng;
    ///
    /// let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(123);
    /// let (pk, _sk) = luov::try_keygen_with_rng(&mut rng, &LUOV_7_6_13)?;
    /// let encoded = pk.encode();
    /// let decoded = PublicKey::try_decode(&LUOV_7_6_13, &encoded)?;
    /// assert_eq!(decoded, pk);
    /// # Ok(())}
    /// ```
    fn try_decode(params: &Params, encoded: &Self::Encoded) -> Result<Self>;
}
