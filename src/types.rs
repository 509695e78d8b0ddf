//! Key and signature value types.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::encodings::{pack, unpack, unpack_bytes};
use crate::errors::Result;
use crate::expand::{derive_public_map, PublicMapParts};
use crate::field::Gf2m;
use crate::matrix::Matrix;
use crate::params::{Params, SALT_LEN, SEED_LEN};
use crate::pubmap;
use crate::traits::SerDes;

/// The private key: the 32-byte seed plus material re-derived from it at
/// construction so repeated signing skips the expansion pipelines. The seed
/// alone is the secret (everything else is a pure function of it) and the
/// whole struct is wiped on drop.
///
/// Implements [`crate::traits::Signer`] and [`crate::traits::SerDes`].
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey {
    #[zeroize(skip)]
    pub(crate) params: Params,
    pub(crate) seed: [u8; SEED_LEN],
    pub(crate) public_seed: [u8; SEED_LEN],
    pub(crate) transform: Matrix,
    pub(crate) parts: PublicMapParts,
}

/// The public key: the public seed, the oil-oil coefficient matrix Q2, and
/// the C/L/Q1 coefficients re-expanded from the seed for repeated
/// verification.
///
/// Implements [`crate::traits::Verifier`] and [`crate::traits::SerDes`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PublicKey {
    pub(crate) params: Params,
    pub(crate) public_seed: [u8; SEED_LEN],
    pub(crate) q2: Matrix,
    pub(crate) parts: PublicMapParts,
}

/// A signature: the n-element solution vector and its 16-byte salt.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Signature {
    pub(crate) s: Vec<u8>,
    pub(crate) salt: [u8; SALT_LEN],
}

impl PrivateKey {
    /// The parameter set this key was generated under.
    #[must_use]
    pub const fn params(&self) -> &Params {
        &self.params
    }

    /// Recomputes the matching public key from the stored material.
    ///
    /// # Errors
    /// Propagates internal matrix-shape errors (none occur for a key built
    /// by this crate).
    pub fn public_key(&self) -> Result<PublicKey> {
        let gf = Gf2m::new(&self.params)?;
        let q2 = pubmap::find_q2(&gf, &self.params, &self.parts.q1, &self.transform)?;
        Ok(PublicKey {
            params: self.params,
            public_seed: self.public_seed,
            q2,
            parts: self.parts.clone(),
        })
    }
}

impl PublicKey {
    /// The parameter set this key was generated under.
    #[must_use]
    pub const fn params(&self) -> &Params {
        &self.params
    }
}

impl Signature {
    /// The signature vector, one field element per variable.
    #[must_use]
    pub fn vector(&self) -> &[u8] {
        &self.s
    }

    /// The salt the message was hashed under.
    #[must_use]
    pub const fn salt(&self) -> &[u8; SALT_LEN] {
        &self.salt
    }
}

impl SerDes for PrivateKey {
    type Encoded = String;

    fn encode(&self) -> String {
        hex::encode(self.seed)
    }

    /// Decodes the 64-hex-character seed and re-derives the full key.
    fn try_decode(params: &Params, encoded: &String) -> Result<Self> {
        let seed = unpack_bytes::<SEED_LEN>(encoded, "a private seed")?;
        let (_, sk) = crate::luov::keygen_internal(params, &seed)?;
        Ok(sk)
    }
}

impl SerDes for PublicKey {
    type Encoded = (String, String);

    fn encode(&self) -> (String, String) {
        (hex::encode(self.public_seed), pack(&self.q2))
    }

    /// Decodes `(public seed, Q2)` and re-expands C/L/Q1 from the seed.
    fn try_decode(params: &Params, encoded: &(String, String)) -> Result<Self> {
        params.validate()?;
        let public_seed = unpack_bytes::<SEED_LEN>(&encoded.0, "a public seed")?;
        let q2 = unpack(&encoded.1, params.oil, params.q2_cols(), params.element_mask())?;
        let parts = derive_public_map(params, &public_seed);
        Ok(Self { params: *params, public_seed, q2, parts })
    }
}

impl SerDes for Signature {
    type Encoded = (String, String);

    fn encode(&self) -> (String, String) {
        (hex::encode(&self.s), hex::encode(self.salt))
    }

    fn try_decode(params: &Params, encoded: &(String, String)) -> Result<Self> {
        let s = unpack(&encoded.0, params.n(), 1, params.element_mask())?;
        let salt = unpack_bytes::<SALT_LEN>(&encoded.1, "a salt")?;
        Ok(Self { s: s.as_bytes().to_vec(), salt })
    }
}

// Q2 and the coefficient matrices are published; the seed and transform are
// not. Debug stays available on the public types only.
impl core::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PrivateKey").field("params", &self.params).finish_non_exhaustive()
    }
}
