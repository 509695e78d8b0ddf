//! Key generation, signing and verification internals.

use rand_core::CryptoRngCore;

use crate::errors::{LuovError, Result};
use crate::expand::{derive_public_map, derive_public_seed, derive_transform};
use crate::field::Gf2m;
use crate::hashing::{digest_to_vector, message_digest};
use crate::matrix::Matrix;
use crate::params::{Params, SALT_LEN, SEED_LEN};
use crate::pubmap;
use crate::solver;
use crate::types::{PrivateKey, PublicKey, Signature};

/// Generates a key pair from a fresh random seed.
///
/// # Errors
/// `EntropySourceUnavailable` when the RNG fails; propagates parameter
/// validation errors.
pub(crate) fn keygen(params: &Params, rng: &mut impl CryptoRngCore) -> Result<(PublicKey, PrivateKey)> {
    let mut seed = [0u8; SEED_LEN];
    rng.try_fill_bytes(&mut seed).map_err(|_| LuovError::EntropySourceUnavailable)?;
    keygen_internal(params, &seed)
}

/// Deterministic key generation: the same seed always reproduces an
/// identical key pair.
pub(crate) fn keygen_internal(params: &Params, seed: &[u8; SEED_LEN]) -> Result<(PublicKey, PrivateKey)> {
    params.validate()?;
    let gf = Gf2m::new(params)?;

    let public_seed = derive_public_seed(seed);
    let transform = derive_transform(params, seed);
    let parts = derive_public_map(params, &public_seed);
    let q2 = pubmap::find_q2(&gf, params, &parts.q1, &transform)?;

    let pk = PublicKey { params: *params, public_seed, q2, parts: parts.clone() };
    let sk = PrivateKey { params: *params, seed: *seed, public_seed, transform, parts };
    Ok((pk, sk))
}

// The explicit change-of-variables matrix [[I_v, T], [0, I_m]].
fn transform_matrix(params: &Params, t: &Matrix) -> Result<Matrix> {
    let upper = Matrix::identity(params.vinegar).concat_cols(t)?;
    let lower =
        Matrix::zeros(params.oil, params.vinegar).concat_cols(&Matrix::identity(params.oil))?;
    upper.concat_rows(&lower)
}

/// Signs a message: hash under a fresh salt, then retry random vinegar
/// assignments until the induced linear system in the oil variables is
/// non-singular.
///
/// The salt and message vector stay fixed for the whole attempt; only the
/// vinegar sample changes between iterations. There is no retry bound; the
/// singular probability is small and the expected iteration count is close
/// to one.
///
/// # Errors
/// `EntropySourceUnavailable` when the RNG fails. A singular system is not
/// an error; it re-enters the loop.
pub(crate) fn sign_internal(
    sk: &PrivateKey, rng: &mut impl CryptoRngCore, message: &[u8],
) -> Result<Signature> {
    let params = &sk.params;
    let gf = Gf2m::new(params)?;
    let m = params.oil;
    let v = params.vinegar;
    let mask = params.element_mask();

    let mut salt = [0u8; SALT_LEN];
    rng.try_fill_bytes(&mut salt).map_err(|_| LuovError::EntropySourceUnavailable)?;
    let h = digest_to_vector(params, &message_digest(params, message, &salt));

    // Everything that does not depend on the vinegar sample is hoisted out
    // of the retry loop: L·[T ; I_m] and the per-polynomial Q1 blocks.
    let t_ext = sk.transform.concat_rows(&Matrix::identity(m))?;
    let lhs_base = sk.parts.l.mul(&gf, &t_ext)?;
    let blocks: Vec<(Matrix, Matrix)> = (0..m)
        .map(|k| {
            (pubmap::vinegar_block(params, &sk.parts.q1, k), pubmap::oil_block(params, &sk.parts.q1, k))
        })
        .collect();

    let s_prime = loop {
        // fresh vinegar assignment, each byte folded into the field range
        let mut vin = vec![0u8; v];
        rng.try_fill_bytes(&mut vin).map_err(|_| LuovError::EntropySourceUnavailable)?;
        for b in &mut vin {
            *b &= mask;
        }
        let vinegar = Matrix::column(&vin);
        let vin_t = vinegar.transpose();

        // RHS_k = h_k ⊕ C_k ⊕ (L·[v ; 0])_k ⊕ vᵗ·Pk1·v
        let v_ext = vinegar.concat_rows(&Matrix::zeros(m, 1))?;
        let mut rhs = h.add(&sk.parts.c)?.add(&sk.parts.l.mul(&gf, &v_ext)?)?;

        // LHS row k = (L·[T ; I_m])_k ⊕ vᵗ·((Pk1 ⊕ Pk1ᵗ)·T ⊕ Pk2); folding
        // vᵗ in first keeps every intermediate a single row
        let mut lhs = lhs_base.clone();
        for (k, (pk1, pk2)) in blocks.iter().enumerate() {
            let quad = vin_t.mul(&gf, pk1)?.mul(&gf, &vinegar)?;
            rhs.set(k, 0, rhs.get(k, 0) ^ quad.get(0, 0));

            let row = vin_t
                .mul(&gf, &pk1.add(&pk1.transpose())?)?
                .mul(&gf, &sk.transform)?
                .add(&vin_t.mul(&gf, pk2)?)?;
            for j in 0..m {
                lhs.set(k, j, lhs.get(k, j) ^ row.get(0, j));
            }
        }

        let rhs_vec: Vec<u8> = (0..m).map(|k| rhs.get(k, 0)).collect();
        match solver::solve(&gf, &lhs, &rhs_vec)? {
            Some(oil) => break vinegar.concat_rows(&Matrix::column(&oil))?,
            None => continue, // singular system: retry with new vinegar
        }
    };

    let s = transform_matrix(params, &sk.transform)?.mul(&gf, &s_prime)?;
    Ok(Signature { s: s.as_bytes().to_vec(), salt })
}

/// Verifies a signature by recomputing the message vector and evaluating
/// the public map at `s`. Exact element-wise equality; anything else,
/// including a malformed shape, verifies false.
pub(crate) fn verify_internal(pk: &PublicKey, message: &[u8], signature: &Signature) -> bool {
    let params = &pk.params;
    if signature.s.len() != params.n() {
        return false;
    }
    if signature.s.iter().any(|&b| b > params.element_mask()) {
        return false;
    }
    let Ok(gf) = Gf2m::new(params) else {
        return false;
    };

    let h = digest_to_vector(params, &message_digest(params, message, &signature.salt));
    let s = Matrix::column(&signature.s);
    match pubmap::evaluate(&gf, params, &pk.parts, &pk.q2, &s) {
        Ok(e) => e == h,
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::LUOV_7_6_13;
    use rand_chacha::rand_core::SeedableRng;

    #[test]
    fn keygen_is_deterministic_per_seed() {
        let seed = [0x21u8; SEED_LEN];
        let (pk1, sk1) = keygen_internal(&LUOV_7_6_13, &seed).unwrap();
        let (pk2, sk2) = keygen_internal(&LUOV_7_6_13, &seed).unwrap();
        assert_eq!(pk1, pk2);
        assert_eq!(sk1.transform, sk2.transform);
        assert_eq!(sk1.parts, sk2.parts);

        let (pk3, _) = keygen_internal(&LUOV_7_6_13, &[0x22u8; SEED_LEN]).unwrap();
        assert_ne!(pk1, pk3);
    }

    #[test]
    fn sign_then_verify_round_trip() {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(11);
        let (pk, sk) = keygen(&LUOV_7_6_13, &mut rng).unwrap();
        for msg in [&b"test"[..], b"", b"a slightly longer message body"] {
            let sig = sign_internal(&sk, &mut rng, msg).unwrap();
            assert_eq!(sig.s.len(), LUOV_7_6_13.n());
            assert!(verify_internal(&pk, msg, &sig));
            assert!(!verify_internal(&pk, b"other message", &sig));
        }
    }

    #[test]
    fn oversized_signature_elements_are_rejected() {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(12);
        let (pk, sk) = keygen(&LUOV_7_6_13, &mut rng).unwrap();
        let sig = sign_internal(&sk, &mut rng, b"test").unwrap();

        let mut bad = sig.clone();
        bad.s[0] |= 0x80;
        assert!(!verify_internal(&pk, b"test", &bad));

        let mut short = sig;
        short.s.pop();
        assert!(!verify_internal(&pk, b"test", &short));
    }

    #[test]
    fn signatures_from_different_keys_do_not_cross_verify() {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(13);
        let (pk_a, sk_a) = keygen(&LUOV_7_6_13, &mut rng).unwrap();
        let (pk_b, _) = keygen(&LUOV_7_6_13, &mut rng).unwrap();
        let sig = sign_internal(&sk_a, &mut rng, b"test").unwrap();
        assert!(verify_internal(&pk_a, b"test", &sig));
        assert!(!verify_internal(&pk_b, b"test", &sig));
    }
}
