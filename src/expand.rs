//! Deterministic expansion of seeds into key material.
//!
//! Three pipelines, all pure functions of their seed:
//!
//! * private seed → public seed, a fixed four-block DES mixing;
//! * private seed → linear transform `T`, two AES-128 generators run in
//!   output-feedback mode whose emitted blocks carry one disambiguated bit
//!   in bytes 0 and 8, closed by a half-block chosen from the seed's own
//!   parity;
//! * public seed → public-map coefficients C, L and Q1, a SHA-512 state
//!   repeatedly enciphered by ChaCha20 under an incrementing ASCII nonce.
//!
//! The byte layouts here are load-bearing: regenerating a key pair from the
//! same seed must reproduce identical material, and anyone holding the
//! public seed must arrive at the same C/L/Q1.

use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockEncrypt, KeyInit};
use aes::Aes128;
use chacha20::cipher::{KeyIvInit, StreamCipher};
use chacha20::ChaCha20Legacy;
use des::Des;
use sha2::{Digest, Sha512};
use zeroize::Zeroize;

use crate::matrix::Matrix;
use crate::params::{Params, EXPAND_BLOCK, SEED_LEN};

/// Constant, linear and vinegar-quadratic coefficients of the public map,
/// reproducible by anyone holding the public seed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct PublicMapParts {
    /// m×1 constant term per polynomial.
    pub(crate) c: Matrix,
    /// m×n linear term.
    pub(crate) l: Matrix,
    /// m×(v(v+1)/2 + v·m) packed vinegar-vinegar and vinegar-oil terms.
    pub(crate) q1: Matrix,
}

impl Zeroize for PublicMapParts {
    fn zeroize(&mut self) {
        self.c.zeroize();
        self.l.zeroize();
        self.q1.zeroize();
    }
}

fn aes_block(cipher: &Aes128, input: [u8; 16]) -> [u8; 16] {
    let mut block = GenericArray::from(input);
    cipher.encrypt_block(&mut block);
    block.into()
}

/// Derives the public seed from the private seed.
///
/// The seed splits into four 8-byte chunks `k0..k3`; chunk `i` of the output
/// is the single-block DES encryption of chunk `(2(i+1) mod 5) − 1` under
/// key `k_i`.
pub(crate) fn derive_public_seed(seed: &[u8; SEED_LEN]) -> [u8; SEED_LEN] {
    let mut out = [0u8; SEED_LEN];
    for i in 0..4 {
        let src = (2 * (i + 1)) % 5 - 1;
        let key: [u8; 8] = seed[8 * i..8 * (i + 1)].try_into().expect("cannot fail");
        let cipher = Des::new(&key.into());
        let mut block = GenericArray::clone_from_slice(&seed[8 * src..8 * (src + 1)]);
        cipher.encrypt_block(&mut block);
        out[8 * i..8 * (i + 1)].copy_from_slice(&block);
    }
    out
}

// Emitted copy of a generator block: bytes 0 and 8 keep only their low bit,
// marking the row boundaries of the unpacked bit-matrix. The raw block stays
// in the feedback path.
fn masked(block: [u8; 16]) -> [u8; 16] {
    let mut out = block;
    out[0] &= 1;
    out[8] &= 1;
    out
}

/// Derives the v×m 0/1 linear transform from the private seed.
///
/// Generator A is keyed by the second half of the seed over a state starting
/// at the first half; generator B is keyed the other way around. Each round
/// advances both states in output-feedback mode and emits one masked block
/// from each. The closing 8-byte half-row comes from generator A applied to
/// state B when seed byte 0 has its high bit set, from generator B applied
/// to state A otherwise. The branch depends on the seed alone, never on an
/// external source, so regeneration stays exact.
pub(crate) fn derive_transform(params: &Params, seed: &[u8; SEED_LEN]) -> Matrix {
    let key_a: [u8; 16] = seed[16..32].try_into().expect("cannot fail");
    let key_b: [u8; 16] = seed[0..16].try_into().expect("cannot fail");
    let cipher_a = Aes128::new(&key_a.into());
    let cipher_b = Aes128::new(&key_b.into());
    let mut state_a: [u8; 16] = seed[0..16].try_into().expect("cannot fail");
    let mut state_b: [u8; 16] = seed[16..32].try_into().expect("cannot fail");

    let mut stream = Vec::with_capacity(8 * (params.vinegar + 3));
    for _ in 0..params.vinegar / 4 {
        state_a = aes_block(&cipher_a, state_a);
        state_b = aes_block(&cipher_b, state_b);
        stream.extend_from_slice(&masked(state_a));
        stream.extend_from_slice(&masked(state_b));
    }
    let mut closing = if seed[0] & 0x80 != 0 {
        aes_block(&cipher_a, state_b)
    } else {
        aes_block(&cipher_b, state_a)
    };
    closing[0] &= 1;
    stream.extend_from_slice(&closing[..8]);

    unpack_transform(params, &stream)
}

// Row-major bit unpack: each 8-byte row is a big-endian integer whose low m
// bits, most significant first, form the row. The masked leading byte keeps
// every row value below 2^57.
fn unpack_transform(params: &Params, stream: &[u8]) -> Matrix {
    let (v, m) = (params.vinegar, params.oil);
    debug_assert!(stream.len() >= 8 * v, "transform stream too short");
    let mut t = Matrix::zeros(v, m);
    for i in 0..v {
        let row = u64::from_be_bytes(stream[8 * i..8 * (i + 1)].try_into().expect("cannot fail"));
        for j in 0..m {
            t.set(i, j, ((row >> (m - 1 - j)) & 1) as u8);
        }
    }
    t
}

// Nonce for expansion round `i`: the ASCII decimal rendering of `i`,
// left-padded with '0' to eight characters.
fn round_nonce(round: usize) -> [u8; 8] {
    debug_assert!(round < 100_000_000, "nonce counter overflow");
    let digits = round.to_string();
    let mut nonce = [b'0'; 8];
    nonce[8 - digits.len()..].copy_from_slice(digits.as_bytes());
    nonce
}

/// Expands the public seed into the C, L and Q1 coefficient matrices.
///
/// The running state starts as four repetitions of SHA-512(seed). Each round
/// re-keys ChaCha20 (the original 64-bit-nonce variant) with the public seed
/// and the round nonce, enciphers the state into a 512-byte block, and
/// carries the whole block forward as the next state. On the first round the
/// state is only 256 bytes, so the tail of the block stays zero; that tail
/// is part of the fixed layout. Every emitted byte is folded into the field
/// range by clearing its top bit. The first m rounds contribute one byte to
/// C, n bytes to L and the remainder to Q1; the following m(m+3) rounds feed
/// Q1 alone, which is then truncated to its exact dimension.
pub(crate) fn derive_public_map(params: &Params, public_seed: &[u8; SEED_LEN]) -> PublicMapParts {
    let m = params.oil;
    let n = params.n();
    let mask = params.element_mask();

    let digest = Sha512::digest(public_seed);
    let mut state = Vec::with_capacity(EXPAND_BLOCK);
    for _ in 0..4 {
        state.extend_from_slice(&digest);
    }

    let mut c = Vec::with_capacity(m);
    let mut l = Vec::with_capacity(m * n);
    let mut q1 = Vec::with_capacity(m * params.q1_cols() + EXPAND_BLOCK);

    for round in 0..m * (m + 4) {
        let nonce = round_nonce(round);
        let mut cipher = ChaCha20Legacy::new(&(*public_seed).into(), &nonce.into());
        let mut block = [0u8; EXPAND_BLOCK];
        block[..state.len()].copy_from_slice(&state);
        cipher.apply_keystream(&mut block[..state.len()]);
        state.clear();
        state.extend_from_slice(&block);

        if round < m {
            c.push(block[0] & mask);
            l.extend(block[1..=n].iter().map(|&b| b & mask));
            q1.extend(block[n + 1..].iter().map(|&b| b & mask));
        } else {
            q1.extend(block.iter().map(|&b| b & mask));
        }
    }
    q1.truncate(m * params.q1_cols());

    PublicMapParts {
        c: Matrix::from_raw(m, 1, c),
        l: Matrix::from_raw(m, n, l),
        q1: Matrix::from_raw(m, params.q1_cols(), q1),
    }
}
