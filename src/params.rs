//! Parameter sets for the LUOV signature scheme.
//!
//! A parameter set fixes the lifted field GF(2^r), its reduction polynomial,
//! and the oil/vinegar split of the signature variables. The set is carried
//! as an explicit immutable struct so that every component receives its
//! configuration at construction instead of reading module globals.

use crate::errors::{LuovError, Result};

/// Length in bytes of a private or public seed.
pub const SEED_LEN: usize = 32;

/// Length in bytes of a signature salt.
pub const SALT_LEN: usize = 16;

/// Bytes produced per round of the public-map expansion stream. The slicing
/// of each round into C/L/Q1 contributions requires `n + 1` to fit in one
/// block.
pub(crate) const EXPAND_BLOCK: usize = 512;

// Each transform row is unpacked from an 8-byte block whose leading byte
// carries a single disambiguated bit, leaving 57 usable bits per row.
const MAX_OIL: usize = 57;

/// An immutable LUOV parameter set.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Params {
    /// Field degree `r`; elements live in GF(2^r).
    pub field_degree: u32,
    /// Reduction polynomial of the field, including its degree-`r` bit.
    pub field_poly: u16,
    /// Oil variable count `m`; also the number of public polynomials.
    pub oil: usize,
    /// Vinegar variable count `v`.
    pub vinegar: usize,
}

impl Params {
    /// Creates a parameter set, validating the structural constraints.
    ///
    /// # Errors
    /// Returns `InvalidParams` when a constraint listed in [`Params::validate`]
    /// does not hold.
    pub fn new(field_degree: u32, field_poly: u16, oil: usize, vinegar: usize) -> Result<Self> {
        let params = Self { field_degree, field_poly, oil, vinegar };
        params.validate()?;
        Ok(params)
    }

    /// Creates a parameter set without validation, for known-good constants.
    #[must_use]
    pub const fn new_unchecked(
        field_degree: u32, field_poly: u16, oil: usize, vinegar: usize,
    ) -> Self {
        Self { field_degree, field_poly, oil, vinegar }
    }

    /// Total variable count `n = v + m`.
    #[inline]
    #[must_use]
    pub const fn n(&self) -> usize {
        self.vinegar + self.oil
    }

    /// Column count of Q1: the packed vinegar-vinegar upper triangle plus
    /// the vinegar-oil block, per polynomial row.
    #[inline]
    #[must_use]
    pub const fn q1_cols(&self) -> usize {
        self.vinegar * (self.vinegar + 1) / 2 + self.vinegar * self.oil
    }

    /// Column count of Q2: the packed oil-oil upper triangle.
    #[inline]
    #[must_use]
    pub const fn q2_cols(&self) -> usize {
        self.oil * (self.oil + 1) / 2
    }

    /// Length in bytes of the truncated message digest, `⌈r·m/8⌉`.
    #[inline]
    #[must_use]
    pub const fn digest_len(&self) -> usize {
        (self.field_degree as usize * self.oil + 7) / 8
    }

    /// Mask folding a byte into the field range `[0, 2^r)`.
    #[inline]
    #[must_use]
    pub const fn element_mask(&self) -> u8 {
        ((1u16 << self.field_degree) - 1) as u8
    }

    /// Checks the structural constraints of the set.
    ///
    /// # Errors
    /// Returns `InvalidParams` when:
    /// - the field degree is outside `1..=7` (elements are single bytes with
    ///   a clear top bit),
    /// - the reduction polynomial does not have degree `r`,
    /// - `m` is zero or exceeds the 57 bits a transform row can carry,
    /// - `v < m`, or `v ≢ 1 (mod 4)` (the transform expansion emits four
    ///   rows per round plus one closing row),
    /// - `n + 1` does not fit in one expansion block.
    pub fn validate(&self) -> Result<()> {
        if self.field_degree == 0 || self.field_degree > 7 {
            return Err(LuovError::InvalidParams("field degree must be in 1..=7"));
        }
        if self.field_poly >> self.field_degree != 1 {
            return Err(LuovError::InvalidParams("reduction polynomial degree must equal r"));
        }
        if self.oil == 0 || self.oil > MAX_OIL {
            return Err(LuovError::InvalidParams("oil count must be in 1..=57"));
        }
        if self.vinegar < self.oil {
            return Err(LuovError::InvalidParams("vinegar count must be at least the oil count"));
        }
        if self.vinegar % 4 != 1 {
            return Err(LuovError::InvalidParams("vinegar count must be 1 mod 4"));
        }
        if self.n() + 1 > EXPAND_BLOCK {
            return Err(LuovError::InvalidParams("n + 1 must fit in one expansion block"));
        }
        Ok(())
    }
}

/// The production parameter set: GF(2^7) with x^7 + x + 1, 57 oil and 197
/// vinegar variables.
pub const LUOV_7_57_197: Params = Params::new_unchecked(7, 131, 57, 197);

/// A deliberately tiny set over the same field for fast tests, examples and
/// doctests. Provides no security whatsoever.
pub const LUOV_7_6_13: Params = Params::new_unchecked(7, 131, 6, 13);
