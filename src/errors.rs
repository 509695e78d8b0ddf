//! Error taxonomy shared across the crate.

use thiserror::Error;

/// Errors surfaced by key generation, signing, verification and the codecs.
///
/// Two outcomes are deliberately *not* errors: a singular linear system
/// during signing (the solver reports `None` and the signing loop retries
/// with a fresh vinegar assignment) and a verification mismatch (reported
/// as `false`).
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum LuovError {
    /// A matrix operation was invoked with incompatible shapes. Always a
    /// programming error in the caller; never recovered internally.
    #[error("dimension mismatch in {op}: {lhs:?} vs {rhs:?}")]
    DimensionMismatch {
        /// Operation that rejected its operands.
        op: &'static str,
        /// `(rows, cols)` of the left operand.
        lhs: (usize, usize),
        /// `(rows, cols)` of the right operand.
        rhs: (usize, usize),
    },

    /// The multiplicative inverse of zero was requested.
    #[error("multiplicative inverse of zero")]
    DivisionByZero,

    /// Matrix inversion hit a column with no usable pivot.
    #[error("matrix is not invertible")]
    NotInvertible,

    /// The platform entropy source failed. Fatal: key generation and signing
    /// abort rather than fall back to weaker randomness.
    #[error("entropy source unavailable")]
    EntropySourceUnavailable,

    /// Hex/byte decoding received input of the wrong length, with invalid
    /// digits, or with elements outside the field range. Never guessed at
    /// or silently truncated.
    #[error("malformed encoding: {0}")]
    MalformedEncoding(String),

    /// A parameter set failed validation.
    #[error("invalid parameters: {0}")]
    InvalidParams(&'static str),
}

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, LuovError>;
