use thiserror::Error;

/// A specialized `Result` type for strand operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for all fallible strand operations.
///
/// Permissive operations (`at`, `first`, `last`, `substr`, `slice`,
/// `insert`, `repeat`) never produce these; out-of-range arguments there
/// degrade to empty or clamped results instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    /// The input could not be converted into text, e.g. a byte payload
    /// that is not valid for its declared encoding.
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// What made the input unacceptable.
        reason: String,
    },

    /// A caller-supplied option was outside its allowed set, e.g. an
    /// unknown hash algorithm name or mismatched parallel replacement
    /// arrays.
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// Which argument was rejected and why.
        reason: String,
    },

    /// A strict indexed read at or beyond the value's length.
    #[error("index {index} out of bounds for length {length}")]
    OutOfBounds {
        /// The requested index, as given by the caller.
        index: isize,
        /// The length of the value in codepoints.
        length: usize,
    },

    /// An attempted write or delete through indexed access. Strand values
    /// are immutable; every transformation returns a new value instead.
    #[error("strand values are immutable; indexed writes are not supported")]
    ImmutableViolation,

    /// Decryption failed its authenticity check: wrong key, truncated or
    /// tampered ciphertext. Plaintext is never returned in this case.
    #[error("ciphertext failed integrity check (wrong key, truncated or tampered data)")]
    CryptoIntegrity,
}

impl Error {
    #[inline]
    pub(crate) fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    #[inline]
    pub(crate) fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    #[inline]
    pub(crate) fn out_of_bounds(index: isize, length: usize) -> Self {
        Self::OutOfBounds { index, length }
    }
}
