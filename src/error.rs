//! Error taxonomy for the cipher engine.
//!
//! Two kinds, from the caller's perspective: a parameter error (bad key
//! length, unsupported mode/feedback-width combination) and a length error
//! (`update` called with a buffer that isn't a multiple of 8 bytes).

use core::fmt;

/// Errors returned by [`crate::Context::new`] and [`crate::Context::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherError {
    /// The key supplied to `Context::new` did not match the length the
    /// variant requires (8 bytes for DES, 24 for DESX and 3DES).
    InvalidKeyLength { expected: usize, actual: usize },
    /// The feedback width `n` for CFB/OFB is not one of 1, 8, 16, 32, 64.
    InvalidFeedbackWidth(u32),
    /// `update` was called with a buffer whose length isn't a multiple of 8.
    LengthNotBlockAligned(usize),
}

impl fmt::Display for CipherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidKeyLength { expected, actual } => write!(
                f,
                "invalid key length: expected {expected} bytes, got {actual}"
            ),
            Self::InvalidFeedbackWidth(n) => {
                write!(f, "invalid feedback width {n}: must be 1, 8, 16, 32, or 64")
            }
            Self::LengthNotBlockAligned(len) => {
                write!(f, "buffer length {len} is not a multiple of 8 bytes")
            }
        }
    }
}

impl std::error::Error for CipherError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages_are_non_empty() {
        let errs = [
            CipherError::InvalidKeyLength {
                expected: 8,
                actual: 7,
            },
            CipherError::InvalidFeedbackWidth(3),
            CipherError::LengthNotBlockAligned(5),
        ];
        for e in errs {
            assert!(!e.to_string().is_empty());
        }
    }
}
