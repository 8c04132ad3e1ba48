//! Cipher table loading errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CipherError {
    /// A raw table blob had the wrong size.
    #[error("cipher table blob is {actual} bytes, expected {expected}")]
    TableLength { expected: usize, actual: usize },
}
