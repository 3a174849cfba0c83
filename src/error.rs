//! Error types for 8b/10b line coding

use thiserror::Error;

/// Result type for line coding operations
pub type Result<T> = std::result::Result<T, CodingError>;

/// Error types encountered while encoding or decoding line symbols
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodingError {
    /// Control flag set on a byte that is not one of the 12 K-characters
    #[error("Invalid control code: {0}")]
    InvalidControlCode(String),

    /// Symbol value does not fit in 10 bits
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    /// 10-bit pattern is not a legal 8b/10b codeword
    #[error("Invalid codeword: {0}")]
    InvalidCodeword(String),

    /// Codeword is legal but not under the current running disparity
    #[error("Disparity violation: {0}")]
    DisparityViolation(String),
}

impl CodingError {
    /// Create a new InvalidControlCode error
    pub fn invalid_control_code(msg: impl Into<String>) -> Self {
        CodingError::InvalidControlCode(msg.into())
    }

    /// Create a new InvalidSymbol error
    pub fn invalid_symbol(msg: impl Into<String>) -> Self {
        CodingError::InvalidSymbol(msg.into())
    }

    /// Create a new InvalidCodeword error
    pub fn invalid_codeword(msg: impl Into<String>) -> Self {
        CodingError::InvalidCodeword(msg.into())
    }

    /// Create a new DisparityViolation error
    pub fn disparity_violation(msg: impl Into<String>) -> Self {
        CodingError::DisparityViolation(msg.into())
    }
}
