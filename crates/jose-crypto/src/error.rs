//! Error types for cryptographic operations

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CryptoError {
    /// There is always at least a header in a JOSE signing input, so an
    /// empty input is a caller bug rather than a degenerate signature.
    #[error("Signing input must not be empty")]
    EmptyInput,

    #[error("Algorithm not supported: {0}")]
    AlgorithmNotSupported(String),

    #[error("Unsupported curve: {0}")]
    UnsupportedCurve(String),

    #[error("Malformed coordinate: {0}")]
    MalformedCoordinate(String),

    #[error("Invalid coordinate length: expected {expected} bytes, got {actual}")]
    InvalidCoordinateLength { expected: usize, actual: usize },

    #[error("Key error: {0}")]
    KeyError(String),
}

pub type Result<T> = std::result::Result<T, CryptoError>;
