//! Error types for secure store implementations.

use thiserror::Error;

/// Result type for secure store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by a [`SecureStore`](super::SecureStore).
#[derive(Debug, Error, uniffi::Error)]
pub enum StoreError {
    /// The platform store rejected or failed the operation.
    #[error("secure store error: {0}")]
    Backend(String),

    /// A stored value could not be decoded as UTF-8 text.
    #[error("invalid stored value for {key}: {reason}")]
    InvalidValue {
        /// Key whose value is malformed.
        key: String,
        /// Why decoding failed.
        reason: String,
    },

    /// Unexpected `UniFFI` callback error.
    #[error("unexpected uniffi callback error: {0}")]
    UnexpectedUniFFICallbackError(String),
}

impl From<uniffi::UnexpectedUniFFICallbackError> for StoreError {
    fn from(error: uniffi::UnexpectedUniFFICallbackError) -> Self {
        Self::UnexpectedUniFFICallbackError(error.reason)
    }
}
