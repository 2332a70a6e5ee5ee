use thiserror::Error;

use crate::store::StoreError;

/// Error outputs from `SecretKit`
#[derive(Debug, Error, uniffi::Error)]
#[uniffi(flat_error)]
pub enum VaultError {
    /// The device cannot run a biometric challenge. Terminal: no password
    /// fallback is offered.
    #[error("biometry_unavailable")]
    BiometryUnavailable,
    /// The biometric challenge failed. The password fallback is now armed.
    #[error("authentication_failed: {reason}")]
    AuthenticationFailed {
        /// Platform-provided failure description, if any.
        reason: String,
    },
    /// The submitted password does not match the stored credential.
    #[error("password_mismatch")]
    PasswordMismatch,
    /// A credential is already stored and cannot be replaced.
    #[error("credential_already_set")]
    CredentialAlreadySet,
    /// A password was submitted without a failed biometric challenge before it.
    #[error("no_pending_fallback")]
    NoPendingFallback,
    /// The secret is hidden; edits are only accepted while it is visible.
    #[error("secret_locked")]
    SecretLocked,
    /// A `BiometricReply` was resolved more than once.
    #[error("biometric_reply_consumed")]
    BiometricReplyConsumed,
    /// The presented input is not valid for the requested operation
    #[error("invalid_input_{attribute}: {reason}")]
    InvalidInput {
        /// The attribute that is invalid
        attribute: String,
        /// The reason the input is invalid
        reason: String,
    },
    /// The secure store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The session state mutex was poisoned.
    #[error("session_lock_error: {0}")]
    Lock(String),
}

impl VaultError {
    /// Returns `true` when the user may recover by trying again.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::AuthenticationFailed { .. } | Self::PasswordMismatch
        )
    }
}
