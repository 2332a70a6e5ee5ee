//! The fallback password.

use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;

/// The user-chosen fallback password, held in memory for the session.
///
/// The inner string is zeroized on drop.
pub struct Credential(SecretString);

impl Credential {
    pub fn new(password: String) -> Self {
        Self(SecretString::from(password))
    }

    /// Exact string equality, evaluated in constant time over the bytes.
    pub fn matches(&self, candidate: &str) -> bool {
        self.0
            .expose_secret()
            .as_bytes()
            .ct_eq(candidate.as_bytes())
            .into()
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential([REDACTED])")
    }
}
