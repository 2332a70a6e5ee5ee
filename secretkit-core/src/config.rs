//! Session configuration.

use serde::Deserialize;

use crate::VaultError;

/// Configuration for a [`SecretSession`](crate::SecretSession).
///
/// Every field defaults to the value the application ships with, so hosts
/// usually pass [`VaultConfig::default`] or a JSON document overriding only the
/// copy they localize.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, uniffi::Record)]
#[serde(default, deny_unknown_fields)]
pub struct VaultConfig {
    /// Secure store key holding the fallback password.
    pub password_key: String,
    /// Secure store key holding the secret text.
    pub secret_key: String,
    /// Reason shown by the platform biometric prompt.
    pub biometric_reason: String,
    /// Screen title while the secret is hidden.
    pub locked_title: String,
    /// Screen title while the secret is visible.
    pub unlocked_title: String,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            password_key: "password".to_string(),
            secret_key: "SecretMessage".to_string(),
            biometric_reason: "Identify yourself!".to_string(),
            locked_title: "Nothing to see here".to_string(),
            unlocked_title: "Secret stuff!".to_string(),
        }
    }
}

impl VaultConfig {
    /// Parses a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    /// Will error if the JSON is malformed, has unknown fields or fails [`VaultConfig::validate`].
    pub fn from_json(json: &str) -> Result<Self, VaultError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| VaultError::InvalidInput {
                attribute: "config".to_string(),
                reason: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the storage keys are usable.
    ///
    /// # Errors
    /// Will error if a storage key is empty or both keys are the same.
    pub fn validate(&self) -> Result<(), VaultError> {
        for (attribute, key) in [
            ("password_key", &self.password_key),
            ("secret_key", &self.secret_key),
        ] {
            if key.is_empty() {
                return Err(VaultError::InvalidInput {
                    attribute: attribute.to_string(),
                    reason: "storage key must not be empty".to_string(),
                });
            }
        }
        if self.password_key == self.secret_key {
            return Err(VaultError::InvalidInput {
                attribute: "secret_key".to_string(),
                reason: "must differ from password_key".to_string(),
            });
        }
        Ok(())
    }
}

/// Parses a [`VaultConfig`] from JSON.
///
/// # Errors
/// See [`VaultConfig::from_json`].
#[uniffi::export]
pub fn vault_config_from_json(json: &str) -> Result<VaultConfig, VaultError> {
    VaultConfig::from_json(json)
}

/// Returns the default [`VaultConfig`].
#[uniffi::export]
#[must_use]
pub fn default_vault_config() -> VaultConfig {
    VaultConfig::default()
}
