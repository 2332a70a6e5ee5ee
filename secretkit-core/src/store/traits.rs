//! Platform interface for secure storage.

use super::error::StoreResult;

/// Device-local, app-scoped key/value store with at-rest protection.
///
/// Platform implementations should use the system credential store:
/// - iOS: Keychain Services with `kSecAttrAccessibleWhenUnlockedThisDeviceOnly`
/// - Android: `EncryptedSharedPreferences` backed by the Android Keystore
///
/// Calls are synchronous and expected to be fast; the session invokes them
/// while handling UI events.
#[uniffi::export(with_foreign)]
pub trait SecureStore: Send + Sync {
    /// Reads the value stored under `key`, if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform store fails the read.
    fn get(&self, key: String) -> StoreResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform store fails the write.
    fn set(&self, key: String, value: String) -> StoreResult<()>;
}
