//! Apple Keychain-based secure store.
//!
//! Every key is stored as a generic password item under a single service
//! identifier, scoped to the application. Items use the Keychain's default
//! accessibility, so unlike the recommendation on [`SecureStore`] they may be
//! included in encrypted device backups.

use security_framework::passwords::{get_generic_password, set_generic_password};

use super::{SecureStore, StoreError, StoreResult};

/// `errSecItemNotFound`
const ERR_SEC_ITEM_NOT_FOUND: i32 = -25300;

/// Default Keychain service identifier.
pub const DEFAULT_KEYCHAIN_SERVICE: &str = "org.secretkit.secret";

/// [`SecureStore`] backed by Keychain generic password items.
#[derive(Debug, Clone)]
pub struct KeychainSecureStore {
    service: String,
}

impl KeychainSecureStore {
    /// Creates a store that keeps its items under `service`.
    #[must_use]
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }
}

impl Default for KeychainSecureStore {
    fn default() -> Self {
        Self::new(DEFAULT_KEYCHAIN_SERVICE)
    }
}

impl SecureStore for KeychainSecureStore {
    fn get(&self, key: String) -> StoreResult<Option<String>> {
        match get_generic_password(&self.service, &key) {
            Ok(bytes) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|e| StoreError::InvalidValue {
                    key,
                    reason: e.to_string(),
                }),
            Err(e) if e.code() == ERR_SEC_ITEM_NOT_FOUND => Ok(None),
            Err(e) => Err(StoreError::Backend(format!(
                "failed to read {key} from Keychain: {e}"
            ))),
        }
    }

    fn set(&self, key: String, value: String) -> StoreResult<()> {
        // Note: `set_generic_password` uses the default accessibility
        // (`kSecAttrAccessibleWhenUnlocked`), not a `ThisDeviceOnly` class.
        // Hosts that need device-bound items should implement `SecureStore`
        // over the lower-level SecItem APIs.
        set_generic_password(&self.service, &key, value.as_bytes()).map_err(|e| {
            StoreError::Backend(format!("failed to write {key} to Keychain: {e}"))
        })
    }
}
