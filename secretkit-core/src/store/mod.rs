//! Secure key/value storage used to persist the credential and the secret.
//!
//! The store itself is provided by the host platform:
//!
//! - iOS: Keychain Services (see [`KeychainSecureStore`] behind `platform-ios`)
//! - Android: `EncryptedSharedPreferences` or the Android Keystore
//! - Tests and desktop development: [`MemorySecureStore`]

pub mod error;
pub mod memory;
pub mod traits;

#[cfg(all(feature = "platform-ios", target_vendor = "apple"))]
mod keychain;

pub use error::{StoreError, StoreResult};
pub use memory::MemorySecureStore;
pub use traits::SecureStore;

#[cfg(all(feature = "platform-ios", target_vendor = "apple"))]
pub use keychain::{KeychainSecureStore, DEFAULT_KEYCHAIN_SERVICE};
