#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
//! Core of `SecretKit`: keeps a single short secret behind biometric or password
//! authentication.
//!
//! The host application owns rendering and the platform APIs. It implements
//! [`SecureStore`] and [`BiometricAuthenticator`], builds a [`SecretSession`]
//! at launch and forwards lifecycle events to it. The session decides when the
//! secret is revealed and when it is persisted and hidden again.

mod biometrics;
pub use biometrics::*;

mod config;
pub use config::*;

mod credential;

mod error;
pub use error::*;

mod gate;

mod lifecycle;

pub mod logger;

mod screen;
pub use screen::*;

mod session;
pub use session::*;

pub mod store;
pub use store::{SecureStore, StoreError, StoreResult};

uniffi::setup_scaffolding!("secretkit_core");
