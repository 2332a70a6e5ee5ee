//! `SecretKit` for mobile hosts.
//!
//! Re-exports [`secretkit_core`] so a single static library carries every
//! exported type.

pub use secretkit_core::*;
