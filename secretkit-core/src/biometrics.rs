//! Bridge to the platform biometric API.
//!
//! The platform reports the result of a challenge through a callback on an
//! arbitrary thread. The session hands the host a [`BiometricReply`] and
//! suspends on the matching receiver until the host resolves it.

use std::sync::{Arc, Mutex};

use tokio::sync::oneshot;

use crate::VaultError;

const DEFAULT_FAILURE_REASON: &str = "biometric challenge failed";
const ABANDONED_REASON: &str = "biometric reply dropped without a result";

/// Platform biometric authenticator (Face ID, Touch ID, `BiometricPrompt`).
///
/// ## Swift
///
/// ```swift
/// final class LocalAuthBridge: SecretKit.BiometricAuthenticator {
///     func canEvaluate() -> Bool {
///         LAContext().canEvaluatePolicy(.deviceOwnerAuthenticationWithBiometrics, error: nil)
///     }
///
///     func evaluate(reason: String, reply: SecretKit.BiometricReply) {
///         LAContext().evaluatePolicy(.deviceOwnerAuthenticationWithBiometrics,
///                                    localizedReason: reason) { success, error in
///             try? reply.resolve(success: success, error: error?.localizedDescription)
///         }
///     }
/// }
/// ```
#[uniffi::export(with_foreign)]
pub trait BiometricAuthenticator: Send + Sync {
    /// Returns whether the device can run a biometric challenge right now.
    fn can_evaluate(&self) -> bool;

    /// Starts a biometric challenge and returns without waiting for it.
    ///
    /// The implementation must call [`BiometricReply::resolve`] once the
    /// platform answers. It may do so from any thread.
    fn evaluate(&self, reason: String, reply: Arc<BiometricReply>);
}

/// Result of a biometric challenge as seen by the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ChallengeOutcome {
    Success,
    Failure(String),
}

/// One-shot completion handle for a biometric challenge.
#[derive(uniffi::Object)]
pub struct BiometricReply {
    sender: Mutex<Option<oneshot::Sender<ChallengeOutcome>>>,
}

impl std::fmt::Debug for BiometricReply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BiometricReply")
            .field("resolved", &self.is_resolved())
            .finish()
    }
}

#[uniffi::export]
impl BiometricReply {
    /// Delivers the result of the challenge. Only the first call is accepted.
    ///
    /// # Errors
    /// Returns [`VaultError::BiometricReplyConsumed`] if the reply was already resolved.
    pub fn resolve(&self, success: bool, error: Option<String>) -> Result<(), VaultError> {
        let sender = self
            .sender
            .lock()
            .map_err(|_| VaultError::Lock("biometric reply mutex poisoned".to_string()))?
            .take()
            .ok_or(VaultError::BiometricReplyConsumed)?;

        let outcome = if success {
            ChallengeOutcome::Success
        } else {
            ChallengeOutcome::Failure(
                error.unwrap_or_else(|| DEFAULT_FAILURE_REASON.to_string()),
            )
        };

        if sender.send(outcome).is_err() {
            log::debug!("biometric reply resolved after the challenge was abandoned");
        }
        Ok(())
    }

    /// Returns `true` once [`BiometricReply::resolve`] has been called.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.sender
            .lock()
            .map_or(true, |sender| sender.is_none())
    }
}

impl BiometricReply {
    /// Creates a reply handle and the challenge that completes when it resolves.
    pub(crate) fn channel() -> (Arc<Self>, PendingChallenge) {
        let (sender, receiver) = oneshot::channel();
        let reply = Arc::new(Self {
            sender: Mutex::new(Some(sender)),
        });
        (reply, PendingChallenge(receiver))
    }
}

/// The suspended side of a biometric challenge.
pub(crate) struct PendingChallenge(oneshot::Receiver<ChallengeOutcome>);

impl PendingChallenge {
    /// Waits for the host to resolve the reply. A reply dropped unresolved
    /// counts as a failed challenge.
    pub(crate) async fn outcome(self) -> ChallengeOutcome {
        self.0
            .await
            .unwrap_or_else(|_| ChallengeOutcome::Failure(ABANDONED_REASON.to_string()))
    }
}
