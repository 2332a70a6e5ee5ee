//! Authorization decisions: biometric challenge, password fallback and the
//! first-launch password setup.

use crate::biometrics::ChallengeOutcome;
use crate::credential::Credential;
use crate::store::{SecureStore, StoreResult};
use crate::VaultError;

#[derive(Debug)]
pub(crate) struct CredentialGate {
    credential: Option<Credential>,
    fallback_armed: bool,
    setup_dismissed: bool,
}

impl CredentialGate {
    /// Builds the gate from whatever credential the store already holds.
    pub(crate) fn load(store: &dyn SecureStore, password_key: &str) -> StoreResult<Self> {
        let credential = store.get(password_key.to_string())?.map(Credential::new);
        Ok(Self {
            credential,
            fallback_armed: false,
            setup_dismissed: false,
        })
    }

    pub(crate) const fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    pub(crate) const fn needs_setup(&self) -> bool {
        self.credential.is_none() && !self.setup_dismissed
    }

    pub(crate) const fn fallback_armed(&self) -> bool {
        self.fallback_armed
    }

    /// Persists the first credential. The credential cannot be changed later.
    pub(crate) fn set_credential(
        &mut self,
        store: &dyn SecureStore,
        password_key: &str,
        password: String,
    ) -> Result<(), VaultError> {
        if self.credential.is_some() {
            return Err(VaultError::CredentialAlreadySet);
        }
        store.set(password_key.to_string(), password.clone())?;
        self.credential = Some(Credential::new(password));
        Ok(())
    }

    /// The user declined to choose a password. Only biometrics can unlock
    /// until a password is set.
    pub(crate) fn dismiss_setup(&mut self) {
        self.setup_dismissed = true;
    }

    /// Called before a biometric challenge starts. Disarms any previous
    /// fallback; an unavailable sensor never arms it.
    pub(crate) fn begin_challenge(&mut self, biometry_available: bool) -> Result<(), VaultError> {
        self.fallback_armed = false;
        if biometry_available {
            Ok(())
        } else {
            Err(VaultError::BiometryUnavailable)
        }
    }

    /// Applies the challenge result. `Ok` means access is granted.
    pub(crate) fn finish_challenge(&mut self, outcome: ChallengeOutcome) -> Result<(), VaultError> {
        match outcome {
            ChallengeOutcome::Success => {
                self.fallback_armed = false;
                Ok(())
            }
            ChallengeOutcome::Failure(reason) => {
                self.fallback_armed = true;
                Err(VaultError::AuthenticationFailed { reason })
            }
        }
    }

    /// Compares a fallback password with the stored credential. The fallback
    /// stays armed after a mismatch so the user can retry without limit.
    pub(crate) fn check_password(&mut self, candidate: &str) -> Result<(), VaultError> {
        if !self.fallback_armed {
            return Err(VaultError::NoPendingFallback);
        }
        let matches = self
            .credential
            .as_ref()
            .is_some_and(|credential| credential.matches(candidate));
        if matches {
            self.fallback_armed = false;
            Ok(())
        } else {
            Err(VaultError::PasswordMismatch)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemorySecureStore;

    const KEY: &str = "password";

    fn failed_gate(store: &MemorySecureStore) -> CredentialGate {
        let mut gate = CredentialGate::load(store, KEY).unwrap();
        gate.begin_challenge(true).unwrap();
        let _ = gate.finish_challenge(ChallengeOutcome::Failure("no match".to_string()));
        gate
    }

    #[test]
    fn test_load_existing_credential() {
        let store = MemorySecureStore::with_entries([(KEY, "abc123")]);
        let gate = CredentialGate::load(&store, KEY).unwrap();
        assert!(gate.has_credential());
        assert!(!gate.needs_setup());
    }

    #[test]
    fn test_first_launch_setup() {
        let store = MemorySecureStore::new();
        let mut gate = CredentialGate::load(&store, KEY).unwrap();
        assert!(gate.needs_setup());

        gate.set_credential(&store, KEY, "abc123".to_string()).unwrap();
        assert!(!gate.needs_setup());
        assert_eq!(store.get(KEY.to_string()).unwrap().as_deref(), Some("abc123"));
    }

    #[test]
    fn test_credential_is_immutable() {
        let store = MemorySecureStore::with_entries([(KEY, "first")]);
        let mut gate = CredentialGate::load(&store, KEY).unwrap();
        assert!(matches!(
            gate.set_credential(&store, KEY, "second".to_string()),
            Err(VaultError::CredentialAlreadySet)
        ));
        assert_eq!(store.get(KEY.to_string()).unwrap().as_deref(), Some("first"));
    }

    #[test]
    fn test_dismissed_setup() {
        let store = MemorySecureStore::new();
        let mut gate = CredentialGate::load(&store, KEY).unwrap();
        gate.dismiss_setup();
        assert!(!gate.needs_setup());
        assert!(!gate.has_credential());
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn test_unavailable_biometry_does_not_arm_fallback() {
        let store = MemorySecureStore::with_entries([(KEY, "abc123")]);
        let mut gate = CredentialGate::load(&store, KEY).unwrap();
        assert!(matches!(
            gate.begin_challenge(false),
            Err(VaultError::BiometryUnavailable)
        ));
        assert!(!gate.fallback_armed());
        assert!(matches!(
            gate.check_password("abc123"),
            Err(VaultError::NoPendingFallback)
        ));
    }

    #[test]
    fn test_success_grants_without_fallback() {
        let store = MemorySecureStore::with_entries([(KEY, "abc123")]);
        let mut gate = CredentialGate::load(&store, KEY).unwrap();
        gate.begin_challenge(true).unwrap();
        gate.finish_challenge(ChallengeOutcome::Success).unwrap();
        assert!(!gate.fallback_armed());
    }

    #[test]
    fn test_fallback_match_and_mismatch() {
        let store = MemorySecureStore::with_entries([(KEY, "abc123")]);
        let mut gate = failed_gate(&store);
        assert!(gate.fallback_armed());

        assert!(matches!(
            gate.check_password("wrong"),
            Err(VaultError::PasswordMismatch)
        ));
        assert!(gate.fallback_armed());
        assert!(matches!(
            gate.check_password("abc12"),
            Err(VaultError::PasswordMismatch)
        ));

        gate.check_password("abc123").unwrap();
        assert!(!gate.fallback_armed());
    }

    #[test]
    fn test_fallback_without_credential_never_matches() {
        let store = MemorySecureStore::new();
        let mut gate = failed_gate(&store);
        gate.dismiss_setup();
        assert!(matches!(
            gate.check_password(""),
            Err(VaultError::PasswordMismatch)
        ));
    }

    #[test]
    fn test_new_challenge_disarms_fallback() {
        let store = MemorySecureStore::with_entries([(KEY, "abc123")]);
        let mut gate = failed_gate(&store);
        gate.begin_challenge(true).unwrap();
        assert!(!gate.fallback_armed());
    }
}
