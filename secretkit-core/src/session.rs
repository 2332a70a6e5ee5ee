//! The host-facing session: one object per running app.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::biometrics::{BiometricAuthenticator, BiometricReply};
use crate::gate::CredentialGate;
use crate::lifecycle::SecretState;
use crate::screen::{self, Alert, AlertKind, ContentInsets, KeyboardEvent, Prompt, ScreenState};
use crate::store::SecureStore;
use crate::{VaultConfig, VaultError};

/// Gate and lifecycle for the protected secret.
///
/// Built once at launch from the host's secure store. The host then:
///
/// 1. Shows [`SecretSession::password_setup_prompt`] while
///    [`SecretSession::needs_password_setup`] is `true`.
/// 2. Calls [`SecretSession::authenticate`] when the user asks to unlock, and
///    [`SecretSession::submit_password`] after an `AuthenticationFailed` error.
/// 3. Forwards edits, backgrounding and the done button.
/// 4. Re-renders from [`SecretSession::screen`] after every call.
#[derive(uniffi::Object)]
pub struct SecretSession {
    store: Arc<dyn SecureStore>,
    biometrics: Arc<dyn BiometricAuthenticator>,
    config: VaultConfig,
    inner: Mutex<SessionInner>,
}

impl std::fmt::Debug for SecretSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretSession").finish_non_exhaustive()
    }
}

struct SessionInner {
    gate: CredentialGate,
    secret: SecretState,
}

#[uniffi::export]
impl SecretSession {
    /// Creates a session with the default configuration.
    ///
    /// # Errors
    /// Will error if the stored credential cannot be read.
    #[uniffi::constructor]
    pub fn new(
        store: Arc<dyn SecureStore>,
        biometrics: Arc<dyn BiometricAuthenticator>,
    ) -> Result<Self, VaultError> {
        Self::with_config(store, biometrics, VaultConfig::default())
    }

    /// Creates a session with an explicit configuration.
    ///
    /// # Errors
    /// Will error if the configuration is invalid or the stored credential cannot be read.
    #[uniffi::constructor]
    pub fn with_config(
        store: Arc<dyn SecureStore>,
        biometrics: Arc<dyn BiometricAuthenticator>,
        config: VaultConfig,
    ) -> Result<Self, VaultError> {
        config.validate()?;
        let gate = CredentialGate::load(store.as_ref(), &config.password_key)?;
        log::info!(
            "secret session started (password set: {})",
            gate.has_credential()
        );
        Ok(Self {
            store,
            biometrics,
            config,
            inner: Mutex::new(SessionInner {
                gate,
                secret: SecretState::default(),
            }),
        })
    }

    /// Returns `true` while no password is stored and the user has not
    /// dismissed the setup prompt.
    ///
    /// # Errors
    /// Will error if the session mutex is poisoned.
    pub fn needs_password_setup(&self) -> Result<bool, VaultError> {
        Ok(self.lock_inner()?.gate.needs_setup())
    }

    /// Returns `true` when a fallback password is stored.
    ///
    /// # Errors
    /// Will error if the session mutex is poisoned.
    pub fn has_password(&self) -> Result<bool, VaultError> {
        Ok(self.lock_inner()?.gate.has_credential())
    }

    /// Stores the fallback password chosen at first launch.
    ///
    /// # Errors
    /// Will error with [`VaultError::CredentialAlreadySet`] if a password exists,
    /// or if the store rejects the write.
    pub fn set_password(&self, password: String) -> Result<(), VaultError> {
        self.lock_inner()?.gate.set_credential(
            self.store.as_ref(),
            &self.config.password_key,
            password,
        )?;
        log::info!("fallback password set");
        Ok(())
    }

    /// The user cancelled the password setup. Until a password is set only
    /// biometrics can unlock the secret.
    ///
    /// # Errors
    /// Will error if the session mutex is poisoned.
    pub fn cancel_password_setup(&self) -> Result<(), VaultError> {
        self.lock_inner()?.gate.dismiss_setup();
        log::warn!("password setup cancelled; the password fallback cannot succeed");
        Ok(())
    }

    /// Runs the biometric challenge and reveals the secret on success.
    ///
    /// Suspends until the host resolves the [`BiometricReply`] passed to
    /// [`BiometricAuthenticator::evaluate`].
    ///
    /// # Errors
    /// - [`VaultError::BiometryUnavailable`] if the device cannot evaluate biometrics.
    /// - [`VaultError::AuthenticationFailed`] if the challenge failed; the host should
    ///   show [`SecretSession::password_fallback_prompt`].
    /// - Store or lock errors while revealing the secret.
    pub async fn authenticate(&self) -> Result<(), VaultError> {
        let available = self.biometrics.can_evaluate();
        self.lock_inner()?.gate.begin_challenge(available)?;

        let (reply, pending) = BiometricReply::channel();
        log::debug!("starting biometric challenge");
        self.biometrics
            .evaluate(self.config.biometric_reason.clone(), reply);
        let outcome = pending.outcome().await;

        let mut inner = self.lock_inner()?;
        if let Err(err) = inner.gate.finish_challenge(outcome) {
            log::info!("biometric challenge failed, password fallback armed");
            return Err(err);
        }
        self.reveal(&mut inner)
    }

    /// Checks the fallback password after a failed biometric challenge and
    /// reveals the secret when it matches.
    ///
    /// # Errors
    /// - [`VaultError::NoPendingFallback`] without a preceding failed challenge.
    /// - [`VaultError::PasswordMismatch`] if the password differs; the user may retry.
    #[allow(clippy::needless_pass_by_value)]
    pub fn submit_password(&self, password: String) -> Result<(), VaultError> {
        let mut inner = self.lock_inner()?;
        if let Err(err) = inner.gate.check_password(&password) {
            log::info!("fallback password rejected");
            return Err(err);
        }
        self.reveal(&mut inner)
    }

    /// Returns `true` while a fallback password may be submitted.
    ///
    /// # Errors
    /// Will error if the session mutex is poisoned.
    pub fn is_password_fallback_pending(&self) -> Result<bool, VaultError> {
        Ok(self.lock_inner()?.gate.fallback_armed())
    }

    /// Replaces the secret text being edited.
    ///
    /// # Errors
    /// Will error with [`VaultError::SecretLocked`] while the secret is hidden.
    pub fn edit_secret(&self, text: String) -> Result<(), VaultError> {
        self.lock_inner()?.secret.edit(text)
    }

    /// The app is leaving the foreground: persist and hide the secret.
    ///
    /// # Errors
    /// Will error if the secret cannot be persisted. The secret is hidden
    /// regardless and its text is shown again on the next unlock.
    pub fn on_background(&self) -> Result<(), VaultError> {
        self.conceal()
    }

    /// The user tapped "done": persist and hide the secret.
    ///
    /// # Errors
    /// Will error if the secret cannot be persisted. The secret is hidden
    /// regardless and its text is shown again on the next unlock.
    pub fn done(&self) -> Result<(), VaultError> {
        self.conceal()
    }

    /// Returns the content insets to apply for a keyboard event.
    #[must_use]
    #[allow(clippy::unused_self)] // associated functions are not supported with Uniffi exports
    pub fn on_keyboard_change(&self, event: KeyboardEvent) -> ContentInsets {
        screen::content_insets(event)
    }

    /// Returns `true` while the secret is shown.
    ///
    /// # Errors
    /// Will error if the session mutex is poisoned.
    pub fn is_visible(&self) -> Result<bool, VaultError> {
        Ok(self.lock_inner()?.secret.is_visible())
    }

    /// Returns the secret text while visible.
    ///
    /// # Errors
    /// Will error if the session mutex is poisoned.
    pub fn secret_text(&self) -> Result<Option<String>, VaultError> {
        Ok(self.lock_inner()?.secret.text().map(ToString::to_string))
    }

    /// Returns what the host should render.
    ///
    /// # Errors
    /// Will error if the session mutex is poisoned.
    pub fn screen(&self) -> Result<ScreenState, VaultError> {
        let inner = self.lock_inner()?;
        let visible = inner.secret.is_visible();
        let title = if visible {
            &self.config.unlocked_title
        } else {
            &self.config.locked_title
        };
        Ok(ScreenState {
            title: title.clone(),
            secret_visible: visible,
            done_enabled: visible,
            secret_text: inner.secret.text().map(ToString::to_string),
            keyboard_focus_allowed: visible,
        })
    }

    /// The first-launch "Set password" prompt.
    #[must_use]
    #[allow(clippy::unused_self)] // associated functions are not supported with Uniffi exports
    pub fn password_setup_prompt(&self) -> Prompt {
        screen::password_setup_prompt()
    }

    /// The prompt shown after a failed biometric challenge.
    #[must_use]
    #[allow(clippy::unused_self)] // associated functions are not supported with Uniffi exports
    pub fn password_fallback_prompt(&self) -> Prompt {
        screen::password_fallback_prompt()
    }

    /// An informational alert.
    #[must_use]
    #[allow(clippy::unused_self)] // associated functions are not supported with Uniffi exports
    pub fn alert(&self, kind: AlertKind) -> Alert {
        screen::alert(kind)
    }

    /// Returns the configuration of this session.
    #[must_use]
    pub fn config(&self) -> VaultConfig {
        self.config.clone()
    }
}

#[cfg(all(feature = "platform-ios", target_vendor = "apple"))]
#[uniffi::export]
impl SecretSession {
    /// Creates a session backed by the Keychain under `service`.
    ///
    /// # Errors
    /// Will error if the configuration is invalid or the Keychain cannot be read.
    #[uniffi::constructor]
    pub fn with_keychain(
        service: String,
        biometrics: Arc<dyn BiometricAuthenticator>,
        config: VaultConfig,
    ) -> Result<Self, VaultError> {
        let store = Arc::new(crate::store::KeychainSecureStore::new(service));
        Self::with_config(store, biometrics, config)
    }
}

/// Implementation not exposed to foreign bindings
impl SecretSession {
    fn lock_inner(&self) -> Result<MutexGuard<'_, SessionInner>, VaultError> {
        self.inner
            .lock()
            .map_err(|_| VaultError::Lock("session mutex poisoned".to_string()))
    }

    fn reveal(&self, inner: &mut SessionInner) -> Result<(), VaultError> {
        if inner
            .secret
            .reveal(self.store.as_ref(), &self.config.secret_key)?
        {
            log::info!("secret {}", inner.secret);
        } else {
            log::debug!("access granted while the secret was already visible");
        }
        Ok(())
    }

    fn conceal(&self) -> Result<(), VaultError> {
        let mut inner = self.lock_inner()?;
        match inner
            .secret
            .conceal(self.store.as_ref(), &self.config.secret_key)
        {
            Ok(true) => log::info!("secret {}", inner.secret),
            Ok(false) => {}
            Err(err) => {
                log::warn!("secret hidden without being persisted: {err}");
                return Err(err.into());
            }
        }
        Ok(())
    }
}
