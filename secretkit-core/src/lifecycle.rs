//! Visibility of the secret text.

use zeroize::Zeroizing;

use crate::store::{SecureStore, StoreResult};
use crate::VaultError;

/// Whether the secret is on screen. The text only lives in memory while
/// visible, or while hidden after a failed write until the next reveal.
#[derive(strum::Display)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum SecretState {
    Hidden { unsaved: Option<Zeroizing<String>> },
    Visible { text: Zeroizing<String> },
}

impl Default for SecretState {
    fn default() -> Self {
        Self::Hidden { unsaved: None }
    }
}

impl SecretState {
    pub(crate) const fn is_visible(&self) -> bool {
        matches!(self, Self::Visible { .. })
    }

    pub(crate) fn text(&self) -> Option<&str> {
        match self {
            Self::Hidden { .. } => None,
            Self::Visible { text } => Some(text.as_str()),
        }
    }

    /// Hidden -> Visible, loading the persisted text (empty when none is stored).
    /// Text whose write failed on the last conceal is shown instead of the
    /// stored value and written again on the next conceal.
    ///
    /// Returns `false` without touching the store when already visible, so a
    /// late grant never replaces text that is being edited.
    pub(crate) fn reveal(&mut self, store: &dyn SecureStore, key: &str) -> StoreResult<bool> {
        let text = match self {
            Self::Visible { .. } => return Ok(false),
            Self::Hidden { unsaved } => match unsaved.take() {
                Some(text) => text,
                None => Zeroizing::new(store.get(key.to_string())?.unwrap_or_default()),
            },
        };
        *self = Self::Visible { text };
        Ok(true)
    }

    /// Replaces the text being edited.
    pub(crate) fn edit(&mut self, new_text: String) -> Result<(), VaultError> {
        match self {
            Self::Hidden { .. } => Err(VaultError::SecretLocked),
            Self::Visible { text } => {
                *text = Zeroizing::new(new_text);
                Ok(())
            }
        }
    }

    /// Visible -> Hidden, persisting the current text.
    ///
    /// Returns `false` when already hidden. The state is hidden even when the
    /// write fails; the text is then kept for the next reveal and the store
    /// error is returned.
    pub(crate) fn conceal(&mut self, store: &dyn SecureStore, key: &str) -> StoreResult<bool> {
        if !self.is_visible() {
            return Ok(false);
        }
        let Self::Visible { text } = std::mem::take(self) else {
            return Ok(false);
        };
        if let Err(err) = store.set(key.to_string(), text.as_str().to_owned()) {
            *self = Self::Hidden {
                unsaved: Some(text),
            };
            return Err(err);
        }
        Ok(true)
    }
}
