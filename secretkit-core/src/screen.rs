//! What the host renders: screen state, prompts, alerts and keyboard insets.

use crate::VaultError;

/// Snapshot of the single screen.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct ScreenState {
    /// Navigation title.
    pub title: String,
    /// Whether the secret text view is shown.
    pub secret_visible: bool,
    /// Whether the "done" button is enabled.
    pub done_enabled: bool,
    /// The secret text while visible.
    pub secret_text: Option<String>,
    /// Whether the text view may hold keyboard focus. The host resigns focus
    /// when this turns `false`.
    pub keyboard_focus_allowed: bool,
}

/// A modal prompt with a single text field.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct Prompt {
    /// Alert title.
    pub title: String,
    /// Alert message.
    pub message: String,
    /// Placeholder of the text field.
    pub placeholder: String,
    /// Whether the text field hides its input.
    pub secure_entry: bool,
    /// Label of the confirming action.
    pub confirm_label: String,
    /// Label of the cancel action, when the prompt can be dismissed.
    pub cancel_label: Option<String>,
}

/// Informational alerts the host may show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum AlertKind {
    /// The device has no usable biometrics.
    BiometryUnavailable,
    /// The fallback password did not match.
    PasswordMismatch,
}

impl AlertKind {
    /// Maps a session error to the alert the user should acknowledge, if any.
    #[must_use]
    pub const fn for_error(error: &VaultError) -> Option<Self> {
        match error {
            VaultError::BiometryUnavailable => Some(Self::BiometryUnavailable),
            VaultError::PasswordMismatch => Some(Self::PasswordMismatch),
            _ => None,
        }
    }
}

/// A single-button informational alert.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct Alert {
    /// Alert title.
    pub title: String,
    /// Alert message.
    pub message: String,
    /// Label of the dismiss button.
    pub button_label: String,
}

/// Keyboard notifications forwarded by the host, in view coordinates.
#[derive(Debug, Clone, Copy, PartialEq, uniffi::Enum)]
pub enum KeyboardEvent {
    /// The keyboard is about to hide.
    WillHide,
    /// The keyboard frame is about to change.
    WillChangeFrame {
        /// Height of the keyboard's end frame.
        keyboard_height: f64,
        /// Bottom safe-area inset of the view.
        safe_area_bottom: f64,
    },
}

/// Content insets for the secret text view.
#[derive(Debug, Clone, Copy, Default, PartialEq, uniffi::Record)]
pub struct ContentInsets {
    /// Top inset.
    pub top: f64,
    /// Left inset.
    pub left: f64,
    /// Bottom inset.
    pub bottom: f64,
    /// Right inset.
    pub right: f64,
}

pub(crate) fn content_insets(event: KeyboardEvent) -> ContentInsets {
    match event {
        KeyboardEvent::WillHide => ContentInsets::default(),
        KeyboardEvent::WillChangeFrame {
            keyboard_height,
            safe_area_bottom,
        } => ContentInsets {
            bottom: (keyboard_height - safe_area_bottom).max(0.0),
            ..ContentInsets::default()
        },
    }
}

pub(crate) fn password_setup_prompt() -> Prompt {
    Prompt {
        title: "Set password".to_string(),
        message: "Protect your secret text with a password".to_string(),
        placeholder: "Set password".to_string(),
        secure_entry: true,
        confirm_label: "Set password".to_string(),
        cancel_label: Some("Cancel".to_string()),
    }
}

pub(crate) fn password_fallback_prompt() -> Prompt {
    Prompt {
        title: "Authentication failed".to_string(),
        message: "Please enter your password to unlock the secret content".to_string(),
        placeholder: "Enter password".to_string(),
        secure_entry: true,
        confirm_label: "Unlock".to_string(),
        cancel_label: None,
    }
}

pub(crate) fn alert(kind: AlertKind) -> Alert {
    let (title, message) = match kind {
        AlertKind::BiometryUnavailable => (
            "Biometry unavailable",
            "Your device is not configured for biometric authentication.",
        ),
        AlertKind::PasswordMismatch => (
            "Authentication failed",
            "You could not be verified; please try again.",
        ),
    };
    Alert {
        title: title.to_string(),
        message: message.to_string(),
        button_label: "OK".to_string(),
    }
}
