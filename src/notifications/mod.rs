use std::fmt;

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::config::Config;

// Type alias for the default dialog presenter on this platform
#[cfg(windows)]
pub type DefaultDialogPresenter = WindowsDialogPresenter;

#[cfg(not(windows))]
pub type DefaultDialogPresenter = UnsupportedDialogPresenter;

/// Trait for presenting modal dialogs - allows for testing without system calls
pub trait DialogPresenter {
    fn show_acknowledgment(&self, message: &str) -> Result<()>;
    fn show_warning(&self, message: &str) -> Result<()>;
}

/// Production dialog presenter using native Windows message boxes
#[cfg(windows)]
#[derive(Default)]
pub struct WindowsDialogPresenter;

#[cfg(windows)]
impl WindowsDialogPresenter {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(windows)]
impl DialogPresenter for WindowsDialogPresenter {
    fn show_acknowledgment(&self, message: &str) -> Result<()> {
        show_message_box(message, false)
    }

    fn show_warning(&self, message: &str) -> Result<()> {
        show_message_box(message, true)
    }
}

/// Stand-in presenter for platforms without modal dialog support
#[cfg(not(windows))]
#[derive(Default)]
pub struct UnsupportedDialogPresenter;

#[cfg(not(windows))]
impl UnsupportedDialogPresenter {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(not(windows))]
impl DialogPresenter for UnsupportedDialogPresenter {
    fn show_acknowledgment(&self, _message: &str) -> Result<()> {
        Err(anyhow::anyhow!("modal dialogs require Windows"))
    }

    fn show_warning(&self, _message: &str) -> Result<()> {
        Err(anyhow::anyhow!("modal dialogs require Windows"))
    }
}

/// Test dialog presenter that records dialogs instead of showing them
#[cfg(any(test, feature = "test-mocks"))]
#[derive(Clone)]
pub struct TestDialogPresenter {
    pub shown_dialogs: std::sync::Arc<std::sync::Mutex<Vec<(DialogKind, String)>>>,
    pub should_fail: std::sync::Arc<std::sync::Mutex<bool>>,
}

#[cfg(any(test, feature = "test-mocks"))]
impl Default for TestDialogPresenter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(any(test, feature = "test-mocks"))]
impl TestDialogPresenter {
    #[allow(dead_code)] // Used by integration tests which run in different compilation context
    pub fn new() -> Self {
        Self {
            shown_dialogs: std::sync::Arc::new(std::sync::Mutex::new(Vec::new())),
            should_fail: std::sync::Arc::new(std::sync::Mutex::new(false)),
        }
    }

    #[allow(dead_code)] // Used by integration tests which run in different compilation context
    pub fn get_shown_dialogs(&self) -> Vec<(DialogKind, String)> {
        self.shown_dialogs.lock().unwrap().clone()
    }

    #[allow(dead_code)] // Used by integration tests which run in different compilation context
    pub fn set_failure(&self, should_fail: bool) {
        *self.should_fail.lock().unwrap() = should_fail;
    }

    #[allow(dead_code)] // Used by integration tests which run in different compilation context
    pub fn clear(&self) {
        self.shown_dialogs.lock().unwrap().clear();
    }

    fn record(&self, kind: DialogKind, message: &str) -> Result<()> {
        debug!("Test dialog: {} - {}", kind, message);
        self.shown_dialogs
            .lock()
            .unwrap()
            .push((kind, message.to_string()));

        if *self.should_fail.lock().unwrap() {
            return Err(anyhow::anyhow!("Test dialog failure"));
        }
        Ok(())
    }
}

#[cfg(any(test, feature = "test-mocks"))]
impl DialogPresenter for TestDialogPresenter {
    fn show_acknowledgment(&self, message: &str) -> Result<()> {
        self.record(DialogKind::Acknowledgment, message)
    }

    fn show_warning(&self, message: &str) -> Result<()> {
        self.record(DialogKind::Warning, message)
    }
}

/// Kinds of modal dialogs the reconciler can raise
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Acknowledgment,
    Warning,
}

impl fmt::Display for DialogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DialogKind::Acknowledgment => write!(f, "acknowledgment"),
            DialogKind::Warning => write!(f, "warning"),
        }
    }
}

/// Raises user-facing dialogs for reconciliation outcomes.
///
/// Dialog failures are logged and swallowed; a run never fails because a
/// message box could not be shown.
pub struct NotificationGateway<T: DialogPresenter> {
    interactive: bool,
    presenter: T,
}

impl<T: DialogPresenter> NotificationGateway<T> {
    pub fn with_presenter(config: &Config, presenter: T) -> Self {
        Self {
            interactive: config.notifications.interactive,
            presenter,
        }
    }

    /// Tell the user the preference was cleared and the target is in effect
    pub fn preference_corrected(&self, pattern: &str) {
        let message = format!("{} is now your active device.", pattern);
        self.present(DialogKind::Acknowledgment, &message);
    }

    /// Tell the user the target device is not the system default
    pub fn target_not_default(&self, pattern: &str) {
        let message = format!(
            "{} device not detected as system default. Open your audio settings and select it, then run the check again.",
            pattern
        );
        self.present(DialogKind::Warning, &message);
    }

    fn present(&self, kind: DialogKind, message: &str) {
        if !self.interactive {
            info!("Dialogs disabled, suppressing {} prompt: {}", kind, message);
            return;
        }

        debug!("Presenting {} dialog: {}", kind, message);

        let result = match kind {
            DialogKind::Acknowledgment => self.presenter.show_acknowledgment(message),
            DialogKind::Warning => self.presenter.show_warning(message),
        };

        if let Err(e) = result {
            warn!("Failed to present {} dialog: {}", kind, e);
        }
    }
}

/// Show a native modal message box, blocking until the user dismisses it
#[cfg(windows)]
fn show_message_box(body: &str, warning: bool) -> Result<()> {
    use windows::core::HSTRING;
    use windows::Win32::UI::WindowsAndMessaging::{
        MessageBoxW, MB_ICONINFORMATION, MB_ICONWARNING, MB_OK, MB_SETFOREGROUND,
    };

    let icon = if warning {
        MB_ICONWARNING
    } else {
        MB_ICONINFORMATION
    };

    let result = unsafe {
        MessageBoxW(
            None,
            &HSTRING::from(body),
            &HSTRING::from("Audio Endpoint Reconciler"),
            MB_OK | icon | MB_SETFOREGROUND,
        )
    };

    if result.0 == 0 {
        return Err(anyhow::anyhow!("MessageBoxW failed"));
    }
    Ok(())
}
