//! Input modes of the host.

use crate::config::hotkeys::InputMode;
use crate::session::Activation;

/// Specifying what key presses currently drive.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Mode {
    /// Keys move focus and activate page elements.
    Page,
    /// The logout prompt is open; the activation runs once answered.
    ConfirmLogout(Activation),
}

impl Mode {
    /// Hotkey set used in this mode.
    ///
    pub fn input_mode(&self) -> InputMode {
        match self {
            Mode::Page => InputMode::Page,
            Mode::ConfirmLogout(_) => InputMode::Confirm,
        }
    }

    pub fn is_confirming(&self) -> bool {
        matches!(self, Mode::ConfirmLogout(_))
    }
}
