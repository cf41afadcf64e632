use super::Frame;
use crate::config::hotkeys::{build_footer_text, HotkeyAction};
use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

const PAGE_ACTIONS: [(HotkeyAction, &str); 7] = [
    (HotkeyAction::FocusNext, "next"),
    (HotkeyAction::FocusPrev, "previous"),
    (HotkeyAction::Activate, "open"),
    (HotkeyAction::ActivateNewContext, "new window"),
    (HotkeyAction::ToggleSidebar, "sidebar"),
    (HotkeyAction::Cancel, "close"),
    (HotkeyAction::Quit, "quit"),
];

const CONFIRM_ACTIONS: [(HotkeyAction, &str); 2] = [
    (HotkeyAction::ConfirmYes, "logout"),
    (HotkeyAction::ConfirmNo, "stay"),
];

/// Render the key hints, or the pending notice when there is one.
///
pub fn footer(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let mode = state.mode().input_mode();
    let hotkeys = state.get_hotkeys().for_mode(mode);
    let line = match state.notice() {
        Some(notice) if !state.mode().is_confirming() => {
            Line::from(Span::styled(format!(" {}", notice), styling::notice_style(theme)))
        }
        _ => {
            let actions: &[(HotkeyAction, &str)] = if state.mode().is_confirming() {
                &CONFIRM_ACTIONS[..]
            } else {
                &PAGE_ACTIONS[..]
            };
            Line::from(Span::styled(
                build_footer_text(hotkeys, actions),
                styling::muted_text_style(theme),
            ))
        }
    };
    frame.render_widget(Paragraph::new(line), size);
}
