use super::{centered_rect, Frame};
use crate::config::hotkeys::{build_footer_text, HotkeyAction};
use crate::nav::LOGOUT_PROMPT;
use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Render the logout confirmation modal on top of everything.
///
pub fn confirm(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let popup_area = centered_rect(50, 25, size);
    frame.render_widget(Clear, popup_area);

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(LOGOUT_PROMPT, styling::current_list_item_style(theme))),
        Line::from(""),
        Line::from(Span::styled(
            build_footer_text(
                &state.get_hotkeys().confirm,
                &[(HotkeyAction::ConfirmYes, "yes"), (HotkeyAction::ConfirmNo, "no")],
            ),
            styling::muted_text_style(theme),
        )),
    ];
    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled("Logout", styling::danger_style(theme)))
                .border_style(styling::danger_style(theme)),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, popup_area);
}
