use super::Frame;
use crate::session::Element;
use crate::sidebar::TOGGLE_LABEL;
use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

const BLOCK_TITLE: &str = "Menu";

/// Render the navigation entries.
///
pub fn sidebar(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let focused = state.focused_element();
    let open = state
        .session()
        .sidebar()
        .map_or(false, |sidebar| sidebar.is_open());

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if open {
            styling::active_block_border_style(theme)
        } else {
            styling::normal_block_border_style(theme)
        })
        .title(Span::styled(BLOCK_TITLE, styling::active_block_title_style()));

    let items: Vec<ListItem> = state
        .session()
        .nav_entries()
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let marker = if entry.active { "▸ " } else { "  " };
            let style = if focused == Some(Element::NavEntry(index)) {
                styling::focused_style(theme)
            } else if entry.active {
                styling::active_list_item_style(theme)
            } else if entry.logout {
                styling::danger_style(theme)
            } else {
                styling::normal_text_style(theme)
            };
            ListItem::new(Line::from(Span::styled(
                format!("{}{}", marker, entry.label),
                style,
            )))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), size);
}

/// Dim the page behind an open sidebar.
///
pub fn overlay(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    frame.render_widget(
        Block::default().style(Style::default().add_modifier(Modifier::DIM)),
        size,
    );

    let hint_style = if state.focused_element() == Some(Element::Overlay) {
        styling::focused_style(theme)
    } else {
        styling::muted_text_style(theme)
    };
    let hint = Rect {
        y: size.y + size.height.saturating_sub(1),
        height: size.height.min(1),
        ..size
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            format!(" {} ", TOGGLE_LABEL),
            hint_style,
        )))
        .alignment(Alignment::Right),
        hint,
    );
}
