use super::Frame;
use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

/// Render log widget according to state, newest entries last.
///
pub fn log(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let block = Block::default()
        .title("Log")
        .borders(Borders::ALL)
        .border_style(styling::normal_block_border_style(theme));

    let entries = state.log_entries();
    let visible = usize::from(size.height.saturating_sub(2));
    let skip = entries.len().saturating_sub(visible);
    let items: Vec<ListItem> = entries
        .into_iter()
        .skip(skip)
        .map(|entry| {
            let style = if entry.contains(" ERROR ") {
                styling::danger_style(theme)
            } else if entry.contains(" WARN ") {
                styling::notice_style(theme)
            } else {
                styling::muted_text_style(theme)
            };
            ListItem::new(Line::from(Span::styled(entry, style)))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), size);
}
