use super::Frame;
use crate::session::Element;
use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Render the header: sidebar toggle, page title, and the user display.
///
pub fn header(frame: &mut Frame, size: Rect, state: &State) {
    let session = state.session();
    let theme = state.get_theme();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::normal_block_border_style(theme))
        .title(session.document_title());
    let inner = block.inner(size);
    frame.render_widget(block, size);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(32)])
        .split(inner);

    let mut left = vec![];
    if let Some(toggle) = session.sidebar().and_then(|sidebar| sidebar.toggle_button()) {
        let style = if state.focused_element() == Some(Element::Toggle) {
            styling::focused_style(theme)
        } else {
            styling::active_list_item_style(theme)
        };
        left.push(Span::styled(format!(" {} ", toggle.glyph), style));
        left.push(Span::raw(" "));
    }
    let title = session
        .page_title()
        .unwrap_or_else(|| session.highlight().title.as_str());
    left.push(Span::styled(title.to_string(), styling::banner_style(theme)));
    frame.render_widget(Paragraph::new(Line::from(left)), columns[0]);

    if let Some(user) = session.header() {
        let right = Line::from(vec![
            Span::styled(user.user_name.clone(), styling::normal_text_style(theme)),
            Span::raw(" "),
            Span::styled(format!("[{}]", user.avatar), styling::active_list_item_style(theme)),
        ]);
        frame.render_widget(
            Paragraph::new(right).alignment(Alignment::Right),
            columns[1],
        );
    }
}
