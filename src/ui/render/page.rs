use super::Frame;
use crate::session::Element;
use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Render the main region followed by every tab group.
///
pub fn page(frame: &mut Frame, size: Rect, state: &State) {
    let session = state.session();
    let theme = state.get_theme();
    let focused = state.focused_element();
    let faded = session.main().map_or(false, |main| main.is_faded());
    let text_style = if faded {
        styling::faded_text_style(theme)
    } else {
        styling::normal_text_style(theme)
    };

    let mut lines: Vec<Line> = vec![];
    if let Some(main) = session.main() {
        if main.translate_y > 0 {
            lines.push(Line::from(""));
        }
    }

    if let Some(markup) = &session.page().main {
        for paragraph in &markup.body {
            lines.push(Line::from(Span::styled(paragraph.clone(), text_style)));
        }
        if !markup.links.is_empty() {
            lines.push(Line::from(""));
        }
        for (index, link) in markup.links.iter().enumerate() {
            let style = if focused == Some(Element::Link(index)) {
                styling::focused_style(theme)
            } else if faded {
                styling::faded_text_style(theme)
            } else {
                styling::active_list_item_style(theme)
            };
            let target = link.href.as_deref().unwrap_or("");
            lines.push(Line::from(vec![
                Span::styled(format!("→ {}", link.label), style),
                Span::styled(format!("  {}", target), styling::muted_text_style(theme)),
            ]));
        }
    }

    for group in session.tabs().groups() {
        if group.is_inert() && group.panels.is_empty() {
            continue;
        }
        lines.push(Line::from(""));
        let mut strip = vec![];
        for entry in &group.entries {
            let style = if focused == Some(Element::TabControl(entry.control)) {
                styling::focused_style(theme)
            } else if entry.active {
                styling::active_list_item_style(theme)
            } else {
                styling::muted_text_style(theme)
            };
            let label = if entry.active {
                format!("[{}]", entry.label)
            } else {
                format!(" {} ", entry.label)
            };
            strip.push(Span::styled(label, style));
            strip.push(Span::raw(" "));
        }
        if !strip.is_empty() {
            lines.push(Line::from(strip));
        }
        for panel in group.panels.iter().filter(|panel| panel.visible) {
            let style = if panel.opacity < 1.0 {
                styling::faded_text_style(theme)
            } else {
                text_style
            };
            for paragraph in &panel.body {
                lines.push(Line::from(Span::styled(format!("  {}", paragraph), style)));
            }
        }
    }

    let title = session
        .page()
        .main
        .as_ref()
        .map_or("content", |main| main.kind.as_str());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::normal_block_border_style(theme))
        .title(title);
    let scroll = u16::try_from(session.scroll_top()).unwrap_or(u16::MAX);
    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(paragraph, size);
}
