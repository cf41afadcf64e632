mod confirm;
mod footer;
mod header;
mod log;
mod page;
mod sidebar;

use super::Frame;
use crate::state::State;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::Clear,
};

/// Columns taken by the sidebar.
///
const SIDEBAR_WIDTH: u16 = 28;
const LOG_HEIGHT: u16 = 8;

/// Render the whole screen according to state.
///
pub fn render(frame: &mut Frame, state: &mut State) {
    let size = frame.size();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(LOG_HEIGHT),
            Constraint::Length(1),
        ])
        .split(size);

    header::header(frame, rows[0], state);
    body(frame, rows[1], state);
    self::log::log(frame, rows[2], state);
    footer::footer(frame, rows[3], state);

    if state.mode().is_confirming() {
        confirm::confirm(frame, size, state);
    }
}

/// Lay out the sidebar and main region. Wide viewports show the sidebar
/// inline; narrow ones draw it over the dimmed page while open.
///
fn body(frame: &mut Frame, size: Rect, state: &State) {
    let (narrow, open) = match state.session().sidebar() {
        Some(sidebar) => (sidebar.is_narrow(), sidebar.is_open()),
        None => {
            page::page(frame, size, state);
            return;
        }
    };

    if !narrow {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(10)])
            .split(size);
        sidebar::sidebar(frame, columns[0], state);
        page::page(frame, columns[1], state);
        return;
    }

    page::page(frame, size, state);
    if open {
        sidebar::overlay(frame, size, state);
        let area = Rect {
            width: SIDEBAR_WIDTH.min(size.width),
            ..size
        };
        frame.render_widget(Clear, area);
        sidebar::sidebar(frame, area, state);
    }
}

/// Helper function to create a centered rectangle (ratatui modal pattern)
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModeHotkeys;
    use crate::identity::MemoryStore;
    use crate::logger::LogBuffer;
    use crate::nav::{AddressablePath, DEFAULT_SUITE_NAME};
    use crate::page::Page;
    use crate::session::{LoadContext, Session};
    use crate::ui::Theme;
    use ratatui::{backend::TestBackend, Terminal};
    use std::path::Path;

    fn screen(state: &mut State, width: u16) -> String {
        let backend = TestBackend::new(width, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, state)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn state(path: &str, width: u16) -> State {
        let site = crate::page::Site::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("site"));
        let address = AddressablePath::parse(path);
        let page: Page = site.load_or_not_found(&address);
        let session = Session::load(
            page,
            LoadContext {
                address,
                viewport_width: u32::from(width) * 8,
                suite_name: DEFAULT_SUITE_NAME,
                identity: &MemoryStore::new(),
            },
        );
        let mut state = State::new(
            session,
            Theme::default(),
            ModeHotkeys::default(),
            8,
            LogBuffer::new(10),
        );
        state.set_terminal_size(Rect::new(0, 0, width, 40));
        state
    }

    #[test]
    fn wide_dashboard_shows_sidebar_and_identity() {
        let mut state = state("/admin-dashboard.html", 140);
        let screen = screen(&mut state, 140);
        assert!(screen.contains("Admin Dashboard"));
        assert!(screen.contains("Admin User"));
        assert!(screen.contains("Alerts"));
    }

    #[test]
    fn narrow_dashboard_hides_closed_sidebar() {
        let mut state = state("/admin-dashboard.html", 80);
        let closed = screen(&mut state, 80);
        assert!(closed.contains("☰"));
        assert!(!closed.contains("Menu"));

        state.toggle_sidebar();
        let open = screen(&mut state, 80);
        assert!(open.contains("✕"));
        assert!(open.contains("Menu"));
    }

    #[test]
    fn logout_prompt_is_drawn() {
        let mut state = state("/admin-dashboard.html", 140);
        while !state
            .focused_element()
            .map_or(false, |element| match element {
                crate::session::Element::NavEntry(index) => {
                    state.session().nav_entries()[index].logout
                }
                _ => false,
            })
        {
            state.next_focus();
        }
        state.activate_focused(false).unwrap();
        let screen = screen(&mut state, 140);
        assert!(screen.contains(crate::nav::LOGOUT_PROMPT));
    }

    #[test]
    fn missing_page_renders_not_found() {
        let mut state = state("/nowhere.html", 140);
        let screen = screen(&mut state, 140);
        assert!(screen.contains("Page Not Found") || screen.contains("There is no page"));
    }
}
