use crate::config::ModeHotkeys;
use crate::logger::LogBuffer;
use crate::nav::{AddressablePath, DefaultBehavior};
use crate::session::{Activation, DispatchReport, Element, Key, PageEvent, Session};
use crate::ui::Theme;
use log::*;
use ratatui::layout::Rect;

use super::error::StateError;
use super::mode::Mode;

/// Lines scrolled per scroll action.
///
const SCROLL_STEP: i32 = 3;

/// Houses data representative of host state.
///
pub struct State {
    session: Session,
    mode: Mode,
    focus_index: usize,
    terminal_size: Rect,
    cell_width: u32,
    theme: Theme,
    hotkeys: ModeHotkeys,
    logs: LogBuffer,
    notice: Option<String>,
}

impl State {
    /// Return a new instance driving `session`.
    ///
    pub fn new(
        session: Session,
        theme: Theme,
        hotkeys: ModeHotkeys,
        cell_width: u32,
        logs: LogBuffer,
    ) -> Self {
        State {
            session,
            mode: Mode::Page,
            focus_index: 0,
            terminal_size: Rect::default(),
            cell_width: cell_width.max(1),
            theme,
            hotkeys,
            logs,
            notice: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Swap in the session of a freshly loaded page. Nothing of the previous
    /// page's interaction state survives.
    ///
    pub fn replace_session(&mut self, session: Session) -> &mut Self {
        self.session = session;
        self.mode = Mode::Page;
        self.focus_index = 0;
        self.notice = None;
        self
    }

    pub fn get_theme(&self) -> &Theme {
        &self.theme
    }

    pub fn get_hotkeys(&self) -> &ModeHotkeys {
        &self.hotkeys
    }

    pub fn log_entries(&self) -> Vec<String> {
        self.logs.entries()
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    /// Message for the user about something the host cannot do itself.
    ///
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn terminal_size(&self) -> Rect {
        self.terminal_size
    }

    /// Width of a terminal of `columns` columns in logical units.
    ///
    pub fn viewport_width_for(&self, columns: u16) -> u32 {
        u32::from(columns) * self.cell_width
    }

    /// Update the terminal size, reporting the new viewport width to the
    /// page when it changed.
    ///
    pub fn set_terminal_size(&mut self, size: Rect) -> &mut Self {
        if size == self.terminal_size {
            return self;
        }
        self.terminal_size = size;
        let width = self.viewport_width_for(size.width);
        if width != self.session.viewport_width() {
            self.dispatch(PageEvent::Resize { width });
        }
        self
    }

    /// Currently focused element, if the page has any.
    ///
    pub fn focused_element(&self) -> Option<Element> {
        let elements = self.session.elements();
        if elements.is_empty() {
            return None;
        }
        elements.get(self.focus_index.min(elements.len() - 1)).copied()
    }

    pub fn next_focus(&mut self) -> &mut Self {
        let count = self.session.elements().len();
        if count > 0 {
            self.focus_index = (self.focus_index.min(count - 1) + 1) % count;
        }
        self
    }

    pub fn previous_focus(&mut self) -> &mut Self {
        let count = self.session.elements().len();
        if count > 0 {
            let current = self.focus_index.min(count - 1);
            self.focus_index = if current == 0 { count - 1 } else { current - 1 };
        }
        self
    }

    /// Activate the focused element. Logout entries open the confirmation
    /// prompt instead; the activation runs once it is answered.
    ///
    pub fn activate_focused(&mut self, new_context: bool) -> Result<(), StateError> {
        if self.mode.is_confirming() {
            return Err(StateError::ConfirmationPending);
        }
        let element = self.focused_element().ok_or(StateError::NothingFocused)?;
        let activation = Activation {
            element,
            new_context,
        };
        if self.is_logout(element) {
            debug!("Asking for logout confirmation");
            self.mode = Mode::ConfirmLogout(activation);
            return Ok(());
        }
        self.dispatch(PageEvent::Activate(activation));
        Ok(())
    }

    /// Answer the pending logout confirmation.
    ///
    pub fn answer_confirmation(&mut self, accepted: bool) -> Result<(), StateError> {
        let activation = match self.mode {
            Mode::ConfirmLogout(activation) => activation,
            Mode::Page => return Err(StateError::ConfirmationNotPending),
        };
        self.mode = Mode::Page;
        let mut answer = |_: &str| accepted;
        let report = self
            .session
            .dispatch(PageEvent::Activate(activation), &mut answer);
        self.apply_report(report);
        Ok(())
    }

    pub fn toggle_sidebar(&mut self) -> &mut Self {
        self.dispatch(PageEvent::Activate(Activation::click(Element::Toggle)));
        self
    }

    pub fn cancel(&mut self) -> &mut Self {
        self.dispatch(PageEvent::KeyDown(Key::Escape));
        self
    }

    pub fn scroll_down(&mut self) -> &mut Self {
        self.dispatch(PageEvent::Scroll { delta: SCROLL_STEP });
        self
    }

    pub fn scroll_up(&mut self) -> &mut Self {
        self.dispatch(PageEvent::Scroll { delta: -SCROLL_STEP });
        self
    }

    /// Any other key press, which only matters to the page as a non-cancel
    /// key.
    ///
    pub fn other_key(&mut self) -> &mut Self {
        self.dispatch(PageEvent::KeyDown(Key::Other));
        self
    }

    /// Advance the page clock. Returns the address to load when the page
    /// asked for a navigation.
    ///
    pub fn tick(&mut self, elapsed_ms: u64) -> Option<AddressablePath> {
        self.session.advance(elapsed_ms)
    }

    fn is_logout(&self, element: Element) -> bool {
        match element {
            Element::NavEntry(index) => self
                .session
                .nav_entries()
                .get(index)
                .map_or(false, |entry| entry.logout),
            _ => false,
        }
    }

    fn dispatch(&mut self, event: PageEvent) {
        // Only logout entries ask for confirmation, and those go through the
        // prompt first.
        let mut decline = |_: &str| false;
        let report = self.session.dispatch(event, &mut decline);
        self.apply_report(report);
    }

    fn apply_report(&mut self, report: DispatchReport) {
        match report.default_behavior() {
            Some(DefaultBehavior::OpenExternal(target)) => {
                info!("External link left to the browser: {}", target);
                self.notice = Some(format!("Open {} in a browser", target));
            }
            Some(DefaultBehavior::OpenInNewContext(target)) => {
                info!("New-window link left to the browser: {}", target);
                self.notice = Some(format!("Open {} in a new window", target));
            }
            _ => {}
        }
        if let Some(diagnostic) = report.diagnostics.last() {
            self.notice = Some(diagnostic.clone());
        }
    }
}
