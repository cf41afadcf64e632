//! Responsive collapsible side panel.
//!
//! On narrow viewports the sidebar is hidden until opened through its toggle,
//! and while open it covers the page with an overlay and locks page scroll.
//! Wide viewports always show the sidebar inline, so any width report above
//! the breakpoint forces it closed.

use crate::page::HeaderMarkup;
use log::*;

/// Widest viewport, in logical units, treated as mobile.
///
pub const MOBILE_BREAKPOINT: u32 = 768;

/// Delay before the sidebar closes after a navigation entry is activated on
/// a narrow viewport.
///
pub const DEFERRED_CLOSE_MS: u64 = 100;

pub const OPEN_GLYPH: &str = "☰";
pub const CLOSE_GLYPH: &str = "✕";
pub const TOGGLE_LABEL: &str = "Toggle menu";

/// Responsive visibility state of the collapsible panel.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SidebarState {
    Closed,
    OpenMobile,
}

/// Toggle affordance hosted by the header.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleButton {
    pub glyph: &'static str,
    pub label: String,
    /// Whether the toggle was created rather than found in markup.
    pub created: bool,
}

/// Narrow interface other components use to ask the sidebar to get out of
/// the way.
///
pub trait SidebarControl {
    fn close(&mut self);
}

#[derive(Debug, Clone)]
pub struct SidebarStateMachine {
    state: SidebarState,
    viewport_width: u32,
    toggle: Option<ToggleButton>,
    overlay_visible: bool,
    scroll_locked: bool,
}

impl SidebarStateMachine {
    /// Wire the sidebar for a freshly loaded page, attaching a toggle to the
    /// header when the markup has none.
    ///
    pub fn new(header: Option<&HeaderMarkup>, viewport_width: u32) -> Self {
        let mut sidebar = SidebarStateMachine {
            state: SidebarState::Closed,
            viewport_width,
            toggle: None,
            overlay_visible: false,
            scroll_locked: false,
        };
        sidebar.ensure_toggle(header);
        sidebar.report_viewport(viewport_width);
        sidebar
    }

    /// Make sure a toggle affordance exists. Returns true only when one was
    /// created by this call.
    ///
    pub fn ensure_toggle(&mut self, header: Option<&HeaderMarkup>) -> bool {
        if self.toggle.is_some() {
            return false;
        }
        match header {
            Some(header) => {
                let created = !header.toggle;
                self.toggle = Some(ToggleButton {
                    glyph: self.glyph(),
                    label: TOGGLE_LABEL.to_string(),
                    created,
                });
                if created {
                    debug!("Attached sidebar toggle to header");
                }
                created
            }
            None => {
                warn!("No header region to host the sidebar toggle");
                false
            }
        }
    }

    pub fn state(&self) -> SidebarState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == SidebarState::OpenMobile
    }

    pub fn is_narrow(&self) -> bool {
        self.viewport_width <= MOBILE_BREAKPOINT
    }

    /// Whether the panel is on screen: always on wide viewports, only when
    /// open on narrow ones.
    ///
    pub fn is_visible(&self) -> bool {
        self.is_open() || !self.is_narrow()
    }

    pub fn overlay_visible(&self) -> bool {
        self.overlay_visible
    }

    pub fn scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    pub fn toggle_button(&self) -> Option<&ToggleButton> {
        self.toggle.as_ref()
    }

    pub fn viewport_width(&self) -> u32 {
        self.viewport_width
    }

    /// Flip between open and closed.
    ///
    pub fn toggle(&mut self) -> &mut Self {
        match self.state {
            SidebarState::Closed => self.open(),
            SidebarState::OpenMobile => self.close_panel(),
        }
    }

    pub fn open(&mut self) -> &mut Self {
        self.state = SidebarState::OpenMobile;
        self.project();
        self
    }

    /// Close the sidebar. Safe to call in any state.
    ///
    pub fn close_panel(&mut self) -> &mut Self {
        self.state = SidebarState::Closed;
        self.project();
        self
    }

    /// Handle a viewport width report.
    ///
    pub fn report_viewport(&mut self, width: u32) -> &mut Self {
        self.viewport_width = width;
        if !self.is_narrow() {
            self.close_panel();
        }
        self
    }

    pub fn on_overlay_click(&mut self) -> &mut Self {
        self.close_panel()
    }

    /// Handle the cancel key. Returns true when it closed the sidebar.
    ///
    pub fn on_cancel_key(&mut self) -> bool {
        if self.is_open() {
            self.close_panel();
            return true;
        }
        false
    }

    /// Handle an activation outside both the panel and its toggle. Returns
    /// true when it closed the sidebar.
    ///
    pub fn on_outside_activation(&mut self) -> bool {
        if self.is_narrow() && self.is_open() {
            self.close_panel();
            return true;
        }
        false
    }

    /// Whether activating a navigation entry should schedule a deferred
    /// close.
    ///
    pub fn wants_deferred_close(&self) -> bool {
        self.is_narrow() && self.is_open()
    }

    fn glyph(&self) -> &'static str {
        match self.state {
            SidebarState::Closed => OPEN_GLYPH,
            SidebarState::OpenMobile => CLOSE_GLYPH,
        }
    }

    fn project(&mut self) {
        let open = self.is_open();
        self.overlay_visible = open;
        self.scroll_locked = open;
        let glyph = self.glyph();
        if let Some(toggle) = self.toggle.as_mut() {
            toggle.glyph = glyph;
        }
    }
}

impl SidebarControl for SidebarStateMachine {
    fn close(&mut self) {
        self.close_panel();
    }
}
