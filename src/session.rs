//! Per-load coordination context.
//!
//! A [`Session`] is built from a freshly loaded page and owns every state
//! machine for that load. Environment events go in through [`Session::dispatch`]
//! in listener order, deferred work comes due through [`Session::advance`], and
//! the only thing that leaves is the address of the next document. Navigating
//! means dropping the session and loading a new one.

use crate::identity::{HeaderDisplay, IdentityPresenter, IdentityStore};
use crate::nav::{
    ActiveRouteHighlighter, AddressablePath, Confirm, DefaultBehavior, Handled, LinkActivation,
    MainRegion, NavEntry, NavigationCoordinator, RouteHighlight,
};
use crate::page::Page;
use crate::scheduler::{Scheduler, TaskId};
use crate::sidebar::{SidebarControl, SidebarStateMachine, DEFERRED_CLOSE_MS};
use crate::tabs::{TabStateMachine, PANEL_FADE_IN_MS};
use log::*;
use url::Url;

/// Deferred work a session can schedule.
///
#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    /// Perform the full navigation to the given address.
    Navigate(AddressablePath),
    CloseSidebar,
    /// Run the main region's entrance transition.
    Entrance,
    RevealPanel { group: usize, panel_id: String },
}

/// Interactive elements of a loaded page.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    /// Sidebar toggle in the header.
    Toggle,
    Overlay,
    /// Navigation entry by position in the sidebar.
    NavEntry(usize),
    /// Link by position in the main content.
    Link(usize),
    /// Tab control by position in the page.
    TabControl(usize),
    /// Any non-interactive part of the main content.
    Content,
}

/// A click-like activation of an element.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Activation {
    pub element: Element,
    /// The new-context modifier was held.
    pub new_context: bool,
}

impl Activation {
    pub fn click(element: Element) -> Self {
        Activation {
            element,
            new_context: false,
        }
    }

    pub fn in_new_context(element: Element) -> Self {
        Activation {
            element,
            new_context: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Other,
}

/// Environment events delivered to a session.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    Activate(Activation),
    Resize { width: u32 },
    KeyDown(Key),
    /// Scroll the page by a number of lines; negative scrolls up.
    Scroll { delta: i32 },
}

/// What dispatching one event did.
///
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DispatchReport {
    /// Whether the environment's default behavior was suppressed.
    pub default_prevented: bool,
    pub handled: Option<Handled>,
    pub diagnostics: Vec<String>,
}

impl DispatchReport {
    /// Address of the navigation scheduled by this event, if any.
    ///
    pub fn navigation(&self) -> Option<&AddressablePath> {
        match &self.handled {
            Some(Handled::Navigating { path, .. }) => Some(path),
            _ => None,
        }
    }

    /// What the environment should do on its own, when not suppressed.
    ///
    pub fn default_behavior(&self) -> Option<&DefaultBehavior> {
        match &self.handled {
            Some(Handled::Default(behavior)) => Some(behavior),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Phase {
    Loaded,
    Unloading(AddressablePath),
}

/// Environment inputs needed to build a session.
///
pub struct LoadContext<'a> {
    pub address: AddressablePath,
    pub viewport_width: u32,
    pub suite_name: &'a str,
    pub identity: &'a dyn IdentityStore,
}

pub struct Session {
    page: Page,
    address: AddressablePath,
    nav_entries: Vec<NavEntry>,
    highlight: RouteHighlight,
    page_title: Option<String>,
    header: Option<HeaderDisplay>,
    tabs: TabStateMachine,
    sidebar: Option<SidebarStateMachine>,
    main: Option<MainRegion>,
    coordinator: NavigationCoordinator,
    scheduler: Scheduler<Task>,
    viewport_width: u32,
    scroll_top: u32,
    phase: Phase,
}

impl Session {
    /// Build every state machine for a freshly loaded page.
    ///
    pub fn load(page: Page, context: LoadContext) -> Session {
        let location = context.address.to_location();
        let mut scheduler = Scheduler::new();

        let mut tabs = TabStateMachine::from_markup(&page.tab_controls, &page.panels);
        tabs.initialize();

        let sidebar = page
            .sidebar
            .as_ref()
            .map(|_| SidebarStateMachine::new(page.header.as_ref(), context.viewport_width));

        let highlighter = ActiveRouteHighlighter::new(context.suite_name);
        let mut nav_entries: Vec<NavEntry> = page.nav_entries().iter().map(NavEntry::from).collect();
        let highlight = highlighter.highlight(&mut nav_entries, &location);
        let page_title = page.title.as_ref().map(|_| highlight.title.clone());
        let main = page.main.as_ref().map(|_| {
            let mut main = MainRegion::default();
            highlighter.begin_entrance(&mut main, &mut scheduler);
            main
        });

        let header = page
            .header
            .as_ref()
            .map(|_| IdentityPresenter::new(context.identity).present(&context.address.pathname));

        info!("Loaded {} ({})", context.address, highlight.document_title);
        Session {
            page,
            address: context.address,
            nav_entries,
            highlight,
            page_title,
            header,
            tabs,
            sidebar,
            main,
            coordinator: NavigationCoordinator::new(location),
            scheduler,
            viewport_width: context.viewport_width,
            scroll_top: 0,
            phase: Phase::Loaded,
        }
    }

    /// Deliver one environment event.
    ///
    pub fn dispatch(&mut self, event: PageEvent, confirm: &mut dyn Confirm) -> DispatchReport {
        if self.is_unloading() {
            debug!("Ignoring {:?} while unloading", event);
            return DispatchReport::default();
        }
        match event {
            PageEvent::Activate(activation) => self.activate(activation, confirm),
            PageEvent::Resize { width } => {
                self.viewport_width = width;
                if let Some(sidebar) = self.sidebar.as_mut() {
                    sidebar.report_viewport(width);
                }
                DispatchReport::default()
            }
            PageEvent::KeyDown(Key::Escape) => {
                if let Some(sidebar) = self.sidebar.as_mut() {
                    sidebar.on_cancel_key();
                }
                DispatchReport::default()
            }
            PageEvent::KeyDown(Key::Other) => DispatchReport::default(),
            PageEvent::Scroll { delta } => {
                if self.scroll_locked() {
                    debug!("Scroll locked by the open sidebar");
                } else {
                    self.scroll_top = if delta < 0 {
                        self.scroll_top.saturating_sub(delta.unsigned_abs())
                    } else {
                        self.scroll_top.saturating_add(delta.unsigned_abs())
                    };
                }
                DispatchReport::default()
            }
        }
    }

    fn activate(&mut self, activation: Activation, confirm: &mut dyn Confirm) -> DispatchReport {
        let mut report = DispatchReport::default();
        match activation.element {
            Element::Toggle => {
                match self.sidebar.as_mut() {
                    Some(sidebar) if sidebar.toggle_button().is_some() => {
                        sidebar.toggle();
                    }
                    _ => warn!("Page has no sidebar toggle"),
                }
                // The toggle's own handler stops propagation.
                return report;
            }
            Element::Overlay => {
                if let Some(sidebar) = self.sidebar.as_mut() {
                    sidebar.on_overlay_click();
                }
            }
            Element::TabControl(control) => {
                report.default_prevented = true;
                match self.tabs.activate(control) {
                    Ok((group, panel_id)) => {
                        self.scheduler
                            .schedule(PANEL_FADE_IN_MS, Task::RevealPanel { group, panel_id });
                    }
                    Err(e) => {
                        warn!("{}", e);
                        report.diagnostics.push(e.to_string());
                    }
                }
                return report;
            }
            Element::NavEntry(index) => {
                let entry = match self.nav_entries.get(index) {
                    Some(entry) => entry.clone(),
                    None => {
                        warn!("Unknown navigation entry {}", index);
                        return report;
                    }
                };
                let defer_close = !entry.logout
                    && self
                        .sidebar
                        .as_ref()
                        .map_or(false, |sidebar| sidebar.wants_deferred_close());
                let handled = self.follow(
                    &LinkActivation {
                        href: entry.address.as_deref(),
                        logout: entry.logout,
                        new_context: activation.new_context,
                    },
                    confirm,
                );
                if defer_close {
                    self.scheduler.schedule(DEFERRED_CLOSE_MS, Task::CloseSidebar);
                }
                report.default_prevented = handled.default_prevented();
                report.handled = Some(handled);
                // Entries live inside the sidebar, so this is never an
                // outside activation.
                return report;
            }
            Element::Link(index) => {
                let href = match self.page.links().get(index) {
                    Some(link) => link.href.clone(),
                    None => {
                        warn!("Unknown link {}", index);
                        return report;
                    }
                };
                let handled = self.follow(
                    &LinkActivation {
                        href: href.as_deref(),
                        logout: false,
                        new_context: activation.new_context,
                    },
                    confirm,
                );
                report.default_prevented = handled.default_prevented();
                report.handled = Some(handled);
            }
            Element::Content => {}
        }

        if let Some(sidebar) = self.sidebar.as_mut() {
            if sidebar.on_outside_activation() {
                debug!("Closed sidebar on outside activation");
            }
        }
        report
    }

    fn follow(&mut self, link: &LinkActivation, confirm: &mut dyn Confirm) -> Handled {
        let sidebar = self
            .sidebar
            .as_mut()
            .map(|sidebar| sidebar as &mut dyn SidebarControl);
        self.coordinator
            .handle(link, confirm, sidebar, self.main.as_mut(), &mut self.scheduler)
    }

    /// Move the clock forward and run every task that came due. Returns the
    /// address to load when a navigation fired.
    ///
    pub fn advance(&mut self, elapsed_ms: u64) -> Option<AddressablePath> {
        if self.is_unloading() {
            return None;
        }
        self.scheduler.advance(elapsed_ms);
        self.run_due()
    }

    /// Run scheduled tasks until none are left or a navigation fires.
    ///
    pub fn run_until_idle(&mut self) -> Option<AddressablePath> {
        if self.is_unloading() {
            return None;
        }
        loop {
            if let Some(path) = self.run_due() {
                return Some(path);
            }
            match self.scheduler.time_until_next() {
                Some(delay) => {
                    self.scheduler.advance(delay);
                }
                None => return None,
            }
        }
    }

    fn run_due(&mut self) -> Option<AddressablePath> {
        while let Some((id, task)) = self.scheduler.next_due() {
            trace!("Running task {}: {:?}", id, task);
            match task {
                Task::Navigate(path) => {
                    self.phase = Phase::Unloading(path.clone());
                    return Some(path);
                }
                Task::CloseSidebar => {
                    if let Some(sidebar) = self.sidebar.as_mut() {
                        sidebar.close_panel();
                    }
                }
                Task::Entrance => {
                    if let Some(main) = self.main.as_mut() {
                        main.enter();
                    }
                }
                Task::RevealPanel { group, panel_id } => self.tabs.fade_in(group, &panel_id),
            }
        }
        None
    }

    /// Interactive elements currently reachable, in focus order.
    ///
    pub fn elements(&self) -> Vec<Element> {
        let mut elements = vec![];
        if let Some(sidebar) = &self.sidebar {
            if sidebar.toggle_button().is_some() {
                elements.push(Element::Toggle);
            }
            if sidebar.is_visible() {
                elements.extend((0..self.nav_entries.len()).map(Element::NavEntry));
            }
            if sidebar.overlay_visible() {
                elements.push(Element::Overlay);
            }
        }
        elements.extend((0..self.tabs.len()).map(Element::TabControl));
        elements.extend((0..self.page.links().len()).map(Element::Link));
        elements
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn address(&self) -> &AddressablePath {
        &self.address
    }

    pub fn location(&self) -> &Url {
        self.coordinator.location()
    }

    pub fn nav_entries(&self) -> &[NavEntry] {
        &self.nav_entries
    }

    pub fn highlight(&self) -> &RouteHighlight {
        &self.highlight
    }

    /// Content of the page-title surface, when the page has one.
    ///
    pub fn page_title(&self) -> Option<&str> {
        self.page_title.as_deref()
    }

    pub fn document_title(&self) -> &str {
        &self.highlight.document_title
    }

    pub fn header(&self) -> Option<&HeaderDisplay> {
        self.header.as_ref()
    }

    pub fn tabs(&self) -> &TabStateMachine {
        &self.tabs
    }

    pub fn sidebar(&self) -> Option<&SidebarStateMachine> {
        self.sidebar.as_ref()
    }

    pub fn main(&self) -> Option<&MainRegion> {
        self.main.as_ref()
    }

    pub fn scheduler(&self) -> &Scheduler<Task> {
        &self.scheduler
    }

    pub fn is_complete(&self, task: TaskId) -> bool {
        self.scheduler.is_complete(task)
    }

    pub fn viewport_width(&self) -> u32 {
        self.viewport_width
    }

    pub fn scroll_top(&self) -> u32 {
        self.scroll_top
    }

    pub fn scroll_locked(&self) -> bool {
        self.sidebar
            .as_ref()
            .map_or(false, |sidebar| sidebar.scroll_locked())
    }

    pub fn is_unloading(&self) -> bool {
        matches!(self.phase, Phase::Unloading(_))
    }

    /// Address being navigated to, once a navigation has fired.
    ///
    pub fn unloading_to(&self) -> Option<&AddressablePath> {
        match &self.phase {
            Phase::Unloading(path) => Some(path),
            Phase::Loaded => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::{MemoryStore, IDENTITY_KEY};
    use crate::nav::{DEFAULT_SUITE_NAME, NAVIGATION_DELAY_MS};
    use crate::page::{
        HeaderMarkup, LinkMarkup, MainMarkup, NavEntryMarkup, PanelMarkup, SidebarMarkup,
        TabControlMarkup,
    };
    use crate::sidebar::SidebarState;

    fn entry(label: &str, href: &str) -> NavEntryMarkup {
        NavEntryMarkup {
            label: label.to_string(),
            href: Some(href.to_string()),
            page: None,
            logout: false,
            active: false,
        }
    }

    fn dashboard() -> Page {
        Page {
            title: Some("Dashboard".to_string()),
            header: Some(HeaderMarkup::default()),
            sidebar: Some(SidebarMarkup {
                entries: vec![
                    entry("Dashboard", "/admin-dashboard.html"),
                    entry("Alerts", "/alerts.html"),
                    NavEntryMarkup {
                        logout: true,
                        ..entry("Logout", "index.html")
                    },
                ],
            }),
            main: Some(MainMarkup {
                links: vec![
                    LinkMarkup {
                        label: "Reports".to_string(),
                        href: Some("reports.html".to_string()),
                    },
                    LinkMarkup {
                        label: "Portal".to_string(),
                        href: Some("https://nhm.gov.in".to_string()),
                    },
                ],
                ..MainMarkup::default()
            }),
            tab_controls: vec![
                TabControlMarkup {
                    label: "A".to_string(),
                    target: Some("panelA".to_string()),
                    container: None,
                    active: true,
                },
                TabControlMarkup {
                    label: "B".to_string(),
                    target: Some("panelB".to_string()),
                    container: None,
                    active: false,
                },
            ],
            panels: vec![
                PanelMarkup {
                    id: "panelA".to_string(),
                    container: None,
                    hidden: false,
                    body: vec![],
                },
                PanelMarkup {
                    id: "panelB".to_string(),
                    container: None,
                    hidden: true,
                    body: vec![],
                },
            ],
        }
    }

    fn load_with(page: Page, path: &str, width: u32, store: &MemoryStore) -> Session {
        Session::load(
            page,
            LoadContext {
                address: AddressablePath::parse(path),
                viewport_width: width,
                suite_name: DEFAULT_SUITE_NAME,
                identity: store,
            },
        )
    }

    fn load(path: &str, width: u32) -> Session {
        load_with(dashboard(), path, width, &MemoryStore::new())
    }

    fn accept() -> impl FnMut(&str) -> bool {
        |_: &str| true
    }

    fn click(element: Element) -> PageEvent {
        PageEvent::Activate(Activation::click(element))
    }

    #[test]
    fn load_highlights_route_and_titles() {
        let session = load("/admin-dashboard.html", 1280);
        assert!(session.nav_entries()[0].active);
        assert!(!session.nav_entries()[1].active);
        assert_eq!(session.page_title(), Some("Admin Dashboard"));
        assert_eq!(session.document_title(), "Admin Dashboard - NHM Fund Monitor");
        assert_eq!(session.scroll_top(), 0);
    }

    #[test]
    fn page_without_title_surface_keeps_document_title() {
        let page = Page {
            title: None,
            ..dashboard()
        };
        let session = load_with(page, "/alerts.html", 1280, &MemoryStore::new());
        assert_eq!(session.page_title(), None);
        assert_eq!(session.document_title(), "Alerts & Anomalies - NHM Fund Monitor");
    }

    #[test]
    fn entrance_completes_after_delay() {
        let mut session = load("/admin-dashboard.html", 1280);
        assert!(session.main().unwrap().is_faded());
        assert_eq!(session.advance(49), None);
        assert!(session.main().unwrap().is_faded());
        session.advance(1);
        assert!(!session.main().unwrap().is_faded());
        assert_eq!(session.scheduler().pending_len(), 0);
    }

    #[test]
    fn internal_link_navigates_after_fade() {
        let mut session = load("/admin-dashboard.html", 1280);
        session.run_until_idle();
        let report = session.dispatch(click(Element::Link(0)), &mut accept());
        assert!(report.default_prevented);
        assert_eq!(report.navigation(), Some(&AddressablePath::parse("/reports.html")));
        assert!(session.main().unwrap().is_faded());

        assert_eq!(session.advance(NAVIGATION_DELAY_MS - 1), None);
        let path = session.advance(1).unwrap();
        assert_eq!(path.to_string(), "/reports.html");
        assert!(session.is_unloading());
    }

    #[test]
    fn external_link_is_left_to_environment() {
        let mut session = load("/admin-dashboard.html", 1280);
        session.run_until_idle();
        let report = session.dispatch(click(Element::Link(1)), &mut accept());
        assert!(!report.default_prevented);
        assert_eq!(
            report.default_behavior(),
            Some(&DefaultBehavior::OpenExternal("https://nhm.gov.in".to_string()))
        );
        assert_eq!(session.run_until_idle(), None);
    }

    #[test]
    fn declined_logout_leaves_everything_alone() {
        let mut session = load("/admin-dashboard.html", 480);
        session.run_until_idle();
        session.dispatch(click(Element::Toggle), &mut accept());
        assert!(session.sidebar().unwrap().is_open());

        let mut decline = |_: &str| false;
        let report = session.dispatch(click(Element::NavEntry(2)), &mut decline);
        assert_eq!(report.handled, Some(Handled::Declined));
        assert!(report.default_prevented);
        assert!(session.sidebar().unwrap().is_open());
        assert_eq!(session.scheduler().pending_len(), 0);
        assert_eq!(session.run_until_idle(), None);
        assert!(!session.main().unwrap().is_faded());
    }

    #[test]
    fn confirmed_logout_navigates_home() {
        let mut session = load("/admin-dashboard.html", 1280);
        let report = session.dispatch(click(Element::NavEntry(2)), &mut accept());
        assert_eq!(report.navigation().unwrap().pathname, "/index.html");
        assert_eq!(session.run_until_idle().unwrap().pathname, "/index.html");
    }

    fn with_logout_target(href: &str) -> Page {
        let mut page = dashboard();
        if let Some(sidebar) = page.sidebar.as_mut() {
            sidebar.entries[2].href = Some(href.to_string());
        }
        page
    }

    #[test]
    fn accepted_placeholder_logout_closes_sidebar() {
        let page = with_logout_target("#");
        let mut session = load_with(page, "/admin-dashboard.html", 480, &MemoryStore::new());
        session.run_until_idle();
        session.dispatch(click(Element::Toggle), &mut accept());
        let report = session.dispatch(click(Element::NavEntry(2)), &mut accept());
        assert_eq!(report.handled, Some(Handled::Default(DefaultBehavior::Nothing)));
        assert!(!session.sidebar().unwrap().is_open());
        assert_eq!(session.run_until_idle(), None);
        assert!(!session.sidebar().unwrap().is_open());
    }

    #[test]
    fn accepted_logout_in_new_context_closes_sidebar() {
        let mut session = load("/admin-dashboard.html", 480);
        session.run_until_idle();
        session.dispatch(click(Element::Toggle), &mut accept());
        let report = session.dispatch(
            PageEvent::Activate(Activation::in_new_context(Element::NavEntry(2))),
            &mut accept(),
        );
        assert_eq!(
            report.default_behavior(),
            Some(&DefaultBehavior::OpenInNewContext("/index.html".to_string()))
        );
        assert!(!session.sidebar().unwrap().is_open());
        assert_eq!(session.run_until_idle(), None);
    }

    #[test]
    fn fragment_link_reloads_current_document() {
        let mut page = dashboard();
        if let Some(main) = page.main.as_mut() {
            main.links.push(LinkMarkup {
                label: "Milestones".to_string(),
                href: Some("#milestones".to_string()),
            });
        }
        let mut session =
            load_with(page, "/project-detail.html?id=2", 1280, &MemoryStore::new());
        session.run_until_idle();
        let report = session.dispatch(click(Element::Link(2)), &mut accept());
        assert!(report.default_prevented);
        let path = session.run_until_idle().unwrap();
        assert_eq!(path.to_string(), "/project-detail.html?id=2#milestones");
    }

    #[test]
    fn sidebar_closes_before_navigation() {
        let mut session = load("/admin-dashboard.html", 480);
        session.dispatch(click(Element::Toggle), &mut accept());
        let report = session.dispatch(click(Element::NavEntry(1)), &mut accept());
        assert!(report.navigation().is_some());
        assert_eq!(session.sidebar().unwrap().state(), SidebarState::Closed);
        assert!(!session.scroll_locked());
        // The deferred close is scheduled alongside the navigation.
        assert_eq!(session.scheduler().pending_len(), 3);
    }

    #[test]
    fn deferred_close_after_placeholder_entry() {
        let mut page = dashboard();
        if let Some(sidebar) = page.sidebar.as_mut() {
            sidebar.entries.push(entry("Soon", "#"));
        }
        let mut session = load_with(page, "/admin-dashboard.html", 480, &MemoryStore::new());
        session.run_until_idle();
        session.dispatch(click(Element::Toggle), &mut accept());
        let report = session.dispatch(click(Element::NavEntry(3)), &mut accept());
        assert!(!report.default_prevented);
        assert!(session.sidebar().unwrap().is_open());

        session.advance(DEFERRED_CLOSE_MS - 1);
        assert!(session.sidebar().unwrap().is_open());
        session.advance(1);
        assert!(!session.sidebar().unwrap().is_open());
    }

    #[test]
    fn outside_activation_closes_narrow_sidebar() {
        let mut session = load("/admin-dashboard.html", 480);
        session.dispatch(click(Element::Toggle), &mut accept());
        assert!(session.elements().contains(&Element::Overlay));
        session.dispatch(click(Element::Content), &mut accept());
        assert!(!session.sidebar().unwrap().is_open());
    }

    #[test]
    fn toggle_activation_is_not_outside() {
        let mut session = load("/admin-dashboard.html", 480);
        session.dispatch(click(Element::Toggle), &mut accept());
        session.dispatch(click(Element::Toggle), &mut accept());
        assert!(!session.sidebar().unwrap().is_open());
        session.dispatch(click(Element::Toggle), &mut accept());
        assert!(session.sidebar().unwrap().is_open());
    }

    #[test]
    fn overlay_click_closes() {
        let mut session = load("/admin-dashboard.html", 480);
        session.dispatch(click(Element::Toggle), &mut accept());
        session.dispatch(click(Element::Overlay), &mut accept());
        assert!(!session.sidebar().unwrap().is_open());
    }

    #[test]
    fn resize_above_breakpoint_closes() {
        let mut session = load("/admin-dashboard.html", 480);
        session.dispatch(click(Element::Toggle), &mut accept());
        session.dispatch(PageEvent::Resize { width: 1024 }, &mut accept());
        assert_eq!(session.sidebar().unwrap().state(), SidebarState::Closed);
        assert_eq!(session.viewport_width(), 1024);
        assert!(session.sidebar().unwrap().is_visible());
    }

    #[test]
    fn escape_closes_open_sidebar() {
        let mut session = load("/admin-dashboard.html", 480);
        session.dispatch(PageEvent::KeyDown(Key::Escape), &mut accept());
        assert!(!session.sidebar().unwrap().is_open());
        session.dispatch(click(Element::Toggle), &mut accept());
        session.dispatch(PageEvent::KeyDown(Key::Other), &mut accept());
        assert!(session.sidebar().unwrap().is_open());
        session.dispatch(PageEvent::KeyDown(Key::Escape), &mut accept());
        assert!(!session.sidebar().unwrap().is_open());
    }

    #[test]
    fn scroll_is_locked_while_sidebar_open() {
        let mut session = load("/admin-dashboard.html", 480);
        session.dispatch(PageEvent::Scroll { delta: 5 }, &mut accept());
        assert_eq!(session.scroll_top(), 5);
        session.dispatch(click(Element::Toggle), &mut accept());
        session.dispatch(PageEvent::Scroll { delta: 5 }, &mut accept());
        assert_eq!(session.scroll_top(), 5);
        session.dispatch(PageEvent::KeyDown(Key::Escape), &mut accept());
        session.dispatch(PageEvent::Scroll { delta: -9 }, &mut accept());
        assert_eq!(session.scroll_top(), 0);
    }

    #[test]
    fn tab_activation_flips_panels_and_fades_in() {
        let mut session = load("/admin-dashboard.html", 1280);
        let group = &session.tabs().groups()[0];
        assert_eq!(group.visible_panel_ids(), vec!["panelA"]);

        let report = session.dispatch(click(Element::TabControl(1)), &mut accept());
        assert!(report.default_prevented);
        let group = &session.tabs().groups()[0];
        assert_eq!(group.visible_panel_ids(), vec!["panelB"]);
        assert!(group.entries[1].active);
        assert!(!group.entries[0].active);
        assert_eq!(group.panels[1].opacity, 0.0);

        session.run_until_idle();
        assert_eq!(session.tabs().groups()[0].panels[1].opacity, 1.0);
    }

    #[test]
    fn unknown_tab_control_is_a_diagnostic() {
        let mut session = load("/admin-dashboard.html", 1280);
        let report = session.dispatch(click(Element::TabControl(9)), &mut accept());
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(session.tabs().groups()[0].visible_panel_ids(), vec!["panelA"]);
    }

    #[test]
    fn unparsable_identity_uses_path_default() {
        let store = MemoryStore::new().with(IDENTITY_KEY, "{broken");
        let session = load_with(dashboard(), "/auditor-dashboard.html", 1280, &store);
        let header = session.header().unwrap();
        assert_eq!(header.user_name, "Field Auditor");
        assert_eq!(header.avatar, "FA");
    }

    #[test]
    fn page_without_header_skips_identity_and_toggle() {
        let page = Page {
            header: None,
            ..dashboard()
        };
        let mut session = load_with(page, "/admin-dashboard.html", 480, &MemoryStore::new());
        assert!(session.header().is_none());
        assert!(!session.elements().contains(&Element::Toggle));
        session.dispatch(click(Element::Toggle), &mut accept());
        assert!(!session.sidebar().unwrap().is_open());
    }

    #[test]
    fn first_navigation_to_fire_wins() {
        let mut session = load("/admin-dashboard.html", 1280);
        session.dispatch(click(Element::NavEntry(1)), &mut accept());
        session.advance(50);
        session.dispatch(click(Element::Link(0)), &mut accept());
        assert_eq!(
            session
                .scheduler()
                .pending_tasks()
                .iter()
                .filter(|task| matches!(task, Task::Navigate(_)))
                .count(),
            2
        );

        let path = session.run_until_idle().unwrap();
        assert_eq!(path.pathname, "/alerts.html");
        assert_eq!(session.unloading_to(), Some(&path));
        assert_eq!(session.run_until_idle(), None);
        assert_eq!(session.advance(1000), None);
        let report = session.dispatch(click(Element::Link(0)), &mut accept());
        assert_eq!(report, DispatchReport::default());
    }

    #[test]
    fn narrow_closed_sidebar_hides_entries() {
        let mut session = load("/admin-dashboard.html", 480);
        session.dispatch(PageEvent::KeyDown(Key::Escape), &mut accept());
        let elements = session.elements();
        assert_eq!(elements[0], Element::Toggle);
        assert!(!elements.contains(&Element::NavEntry(0)));
        session.dispatch(click(Element::Toggle), &mut accept());
        assert!(session.elements().contains(&Element::NavEntry(0)));
    }
}
