//! Active navigation entry and page title for the current address.

use super::identifier::{title_for_filename, PageIdentifier};
use super::path::{filename, normalize_pathname, resolve, Resolution};
use super::transition::{MainRegion, ENTRANCE_DELAY_MS};
use crate::page::NavEntryMarkup;
use crate::scheduler::{Scheduler, TaskId};
use crate::session::Task;
use log::*;
use url::Url;

/// One navigable item of the sidebar.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    pub label: String,
    pub address: Option<String>,
    pub page: Option<PageIdentifier>,
    pub logout: bool,
    pub active: bool,
}

impl From<&NavEntryMarkup> for NavEntry {
    fn from(markup: &NavEntryMarkup) -> Self {
        NavEntry {
            label: markup.label.clone(),
            address: markup.href.clone(),
            page: markup.page,
            logout: markup.logout,
            active: markup.active,
        }
    }
}

/// Result of highlighting the current route.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteHighlight {
    pub active_entry: Option<usize>,
    pub title: String,
    pub document_title: String,
}

/// Marks the navigation entry that corresponds to the current address and
/// derives the page title.
///
pub struct ActiveRouteHighlighter<'a> {
    suite_name: &'a str,
}

impl<'a> ActiveRouteHighlighter<'a> {
    pub fn new(suite_name: &'a str) -> Self {
        ActiveRouteHighlighter { suite_name }
    }

    /// Clear every mark, then mark at most one entry active for `location`.
    ///
    pub fn highlight(&self, entries: &mut [NavEntry], location: &Url) -> RouteHighlight {
        for entry in entries.iter_mut() {
            entry.active = false;
        }
        let current = normalize_pathname(location.path());
        let active_entry = find_by_address(entries, &current, location)
            .or_else(|| find_by_identifier(entries, filename(location.path())));
        if let Some(index) = active_entry {
            entries[index].active = true;
            debug!("Active navigation entry: {}", entries[index].label);
        }

        let title = self.page_title(location.path());
        RouteHighlight {
            active_entry,
            document_title: self.document_title(&title),
            title,
        }
    }

    /// Title for the page at `pathname`, the suite name when unregistered.
    ///
    pub fn page_title(&self, pathname: &str) -> String {
        title_for_filename(filename(pathname))
            .unwrap_or(self.suite_name)
            .to_string()
    }

    pub fn document_title(&self, title: &str) -> String {
        format!("{} - {}", title, self.suite_name)
    }

    /// Hide the main region and schedule its entrance transition once
    /// layout has had a moment to settle.
    ///
    pub fn begin_entrance(&self, main: &mut MainRegion, scheduler: &mut Scheduler<Task>) -> TaskId {
        main.prepare_entrance();
        scheduler.schedule(ENTRANCE_DELAY_MS, Task::Entrance)
    }
}

fn find_by_address(entries: &[NavEntry], current: &str, location: &Url) -> Option<usize> {
    entries.iter().position(|entry| {
        if entry.logout {
            return false;
        }
        match entry.address.as_deref().map(|address| resolve(address, location)) {
            Some(Resolution::Internal(path)) => path.pathname == current,
            _ => false,
        }
    })
}

fn find_by_identifier(entries: &[NavEntry], name: &str) -> Option<usize> {
    let identifier = PageIdentifier::from_filename(name);
    entries
        .iter()
        .position(|entry| !entry.logout && entry.page == Some(identifier))
}
