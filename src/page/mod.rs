//! Markup contract of a single dashboard page.
//!
//! A page manifest describes what the surrounding view exposes to the
//! coordination layer: navigation entries, tab controls and panels, the
//! header and sidebar hosts, and the main-content region. Manifests are YAML
//! files, one per document path, loaded through [`Site`].

mod error;
mod site;

pub use error::PageError;
pub use site::Site;

use crate::nav::PageIdentifier;
use serde::{Deserialize, Serialize};

/// Everything the coordination layer can see of a loaded document.
///
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Page {
    /// Initial content of the page-title surface; `None` when the page has
    /// no title surface.
    pub title: Option<String>,
    pub header: Option<HeaderMarkup>,
    pub sidebar: Option<SidebarMarkup>,
    pub main: Option<MainMarkup>,
    pub tab_controls: Vec<TabControlMarkup>,
    pub panels: Vec<PanelMarkup>,
}

/// Header region hosting the user display and the sidebar toggle.
///
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderMarkup {
    /// Whether the markup already carries a sidebar toggle.
    pub toggle: bool,
    pub user_name: Option<String>,
    pub avatar: Option<String>,
}

/// The collapsible side panel.
///
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SidebarMarkup {
    pub entries: Vec<NavEntryMarkup>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavEntryMarkup {
    pub label: String,
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default)]
    pub page: Option<PageIdentifier>,
    #[serde(default)]
    pub logout: bool,
    #[serde(default)]
    pub active: bool,
}

/// Which designated region holds the page's main content.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MainKind {
    #[default]
    DashboardContent,
    AlertsContent,
    ProjectDetailContent,
    AuditorMain,
    LoginSection,
    HeroSection,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MainMarkup {
    pub kind: MainKind,
    pub body: Vec<String>,
    pub links: Vec<LinkMarkup>,
}

/// Any link-like element in the main content.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinkMarkup {
    pub label: String,
    #[serde(default)]
    pub href: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TabControlMarkup {
    pub label: String,
    /// Identifier of the panel this control reveals.
    #[serde(default)]
    pub target: Option<String>,
    /// Enclosing group container, if any.
    #[serde(default)]
    pub container: Option<String>,
    #[serde(default)]
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PanelMarkup {
    pub id: String,
    #[serde(default)]
    pub container: Option<String>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub body: Vec<String>,
}

impl Page {
    /// Parse a page manifest.
    ///
    pub fn from_yaml(contents: &str) -> Result<Page, serde_yaml::Error> {
        serde_yaml::from_str(contents)
    }

    /// Built-in document shown when no manifest exists for an address.
    ///
    pub fn not_found(address: &str) -> Page {
        Page {
            title: Some("Page Not Found".to_string()),
            main: Some(MainMarkup {
                kind: MainKind::HeroSection,
                body: vec![format!("There is no page at {}.", address)],
                links: vec![LinkMarkup {
                    label: "Back to home".to_string(),
                    href: Some("/index.html".to_string()),
                }],
            }),
            ..Page::default()
        }
    }

    /// Return the navigation entries declared in the sidebar.
    ///
    pub fn nav_entries(&self) -> &[NavEntryMarkup] {
        self.sidebar
            .as_ref()
            .map(|sidebar| sidebar.entries.as_slice())
            .unwrap_or(&[])
    }

    /// Return the links declared in the main content.
    ///
    pub fn links(&self) -> &[LinkMarkup] {
        self.main
            .as_ref()
            .map(|main| main.links.as_slice())
            .unwrap_or(&[])
    }
}

impl MainKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MainKind::DashboardContent => "dashboard-content",
            MainKind::AlertsContent => "alerts-content",
            MainKind::ProjectDetailContent => "project-detail-content",
            MainKind::AuditorMain => "auditor-main",
            MainKind::LoginSection => "login-section",
            MainKind::HeroSection => "hero-section",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"
title: Dashboard
header:
  user_name: Loading
sidebar:
  entries:
    - label: Dashboard
      href: admin-dashboard.html
      page: dashboard
    - label: Logout
      href: index.html
      logout: true
main:
  kind: alerts-content
  body:
    - Three anomalies need review.
  links:
    - label: Project 12
      href: project-detail.html?id=12
tab_controls:
  - label: Open
    target: open-alerts
    container: alert-tabs
    active: true
  - label: Closed
    target: closed-alerts
    container: alert-tabs
panels:
  - id: open-alerts
    container: alert-tabs
  - id: closed-alerts
    container: alert-tabs
    hidden: true
"#;

    #[test]
    fn manifest_parses_every_region() {
        let page = Page::from_yaml(MANIFEST).unwrap();
        assert_eq!(page.title.as_deref(), Some("Dashboard"));
        let header = page.header.as_ref().unwrap();
        assert!(!header.toggle);
        assert_eq!(header.user_name.as_deref(), Some("Loading"));
        assert_eq!(page.nav_entries().len(), 2);
        assert_eq!(page.nav_entries()[0].page, Some(PageIdentifier::Dashboard));
        assert!(page.nav_entries()[1].logout);
        assert_eq!(page.main.as_ref().unwrap().kind, MainKind::AlertsContent);
        assert_eq!(page.links()[0].href.as_deref(), Some("project-detail.html?id=12"));
        assert_eq!(page.tab_controls.len(), 2);
        assert!(page.tab_controls[0].active);
        assert!(page.panels[1].hidden);
    }

    #[test]
    fn empty_manifest_is_a_bare_page() {
        let page = Page::from_yaml("{}").unwrap();
        assert_eq!(page, Page::default());
        assert!(page.nav_entries().is_empty());
        assert!(page.links().is_empty());
    }

    #[test]
    fn entry_without_label_is_rejected() {
        let result = Page::from_yaml("sidebar:\n  entries:\n    - href: alerts.html\n");
        assert!(result.is_err());
    }

    #[test]
    fn not_found_page_links_home() {
        let page = Page::not_found("/missing.html");
        assert!(page.main.as_ref().unwrap().body[0].contains("/missing.html"));
        assert_eq!(page.links()[0].href.as_deref(), Some("/index.html"));
        assert!(page.sidebar.is_none());
    }
}
