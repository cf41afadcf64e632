//! Page identifiers and titles derived from document filenames.

use serde::{Deserialize, Serialize};

/// Default suite name shown in document titles.
///
pub const DEFAULT_SUITE_NAME: &str = "NHM Fund Monitor";

/// Coarse category of a page, used when no navigation entry matches the
/// current address exactly.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageIdentifier {
    Home,
    Login,
    Dashboard,
    Projects,
    Alerts,
    Reports,
    Users,
    Settings,
}

impl PageIdentifier {
    /// Look up the identifier for a document filename, defaulting to
    /// [`PageIdentifier::Dashboard`].
    ///
    pub fn from_filename(filename: &str) -> PageIdentifier {
        match filename {
            "index.html" => PageIdentifier::Home,
            "login.html" | "admin-login.html" | "district-login.html" | "auditor-login.html" => {
                PageIdentifier::Login
            }
            "admin-dashboard.html" | "district-dashboard.html" | "auditor-dashboard.html" => {
                PageIdentifier::Dashboard
            }
            "project-detail.html" | "auditor-upload.html" => PageIdentifier::Projects,
            "alerts.html" => PageIdentifier::Alerts,
            "reports.html" => PageIdentifier::Reports,
            "users.html" => PageIdentifier::Users,
            "settings.html" => PageIdentifier::Settings,
            _ => PageIdentifier::Dashboard,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PageIdentifier::Home => "home",
            PageIdentifier::Login => "login",
            PageIdentifier::Dashboard => "dashboard",
            PageIdentifier::Projects => "projects",
            PageIdentifier::Alerts => "alerts",
            PageIdentifier::Reports => "reports",
            PageIdentifier::Users => "users",
            PageIdentifier::Settings => "settings",
        }
    }
}

/// Return the page title registered for `filename`, if any.
///
pub fn title_for_filename(filename: &str) -> Option<&'static str> {
    let title = match filename {
        "admin-dashboard.html" => "Admin Dashboard",
        "district-dashboard.html" => "District Dashboard",
        "auditor-dashboard.html" => "Auditor Panel",
        "project-detail.html" => "Project Details",
        "alerts.html" => "Alerts & Anomalies",
        "reports.html" => "Reports & Analytics",
        "users.html" => "User Management",
        "settings.html" => "Settings",
        "index.html" => "NHM Fund Monitor",
        "login.html" => "Login",
        _ => return None,
    };
    Some(title)
}
