//! Interception of link activations and choreographed page transitions.
//!
//! The coordinator is the only component that asks for a real navigation.
//! For an in-app target it suppresses the environment's default behavior on
//! the spot, closes the sidebar, fades the main content out, and schedules
//! the navigation itself. Everything else is left to the environment.

use super::path::{resolve, AddressablePath, Resolution};
use super::transition::{MainRegion, FADE_OUT_MS};
use crate::scheduler::{Scheduler, TaskId};
use crate::session::Task;
use crate::sidebar::SidebarControl;
use log::*;
use url::Url;

/// Delay between the start of the fade-out and the navigation.
///
pub const NAVIGATION_DELAY_MS: u64 = FADE_OUT_MS;

pub const LOGOUT_PROMPT: &str = "Are you sure you want to logout?";

/// Asks the user to confirm an action.
///
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// An activation of a link-like element.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkActivation<'a> {
    pub href: Option<&'a str>,
    pub logout: bool,
    /// The activation asked to open the target in a new context.
    pub new_context: bool,
}

/// What the environment does when its default behavior is not suppressed.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultBehavior {
    Nothing,
    OpenExternal(String),
    OpenInNewContext(String),
}

/// Outcome of handling one activation.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handled {
    /// Default behavior proceeds untouched.
    Default(DefaultBehavior),
    /// Default behavior suppressed and a navigation scheduled.
    Navigating { task: TaskId, path: AddressablePath },
    /// Logout confirmation declined; default behavior suppressed, nothing
    /// else happens.
    Declined,
}

impl Handled {
    pub fn default_prevented(&self) -> bool {
        !matches!(self, Handled::Default(_))
    }
}

/// Per-load navigation coordinator.
///
pub struct NavigationCoordinator {
    location: Url,
    issued: usize,
}

impl NavigationCoordinator {
    pub fn new(location: Url) -> Self {
        NavigationCoordinator {
            location,
            issued: 0,
        }
    }

    pub fn location(&self) -> &Url {
        &self.location
    }

    /// Number of navigations scheduled during this load.
    ///
    pub fn issued(&self) -> usize {
        self.issued
    }

    /// Decide what an activation would do, without side effects.
    ///
    pub fn classify(&self, link: &LinkActivation) -> Result<AddressablePath, DefaultBehavior> {
        let href = link.href.unwrap_or_default();
        match resolve(href, &self.location) {
            Resolution::NotNavigable => Err(DefaultBehavior::Nothing),
            Resolution::External => Err(DefaultBehavior::OpenExternal(href.trim().to_string())),
            Resolution::Internal(path) if link.new_context => {
                Err(DefaultBehavior::OpenInNewContext(path.to_string()))
            }
            Resolution::Internal(path) => Ok(path),
        }
    }

    /// Handle one activation.
    ///
    pub fn handle(
        &mut self,
        link: &LinkActivation,
        confirm: &mut dyn Confirm,
        mut sidebar: Option<&mut dyn SidebarControl>,
        main: Option<&mut MainRegion>,
        scheduler: &mut Scheduler<Task>,
    ) -> Handled {
        if link.logout {
            if !confirm.confirm(LOGOUT_PROMPT) {
                info!("Logout cancelled");
                return Handled::Declined;
            }
            info!("Logging out...");
            // An accepted logout closes the sidebar whatever the target is.
            if let Some(sidebar) = sidebar.take() {
                sidebar.close();
            }
        }

        let path = match self.classify(link) {
            Ok(path) => path,
            Err(behavior) => {
                debug!("Leaving activation to the environment: {:?}", behavior);
                return Handled::Default(behavior);
            }
        };

        if let Some(sidebar) = sidebar {
            sidebar.close();
        }
        if let Some(main) = main {
            main.fade_out();
        }
        let task = scheduler.schedule(NAVIGATION_DELAY_MS, Task::Navigate(path.clone()));
        self.issued += 1;
        info!("Navigating to {}", path);
        Handled::Navigating { task, path }
    }
}
