//! Client-side coordination layer for the NHM Fund Monitor dashboards.
//!
//! Every page load builds a [`session::Session`] from the page's markup
//! contract. The session wires up tab switching, the responsive sidebar,
//! active-route highlighting, the header's user display, and choreographed
//! in-app navigation. The `fundmon-shell` binary hosts sessions in a
//! terminal.

pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod identity;
pub mod logger;
pub mod nav;
pub mod page;
pub mod scheduler;
pub mod session;
pub mod sidebar;
pub mod state;
pub mod tabs;
pub mod ui;

pub use error::{AppError, AppResult};
