//! Navigation: address resolution, route highlighting, and page transitions.

pub mod coordinator;
pub mod highlighter;
pub mod identifier;
pub mod path;
pub mod transition;

pub use coordinator::{
    Confirm, DefaultBehavior, Handled, LinkActivation, NavigationCoordinator, LOGOUT_PROMPT,
    NAVIGATION_DELAY_MS,
};
pub use highlighter::{ActiveRouteHighlighter, NavEntry, RouteHighlight};
pub use identifier::{title_for_filename, PageIdentifier, DEFAULT_SUITE_NAME};
pub use path::{resolve, AddressablePath, Resolution};
pub use transition::MainRegion;
