//! Event handling module.
//!
//! Terminal events (key presses, resizes, ticks) are polled on a separate
//! thread and handled on the main thread against the host state.

pub mod terminal;
