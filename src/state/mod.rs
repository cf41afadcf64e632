//! Host state management module.
//!
//! This module contains the terminal host's state, including:
//! - Main `State` struct wrapping the current page session
//! - Input modes (page interaction, logout confirmation)
//! - State error handling

mod error;
mod mode;

pub use error::StateError;
pub use mode::Mode;

#[path = "state_impl.rs"]
mod state_impl;

pub use state_impl::State;
