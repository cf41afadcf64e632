//! Reusable UI widget helpers.

pub mod styling;
