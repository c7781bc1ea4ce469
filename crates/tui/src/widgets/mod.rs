//! TUI widgets module.
//!
//! This module contains the widgets that make up the player screen.

pub mod log_view;
pub mod steps;

pub use log_view::LogView;
pub use steps::render_steps;
