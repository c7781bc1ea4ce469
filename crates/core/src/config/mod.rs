//! Configuration loading and management.
//!
//! This module loads and validates the `.agent-playback/` directory:
//! global settings and workflow definitions.

pub mod error;
pub mod loader;
pub mod models;
