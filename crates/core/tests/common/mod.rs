//! Common test utilities shared by the integration suites.
//!
//! This module provides:
//! - Test fixtures (scripted workflows, sample projects)
//! - Event collection and assertion helpers

pub mod assertions;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;
