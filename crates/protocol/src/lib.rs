//! # ap-protocol
//!
//! Core protocol definitions and data models for agent-playback.
//!
//! This crate defines all shared data structures used for:
//! - Configuration file parsing (YAML workflows, TOML config)
//! - Observable player state
//! - Communication between hosts (TUI, CLI, web) and the player runtime
//!
//! ## Modules
//!
//! - [`config_models`]: Global configuration from config.toml
//! - [`workflow_models`]: Scripted workflow definitions
//! - [`player_models`]: Player phase, step phases, log entries, snapshots
//! - [`ipc`]: Operations and Events between hosts and the runtime
//!
//! ## Design Principles
//!
//! - Minimal dependencies: serde, ts-rs, uuid and chrono
//! - TypeScript generation: All types derive `TS` for web hosts
//! - Independent compilation: No dependencies on other agent-playback crates

pub mod config_models;
pub mod ipc;
pub mod player_models;
pub mod workflow_models;

// Re-export all public types for convenience
pub use config_models::*;
pub use ipc::*;
pub use player_models::*;
pub use workflow_models::*;
