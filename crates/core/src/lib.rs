//! # ap-core
//!
//! Core playback engine for agent-playback.
//!
//! This crate provides:
//! - Configuration loading from the `.agent-playback/` directory
//! - The scripted workflow player and its virtual timer queue
//! - An async runtime that plays a workflow in real time
//! - Project initialization from embedded templates
//!
//! ## Modules
//!
//! - [`config`]: Configuration loading and management
//! - [`player`]: Workflow player, timer queue and reset semantics
//! - [`runtime`]: Tokio driver mapping the player clock to real time
//! - [`init`]: `.agent-playback/` scaffolding
//! - [`logging`]: Tracing subscriber setup for the binaries

pub mod config;
pub mod init;
pub mod logging;
pub mod player;
pub mod runtime;
