//! Initialization module for creating `.agent-playback` directory structures.
//!
//! Writes the embedded templates (global `config.toml` plus sample
//! workflows) so a project can start editing its own scripts.
//!
//! # Example
//!
//! ```no_run
//! use ap_core::init::{generate_structure, InitOptions};
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let options = InitOptions {
//!     target_dir: PathBuf::from("."),
//!     force: false,
//!     minimal: false,
//! };
//!
//! let written = generate_structure(options).await?;
//! println!("Wrote {} files", written.len());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod generator;
pub mod templates;

pub use error::{InitError, InitResult};
pub use generator::{generate_structure, InitOptions};
pub use templates::{get_template, list_templates};
