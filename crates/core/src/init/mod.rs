//! Initialization module for creating .trigger-kit directory structures.
//!
//! Generates a `.trigger-kit/` directory with pre-configured templates:
//! - Global configuration (`config.toml`)
//! - Workflow definitions (`workflows/*.yaml`)
//!
//! # Example
//!
//! ```no_run
//! use tk_core::init::{generate_trigger_kit_structure, InitOptions};
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let options = InitOptions {
//!     target_dir: PathBuf::from("."),
//!     force: false,
//!     minimal: false,
//! };
//!
//! generate_trigger_kit_structure(options).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod generator;
pub mod templates;

pub use error::{InitError, InitResult};
pub use generator::{generate_trigger_kit_structure, InitOptions};
pub use templates::{get_template, list_templates};
