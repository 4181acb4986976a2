//! Configuration module for Docweave
//!
//! This module handles loading, parsing, and validating the run configuration.
//! Values come from an optional TOML file and are then overridden by
//! command-line flags.
//!
//! # Example
//!
//! ```no_run
//! use docweave::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("docweave.toml")).unwrap();
//! println!("Writing to: {}", config.output.display());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{default_user_agent, Config, USER_AGENT_ENV};

// Re-export parser functions
pub use parser::{load_config, read_config};
pub use validation::validate;
