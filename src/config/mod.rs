//! Configuration module for Diary-Walker
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a default, so a run without any file walks the built-in diary.
//!
//! # Example
//!
//! ```no_run
//! use diary_walker::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("diary.toml")).unwrap();
//! println!("Saving posts under: {}", config.output.root_dir.display());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, OutputConfig, SiteConfig, UserAgentConfig, DEFAULT_START_URL,
    DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
