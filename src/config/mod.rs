//! Configuration module for Tafsir-Harvest
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every key has a default, so a run without a file
//! harvests the stock index with the stock retry policy.
//!
//! # Example
//!
//! ```no_run
//! use tafsir_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("tafsir.toml")).unwrap();
//! println!("Chapters will be retried {} times", config.retry.max_attempts);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, OutputConfig, RetryConfig, SourceConfig, DEFAULT_INDEX_URL};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
