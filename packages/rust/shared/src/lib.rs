//! Shared types, error model, and configuration for Versefeed.
//!
//! This crate is the foundation depended on by all other Versefeed crates.
//! It provides:
//! - [`VersefeedError`] — the unified error type
//! - Domain types ([`VerseId`])
//! - Configuration ([`AppConfig`], [`UpstreamConfig`], [`EditionsConfig`],
//!   config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DefaultsConfig, EditionsConfig, UpstreamConfig, config_dir, config_file_path,
    init_config, load_config, load_config_from, valid_selector,
};
pub use error::{Result, VersefeedError};
pub use types::VerseId;
