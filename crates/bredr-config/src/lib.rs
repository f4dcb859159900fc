// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # BR/EDR Scan Configuration
//!
//! Loads page and inquiry scan parameter tables, profile selection and
//! logging settings from `bredr_scan.toml`:
//! - TOML file parsing with automatic file discovery
//! - Environment variable overrides
//! - Validation against the HCI parameter ranges
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bredr_config::load_config;
//!
//! let config = load_config(None).expect("Failed to load config");
//! println!("Page scan profile: {}", config.page_scan.selected_profile);
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod loader;
pub mod types;
pub mod validation;

pub use loader::{apply_environment_overrides, find_config_file, load_config, CONFIG_FILE_NAME};
pub use types::*;
pub use validation::{validate_config, ConfigValidationError};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found. Searched: {0}")]
    FileNotFound(String),

    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax: {0}")]
    ParseError(String),

    #[error("Validation failed: {0}")]
    ValidationError(String),

    /// The scan manager rejected the configured tables
    #[error("Failed to apply configuration: {0}")]
    Apply(#[from] bredr_scan_manager::ScanError),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
