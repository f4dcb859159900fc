// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! 1. TOML file (base values, defaults for missing sections)
//! 2. Environment variables (runtime overrides)
//! 3. Validation

use crate::{validate_config, ConfigError, ConfigResult, ScanConfig};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "bredr_scan.toml";

/// Find the scan configuration file
///
/// Search order:
/// 1. `BREDR_SCAN_CONFIG_PATH` environment variable
/// 2. Current working directory
/// 3. Parent directories, up to 5 levels
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var("BREDR_SCAN_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(format!(
            "Config file specified by BREDR_SCAN_CONFIG_PATH not found: {}",
            path.display()
        )));
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.extend(cwd.ancestors().take(6).map(|dir| dir.join(CONFIG_FILE_NAME)));
    }

    if let Some(path) = search_paths.iter().find(|path| path.exists()) {
        return Ok(path.clone());
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");
    Err(ConfigError::FileNotFound(format!(
        "'{}' not found in any of these locations:\n{}\n\nSet BREDR_SCAN_CONFIG_PATH environment variable to specify custom location.",
        CONFIG_FILE_NAME, search_list
    )))
}

/// Load, override and validate the configuration
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, will search for config file.
///
/// # Errors
///
/// Returns error if config file is not found, contains invalid TOML, or fails validation
pub fn load_config(config_path: Option<&Path>) -> ConfigResult<ScanConfig> {
    let config_file = match config_path {
        Some(path) => path.to_path_buf(),
        None => find_config_file()?,
    };

    let content = fs::read_to_string(&config_file)?;
    let mut config: ScanConfig = toml::from_str(&content)?;

    apply_environment_overrides(&mut config);
    validate_config(&config)?;
    Ok(config)
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `BREDR_PAGE_SCAN_PROFILE` -> `page_scan.selected_profile`
/// - `BREDR_INQUIRY_SCAN_PROFILE` -> `inquiry_scan.selected_profile`
/// - `BREDR_LOG_LEVEL` -> `logging.level`
///
/// Values that do not parse are ignored.
pub fn apply_environment_overrides(config: &mut ScanConfig) {
    if let Ok(value) = env::var("BREDR_PAGE_SCAN_PROFILE") {
        if let Ok(index) = value.trim().parse::<usize>() {
            config.page_scan.selected_profile = index;
        }
    }
    if let Ok(value) = env::var("BREDR_INQUIRY_SCAN_PROFILE") {
        if let Ok(index) = value.trim().parse::<usize>() {
            config.inquiry_scan.selected_profile = index;
        }
    }
    if let Ok(value) = env::var("BREDR_LOG_LEVEL") {
        config.logging.level = value;
    }
}
