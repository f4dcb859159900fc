// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! Checks profile selection and every table entry against the ranges the
//! HCI scan activity command accepts.

use bredr_scan_manager::{ScanIntensity, ScanParameters};

use crate::{ConfigError, ConfigResult, ScanConfig, ScanFamilyConfig};

/// Smallest accepted scan window
pub const MIN_WINDOW: u16 = 0x0011;
/// Smallest accepted scan interval
pub const MIN_INTERVAL: u16 = 0x0012;
/// Largest accepted window or interval
pub const MAX_SLOTS: u16 = 0x1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    NoProfiles { section: String },
    ProfileOutOfRange { section: String, selected: usize, available: usize },
    IntervalOutOfRange { entry: String, interval: u16 },
    WindowOutOfRange { entry: String, window: u16 },
    WindowExceedsInterval { entry: String, window: u16, interval: u16 },
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoProfiles { section } => write!(f, "{}.profiles must not be empty", section),
            Self::ProfileOutOfRange { section, selected, available } => write!(
                f,
                "{}.selected_profile = {} but only {} profiles are defined",
                section, selected, available
            ),
            Self::IntervalOutOfRange { entry, interval } => write!(
                f,
                "{}.interval = {:#06x} is outside valid range ({:#06x}-{:#06x})",
                entry, interval, MIN_INTERVAL, MAX_SLOTS
            ),
            Self::WindowOutOfRange { entry, window } => write!(
                f,
                "{}.window = {:#06x} is outside valid range ({:#06x}-{:#06x})",
                entry, window, MIN_WINDOW, MAX_SLOTS
            ),
            Self::WindowExceedsInterval { entry, window, interval } => write!(
                f,
                "{}.window = {:#06x} exceeds interval {:#06x}",
                entry, window, interval
            ),
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

/// Validate the complete configuration
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` listing every problem found
pub fn validate_config(config: &ScanConfig) -> ConfigResult<()> {
    let mut errors = Vec::new();

    validate_family("page_scan", &config.page_scan, &mut errors);
    validate_family("inquiry_scan", &config.inquiry_scan, &mut errors);
    validate_logging(config, &mut errors);

    if !errors.is_empty() {
        let error_messages = errors
            .iter()
            .map(|e| format!("  - {}", e))
            .collect::<Vec<_>>()
            .join("\n");
        return Err(ConfigError::ValidationError(format!(
            "Configuration validation failed:\n{}",
            error_messages
        )));
    }
    Ok(())
}

fn validate_family(section: &str, family: &ScanFamilyConfig, errors: &mut Vec<ConfigValidationError>) {
    if family.profiles.is_empty() {
        errors.push(ConfigValidationError::NoProfiles {
            section: section.to_string(),
        });
    } else if family.selected_profile >= family.profiles.len() {
        errors.push(ConfigValidationError::ProfileOutOfRange {
            section: section.to_string(),
            selected: family.selected_profile,
            available: family.profiles.len(),
        });
    }

    for (index, profile) in family.profiles.iter().enumerate() {
        for intensity in ScanIntensity::LEVELS {
            if let Some(params) = profile.entry(intensity) {
                let entry = format!("{}.profiles[{}].{}", section, index, intensity);
                validate_entry(&entry, params, errors);
            }
        }
    }
}

/// A fully zeroed entry marks an unused level and is accepted
fn validate_entry(entry: &str, params: &ScanParameters, errors: &mut Vec<ConfigValidationError>) {
    if params.interval == 0 && params.window == 0 {
        return;
    }
    if !(MIN_INTERVAL..=MAX_SLOTS).contains(&params.interval) {
        errors.push(ConfigValidationError::IntervalOutOfRange {
            entry: entry.to_string(),
            interval: params.interval,
        });
    }
    if !(MIN_WINDOW..=MAX_SLOTS).contains(&params.window) {
        errors.push(ConfigValidationError::WindowOutOfRange {
            entry: entry.to_string(),
            window: params.window,
        });
    }
    if params.window > params.interval {
        errors.push(ConfigValidationError::WindowExceedsInterval {
            entry: entry.to_string(),
            window: params.window,
            interval: params.interval,
        });
    }
}

fn validate_logging(config: &ScanConfig, errors: &mut Vec<ConfigValidationError>) {
    let valid_levels = ["trace", "debug", "info", "warn", "error", "off"];
    if !valid_levels.contains(&config.logging.level.to_lowercase().as_str()) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "logging.level".to_string(),
            reason: format!("must be one of {}", valid_levels.join(", ")),
        });
    }
}
