// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Per-crate debug flags
//!
//! `--debug-bredr-scan-manager` style arguments and the `BREDR_DEBUG`
//! environment variable turn on debug output for individual crates.

use std::collections::BTreeSet;
use std::env;

use crate::KNOWN_CRATES;

/// Environment variable holding comma-separated crate names, or `all`
pub const DEBUG_ENV_VAR: &str = "BREDR_DEBUG";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrateDebugFlags {
    enabled: BTreeSet<String>,
}

impl CrateDebugFlags {
    /// Parse `--debug-<crate>` and `--debug-all` from command-line arguments
    ///
    /// Unrelated arguments are ignored.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut flags = Self::default();
        for arg in args {
            match arg.strip_prefix("--debug-") {
                Some("all") => flags.enable_all(),
                Some(crate_name) if !crate_name.is_empty() => flags.enable(crate_name),
                _ => {}
            }
        }
        flags
    }

    /// Merge the value of [`DEBUG_ENV_VAR`] into the flags
    pub fn merge_env_value(&mut self, value: &str) {
        if value.trim() == "all" {
            self.enable_all();
            return;
        }
        for crate_name in value.split(',').map(str::trim) {
            if !crate_name.is_empty() {
                self.enable(crate_name);
            }
        }
    }

    pub fn enable(&mut self, crate_name: &str) {
        self.enabled.insert(crate_name.to_string());
    }

    pub fn enable_all(&mut self) {
        for crate_name in KNOWN_CRATES {
            self.enable(crate_name);
        }
    }

    pub fn is_enabled(&self, crate_name: &str) -> bool {
        self.enabled.contains(crate_name)
    }

    pub fn enabled_crates(&self) -> impl Iterator<Item = &str> {
        self.enabled.iter().map(String::as_str)
    }

    pub fn any_enabled(&self) -> bool {
        !self.enabled.is_empty()
    }

    /// `DEBUG` for flagged crates, `INFO` otherwise
    pub fn log_level(&self, crate_name: &str) -> tracing::Level {
        if self.is_enabled(crate_name) {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// `EnvFilter` directives: `default_level` plus `<crate>=debug` per flag
    pub fn to_filter_string(&self, default_level: &str) -> String {
        let mut directives = vec![default_level.to_string()];
        directives.extend(self.enabled.iter().map(|c| format!("{}=debug", c)));
        directives.join(",")
    }
}

/// Debug flags from the process arguments and [`DEBUG_ENV_VAR`]
pub fn parse_debug_flags() -> CrateDebugFlags {
    let mut flags = CrateDebugFlags::from_args(env::args());
    if let Ok(value) = env::var(DEBUG_ENV_VAR) {
        flags.merge_env_value(&value);
    }
    flags
}

pub fn debug_flags_help() -> String {
    format!(
        r#"Debug Flags:
  --debug-all                    Enable debug logging for all crates
  --debug-{{crate-name}}          Enable debug logging for one crate

Available crates:
  {}

Environment Variable:
  {var}={{crate-name}}[,{{crate-name}}]
  {var}=all
"#,
        KNOWN_CRATES.join(", "),
        var = DEBUG_ENV_VAR,
    )
}
