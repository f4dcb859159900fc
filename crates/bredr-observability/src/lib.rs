// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # bredr-observability
//!
//! Logging setup shared by the BR/EDR scan crates and tools.
//!
//! Every crate logs through `tracing` with its crate name as target, so debug
//! output can be switched on per crate with `--debug-<crate>` flags or the
//! `BREDR_DEBUG` environment variable.
//!
//! ## Features
//! - `file-logging`: JSON log file under a timestamped run folder (desktop only)

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod config;
pub mod init;

pub use cli::*;
pub use config::*;
pub use init::*;

/// Crate names accepted by the debug flags (and used as log targets)
pub const KNOWN_CRATES: &[&str] = &[
    "bredr",
    "bredr-hal",
    "bredr-scan-manager",
    "bredr-config",
    "bredr-observability",
];
