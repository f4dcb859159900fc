// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Logging initialization
//!
//! Console output always; with the `file-logging` feature and a configured
//! `file_path`, a combined JSON log is also written to a timestamped folder:
//!
//! ```text
//! <file_path>/
//!   └── run_20250101_120000/
//!       └── bredr.log
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

use crate::cli::CrateDebugFlags;
use crate::config::{LogFormat, LoggingConfig};

/// Keeps file writers alive; logs are flushed when it is dropped
pub struct LoggingGuard {
    #[cfg(feature = "file-logging")]
    _file_guards: Vec<tracing_appender::non_blocking::WorkerGuard>,
    log_dir: Option<PathBuf>,
}

impl LoggingGuard {
    /// Run folder receiving file logs, if file logging is active
    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref()
    }
}

/// Name of the run folder for a run started at `started`
pub fn run_folder_name(started: DateTime<Utc>) -> String {
    format!("run_{}", started.format("%Y%m%d_%H%M%S"))
}

/// Create `<base>/run_<timestamp>` and return its path
pub fn create_run_folder(base: &Path) -> Result<PathBuf> {
    let run_folder = base.join(run_folder_name(Utc::now()));
    std::fs::create_dir_all(&run_folder)
        .with_context(|| format!("Failed to create log directory: {}", run_folder.display()))?;
    Ok(run_folder)
}

fn build_filter(directives: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directives).with_context(|| format!("Invalid log filter: {}", directives))
}

/// Install the global `tracing` subscriber
///
/// Fails if a global subscriber is already set.
pub fn init_logging(debug_flags: &CrateDebugFlags, config: &LoggingConfig) -> Result<LoggingGuard> {
    let directives = debug_flags.to_filter_string(&config.level);

    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();
    let console_layer: Box<dyn Layer<Registry> + Send + Sync> = match config.format {
        LogFormat::Text => fmt::layer()
            .with_target(true)
            .with_filter(build_filter(&directives)?)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_target(true)
            .with_filter(build_filter(&directives)?)
            .boxed(),
    };
    layers.push(console_layer);

    #[cfg(feature = "file-logging")]
    let mut file_guards = Vec::new();
    #[cfg(feature = "file-logging")]
    let log_dir = match &config.file_path {
        Some(base) => {
            let run_folder = create_run_folder(base)?;
            let appender = tracing_appender::rolling::never(&run_folder, "bredr.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            file_guards.push(guard);
            layers.push(
                fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .json()
                    .with_filter(build_filter(&directives)?)
                    .boxed(),
            );
            Some(run_folder)
        }
        None => None,
    };
    #[cfg(not(feature = "file-logging"))]
    let log_dir: Option<PathBuf> = None;

    Registry::default()
        .with(layers)
        .try_init()
        .context("Global tracing subscriber already installed")?;

    if cfg!(not(feature = "file-logging")) && config.file_path.is_some() {
        tracing::warn!(target: "bredr-observability", "file_path set but file logging is not compiled in, logging to console only");
    }
    tracing::debug!(target: "bredr-observability", "Logging initialised with filter {}", directives);

    Ok(LoggingGuard {
        #[cfg(feature = "file-logging")]
        _file_guards: file_guards,
        log_dir,
    })
}

/// Console logging at `info` with the process debug flags
pub fn init_logging_default(debug_flags: &CrateDebugFlags) -> Result<LoggingGuard> {
    init_logging(debug_flags, &LoggingConfig::default())
}
