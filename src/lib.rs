//! # bredr - classic Bluetooth scan arbitration
//!
//! Several independent features of a BR/EDR device (connection manager,
//! pairing, peer handover, discoverability) each want page or inquiry
//! scanning at their own intensity. This crate reconciles those wishes into
//! one radio configuration and drives the radio towards it one confirmed
//! request at a time.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! bredr = "0.1"  # Default: config + observability + recording platform
//! ```
//!
//! ## Feature Flags
//!
//! - **`config`** (default): TOML parameter tables (`bredr_scan.toml`)
//! - **`observability`** (default): logging initialisation, `--debug-<crate>` flags
//! - **`recording`** (default): in-memory radio and bandwidth coordinator
//! - **`file-logging`**: JSON log file per run
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use bredr::prelude::*;
//!
//! let mut manager = ScanManager::new(RecordingRadio::new(), RecordingCoordinator::new())?;
//! bredr::config::load_config(None)?.apply(&mut manager)?;
//!
//! let client: Arc<dyn ScanClient> = Arc::new(|event: ScanEvent| println!("{:?}", event));
//! manager.page_scan_request(ClientId(1), client, ScanIntensity::Slow)?;
//!
//! // later, from the radio's event context
//! manager.handle_radio_event(RadioEvent::scan_enable_success())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Infrastructure: bredr-config, bredr-observability      │
//! │  (parameter tables, logging)                            │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Core: bredr-scan-manager                               │
//! │  (goals, arbitration, transition sequencer)             │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Platform: bredr-hal                                    │
//! │  (ScanRadio, BandwidthCoordinator, recording platform)  │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## License
//!
//! Apache-2.0

// Re-export foundation
pub use bredr_hal as hal;
pub use bredr_scan_manager as scan;

// Re-export infrastructure
#[cfg(feature = "config")]
pub use bredr_config as config;

#[cfg(feature = "observability")]
pub use bredr_observability as observability;

/// Prelude - commonly used types and traits
pub mod prelude {
    pub use crate::hal::{
        BandwidthCoordinator, BandwidthFeature, BandwidthPriority, HciStatus, PageScanType,
        ScanCategory, ScanRadio,
    };
    pub use crate::scan::{
        ClientId, RadioEvent, ScanClient, ScanDisableObserver, ScanError, ScanEvent,
        ScanEventKind, ScanIntensity, ScanManager, ScanParameterTable, ScanParameters,
        ScanProfile, ScanResult, ScanState,
    };

    #[cfg(feature = "recording")]
    pub use crate::hal::platforms::{RadioRequest, RecordingCoordinator, RecordingRadio};

    #[cfg(feature = "config")]
    pub use crate::config::{load_config, ScanConfig};

    #[cfg(feature = "observability")]
    pub use crate::observability::{init_logging, parse_debug_flags, CrateDebugFlags, LoggingConfig};
}
