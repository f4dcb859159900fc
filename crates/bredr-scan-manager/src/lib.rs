// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # bredr-scan-manager
//!
//! Arbitration of classic Bluetooth page, inquiry and truncated page scan.
//!
//! Independent features ask for scanning at a coarse intensity
//! (throttle/slow/fast). The manager reconciles those requests into a single
//! radio configuration per category and drives the radio towards it one
//! request at a time.
//!
//! ## Architecture
//!
//! ```text
//! clients ──request/release──┐
//! disable owner ─────────────┤
//! bandwidth coordinator ─────┤
//!                            ▼
//!                ┌─────────────────────┐
//!                │ ScanManager         │  goals: max requested per instance
//!                │  page / inquiry /   │  targets: page beats truncated page
//!                │  truncated page     │  sequencer: one transition in flight
//!                └──────────┬──────────┘
//!                           │ ScanRadio
//!                           ▼
//!                  link controller ──RadioEvent──► handle_radio_event
//! ```
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use bredr_hal::platforms::{RecordingCoordinator, RecordingRadio};
//! use bredr_hal::PageScanType;
//! use bredr_scan_manager::*;
//!
//! let mut manager = ScanManager::new(RecordingRadio::new(), RecordingCoordinator::new()).unwrap();
//! let table = ScanParameterTable::new(vec![ScanProfile {
//!     throttle: ScanParameters::new(0x1000, 0x12, PageScanType::Standard),
//!     slow: ScanParameters::new(0x800, 0x12, PageScanType::Standard),
//!     fast: ScanParameters::new(0x200, 0x12, PageScanType::Interlaced),
//! }]);
//! manager.register_page_scan_parameters(Arc::new(table)).unwrap();
//!
//! let client: Arc<dyn ScanClient> = Arc::new(|event: ScanEvent| println!("{:?}", event));
//! manager.page_scan_request(ClientId(1), client, ScanIntensity::Slow).unwrap();
//! manager.handle_radio_event(RadioEvent::scan_enable_success()).unwrap();
//! assert!(manager.is_page_scan_enabled_for_client(ClientId(1)));
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod client;
pub mod error;
pub mod events;
pub mod goals;
pub mod instance;
pub mod manager;
pub mod params;
pub mod registry;
mod sequencer;

pub use client::{ClientId, ScanClient, ScanDisableObserver, ScanEvent, ScanEventKind};
pub use error::{ScanError, ScanResult};
pub use events::RadioEvent;
pub use goals::{derive_targets, ScanTargets};
pub use instance::{InstanceSnapshot, ScanInstance, ScanState};
pub use manager::ScanManager;
pub use params::{ScanIntensity, ScanParameterTable, ScanParameters, ScanProfile};
pub use registry::ClientRegistry;
