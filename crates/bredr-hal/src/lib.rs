// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # bredr-hal
//!
//! Hardware Abstraction Layer for classic Bluetooth (BR/EDR) scan control.
//!
//! The scan manager never talks to the link controller directly. Everything
//! it needs from the radio and from the airtime arbiter is expressed by the
//! traits in [`hal`]; platform layers provide the implementations.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ bredr-scan-manager (arbitration engine)      │
//! └─────────────────┬────────────────────────────┘
//!                   │ uses
//! ┌─────────────────▼────────────────────────────┐
//! │ ScanRadio / BandwidthCoordinator (hal)       │
//! └─────────────────┬────────────────────────────┘
//!                   │ implements
//! ┌─────────────────▼────────────────────────────┐
//! │ Platform Implementation                      │
//! │ - RecordingRadio (host simulation, tests)    │
//! │ - vendor connection library bindings         │
//! └──────────────────────────────────────────────┘
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod hal;
pub mod platforms;

pub use hal::{
    BandwidthCoordinator, BandwidthFeature, BandwidthPriority, HciStatus, PageScanType,
    ScanCategory, ScanRadio,
};
