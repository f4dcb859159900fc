// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/// Airtime coordinator traits.
pub mod bandwidth;
/// Classic radio scan control traits.
pub mod radio;
/// Vocabulary shared by the radio traits and their users.
pub mod types;

// Re-export trait types
pub use bandwidth::{BandwidthCoordinator, BandwidthFeature, BandwidthPriority};
pub use radio::ScanRadio;
pub use types::{HciStatus, PageScanType, ScanCategory};
