// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! Structs mapping to the sections of `bredr_scan.toml`. Intervals and
//! windows are in baseband slots (0.625 ms).

use std::sync::Arc;

use bredr_hal::{BandwidthCoordinator, PageScanType, ScanRadio};
use bredr_observability::LoggingConfig;
use bredr_scan_manager::{ScanManager, ScanParameterTable, ScanParameters, ScanProfile};
use serde::{Deserialize, Serialize};

use crate::ConfigResult;

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScanConfig {
    pub page_scan: ScanFamilyConfig,
    pub inquiry_scan: ScanFamilyConfig,
    pub logging: LoggingConfig,
}

/// Parameter table and profile selection of one scan family
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ScanFamilyConfig {
    pub selected_profile: usize,
    pub profiles: Vec<ScanProfile>,
}

impl ScanFamilyConfig {
    pub fn table(&self) -> Arc<ScanParameterTable> {
        Arc::new(ScanParameterTable::new(self.profiles.clone()))
    }
}

impl ScanConfig {
    /// Register both tables with the scan manager and select the configured profiles
    ///
    /// The page scan table is shared by page and truncated page scan. Call
    /// this before any client request reaches the manager.
    pub fn apply<R: ScanRadio, B: BandwidthCoordinator>(
        &self,
        manager: &mut ScanManager<R, B>,
    ) -> ConfigResult<()> {
        manager.register_page_scan_parameters(self.page_scan.table())?;
        manager.register_inquiry_scan_parameters(self.inquiry_scan.table())?;
        manager.select_page_scan_profile(self.page_scan.selected_profile)?;
        manager.select_inquiry_scan_profile(self.inquiry_scan.selected_profile)?;
        Ok(())
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            page_scan: default_page_scan(),
            inquiry_scan: default_inquiry_scan(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Connectable profile (0) and low-latency profile (1)
fn default_page_scan() -> ScanFamilyConfig {
    ScanFamilyConfig {
        selected_profile: 0,
        profiles: vec![
            ScanProfile {
                throttle: ScanParameters::new(0x1000, 0x0012, PageScanType::Standard),
                slow: ScanParameters::new(0x0800, 0x0012, PageScanType::Standard),
                fast: ScanParameters::new(0x0400, 0x0024, PageScanType::Interlaced),
            },
            ScanProfile {
                throttle: ScanParameters::new(0x0800, 0x0012, PageScanType::Standard),
                slow: ScanParameters::new(0x0400, 0x0012, PageScanType::Interlaced),
                fast: ScanParameters::new(0x0200, 0x0024, PageScanType::Interlaced),
            },
        ],
    }
}

/// Discoverable profile; inquiry scan has no throttle level
fn default_inquiry_scan() -> ScanFamilyConfig {
    ScanFamilyConfig {
        selected_profile: 0,
        profiles: vec![ScanProfile {
            throttle: ScanParameters::default(),
            slow: ScanParameters::new(0x1000, 0x0012, PageScanType::Standard),
            fast: ScanParameters::new(0x0800, 0x0024, PageScanType::Interlaced),
        }],
    }
}
