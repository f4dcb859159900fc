// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Confirmation events routed back from the radio layer

use bredr_hal::HciStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadioEvent {
    /// Combined page/inquiry scan enable confirmation
    ///
    /// Only final once `outstanding` reaches zero.
    ScanEnableCfm { status: HciStatus, outstanding: u16 },
    /// Truncated page scan enable confirmation
    TruncatedScanEnableCfm { status: HciStatus },
}

impl RadioEvent {
    /// Successful, final combined confirmation
    pub fn scan_enable_success() -> Self {
        RadioEvent::ScanEnableCfm {
            status: HciStatus::SUCCESS,
            outstanding: 0,
        }
    }

    pub fn truncated_scan_enable_success() -> Self {
        RadioEvent::TruncatedScanEnableCfm {
            status: HciStatus::SUCCESS,
        }
    }

    pub fn status(&self) -> HciStatus {
        match self {
            RadioEvent::ScanEnableCfm { status, .. } => *status,
            RadioEvent::TruncatedScanEnableCfm { status } => *status,
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        match self {
            RadioEvent::ScanEnableCfm { .. } => "scan enable",
            RadioEvent::TruncatedScanEnableCfm { .. } => "truncated scan enable",
        }
    }
}
