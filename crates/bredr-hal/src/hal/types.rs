// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Radio vocabulary types

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Classic scan category
///
/// Page and truncated page scan share one page scan context in the
/// controller, so at most one of them can be enabled at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ScanCategory {
    /// Page scan: connectable by address-directed paging
    Page,
    /// Inquiry scan: discoverable by general inquiry
    Inquiry,
    /// Low duty cycle page scan variant
    TruncatedPage,
}

impl ScanCategory {
    /// All categories, in the order the sequencer visits them
    pub const ALL: [ScanCategory; 3] = [
        ScanCategory::TruncatedPage,
        ScanCategory::Page,
        ScanCategory::Inquiry,
    ];

    /// True for the categories backed by the page scan context
    pub fn is_page_family(self) -> bool {
        matches!(self, ScanCategory::Page | ScanCategory::TruncatedPage)
    }

    pub fn name(self) -> &'static str {
        match self {
            ScanCategory::Page => "page",
            ScanCategory::Inquiry => "inquiry",
            ScanCategory::TruncatedPage => "truncated-page",
        }
    }
}

impl fmt::Display for ScanCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// HCI page/inquiry scan type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PageScanType {
    #[default]
    Standard,
    Interlaced,
}

impl PageScanType {
    /// Value written in the HCI Write_Page_Scan_Type command
    pub fn hci_value(self) -> u8 {
        match self {
            PageScanType::Standard => 0x00,
            PageScanType::Interlaced => 0x01,
        }
    }
}

/// HCI status code carried by confirmations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HciStatus(pub u8);

impl HciStatus {
    pub const SUCCESS: HciStatus = HciStatus(0x00);
    pub const COMMAND_DISALLOWED: HciStatus = HciStatus(0x0C);
    pub const UNSPECIFIED_ERROR: HciStatus = HciStatus(0x1F);

    pub fn is_success(self) -> bool {
        self == Self::SUCCESS
    }
}

impl fmt::Display for HciStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02x}", self.0)
    }
}
