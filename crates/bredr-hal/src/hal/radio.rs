// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Classic radio scan control
//!
//! This module defines the contract the scan manager needs from the link
//! controller layer. All requests are non-blocking: enable/disable requests
//! complete later with a confirmation event that the platform routes back to
//! the scan manager, parameter writes are fire-and-forget.
//!
//! ## Confirmation contract
//!
//! Confirmations do NOT say which request they answer. The controller
//! accepts one scan configuration change at a time, and callers are expected
//! to keep at most one confirmed request outstanding.

use super::types::{PageScanType, ScanCategory};

/// Radio provider trait for page/inquiry scan control
///
/// ## Thread Safety
///
/// Implementations do NOT need to be `Send` or `Sync` - the scan manager
/// runs inside a single cooperative event context.
pub trait ScanRadio {
    /// Platform-specific error type
    type Error: core::fmt::Debug;

    /// Write the combined page/inquiry scan enable
    ///
    /// Completes with a combined scan enable confirmation.
    fn write_scan_enable(&mut self, page: bool, inquiry: bool) -> Result<(), Self::Error>;

    /// Enable or disable truncated page scan
    ///
    /// Completes with a dedicated truncated scan enable confirmation.
    fn write_truncated_scan_enable(&mut self, enable: bool) -> Result<(), Self::Error>;

    /// Write scan interval/window (and scan type for the page family)
    ///
    /// Inquiry scan only takes interval and window, `scan_type` is `None`.
    /// No confirmation is expected.
    fn write_scan_activity(
        &mut self,
        category: ScanCategory,
        interval: u16,
        window: u16,
        scan_type: Option<PageScanType>,
    ) -> Result<(), Self::Error>;

    /// Write the default scan type of a category
    fn write_scan_type(
        &mut self,
        category: ScanCategory,
        scan_type: PageScanType,
    ) -> Result<(), Self::Error>;
}
