// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Cross-instance arbitration
//!
//! Turns the three per-instance goals into the set of scans that should be
//! on. This is the only place that decides exclusivity between categories.

use bredr_hal::ScanCategory;
use tracing::debug;

use crate::params::ScanIntensity;

/// Which scans should be enabled to satisfy the current goals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanTargets {
    pub truncated_page: bool,
    pub page: bool,
    pub inquiry: bool,
}

impl ScanTargets {
    pub fn wants(&self, category: ScanCategory) -> bool {
        match category {
            ScanCategory::TruncatedPage => self.truncated_page,
            ScanCategory::Page => self.page,
            ScanCategory::Inquiry => self.inquiry,
        }
    }
}

/// Derive target on/off states from goals
///
/// Page scan wins the shared page scan context over truncated page scan.
pub fn derive_targets(
    truncated_page_goal: ScanIntensity,
    page_goal: ScanIntensity,
    inquiry_goal: ScanIntensity,
) -> ScanTargets {
    let mut targets = ScanTargets {
        truncated_page: truncated_page_goal.is_active(),
        page: page_goal.is_active(),
        inquiry: inquiry_goal.is_active(),
    };
    if targets.page {
        targets.truncated_page = false;
    }
    debug!(target: "bredr-scan-manager", "Targets for goals: tps:{} ps:{} is:{}", targets.truncated_page, targets.page, targets.inquiry);
    targets
}
