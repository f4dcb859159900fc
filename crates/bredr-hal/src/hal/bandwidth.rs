// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Airtime coordinator interface
//!
//! The coordinator arbitrates shared radio airtime between features. The
//! scan manager registers page scanning as a throttleable feature and reports
//! when it starts and stops using the radio. The coordinator answers with
//! throttle requests, which the composition root forwards to the scan
//! manager.

/// Features known to the coordinator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BandwidthFeature {
    PageScan,
}

/// Coordinator priority of a feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BandwidthPriority {
    Low,
    Medium,
    High,
}

pub trait BandwidthCoordinator {
    /// Register a throttleable feature
    ///
    /// Returns `false` if the coordinator refused the registration.
    fn register_feature(&mut self, feature: BandwidthFeature, priority: BandwidthPriority) -> bool;

    /// The feature started using airtime
    fn feature_started(&mut self, feature: BandwidthFeature);

    /// The feature stopped using airtime
    fn feature_stopped(&mut self, feature: BandwidthFeature);
}
