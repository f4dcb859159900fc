// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Recording platform
//!
//! In-memory [`ScanRadio`] and [`BandwidthCoordinator`] implementations that
//! log every request in issue order. Nothing is sent anywhere; the owner of
//! the radio decides when (and with which status) confirmations are fed back
//! to the scan manager. Used by the `scan_sim` tool and by tests.

use thiserror::Error;
use tracing::{debug, warn};

use crate::hal::{
    BandwidthCoordinator, BandwidthFeature, BandwidthPriority, PageScanType, ScanCategory,
    ScanRadio,
};

/// A request issued to the recording radio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadioRequest {
    ScanEnable { page: bool, inquiry: bool },
    TruncatedScanEnable(bool),
    ScanActivity {
        category: ScanCategory,
        interval: u16,
        window: u16,
        scan_type: Option<PageScanType>,
    },
    ScanType {
        category: ScanCategory,
        scan_type: PageScanType,
    },
}

impl RadioRequest {
    /// True for requests answered by a confirmation
    pub fn expects_confirmation(&self) -> bool {
        matches!(
            self,
            RadioRequest::ScanEnable { .. } | RadioRequest::TruncatedScanEnable(_)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordingRadioError {
    #[error("Request rejected by recording radio: {0:?}")]
    Rejected(RadioRequest),
}

/// Radio that records requests instead of sending them
#[derive(Debug, Default)]
pub struct RecordingRadio {
    requests: Vec<RadioRequest>,
    reject_next: bool,
}

impl RecordingRadio {
    pub fn new() -> Self {
        Self::default()
    }

    /// All requests issued so far, oldest first
    pub fn requests(&self) -> &[RadioRequest] {
        &self.requests
    }

    /// Drain the request log
    pub fn take_requests(&mut self) -> Vec<RadioRequest> {
        std::mem::take(&mut self.requests)
    }

    /// Requests that will be answered by a confirmation
    pub fn confirmed_requests(&self) -> impl Iterator<Item = &RadioRequest> {
        self.requests.iter().filter(|r| r.expects_confirmation())
    }

    /// Most recent request answered by a confirmation
    pub fn last_confirmed_request(&self) -> Option<RadioRequest> {
        self.requests
            .iter()
            .rev()
            .find(|r| r.expects_confirmation())
            .copied()
    }

    /// Reject the next request with [`RecordingRadioError::Rejected`]
    pub fn reject_next_request(&mut self) {
        self.reject_next = true;
    }

    fn record(&mut self, request: RadioRequest) -> Result<(), RecordingRadioError> {
        if std::mem::take(&mut self.reject_next) {
            warn!(target: "bredr-hal", "Recording radio rejecting {:?}", request);
            return Err(RecordingRadioError::Rejected(request));
        }
        debug!(target: "bredr-hal", "Recording radio request {:?}", request);
        self.requests.push(request);
        Ok(())
    }
}

impl ScanRadio for RecordingRadio {
    type Error = RecordingRadioError;

    fn write_scan_enable(&mut self, page: bool, inquiry: bool) -> Result<(), Self::Error> {
        self.record(RadioRequest::ScanEnable { page, inquiry })
    }

    fn write_truncated_scan_enable(&mut self, enable: bool) -> Result<(), Self::Error> {
        self.record(RadioRequest::TruncatedScanEnable(enable))
    }

    fn write_scan_activity(
        &mut self,
        category: ScanCategory,
        interval: u16,
        window: u16,
        scan_type: Option<PageScanType>,
    ) -> Result<(), Self::Error> {
        self.record(RadioRequest::ScanActivity {
            category,
            interval,
            window,
            scan_type,
        })
    }

    fn write_scan_type(
        &mut self,
        category: ScanCategory,
        scan_type: PageScanType,
    ) -> Result<(), Self::Error> {
        self.record(RadioRequest::ScanType {
            category,
            scan_type,
        })
    }
}

/// Coordinator notification recorded by [`RecordingCoordinator`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinatorEvent {
    Started(BandwidthFeature),
    Stopped(BandwidthFeature),
}

/// Bandwidth coordinator that records registrations and start/stop reports
#[derive(Debug)]
pub struct RecordingCoordinator {
    registrations: Vec<(BandwidthFeature, BandwidthPriority)>,
    events: Vec<CoordinatorEvent>,
    accept_registrations: bool,
}

impl RecordingCoordinator {
    pub fn new() -> Self {
        Self {
            registrations: Vec::new(),
            events: Vec::new(),
            accept_registrations: true,
        }
    }

    /// Coordinator that refuses every registration
    pub fn refusing() -> Self {
        Self {
            accept_registrations: false,
            ..Self::new()
        }
    }

    pub fn registrations(&self) -> &[(BandwidthFeature, BandwidthPriority)] {
        &self.registrations
    }

    pub fn events(&self) -> &[CoordinatorEvent] {
        &self.events
    }

    /// Whether the feature's last report was a start
    pub fn is_active(&self, feature: BandwidthFeature) -> bool {
        self.events
            .iter()
            .rev()
            .find_map(|event| match event {
                CoordinatorEvent::Started(f) if *f == feature => Some(true),
                CoordinatorEvent::Stopped(f) if *f == feature => Some(false),
                _ => None,
            })
            .unwrap_or(false)
    }
}

impl Default for RecordingCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl BandwidthCoordinator for RecordingCoordinator {
    fn register_feature(&mut self, feature: BandwidthFeature, priority: BandwidthPriority) -> bool {
        if !self.accept_registrations {
            return false;
        }
        self.registrations.push((feature, priority));
        true
    }

    fn feature_started(&mut self, feature: BandwidthFeature) {
        self.events.push(CoordinatorEvent::Started(feature));
    }

    fn feature_stopped(&mut self, feature: BandwidthFeature) {
        self.events.push(CoordinatorEvent::Stopped(feature));
    }
}
