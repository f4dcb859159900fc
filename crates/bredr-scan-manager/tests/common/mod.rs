// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Shared fixtures for scan manager integration tests

#![allow(dead_code)]

use std::sync::Arc;

use bredr_hal::platforms::{RadioRequest, RecordingCoordinator, RecordingRadio};
use bredr_hal::{HciStatus, PageScanType, ScanCategory};
use bredr_scan_manager::{
    RadioEvent, ScanClient, ScanDisableObserver, ScanEvent, ScanManager, ScanParameterTable,
    ScanParameters, ScanProfile, ScanResult,
};
use parking_lot::Mutex;

pub type TestManager = ScanManager<RecordingRadio, RecordingCoordinator>;

pub const THROTTLE: ScanParameters = ScanParameters::new(0x1000, 0x12, PageScanType::Standard);
pub const SLOW: ScanParameters = ScanParameters::new(0x800, 0x12, PageScanType::Standard);
pub const FAST: ScanParameters = ScanParameters::new(0x200, 0x12, PageScanType::Interlaced);
pub const ALT_FAST: ScanParameters = ScanParameters::new(0x100, 0x24, PageScanType::Interlaced);

/// Two profiles: the default one and one with a faster "fast" entry
pub fn table() -> Arc<ScanParameterTable> {
    Arc::new(ScanParameterTable::new(vec![
        ScanProfile {
            throttle: THROTTLE,
            slow: SLOW,
            fast: FAST,
        },
        ScanProfile {
            throttle: THROTTLE,
            slow: SLOW,
            fast: ALT_FAST,
        },
    ]))
}

/// Same levels, but no throttle entry
pub fn table_without_throttle() -> Arc<ScanParameterTable> {
    Arc::new(ScanParameterTable::new(vec![ScanProfile {
        throttle: ScanParameters::default(),
        slow: SLOW,
        fast: FAST,
    }]))
}

/// Manager with both tables registered and the init requests drained
pub fn manager() -> TestManager {
    let mut manager =
        ScanManager::new(RecordingRadio::new(), RecordingCoordinator::new()).expect("init");
    manager
        .register_page_scan_parameters(table())
        .expect("page table");
    manager
        .register_inquiry_scan_parameters(table())
        .expect("inquiry table");
    manager.radio_mut().take_requests();
    manager
}

/// Client that records every notification it receives
#[derive(Default)]
pub struct Recorder {
    events: Mutex<Vec<ScanEvent>>,
}

impl Recorder {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<ScanEvent> {
        self.events.lock().clone()
    }

    pub fn take(&self) -> Vec<ScanEvent> {
        std::mem::take(&mut *self.events.lock())
    }
}

impl ScanClient for Recorder {
    fn notify(&self, event: ScanEvent) {
        self.events.lock().push(event);
    }
}

/// Disable owner that records every confirmation it receives
#[derive(Default)]
pub struct DisableRecorder {
    confirmations: Mutex<Vec<bool>>,
}

impl DisableRecorder {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn confirmations(&self) -> Vec<bool> {
        self.confirmations.lock().clone()
    }
}

impl ScanDisableObserver for DisableRecorder {
    fn on_scan_disable_cfm(&self, disabled: bool) {
        self.confirmations.lock().push(disabled);
    }
}

/// Answer the transition in flight with a success confirmation
pub fn ack(manager: &mut TestManager) -> ScanResult<()> {
    let event = if manager.instance(ScanCategory::TruncatedPage).state.is_transitioning() {
        RadioEvent::truncated_scan_enable_success()
    } else {
        RadioEvent::scan_enable_success()
    };
    manager.handle_radio_event(event)
}

/// Acknowledge transitions until the manager settles
pub fn settle(manager: &mut TestManager) {
    for _ in 0..8 {
        if manager.transitions_in_flight() == 0 {
            return;
        }
        ack(manager).expect("ack");
    }
    panic!("scan manager did not settle");
}

/// Enable requests issued since the log was last drained
pub fn enable_requests(manager: &mut TestManager) -> Vec<RadioRequest> {
    manager
        .radio_mut()
        .take_requests()
        .into_iter()
        .filter(|r| r.expects_confirmation())
        .collect()
}

pub fn failure(status: u8) -> RadioEvent {
    RadioEvent::ScanEnableCfm {
        status: HciStatus(status),
        outstanding: 0,
    }
}
