// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! End-to-end arbitration scenarios against the recording radio

mod common;

use bredr_hal::platforms::{CoordinatorEvent, RadioRequest};
use bredr_hal::{BandwidthFeature, PageScanType, ScanCategory};
use bredr_scan_manager::{ClientId, ScanEvent, ScanEventKind, ScanIntensity, ScanState};
use common::*;

fn activity(category: ScanCategory, params: bredr_scan_manager::ScanParameters) -> RadioRequest {
    RadioRequest::ScanActivity {
        category,
        interval: params.interval,
        window: params.window,
        scan_type: category.is_page_family().then_some(params.scan_type),
    }
}

#[test]
fn fresh_page_request_enables_with_fast_parameters() {
    let mut manager = manager();
    let client = Recorder::new();

    manager
        .page_scan_request(ClientId(1), client.clone(), ScanIntensity::Fast)
        .unwrap();
    assert_eq!(
        manager.radio_mut().take_requests(),
        vec![
            activity(ScanCategory::Page, FAST),
            RadioRequest::ScanEnable {
                page: true,
                inquiry: false
            },
        ]
    );
    assert_eq!(manager.instance(ScanCategory::Page).state, ScanState::Enabling);
    assert!(!manager.is_page_scan_enabled_for_client(ClientId(1)));

    ack(&mut manager).unwrap();
    assert_eq!(manager.instance(ScanCategory::Page).state, ScanState::Enabled);
    assert!(manager.is_page_scan_enabled_for_client(ClientId(1)));
    assert!(client.events().is_empty());
    assert!(manager.radio().requests().is_empty());
    assert_eq!(
        manager.bandwidth().events(),
        &[CoordinatorEvent::Started(BandwidthFeature::PageScan)]
    );
}

#[test]
fn inquiry_goal_is_highest_request() {
    let mut manager = manager();
    let slow = Recorder::new();
    let fast = Recorder::new();

    manager
        .inquiry_scan_request(ClientId(1), slow.clone(), ScanIntensity::Slow)
        .unwrap();
    manager
        .inquiry_scan_request(ClientId(2), fast.clone(), ScanIntensity::Fast)
        .unwrap();
    assert_eq!(manager.instance(ScanCategory::Inquiry).resolved, ScanIntensity::Fast);
    settle(&mut manager);

    let requests = manager.radio_mut().take_requests();
    let enables: Vec<_> = requests.iter().filter(|r| r.expects_confirmation()).collect();
    assert_eq!(
        enables,
        vec![&RadioRequest::ScanEnable {
            page: false,
            inquiry: true
        }]
    );
    let last_activity = requests
        .iter()
        .rev()
        .find(|r| matches!(r, RadioRequest::ScanActivity { .. }));
    assert_eq!(last_activity, Some(&activity(ScanCategory::Inquiry, FAST)));

    let snapshot = manager.instance(ScanCategory::Inquiry);
    assert_eq!(snapshot.state, ScanState::Enabled);
    assert_eq!(snapshot.active_clients, 2);
    // inquiry scan is not reported to the bandwidth coordinator
    assert!(manager.bandwidth().events().is_empty());
}

#[test]
fn truncated_page_request_paused_while_page_enabled() {
    let mut manager = manager();
    let page_client = Recorder::new();
    let tps_client = Recorder::new();

    manager
        .page_scan_request(ClientId(1), page_client.clone(), ScanIntensity::Fast)
        .unwrap();
    settle(&mut manager);
    manager.radio_mut().take_requests();

    manager
        .truncated_page_scan_request(ClientId(2), tps_client.clone(), ScanIntensity::Slow)
        .unwrap();
    assert_eq!(
        tps_client.take(),
        vec![ScanEvent::new(ScanCategory::TruncatedPage, ScanEventKind::Paused)]
    );
    assert!(manager.radio().requests().is_empty());
    let tps = manager.instance(ScanCategory::TruncatedPage);
    assert_eq!(tps.state, ScanState::Disabled);
    assert_eq!(tps.resolved, ScanIntensity::PendingRelease);
    assert!(tps.paused);

    // page scan goes away: truncated page scan takes over the context
    manager.page_scan_release(ClientId(1)).unwrap();
    settle(&mut manager);
    assert_eq!(
        enable_requests(&mut manager),
        vec![
            RadioRequest::ScanEnable {
                page: false,
                inquiry: false
            },
            RadioRequest::TruncatedScanEnable(true),
        ]
    );
    assert_eq!(
        manager.instance(ScanCategory::TruncatedPage).state,
        ScanState::Enabled
    );
    assert_eq!(
        tps_client.take(),
        vec![ScanEvent::new(ScanCategory::TruncatedPage, ScanEventKind::Resumed)]
    );
    assert!(page_client.events().is_empty());

    let page = manager.instance(ScanCategory::Page);
    assert_eq!(page.clients, 0);
    assert_eq!(page.state, ScanState::Disabled);
}

#[test]
fn page_request_preempts_enabled_truncated_page() {
    let mut manager = manager();
    let tps_client = Recorder::new();
    let page_client = Recorder::new();

    manager
        .truncated_page_scan_request(ClientId(1), tps_client.clone(), ScanIntensity::Slow)
        .unwrap();
    settle(&mut manager);
    assert_eq!(
        manager.radio_mut().take_requests(),
        vec![
            activity(ScanCategory::TruncatedPage, SLOW),
            RadioRequest::TruncatedScanEnable(true),
        ]
    );

    manager
        .page_scan_request(ClientId(2), page_client.clone(), ScanIntensity::Fast)
        .unwrap();
    assert_eq!(
        manager.instance(ScanCategory::TruncatedPage).state,
        ScanState::Disabling
    );
    assert_eq!(manager.instance(ScanCategory::Page).state, ScanState::Disabled);

    settle(&mut manager);
    assert_eq!(
        manager.radio_mut().take_requests(),
        vec![
            RadioRequest::TruncatedScanEnable(false),
            activity(ScanCategory::Page, FAST),
            RadioRequest::ScanEnable {
                page: true,
                inquiry: false
            },
        ]
    );
    assert_eq!(
        tps_client.take(),
        vec![ScanEvent::new(ScanCategory::TruncatedPage, ScanEventKind::Paused)]
    );
    assert_eq!(
        manager.bandwidth().events(),
        &[
            CoordinatorEvent::Started(BandwidthFeature::PageScan),
            CoordinatorEvent::Stopped(BandwidthFeature::PageScan),
            CoordinatorEvent::Started(BandwidthFeature::PageScan),
        ]
    );

    manager.page_scan_release(ClientId(2)).unwrap();
    settle(&mut manager);
    assert_eq!(
        manager.instance(ScanCategory::TruncatedPage).state,
        ScanState::Enabled
    );
    assert_eq!(
        tps_client.take(),
        vec![ScanEvent::new(ScanCategory::TruncatedPage, ScanEventKind::Resumed)]
    );
}

fn page_and_inquiry_enabled() -> (TestManager, std::sync::Arc<Recorder>, std::sync::Arc<Recorder>) {
    let mut manager = manager();
    let page_client = Recorder::new();
    let inquiry_client = Recorder::new();
    manager
        .page_scan_request(ClientId(1), page_client.clone(), ScanIntensity::Fast)
        .unwrap();
    manager
        .inquiry_scan_request(ClientId(2), inquiry_client.clone(), ScanIntensity::Slow)
        .unwrap();
    settle(&mut manager);
    manager.radio_mut().take_requests();
    (manager, page_client, inquiry_client)
}

#[test]
fn global_disable_settles_then_confirms_once() {
    let (mut manager, page_client, inquiry_client) = page_and_inquiry_enabled();
    let owner = DisableRecorder::new();

    manager.scan_disable(ClientId(100), owner.clone()).unwrap();
    assert_eq!(manager.disable_owner(), Some(ClientId(100)));
    for category in ScanCategory::ALL {
        assert_eq!(manager.instance(category).resolved, ScanIntensity::PendingRelease);
    }
    assert_eq!(manager.transitions_in_flight(), 1);
    assert!(owner.confirmations().is_empty());

    ack(&mut manager).unwrap();
    assert_eq!(manager.transitions_in_flight(), 1);
    assert!(owner.confirmations().is_empty());

    ack(&mut manager).unwrap();
    assert!(manager.is_scan_disabled());
    assert_eq!(owner.confirmations(), vec![true]);
    assert_eq!(
        enable_requests(&mut manager),
        vec![
            RadioRequest::ScanEnable {
                page: false,
                inquiry: true
            },
            RadioRequest::ScanEnable {
                page: false,
                inquiry: false
            },
        ]
    );
    assert_eq!(
        page_client.take(),
        vec![ScanEvent::new(ScanCategory::Page, ScanEventKind::Paused)]
    );
    assert_eq!(
        inquiry_client.take(),
        vec![ScanEvent::new(ScanCategory::Inquiry, ScanEventKind::Paused)]
    );

    // lifting a settled disable sends no further confirmation
    manager.scan_enable().unwrap();
    settle(&mut manager);
    assert_eq!(owner.confirmations(), vec![true]);
    assert_eq!(manager.disable_owner(), None);
    assert_eq!(manager.instance(ScanCategory::Page).state, ScanState::Enabled);
    assert_eq!(manager.instance(ScanCategory::Inquiry).state, ScanState::Enabled);
    assert_eq!(
        page_client.take(),
        vec![ScanEvent::new(ScanCategory::Page, ScanEventKind::Resumed)]
    );
    assert_eq!(
        inquiry_client.take(),
        vec![ScanEvent::new(ScanCategory::Inquiry, ScanEventKind::Resumed)]
    );
}

#[test]
fn enable_before_disable_settles_reports_not_disabled() {
    let (mut manager, page_client, _inquiry_client) = page_and_inquiry_enabled();
    let owner = DisableRecorder::new();

    manager.scan_disable(ClientId(100), owner.clone()).unwrap();
    assert_eq!(manager.instance(ScanCategory::Page).state, ScanState::Disabling);

    manager.scan_enable().unwrap();
    assert_eq!(owner.confirmations(), vec![false]);
    assert_eq!(manager.instance(ScanCategory::Page).resolved, ScanIntensity::Fast);
    assert_eq!(manager.instance(ScanCategory::Inquiry).resolved, ScanIntensity::Slow);

    settle(&mut manager);
    assert_eq!(owner.confirmations(), vec![false]);
    assert_eq!(
        enable_requests(&mut manager),
        vec![
            RadioRequest::ScanEnable {
                page: false,
                inquiry: true
            },
            RadioRequest::ScanEnable {
                page: true,
                inquiry: true
            },
        ]
    );
    assert_eq!(manager.instance(ScanCategory::Page).state, ScanState::Enabled);
    assert_eq!(
        page_client.take(),
        vec![
            ScanEvent::new(ScanCategory::Page, ScanEventKind::Paused),
            ScanEvent::new(ScanCategory::Page, ScanEventKind::Resumed),
        ]
    );
}

#[test]
fn disable_when_already_disabled_confirms_immediately() {
    let mut manager = manager();
    let owner = DisableRecorder::new();

    manager.scan_disable(ClientId(100), owner.clone()).unwrap();
    assert_eq!(owner.confirmations(), vec![true]);
    assert!(manager.radio().requests().is_empty());
}

#[test]
fn client_added_during_disable_is_paused_then_resumed() {
    let mut manager = manager();
    let owner = DisableRecorder::new();
    let client = Recorder::new();

    manager.scan_disable(ClientId(100), owner.clone()).unwrap();
    manager
        .page_scan_request(ClientId(1), client.clone(), ScanIntensity::Slow)
        .unwrap();
    assert_eq!(
        client.take(),
        vec![ScanEvent::new(ScanCategory::Page, ScanEventKind::Paused)]
    );
    assert!(manager.radio().requests().is_empty());

    manager.scan_enable().unwrap();
    settle(&mut manager);
    assert_eq!(
        client.take(),
        vec![ScanEvent::new(ScanCategory::Page, ScanEventKind::Resumed)]
    );
    assert_eq!(owner.confirmations(), vec![true]);
}

#[test]
fn conflicting_disable_owner_is_rejected() {
    let mut manager = manager();
    manager
        .scan_disable(ClientId(100), DisableRecorder::new())
        .unwrap();

    let result = manager.scan_disable(ClientId(200), DisableRecorder::new());
    assert_eq!(
        result,
        Err(bredr_scan_manager::ScanError::ConflictingDisableOwner {
            current: ClientId(100),
            requested: ClientId(200),
        })
    );
    assert_eq!(manager.disable_owner(), Some(ClientId(100)));
}

#[test]
fn repeated_request_is_idempotent() {
    let mut manager = manager();
    let client = Recorder::new();

    manager
        .page_scan_request(ClientId(1), client.clone(), ScanIntensity::Slow)
        .unwrap();
    settle(&mut manager);
    manager.radio_mut().take_requests();

    manager
        .page_scan_request(ClientId(1), client.clone(), ScanIntensity::Slow)
        .unwrap();
    assert!(manager.radio().requests().is_empty());
    assert_eq!(manager.instance(ScanCategory::Page).clients, 1);
    assert!(client.events().is_empty());
}

#[test]
fn release_mid_transition_is_swept_after_settling() {
    let mut manager = manager();
    let client = Recorder::new();

    manager
        .page_scan_request(ClientId(1), client.clone(), ScanIntensity::Fast)
        .unwrap();
    manager.page_scan_release(ClientId(1)).unwrap();

    let snapshot = manager.instance(ScanCategory::Page);
    assert_eq!(snapshot.state, ScanState::Enabling);
    assert_eq!(snapshot.clients, 1);
    assert_eq!(snapshot.active_clients, 0);
    assert!(snapshot.needs_cleanup);

    settle(&mut manager);
    let snapshot = manager.instance(ScanCategory::Page);
    assert_eq!(snapshot.state, ScanState::Disabled);
    assert_eq!(snapshot.clients, 0);
    assert!(!snapshot.needs_cleanup);
    assert!(client.events().is_empty());
    assert_eq!(
        enable_requests(&mut manager),
        vec![
            RadioRequest::ScanEnable {
                page: true,
                inquiry: false
            },
            RadioRequest::ScanEnable {
                page: false,
                inquiry: false
            },
        ]
    );
}

#[test]
fn release_of_one_client_keeps_scan_for_the_other() {
    let mut manager = manager();
    let first = Recorder::new();
    let second = Recorder::new();

    manager
        .page_scan_request(ClientId(1), first.clone(), ScanIntensity::Fast)
        .unwrap();
    manager
        .page_scan_request(ClientId(2), second.clone(), ScanIntensity::Slow)
        .unwrap();
    settle(&mut manager);
    manager.radio_mut().take_requests();

    manager.page_scan_release(ClientId(1)).unwrap();
    assert_eq!(
        manager.radio_mut().take_requests(),
        vec![activity(ScanCategory::Page, SLOW)]
    );
    let snapshot = manager.instance(ScanCategory::Page);
    assert_eq!(snapshot.state, ScanState::Enabled);
    assert_eq!(snapshot.resolved, ScanIntensity::Slow);
    assert_eq!(snapshot.clients, 1);
    assert!(!manager.is_page_scan_enabled_for_client(ClientId(1)));
    assert!(manager.is_page_scan_enabled_for_client(ClientId(2)));
}

#[test]
fn release_without_request_is_ignored() {
    let mut manager = manager();
    manager.inquiry_scan_release(ClientId(9)).unwrap();
    assert!(manager.radio().requests().is_empty());
    assert!(!manager.instance(ScanCategory::Inquiry).needs_cleanup);
}

#[test]
fn pending_release_request_acts_as_release() {
    let mut manager = manager();
    let client = Recorder::new();

    manager
        .inquiry_scan_request(ClientId(1), client.clone(), ScanIntensity::Slow)
        .unwrap();
    settle(&mut manager);
    manager
        .inquiry_scan_request(ClientId(1), client.clone(), ScanIntensity::PendingRelease)
        .unwrap();
    settle(&mut manager);

    let snapshot = manager.instance(ScanCategory::Inquiry);
    assert_eq!(snapshot.state, ScanState::Disabled);
    assert_eq!(snapshot.clients, 0);
}

#[test]
fn throttle_clamps_and_notifies() {
    let mut manager = manager();
    let client = Recorder::new();

    manager
        .page_scan_request(ClientId(1), client.clone(), ScanIntensity::Fast)
        .unwrap();
    settle(&mut manager);
    manager.radio_mut().take_requests();

    manager.on_throttle_changed(true).unwrap();
    assert!(manager.is_throttle_requested());
    let snapshot = manager.instance(ScanCategory::Page);
    assert_eq!(snapshot.resolved, ScanIntensity::Throttle);
    assert!(snapshot.throttled);
    assert_eq!(
        client.take(),
        vec![ScanEvent::new(ScanCategory::Page, ScanEventKind::Throttled)]
    );

    manager.on_throttle_changed(false).unwrap();
    assert_eq!(
        client.take(),
        vec![ScanEvent::new(ScanCategory::Page, ScanEventKind::Unthrottled)]
    );
    assert_eq!(
        manager.radio_mut().take_requests(),
        vec![
            activity(ScanCategory::Page, THROTTLE),
            activity(ScanCategory::Page, FAST),
        ]
    );
    assert_eq!(manager.instance(ScanCategory::Page).state, ScanState::Enabled);
}

#[test]
fn throttle_without_throttle_entry_changes_nothing() {
    let mut manager = TestManager::new(
        bredr_hal::platforms::RecordingRadio::new(),
        bredr_hal::platforms::RecordingCoordinator::new(),
    )
    .unwrap();
    manager
        .register_inquiry_scan_parameters(table_without_throttle())
        .unwrap();
    let client = Recorder::new();
    manager
        .inquiry_scan_request(ClientId(1), client.clone(), ScanIntensity::Slow)
        .unwrap();
    settle(&mut manager);
    manager.radio_mut().take_requests();

    manager.on_throttle_changed(true).unwrap();
    assert_eq!(manager.instance(ScanCategory::Inquiry).resolved, ScanIntensity::Slow);
    assert!(client.events().is_empty());
    assert!(manager.radio().requests().is_empty());
}

#[test]
fn throttle_without_clients_issues_nothing() {
    let mut manager = manager();
    manager.on_throttle_changed(true).unwrap();
    assert!(manager.radio().requests().is_empty());
    assert!(manager.is_scan_disabled());
}

#[test]
fn selecting_profile_updates_live_scan() {
    let mut manager = manager();
    let client = Recorder::new();

    manager
        .page_scan_request(ClientId(1), client.clone(), ScanIntensity::Fast)
        .unwrap();
    settle(&mut manager);
    manager.radio_mut().take_requests();

    manager.select_page_scan_profile(1).unwrap();
    assert_eq!(
        manager.radio_mut().take_requests(),
        vec![activity(ScanCategory::Page, ALT_FAST)]
    );
    assert_eq!(manager.instance(ScanCategory::Page).selected_profile, 1);
    assert_eq!(manager.instance(ScanCategory::TruncatedPage).selected_profile, 1);

    assert!(matches!(
        manager.select_inquiry_scan_profile(2),
        Err(bredr_scan_manager::ScanError::ProfileOutOfRange { index: 2, available: 2, .. })
    ));
}

#[test]
fn selecting_profile_without_throttle_entry_unthrottles() {
    use bredr_hal::platforms::{RecordingCoordinator, RecordingRadio};
    use bredr_scan_manager::{ScanParameterTable, ScanParameters, ScanProfile};
    use std::sync::Arc;

    let table = Arc::new(ScanParameterTable::new(vec![
        ScanProfile {
            throttle: THROTTLE,
            slow: SLOW,
            fast: FAST,
        },
        ScanProfile {
            throttle: ScanParameters::default(),
            slow: SLOW,
            fast: FAST,
        },
    ]));
    let mut manager = TestManager::new(RecordingRadio::new(), RecordingCoordinator::new()).unwrap();
    manager.register_page_scan_parameters(table).unwrap();

    let client = Recorder::new();
    manager
        .page_scan_request(ClientId(1), client.clone(), ScanIntensity::Fast)
        .unwrap();
    settle(&mut manager);
    manager.on_throttle_changed(true).unwrap();
    assert_eq!(manager.instance(ScanCategory::Page).resolved, ScanIntensity::Throttle);
    manager.radio_mut().take_requests();
    client.take();

    manager.select_page_scan_profile(1).unwrap();
    assert_eq!(manager.instance(ScanCategory::Page).resolved, ScanIntensity::Fast);
    assert_eq!(
        manager.radio_mut().take_requests(),
        vec![activity(ScanCategory::Page, FAST)]
    );
    assert_eq!(
        client.take(),
        vec![ScanEvent::new(ScanCategory::Page, ScanEventKind::Unthrottled)]
    );
}

#[test]
fn init_configures_radio_and_coordinator() {
    let manager = TestManager::new(
        bredr_hal::platforms::RecordingRadio::new(),
        bredr_hal::platforms::RecordingCoordinator::new(),
    )
    .unwrap();
    assert_eq!(
        manager.radio().requests(),
        &[
            RadioRequest::ScanType {
                category: ScanCategory::Page,
                scan_type: PageScanType::Interlaced
            },
            RadioRequest::ScanType {
                category: ScanCategory::Inquiry,
                scan_type: PageScanType::Interlaced
            },
        ]
    );
    assert_eq!(
        manager.bandwidth().registrations(),
        &[(BandwidthFeature::PageScan, bredr_hal::BandwidthPriority::Low)]
    );
    assert!(manager.is_scan_disabled());
}
