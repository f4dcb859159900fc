// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Client identity and notification interfaces

use core::fmt;

use bredr_hal::ScanCategory;

/// Opaque client handle, unique per feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClientId(pub u32);

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "client#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanEventKind {
    Paused,
    Resumed,
    Throttled,
    Unthrottled,
}

/// Notification delivered to a scan client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScanEvent {
    pub category: ScanCategory,
    pub kind: ScanEventKind,
}

impl ScanEvent {
    pub fn new(category: ScanCategory, kind: ScanEventKind) -> Self {
        Self { category, kind }
    }
}

/// Observer registered with every scan request
///
/// Called synchronously from inside the scan manager; implementations must
/// not call back into it.
pub trait ScanClient {
    fn notify(&self, event: ScanEvent);
}

impl<F> ScanClient for F
where
    F: Fn(ScanEvent),
{
    fn notify(&self, event: ScanEvent) {
        self(event)
    }
}

/// Observer of the global scan disable confirmation
pub trait ScanDisableObserver {
    /// `disabled` is false when scanning was re-enabled before it settled
    fn on_scan_disable_cfm(&self, disabled: bool);
}

impl<F> ScanDisableObserver for F
where
    F: Fn(bool),
{
    fn on_scan_disable_cfm(&self, disabled: bool) {
        self(disabled)
    }
}
