// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Scan intensities and parameter tables
//!
//! A parameter table is pure data supplied by the application: a list of
//! profiles, each holding one `{interval, window, type}` entry per intensity
//! level. Intervals and windows are in baseband slots (0.625 ms).

use core::fmt;

use bredr_hal::PageScanType;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Requested scan intensity, totally ordered from "no request" upwards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ScanIntensity {
    /// No active request; also marks soft-deleted clients
    #[default]
    PendingRelease,
    /// Forced low-power level used while the bandwidth coordinator throttles
    Throttle,
    Slow,
    Fast,
}

impl ScanIntensity {
    /// Highest ordinary level
    pub const MAX: ScanIntensity = ScanIntensity::Fast;

    /// Levels backed by a parameter table entry
    pub const LEVELS: [ScanIntensity; 3] =
        [ScanIntensity::Throttle, ScanIntensity::Slow, ScanIntensity::Fast];

    /// True for every level other than [`ScanIntensity::PendingRelease`]
    pub fn is_active(self) -> bool {
        self > ScanIntensity::PendingRelease
    }

    pub fn name(self) -> &'static str {
        match self {
            ScanIntensity::PendingRelease => "pending-release",
            ScanIntensity::Throttle => "throttle",
            ScanIntensity::Slow => "slow",
            ScanIntensity::Fast => "fast",
        }
    }
}

impl fmt::Display for ScanIntensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One `{interval, window, type}` entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScanParameters {
    pub interval: u16,
    pub window: u16,
    pub scan_type: PageScanType,
}

impl ScanParameters {
    pub const fn new(interval: u16, window: u16, scan_type: PageScanType) -> Self {
        Self {
            interval,
            window,
            scan_type,
        }
    }

    /// A zero interval or window would program a scan that never listens
    pub fn is_satisfiable(&self) -> bool {
        self.interval != 0 && self.window != 0
    }
}

/// Entries for every level of one profile
///
/// A level left at its default (all zero) is unsatisfiable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScanProfile {
    pub throttle: ScanParameters,
    pub slow: ScanParameters,
    pub fast: ScanParameters,
}

impl ScanProfile {
    pub fn entry(&self, intensity: ScanIntensity) -> Option<&ScanParameters> {
        match intensity {
            ScanIntensity::PendingRelease => None,
            ScanIntensity::Throttle => Some(&self.throttle),
            ScanIntensity::Slow => Some(&self.slow),
            ScanIntensity::Fast => Some(&self.fast),
        }
    }
}

/// Profile-indexed parameter table, immutable once registered
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScanParameterTable {
    pub profiles: Vec<ScanProfile>,
}

impl ScanParameterTable {
    pub fn new(profiles: Vec<ScanProfile>) -> Self {
        Self { profiles }
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn entry(&self, profile: usize, intensity: ScanIntensity) -> Option<&ScanParameters> {
        self.profiles.get(profile)?.entry(intensity)
    }

    /// Entry for `intensity` in `profile`, only if it is satisfiable
    pub fn satisfiable_entry(&self, profile: usize, intensity: ScanIntensity) -> Option<ScanParameters> {
        self.entry(profile, intensity)
            .filter(|params| params.is_satisfiable())
            .copied()
    }
}
