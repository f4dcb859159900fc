// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Scan manager error types.

Every variant is a fault the process-level handler must act on: the scan
manager has no recovery path for any of them. Usage faults (such as
releasing a client that never requested) are logged and swallowed instead
of being reported here.
*/

use bredr_hal::{HciStatus, ScanCategory};
use thiserror::Error;

use crate::client::ClientId;
use crate::params::ScanIntensity;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// More than one instance mid-transition
    #[error("{count} scan transitions in flight, the radio accepts one")]
    MultipleTransitionsInFlight { count: usize },

    /// A second owner tried to take the global disable
    #[error("Scan disable owned by {current}, rejected request from {requested}")]
    ConflictingDisableOwner {
        current: ClientId,
        requested: ClientId,
    },

    /// A confirmation arrived that no instance is waiting for
    #[error("Unexpected {confirmation} confirmation: no scan transition in flight")]
    UnexpectedConfirmation { confirmation: &'static str },

    /// Resolved intensity has no entry with non-zero interval and window
    #[error("No satisfiable {intensity} parameters for {category} scan (profile {profile})")]
    UnsatisfiableParameters {
        category: ScanCategory,
        intensity: ScanIntensity,
        profile: usize,
    },

    /// Radio answered with a failure status
    #[error("Radio failure status {status} on {confirmation} confirmation")]
    HciFailure {
        confirmation: &'static str,
        status: HciStatus,
    },

    #[error("No parameter table registered for {0} scan")]
    ParametersNotRegistered(ScanCategory),

    #[error("Parameter table for {0} scan has no profiles")]
    EmptyParameterTable(ScanCategory),

    #[error("Profile {index} out of range for {category} scan ({available} profiles)")]
    ProfileOutOfRange {
        category: ScanCategory,
        index: usize,
        available: usize,
    },

    /// The radio rejected a request synchronously
    #[error("Radio request failed: {0}")]
    Radio(String),

    #[error("Bandwidth coordinator refused page scan registration")]
    BandwidthRegistration,
}

/// Result type for scan manager operations
pub type ScanResult<T> = Result<T, ScanError>;

pub(crate) fn radio_error<E: core::fmt::Debug>(err: E) -> ScanError {
    ScanError::Radio(format!("{:?}", err))
}
