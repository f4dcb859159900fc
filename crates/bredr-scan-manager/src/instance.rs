// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Scan instance - one per scan category
//!
//! Owns the transition state, the client registry, the registered parameter
//! table and the resolved goal intensity of its category.

use std::sync::Arc;

use bredr_hal::ScanCategory;
use tracing::debug;

use crate::client::{ClientId, ScanEvent, ScanEventKind};
use crate::error::{ScanError, ScanResult};
use crate::params::{ScanIntensity, ScanParameterTable, ScanParameters};
use crate::registry::ClientRegistry;

/// Transition state of a scan instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScanState {
    #[default]
    Disabled,
    Enabling,
    Disabling,
    Enabled,
}

impl ScanState {
    /// Waiting for a radio confirmation
    pub fn is_transitioning(self) -> bool {
        matches!(self, ScanState::Enabling | ScanState::Disabling)
    }

    /// Scan is on, or being turned on, in the radio
    pub fn is_on(self) -> bool {
        matches!(self, ScanState::Enabling | ScanState::Enabled)
    }
}

/// Read-only view of an instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstanceSnapshot {
    pub category: ScanCategory,
    pub state: ScanState,
    pub resolved: ScanIntensity,
    pub selected_profile: usize,
    pub paused: bool,
    pub throttled: bool,
    pub needs_cleanup: bool,
    /// Tracked clients, including those pending release
    pub clients: usize,
    pub active_clients: usize,
}

pub struct ScanInstance {
    category: ScanCategory,
    pub(crate) state: ScanState,
    pub(crate) clients: ClientRegistry,
    parameter_table: Option<Arc<ScanParameterTable>>,
    selected_profile: usize,
    pub(crate) resolved: ScanIntensity,
    pub(crate) paused: bool,
    pub(crate) throttled: bool,
    pub(crate) needs_cleanup: bool,
}

impl ScanInstance {
    pub fn new(category: ScanCategory) -> Self {
        Self {
            category,
            state: ScanState::Disabled,
            clients: ClientRegistry::new(),
            parameter_table: None,
            selected_profile: 0,
            resolved: ScanIntensity::PendingRelease,
            paused: false,
            throttled: false,
            needs_cleanup: false,
        }
    }

    pub fn category(&self) -> ScanCategory {
        self.category
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn resolved(&self) -> ScanIntensity {
        self.resolved
    }

    pub fn register_parameter_table(&mut self, table: Arc<ScanParameterTable>) -> ScanResult<()> {
        if table.is_empty() {
            return Err(ScanError::EmptyParameterTable(self.category));
        }
        self.parameter_table = Some(table);
        Ok(())
    }

    /// Check that `index` can be selected without stranding the current requests
    pub fn check_profile(&self, index: usize, throttle_requested: bool) -> ScanResult<()> {
        let table = self
            .parameter_table
            .as_ref()
            .ok_or(ScanError::ParametersNotRegistered(self.category))?;
        if index >= table.len() {
            return Err(ScanError::ProfileOutOfRange {
                category: self.category,
                index,
                available: table.len(),
            });
        }
        self.resolve_goal(index, self.clients.max_requested(), throttle_requested)
            .map(|_| ())
    }

    pub fn select_profile(&mut self, index: usize, throttle_requested: bool) -> ScanResult<()> {
        self.check_profile(index, throttle_requested)?;
        self.selected_profile = index;
        Ok(())
    }

    pub fn selected_profile(&self) -> usize {
        self.selected_profile
    }

    /// Satisfiable parameters for `intensity` in the selected profile
    pub fn parameters_for(&self, intensity: ScanIntensity) -> Option<ScanParameters> {
        self.parameters_in(self.selected_profile, intensity)
    }

    fn parameters_in(&self, profile: usize, intensity: ScanIntensity) -> Option<ScanParameters> {
        self.parameter_table
            .as_ref()?
            .satisfiable_entry(profile, intensity)
    }

    /// Goal candidate from the client list
    ///
    /// Clamped to [`ScanIntensity::Throttle`] while throttling is requested,
    /// if the table has a satisfiable throttle entry. A non-sentinel result
    /// without satisfiable parameters is a fault: tables must be registered
    /// before clients can ask for a level.
    pub fn max_requested(&self, throttle_requested: bool) -> ScanResult<ScanIntensity> {
        self.resolve_goal(
            self.selected_profile,
            self.clients.max_requested(),
            throttle_requested,
        )
    }

    /// Goal candidate once `id` holds `intensity`, leaving the client list untouched
    pub fn max_requested_with(
        &self,
        id: ClientId,
        intensity: ScanIntensity,
        throttle_requested: bool,
    ) -> ScanResult<ScanIntensity> {
        self.resolve_goal(
            self.selected_profile,
            self.clients.max_requested_with(id, intensity),
            throttle_requested,
        )
    }

    fn resolve_goal(
        &self,
        profile: usize,
        max: ScanIntensity,
        throttle_requested: bool,
    ) -> ScanResult<ScanIntensity> {
        let mut goal = max;
        if throttle_requested
            && goal.is_active()
            && self.parameters_in(profile, ScanIntensity::Throttle).is_some()
        {
            goal = ScanIntensity::Throttle;
        }
        if goal.is_active() && self.parameters_in(profile, goal).is_none() {
            return Err(ScanError::UnsatisfiableParameters {
                category: self.category,
                intensity: goal,
                profile,
            });
        }
        Ok(goal)
    }

    pub fn is_enabled_for_client(&self, id: ClientId) -> bool {
        self.state == ScanState::Enabled
            && self
                .clients
                .intensity_of(id)
                .is_some_and(|intensity| intensity.is_active())
    }

    pub(crate) fn broadcast(&self, kind: ScanEventKind) {
        debug!(target: "bredr-scan-manager", "{} scan broadcasting {:?} to {} clients", self.category, kind, self.clients.active_len());
        self.clients.broadcast(ScanEvent::new(self.category, kind));
    }

    /// Sweep released clients once the instance has settled
    ///
    /// Only acts if a release happened since the last sweep. An instance
    /// left without clients returns to its initial state.
    pub fn cleanup(&mut self) {
        if !self.needs_cleanup {
            return;
        }
        self.needs_cleanup = false;
        let removed = self.clients.remove_released();
        debug!(target: "bredr-scan-manager", "{} scan cleanup removed {} clients", self.category, removed);

        if self.clients.is_empty() {
            self.paused = false;
            self.throttled = false;
            self.resolved = ScanIntensity::PendingRelease;
            self.state = ScanState::Disabled;
        }
    }

    pub fn snapshot(&self) -> InstanceSnapshot {
        InstanceSnapshot {
            category: self.category,
            state: self.state,
            resolved: self.resolved,
            selected_profile: self.selected_profile,
            paused: self.paused,
            throttled: self.throttled,
            needs_cleanup: self.needs_cleanup,
            clients: self.clients.len(),
            active_clients: self.clients.active_len(),
        }
    }
}
