// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Transition sequencer
//!
//! ```text
//! Disabled --enable--> Enabling --cfm--> Enabled --disable--> Disabling --cfm--> Disabled
//! ```
//!
//! The radio accepts one scan configuration change at a time and its
//! confirmations do not say which request they answer, so the sequencer
//! never has more than one instance in Enabling/Disabling. Disables go first
//! to free the shared page scan context.

use bredr_hal::{BandwidthCoordinator, BandwidthFeature, ScanCategory, ScanRadio};
use tracing::{debug, error};

use crate::client::ScanEventKind;
use crate::error::{radio_error, ScanError, ScanResult};
use crate::goals::derive_targets;
use crate::instance::ScanState;
use crate::manager::ScanManager;
use crate::params::ScanIntensity;

impl<R: ScanRadio, B: BandwidthCoordinator> ScanManager<R, B> {
    /// Take at most one step towards the current goals
    pub(crate) fn run_state_machine(&mut self) -> ScanResult<()> {
        let in_flight = self.transitions_in_flight();
        if in_flight > 1 {
            error!(target: "bredr-scan-manager", "{} scan transitions in flight", in_flight);
            return Err(ScanError::MultipleTransitionsInFlight { count: in_flight });
        }
        if in_flight == 1 {
            debug!(target: "bredr-scan-manager", "Scan transition pending, waiting for confirmation");
            return Ok(());
        }

        let targets = derive_targets(
            self.truncated_page.resolved,
            self.page.resolved,
            self.inquiry.resolved,
        );

        for category in ScanCategory::ALL {
            if !targets.wants(category) && self.instance_ref(category).state == ScanState::Enabled {
                debug!(target: "bredr-scan-manager", "Disabling {} scan", category);
                self.instance_mut(category).state = ScanState::Disabling;
                return self.write_enable(category, false);
            }
        }

        for category in ScanCategory::ALL {
            if targets.wants(category) && self.instance_ref(category).state == ScanState::Disabled {
                debug!(target: "bredr-scan-manager", "Enabling {} scan", category);
                self.push_activity(category)?;
                self.instance_mut(category).state = ScanState::Enabling;
                return self.write_enable(category, true);
            }
        }

        self.page.cleanup();
        self.truncated_page.cleanup();
        self.inquiry.cleanup();
        debug!(target: "bredr-scan-manager", "Scan goals achieved");
        Ok(())
    }

    /// Issue the enable/disable request for a category
    ///
    /// Page and inquiry share the combined scan enable; its bits follow the
    /// instance states, which the caller has already moved.
    fn write_enable(&mut self, category: ScanCategory, enable: bool) -> ScanResult<()> {
        match category {
            ScanCategory::TruncatedPage => self
                .radio
                .write_truncated_scan_enable(enable)
                .map_err(radio_error),
            ScanCategory::Page | ScanCategory::Inquiry => {
                let page = self.page.state.is_on();
                let inquiry = self.inquiry.state.is_on();
                self.radio
                    .write_scan_enable(page, inquiry)
                    .map_err(radio_error)
            }
        }
    }

    /// Complete the transition of `category` on a confirmation
    ///
    /// Returns false, changing nothing, if the instance was not waiting for
    /// one.
    pub(crate) fn complete_transition(&mut self, category: ScanCategory) -> ScanResult<bool> {
        match self.instance_ref(category).state {
            ScanState::Disabling => {
                debug!(target: "bredr-scan-manager", "{} scan disabled", category);
                self.instance_mut(category).state = ScanState::Disabled;
                if category.is_page_family() {
                    self.bandwidth.feature_stopped(BandwidthFeature::PageScan);
                }
                let instance = self.instance_mut(category);
                instance.clients.remove_released();
                if !instance.clients.is_empty() {
                    instance.paused = true;
                    instance.broadcast(ScanEventKind::Paused);
                }
            }
            ScanState::Enabling => {
                debug!(target: "bredr-scan-manager", "{} scan enabled", category);
                self.instance_mut(category).state = ScanState::Enabled;
                if category.is_page_family() {
                    self.bandwidth.feature_started(BandwidthFeature::PageScan);
                }
                let instance = self.instance_mut(category);
                if !instance.clients.is_empty() && instance.paused {
                    instance.paused = false;
                    instance.broadcast(ScanEventKind::Resumed);
                }
            }
            ScanState::Disabled | ScanState::Enabled => return Ok(false),
        }

        self.run_state_machine()?;

        if self.disable_owner.is_some() && !self.disable_cfm_sent && self.is_scan_disabled() {
            self.send_disable_cfm(true);
        }
        Ok(true)
    }

    /// Bring the radio's scan parameters in line with the resolved goal
    ///
    /// Also toggles the instance's throttled status, notifying its clients.
    pub(crate) fn push_activity(&mut self, category: ScanCategory) -> ScanResult<()> {
        let instance = self.instance_ref(category);
        let resolved = instance.resolved;

        if resolved.is_active() {
            let params = instance
                .parameters_for(resolved)
                .ok_or(ScanError::UnsatisfiableParameters {
                    category,
                    intensity: resolved,
                    profile: instance.selected_profile(),
                })?;

            let current = if category.is_page_family() {
                &mut self.page_activity
            } else {
                &mut self.inquiry_activity
            };
            if *current != Some(params) {
                *current = Some(params);
                debug!(target: "bredr-scan-manager", "{} scan activity interval:{:#x} window:{:#x} type:{:?}", category, params.interval, params.window, params.scan_type);
                let scan_type = category.is_page_family().then_some(params.scan_type);
                self.radio
                    .write_scan_activity(category, params.interval, params.window, scan_type)
                    .map_err(radio_error)?;
            }
        }

        let instance = self.instance_mut(category);
        if resolved == ScanIntensity::Throttle && !instance.throttled {
            instance.throttled = true;
            instance.broadcast(ScanEventKind::Throttled);
        } else if resolved != ScanIntensity::Throttle && instance.throttled {
            instance.throttled = false;
            instance.broadcast(ScanEventKind::Unthrottled);
        }
        Ok(())
    }
}
