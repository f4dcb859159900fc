// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Scan manager - composition of the three scan instances
//!
//! Owns the page, inquiry and truncated page scan instances, the global
//! disable override and the throttle flag. All entry points run to
//! completion inside the caller's event context; radio interaction is always
//! "issue a request, return, continue when the confirmation arrives".

use std::sync::Arc;

use bredr_hal::{
    BandwidthCoordinator, BandwidthFeature, BandwidthPriority, PageScanType, ScanCategory,
    ScanRadio,
};
use tracing::{debug, error, info, warn};

use crate::client::{ClientId, ScanClient, ScanDisableObserver, ScanEvent, ScanEventKind};
use crate::error::{radio_error, ScanError, ScanResult};
use crate::events::RadioEvent;
use crate::goals::derive_targets;
use crate::instance::{InstanceSnapshot, ScanInstance, ScanState};
use crate::params::{ScanIntensity, ScanParameterTable, ScanParameters};

pub(crate) struct DisableOwner {
    pub id: ClientId,
    pub observer: Arc<dyn ScanDisableObserver>,
}

/// Arbitrates page, inquiry and truncated page scan between clients
///
/// Parameter tables must be registered before the first request: a request
/// whose intensity has no satisfiable table entry fails with
/// [`ScanError::UnsatisfiableParameters`].
pub struct ScanManager<R: ScanRadio, B: BandwidthCoordinator> {
    pub(crate) radio: R,
    pub(crate) bandwidth: B,
    pub(crate) page: ScanInstance,
    pub(crate) inquiry: ScanInstance,
    pub(crate) truncated_page: ScanInstance,
    /// Last parameters written to the page scan context (page + truncated page)
    pub(crate) page_activity: Option<ScanParameters>,
    /// Last parameters written for inquiry scan
    pub(crate) inquiry_activity: Option<ScanParameters>,
    pub(crate) disable_owner: Option<DisableOwner>,
    pub(crate) disable_cfm_sent: bool,
    pub(crate) throttle_requested: bool,
}

impl<R: ScanRadio, B: BandwidthCoordinator> ScanManager<R, B> {
    /// Create the scan manager and bring the radio to its initial state
    ///
    /// Writes interlaced scan type for page and inquiry scan and registers
    /// page scanning with the bandwidth coordinator at low priority.
    pub fn new(mut radio: R, mut bandwidth: B) -> ScanResult<Self> {
        debug!(target: "bredr-scan-manager", "Initialising scan manager");

        radio
            .write_scan_type(ScanCategory::Page, PageScanType::Interlaced)
            .map_err(radio_error)?;
        radio
            .write_scan_type(ScanCategory::Inquiry, PageScanType::Interlaced)
            .map_err(radio_error)?;

        if !bandwidth.register_feature(BandwidthFeature::PageScan, BandwidthPriority::Low) {
            error!(target: "bredr-scan-manager", "Bandwidth coordinator refused page scan registration");
            return Err(ScanError::BandwidthRegistration);
        }

        Ok(Self {
            radio,
            bandwidth,
            page: ScanInstance::new(ScanCategory::Page),
            inquiry: ScanInstance::new(ScanCategory::Inquiry),
            truncated_page: ScanInstance::new(ScanCategory::TruncatedPage),
            page_activity: None,
            inquiry_activity: None,
            disable_owner: None,
            disable_cfm_sent: false,
            throttle_requested: false,
        })
    }

    pub(crate) fn instance_ref(&self, category: ScanCategory) -> &ScanInstance {
        match category {
            ScanCategory::Page => &self.page,
            ScanCategory::Inquiry => &self.inquiry,
            ScanCategory::TruncatedPage => &self.truncated_page,
        }
    }

    pub(crate) fn instance_mut(&mut self, category: ScanCategory) -> &mut ScanInstance {
        match category {
            ScanCategory::Page => &mut self.page,
            ScanCategory::Inquiry => &mut self.inquiry,
            ScanCategory::TruncatedPage => &mut self.truncated_page,
        }
    }

    // ===== Configuration =====

    /// Register the parameter table of a single category
    pub fn register_parameter_table(
        &mut self,
        category: ScanCategory,
        table: Arc<ScanParameterTable>,
    ) -> ScanResult<()> {
        debug!(target: "bredr-scan-manager", "Registering {} scan parameters ({} profiles)", category, table.len());
        self.instance_mut(category).register_parameter_table(table)
    }

    /// Register the page scan table, shared by page and truncated page scan
    pub fn register_page_scan_parameters(&mut self, table: Arc<ScanParameterTable>) -> ScanResult<()> {
        self.register_parameter_table(ScanCategory::Page, table.clone())?;
        self.register_parameter_table(ScanCategory::TruncatedPage, table)
    }

    pub fn register_inquiry_scan_parameters(&mut self, table: Arc<ScanParameterTable>) -> ScanResult<()> {
        self.register_parameter_table(ScanCategory::Inquiry, table)
    }

    /// Select the active profile of a category
    ///
    /// A live scan picks up the new profile's parameters immediately. A
    /// profile lacking a level a client currently needs is refused and the
    /// previous selection stays in place.
    pub fn select_profile(&mut self, category: ScanCategory, index: usize) -> ScanResult<()> {
        self.select_profiles(&[category], index)
    }

    /// Select the page scan profile, shared by page and truncated page scan
    pub fn select_page_scan_profile(&mut self, index: usize) -> ScanResult<()> {
        self.select_profiles(&[ScanCategory::Page, ScanCategory::TruncatedPage], index)
    }

    pub fn select_inquiry_scan_profile(&mut self, index: usize) -> ScanResult<()> {
        self.select_profiles(&[ScanCategory::Inquiry], index)
    }

    fn select_profiles(&mut self, categories: &[ScanCategory], index: usize) -> ScanResult<()> {
        let throttle_requested = self.throttle_requested;
        for &category in categories {
            if let Err(err) = self.instance_ref(category).check_profile(index, throttle_requested) {
                error!(target: "bredr-scan-manager", "Refusing {} scan profile {}: {}", category, index, err);
                return Err(err);
            }
        }
        for &category in categories {
            debug!(target: "bredr-scan-manager", "Selecting {} scan profile {}", category, index);
            self.instance_mut(category).select_profile(index, throttle_requested)?;
        }

        // the new profile may resolve a different goal, e.g. a missing throttle entry
        self.recompute_goals()?;
        for &category in categories {
            if self.instance_ref(category).state != ScanState::Disabled {
                self.push_activity(category)?;
            }
        }
        Ok(())
    }

    // ===== Client requests =====

    /// Add or update a client's request on a scan category
    pub fn request(
        &mut self,
        category: ScanCategory,
        id: ClientId,
        client: Arc<dyn ScanClient>,
        intensity: ScanIntensity,
    ) -> ScanResult<()> {
        debug!(target: "bredr-scan-manager", "{} scan request {} intensity {}", category, id, intensity);

        if !intensity.is_active() {
            warn!(target: "bredr-scan-manager", "{} requested {} scan at {}, treating as release", id, category, intensity);
            return self.release(category, id);
        }

        let global_disable = self.disable_owner.is_some();
        let throttle_requested = self.throttle_requested;
        let instance = self.instance_mut(category);
        if let Err(err) = instance.max_requested_with(id, intensity, throttle_requested) {
            error!(target: "bredr-scan-manager", "Rejecting {} scan request from {}: {}", category, id, err);
            return Err(err);
        }
        let newly_added = instance.clients.add_or_update(id, client.clone(), intensity);
        if newly_added && instance.state == ScanState::Disabled && global_disable {
            // scanning stays off until the disable owner lets go
            instance.paused = true;
            client.notify(ScanEvent::new(category, ScanEventKind::Paused));
        }

        self.recompute_goals()?;

        if category == ScanCategory::TruncatedPage && self.page.state != ScanState::Disabled {
            debug!(target: "bredr-scan-manager", "Page scan active, truncated page scan paused for {}", id);
            self.truncated_page.paused = true;
            client.notify(ScanEvent::new(category, ScanEventKind::Paused));
        }
        Ok(())
    }

    /// Soft-release a client's request
    ///
    /// Releasing a client that never requested is reported and ignored.
    pub fn release(&mut self, category: ScanCategory, id: ClientId) -> ScanResult<()> {
        debug!(target: "bredr-scan-manager", "{} scan release {}", category, id);

        let instance = self.instance_mut(category);
        if !instance.clients.release(id) {
            warn!(target: "bredr-scan-manager", "{} released {} scan without a request", id, category);
            return Ok(());
        }
        instance.needs_cleanup = true;
        self.recompute_goals()
    }

    pub fn is_enabled_for_client(&self, category: ScanCategory, id: ClientId) -> bool {
        self.instance_ref(category).is_enabled_for_client(id)
    }

    pub fn page_scan_request(
        &mut self,
        id: ClientId,
        client: Arc<dyn ScanClient>,
        intensity: ScanIntensity,
    ) -> ScanResult<()> {
        self.request(ScanCategory::Page, id, client, intensity)
    }

    pub fn page_scan_release(&mut self, id: ClientId) -> ScanResult<()> {
        self.release(ScanCategory::Page, id)
    }

    pub fn inquiry_scan_request(
        &mut self,
        id: ClientId,
        client: Arc<dyn ScanClient>,
        intensity: ScanIntensity,
    ) -> ScanResult<()> {
        self.request(ScanCategory::Inquiry, id, client, intensity)
    }

    pub fn inquiry_scan_release(&mut self, id: ClientId) -> ScanResult<()> {
        self.release(ScanCategory::Inquiry, id)
    }

    pub fn truncated_page_scan_request(
        &mut self,
        id: ClientId,
        client: Arc<dyn ScanClient>,
        intensity: ScanIntensity,
    ) -> ScanResult<()> {
        self.request(ScanCategory::TruncatedPage, id, client, intensity)
    }

    pub fn truncated_page_scan_release(&mut self, id: ClientId) -> ScanResult<()> {
        self.release(ScanCategory::TruncatedPage, id)
    }

    pub fn is_page_scan_enabled_for_client(&self, id: ClientId) -> bool {
        self.is_enabled_for_client(ScanCategory::Page, id)
    }

    // ===== Global override =====

    /// Force all scanning off on behalf of `owner`
    ///
    /// The owner gets `on_scan_disable_cfm(true)` once every instance is
    /// disabled, immediately if that is already the case.
    pub fn scan_disable(&mut self, owner: ClientId, observer: Arc<dyn ScanDisableObserver>) -> ScanResult<()> {
        match &self.disable_owner {
            Some(current) if current.id != owner => {
                error!(target: "bredr-scan-manager", "Scan disable by {} while owned by {}", owner, current.id);
                return Err(ScanError::ConflictingDisableOwner {
                    current: current.id,
                    requested: owner,
                });
            }
            Some(_) => {}
            None => {
                info!(target: "bredr-scan-manager", "Scan disable requested by {}", owner);
                self.disable_cfm_sent = false;
            }
        }
        self.disable_owner = Some(DisableOwner { id: owner, observer });

        self.recompute_goals()?;

        if self.is_scan_disabled() {
            self.send_disable_cfm(true);
        }
        Ok(())
    }

    /// Lift the global disable
    ///
    /// If scanning had not settled into the disabled state yet, the owner is
    /// told so with `on_scan_disable_cfm(false)`.
    pub fn scan_enable(&mut self) -> ScanResult<()> {
        if !self.is_scan_disabled() && self.disable_owner.is_some() {
            self.send_disable_cfm(false);
        }
        if let Some(owner) = self.disable_owner.take() {
            info!(target: "bredr-scan-manager", "Scan disable by {} lifted", owner.id);
        }
        self.recompute_goals()
    }

    /// True when every scan instance is disabled
    pub fn is_scan_disabled(&self) -> bool {
        ScanCategory::ALL
            .iter()
            .all(|&category| self.instance_ref(category).state == ScanState::Disabled)
    }

    pub(crate) fn send_disable_cfm(&mut self, disabled: bool) {
        if let Some(owner) = &self.disable_owner {
            info!(target: "bredr-scan-manager", "Scan disable confirmation to {}: disabled={}", owner.id, disabled);
            owner.observer.on_scan_disable_cfm(disabled);
            self.disable_cfm_sent = true;
        }
    }

    // ===== Bandwidth coordinator =====

    /// Throttle request from the bandwidth coordinator
    pub fn on_throttle_changed(&mut self, throttle_required: bool) -> ScanResult<()> {
        if throttle_required {
            debug!(target: "bredr-scan-manager", "Throttle scan requested");
        } else {
            debug!(target: "bredr-scan-manager", "Throttle scan released");
        }
        self.throttle_requested = throttle_required;
        self.recompute_goals()
    }

    // ===== Goals =====

    /// Recompute every instance's goal and drive the radio towards it
    pub fn recompute_goals(&mut self) -> ScanResult<()> {
        let mut truncated_page_goal = ScanIntensity::PendingRelease;
        let mut page_goal = ScanIntensity::PendingRelease;
        let mut inquiry_goal = ScanIntensity::PendingRelease;

        if self.disable_owner.is_none() {
            truncated_page_goal = self.truncated_page.max_requested(self.throttle_requested)?;
            page_goal = self.page.max_requested(self.throttle_requested)?;
            inquiry_goal = self.inquiry.max_requested(self.throttle_requested)?;
        }

        // truncated page scan has no goal while page scan holds the context
        if !derive_targets(truncated_page_goal, page_goal, inquiry_goal).truncated_page {
            truncated_page_goal = ScanIntensity::PendingRelease;
        }

        let goals = [
            (ScanCategory::TruncatedPage, truncated_page_goal),
            (ScanCategory::Page, page_goal),
            (ScanCategory::Inquiry, inquiry_goal),
        ];
        for (category, goal) in goals {
            let instance = self.instance_mut(category);
            if instance.resolved == goal {
                continue;
            }
            info!(target: "bredr-scan-manager", "New {} scan goal {} (was {})", category, goal, instance.resolved);
            instance.resolved = goal;
            if instance.state != ScanState::Disabled {
                self.push_activity(category)?;
            }
        }

        self.run_state_machine()
    }

    // ===== Radio events =====

    /// Route a confirmation to the instance waiting for it
    ///
    /// The combined confirmation answers either page or inquiry scan; page is
    /// tried first. At most one instance completes per confirmation.
    pub fn handle_radio_event(&mut self, event: RadioEvent) -> ScanResult<()> {
        debug!(target: "bredr-scan-manager", "Radio event {:?}", event);

        let status = event.status();
        if !status.is_success() {
            error!(target: "bredr-scan-manager", "{} confirmation failed with status {}", event.name(), status);
            return Err(ScanError::HciFailure {
                confirmation: event.name(),
                status,
            });
        }

        let completed = match event {
            RadioEvent::ScanEnableCfm { outstanding, .. } if outstanding != 0 => {
                debug!(target: "bredr-scan-manager", "Scan enable confirmation with {} outstanding", outstanding);
                return Ok(());
            }
            RadioEvent::ScanEnableCfm { .. } => {
                self.complete_transition(ScanCategory::Page)?
                    || self.complete_transition(ScanCategory::Inquiry)?
            }
            RadioEvent::TruncatedScanEnableCfm { .. } => {
                self.complete_transition(ScanCategory::TruncatedPage)?
            }
        };

        if !completed {
            error!(target: "bredr-scan-manager", "Unexpected {} confirmation", event.name());
            return Err(ScanError::UnexpectedConfirmation {
                confirmation: event.name(),
            });
        }
        Ok(())
    }

    // ===== Introspection =====

    pub fn instance(&self, category: ScanCategory) -> InstanceSnapshot {
        self.instance_ref(category).snapshot()
    }

    pub fn disable_owner(&self) -> Option<ClientId> {
        self.disable_owner.as_ref().map(|owner| owner.id)
    }

    pub fn is_throttle_requested(&self) -> bool {
        self.throttle_requested
    }

    /// Number of instances waiting for a confirmation
    pub fn transitions_in_flight(&self) -> usize {
        ScanCategory::ALL
            .iter()
            .filter(|&&category| self.instance_ref(category).state.is_transitioning())
            .count()
    }

    pub fn radio(&self) -> &R {
        &self.radio
    }

    pub fn radio_mut(&mut self) -> &mut R {
        &mut self.radio
    }

    pub fn bandwidth(&self) -> &B {
        &self.bandwidth
    }
}
