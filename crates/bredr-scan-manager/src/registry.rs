// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Client registry - ordered (client, intensity) list of one scan instance
//!
//! Releases are soft: the entry stays in the list marked
//! [`ScanIntensity::PendingRelease`] until the owning instance sweeps it,
//! which only happens once the instance is no longer mid-transition.

use std::sync::Arc;

use crate::client::{ClientId, ScanClient, ScanEvent};
use crate::params::ScanIntensity;

pub(crate) struct ClientEntry {
    pub id: ClientId,
    pub client: Arc<dyn ScanClient>,
    pub intensity: ScanIntensity,
}

#[derive(Default)]
pub struct ClientRegistry {
    entries: Vec<ClientEntry>,
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the client's intensity, or append it
    ///
    /// Returns true if the client was not tracked before.
    pub fn add_or_update(
        &mut self,
        id: ClientId,
        client: Arc<dyn ScanClient>,
        intensity: ScanIntensity,
    ) -> bool {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) {
            entry.intensity = intensity;
            entry.client = client;
            return false;
        }
        self.entries.push(ClientEntry {
            id,
            client,
            intensity,
        });
        true
    }

    /// Mark the client pending release; false if it is not tracked
    pub fn release(&mut self, id: ClientId) -> bool {
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => {
                entry.intensity = ScanIntensity::PendingRelease;
                true
            }
            None => false,
        }
    }

    /// Remove every pending-release entry, returning how many were removed
    pub fn remove_released(&mut self) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|e| e.intensity != ScanIntensity::PendingRelease);
        before - self.entries.len()
    }

    /// Highest requested intensity, ignoring pending-release entries
    pub fn max_requested(&self) -> ScanIntensity {
        self.entries
            .iter()
            .map(|e| e.intensity)
            .filter(|i| i.is_active())
            .max()
            .unwrap_or(ScanIntensity::PendingRelease)
    }

    /// Highest requested intensity if `id` held `intensity`
    pub fn max_requested_with(&self, id: ClientId, intensity: ScanIntensity) -> ScanIntensity {
        self.entries
            .iter()
            .filter(|e| e.id != id)
            .map(|e| e.intensity)
            .chain(std::iter::once(intensity))
            .filter(|i| i.is_active())
            .max()
            .unwrap_or(ScanIntensity::PendingRelease)
    }

    pub fn intensity_of(&self, id: ClientId) -> Option<ScanIntensity> {
        self.entries.iter().find(|e| e.id == id).map(|e| e.intensity)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries not marked pending release
    pub fn active_len(&self) -> usize {
        self.entries.iter().filter(|e| e.intensity.is_active()).count()
    }

    /// Deliver `event` to every client not marked pending release, in list order
    pub fn broadcast(&self, event: ScanEvent) {
        for entry in self.entries.iter().filter(|e| e.intensity.is_active()) {
            entry.client.notify(event);
        }
    }
}
