// This file is part of signing-relay.
//
// Copyright (C) 2026 Signing Relay Contributors
// SPDX-License-Identifier: GPL-3.0
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! §4.5 VoterPreRegistry: collects eligible voters ahead of the reward
//! epoch's registration window opening, then replays them into
//! [`voter_registry::VoterRegistry::system_registration`] at switchover.

mod error;
mod events;

pub use error::VoterPreRegistryError;
pub use events::PreRegistryEvent;

use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use dashmap::DashMap;
use entity_views::EntityManagerView;
use relay_crypto::Signature;
use relay_primitives::{Address, RewardEpochId};
use voter_registry::{VoterRegistry, VoterRegistryEvent};

#[derive(Default)]
struct PreRegisteredSet {
    order: Vec<Address>,
    seen: HashSet<Address>,
}

pub struct VoterPreRegistry {
    entity_manager: Arc<dyn EntityManagerView + Send + Sync>,
    sets: DashMap<RewardEpochId, RwLock<PreRegisteredSet>>,
}

impl VoterPreRegistry {
    pub fn new(entity_manager: Arc<dyn EntityManagerView + Send + Sync>) -> Self {
        Self { entity_manager, sets: DashMap::new() }
    }

    /// §4.5 `preRegisterVoter`. Idempotency is a hard error
    /// ([`VoterPreRegistryError::AlreadyPreRegistered`]), not a silent
    /// no-op, matching the spec wording.
    pub fn pre_register_voter(
        &self,
        registry: &VoterRegistry,
        next_epoch: RewardEpochId,
        voter: Address,
        signature: Signature,
    ) -> Result<PreRegistryEvent, VoterPreRegistryError> {
        if registry.registration_open(next_epoch) {
            return Err(VoterPreRegistryError::RegistrationAlreadyOpen);
        }

        let prev_epoch = next_epoch.prev().ok_or(VoterPreRegistryError::NoPrecedingEpoch)?;
        if !registry.is_registered(voter, prev_epoch) {
            return Err(VoterPreRegistryError::NotCurrentlyRegistered);
        }
        let init_block = registry
            .init_start_block(prev_epoch)
            .ok_or(VoterPreRegistryError::NotCurrentlyRegistered)?;

        let signing_address = self.entity_manager.signing_address_of_at(voter, init_block);
        let digest = voter_registry::registration_digest(next_epoch, voter);
        let recovered = signature.recover(digest).map_err(|_| VoterPreRegistryError::SignatureMismatch)?;
        if recovered.to_address() != signing_address {
            return Err(VoterPreRegistryError::SignatureMismatch);
        }

        let set = self.sets.entry(next_epoch).or_default();
        let mut set = set.write().unwrap();
        if !set.seen.insert(voter) {
            return Err(VoterPreRegistryError::AlreadyPreRegistered);
        }
        set.order.push(voter);

        tracing::debug!(%voter, reward_epoch_id = next_epoch.0, "voter pre-registered");
        Ok(PreRegistryEvent::VoterPreRegistered { voter, reward_epoch_id: next_epoch })
    }

    /// §4.5 `triggerVoterRegistration`: replays the pre-registered set for
    /// `epoch` into [`VoterRegistry::system_registration`] in insertion
    /// order. A per-voter failure becomes a [`PreRegistryEvent::VoterRegistrationFailed`]
    /// and does not abort the remaining batch (§7 "the only explicit
    /// partial-failure path"). Consumes the pre-registered set for `epoch`.
    pub fn trigger_voter_registration(
        &self,
        registry: &VoterRegistry,
        epoch: RewardEpochId,
    ) -> (Vec<VoterRegistryEvent>, Vec<PreRegistryEvent>) {
        let Some((_, set)) = self.sets.remove(&epoch) else {
            return (Vec::new(), Vec::new());
        };
        let voters = set.into_inner().unwrap().order;

        let mut registry_events = Vec::new();
        let mut failures = Vec::new();
        for voter in voters {
            match registry.system_registration(epoch, voter) {
                Ok(events) => registry_events.extend(events),
                Err(err) => {
                    tracing::warn!(%voter, reward_epoch_id = epoch.0, %err, "system registration failed");
                    failures.push(PreRegistryEvent::VoterRegistrationFailed { voter, reward_epoch_id: epoch });
                }
            }
        }
        (registry_events, failures)
    }
}
