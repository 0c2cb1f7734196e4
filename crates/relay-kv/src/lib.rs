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

//! The abstract key-value store backing `RelayState` (§3, §9 "Global mutable
//! state"): `policyHashByEpoch`, `merkleRoots`, and `lastInitializedRewardEpoch`.
//! `relay-core` is generic over [`RelayStorage`]; this crate supplies the
//! only implementation the workspace ships, an in-memory dashmap-backed one,
//! mirroring the teacher's explicit getter/setter storage-trait convention
//! (`BlockMetaStorage`/`CodesStorage`).

use dashmap::DashMap;
use relay_crypto::Digest;
use relay_primitives::{RewardEpochId, VotingRoundId};
use std::sync::RwLock;

/// Typed access to the relay's three persistent maps. A zero hash/root in
/// the source spec becomes `None` here — the absence of an entry, not a
/// sentinel value, is the idiomatic way to express "not installed" /
/// "not finalized".
pub trait RelayStorage: Send + Sync {
    fn policy_hash(&self, reward_epoch_id: RewardEpochId) -> Option<Digest>;
    fn set_policy_hash(&self, reward_epoch_id: RewardEpochId, hash: Digest);

    fn merkle_root(&self, protocol_id: u8, voting_round_id: VotingRoundId) -> Option<Digest>;
    fn set_merkle_root(&self, protocol_id: u8, voting_round_id: VotingRoundId, root: Digest);

    fn last_initialized_reward_epoch(&self) -> Option<RewardEpochId>;
    fn set_last_initialized_reward_epoch(&self, reward_epoch_id: RewardEpochId);
}

/// An in-memory, dashmap-backed [`RelayStorage`]. Suitable for a test
/// harness or an embedding host that persists `RelayCore` snapshots some
/// other way; it does not itself write to disk.
#[derive(Default)]
pub struct InMemoryRelayStorage {
    policy_hashes: DashMap<RewardEpochId, Digest>,
    merkle_roots: DashMap<(u8, VotingRoundId), Digest>,
    last_initialized_reward_epoch: RwLock<Option<RewardEpochId>>,
}

impl InMemoryRelayStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RelayStorage for InMemoryRelayStorage {
    fn policy_hash(&self, reward_epoch_id: RewardEpochId) -> Option<Digest> {
        self.policy_hashes.get(&reward_epoch_id).map(|v| *v)
    }

    fn set_policy_hash(&self, reward_epoch_id: RewardEpochId, hash: Digest) {
        self.policy_hashes.insert(reward_epoch_id, hash);
    }

    fn merkle_root(&self, protocol_id: u8, voting_round_id: VotingRoundId) -> Option<Digest> {
        self.merkle_roots.get(&(protocol_id, voting_round_id)).map(|v| *v)
    }

    fn set_merkle_root(&self, protocol_id: u8, voting_round_id: VotingRoundId, root: Digest) {
        self.merkle_roots.insert((protocol_id, voting_round_id), root);
    }

    fn last_initialized_reward_epoch(&self) -> Option<RewardEpochId> {
        *self.last_initialized_reward_epoch.read().unwrap()
    }

    fn set_last_initialized_reward_epoch(&self, reward_epoch_id: RewardEpochId) {
        *self.last_initialized_reward_epoch.write().unwrap() = Some(reward_epoch_id);
    }
}
