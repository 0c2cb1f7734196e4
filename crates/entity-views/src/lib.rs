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

//! External capability traits the core consumes but does not own the
//! concrete shape of (§4.3/§4.4, §9 "Polymorphism"): historical entity
//! lookups, vote-power providers, the chill source, and the fee-percentage
//! schedule. Real implementations wrap a chain client; the `mock` feature
//! ships deterministic in-memory fakes so the workspace is runnable and
//! testable without one.

use derive_more::{Debug, Display, From};
use relay_primitives::{Address, RewardEpochId, U256};
use std::sync::Arc;

#[cfg(feature = "mock")]
pub mod mock;

/// A historical block height at which a view is evaluated.
pub type BlockNumber = u64;

/// A P-Chain node identifier.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From, Debug, Display)]
#[debug("0x{}", hex::encode(self.0))]
#[display("0x{}", hex::encode(self.0))]
pub struct NodeId(pub [u8; 20]);

/// Voter → (signing, submit, submit-signatures, delegation) address and
/// node-id lookups at a historical block (§2, §4.3 step 1/3, §4.4 step 2/5).
pub trait EntityManagerView {
    fn node_ids_of_at(&self, voter: Address, block: BlockNumber) -> Vec<NodeId>;
    fn delegation_address_of_at(&self, voter: Address, block: BlockNumber) -> Address;
    fn signing_address_of_at(&self, voter: Address, block: BlockNumber) -> Address;
    fn submit_address_of_at(&self, voter: Address, block: BlockNumber) -> Address;
    fn submit_signatures_address_of_at(&self, voter: Address, block: BlockNumber) -> Address;
}

/// `wNat` historical vote power (§4.3 step 4).
pub trait WNatView {
    fn total_vote_power_at(&self, block: BlockNumber) -> U256;
    fn vote_power_of_at(&self, account: Address, block: BlockNumber) -> U256;
}

/// `pChainStakeMirror` historical vote power, batched by node id (§4.3 step 1).
/// Returns zero for every node when the mirror is disabled.
pub trait PChainStakeMirrorView {
    fn batch_vote_power_at(&self, nodes: &[NodeId], block: BlockNumber) -> Vec<U256>;
}

/// Either a voter/delegation address or a node id — the chill table is
/// keyed by whichever 20-byte entity is being checked (§4.3 step 2 chills by
/// node id, step 4 chills by delegation address).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From, Debug, Display)]
#[debug("0x{}", hex::encode(self.0))]
#[display("0x{}", hex::encode(self.0))]
pub struct EntityId(pub [u8; 20]);

impl From<Address> for EntityId {
    fn from(address: Address) -> Self {
        EntityId(address.0)
    }
}

impl From<NodeId> for EntityId {
    fn from(node_id: NodeId) -> Self {
        EntityId(node_id.0)
    }
}

/// `(address) → u24` chill lookup (§3 ChillTable, §4.3 step 2/4).
pub trait ChillSource {
    /// Zero means "not chilled".
    fn chilled_until(&self, entity: EntityId) -> RewardEpochId;
}

/// A writable [`ChillSource`] (§4.4 `chillVoter`). The real contract's
/// `chilledUntilRewardEpoch` mapping is keyed by a bare 20-byte entity, so
/// the same table governs both voter-level chilling (`VoterRegistry`'s own
/// admission eligibility check) and node-level chilling (consumed by
/// `weight-calculator` step 2) — `VoterRegistry` owns one of these and
/// hands out the read-only [`ChillSource`] half to the weight calculator.
pub trait ChillTable: ChillSource {
    fn set_chilled_until(&self, entity: EntityId, until: RewardEpochId);
}

/// Ordered-by-`validFromEpochId` fee-percentage lookup (§3 FeePercentageSchedule).
pub trait FeePercentageSchedule {
    fn fee_bips_at(&self, voter: Address, epoch: RewardEpochId) -> u16;
}

/// The signing-policy-sign window for a reward epoch: the timestamp/block
/// range over which the committee was expected to countersign the *next*
/// epoch's policy (§4.3 burn factor). `end_ts == 0` means the window has not
/// closed yet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SignWindow {
    pub start_ts: u64,
    pub start_block: BlockNumber,
    pub end_ts: u64,
    pub end_block: BlockNumber,
}

/// Timing data the burn-factor schedule reads: the sign window for a reward
/// epoch, and the block at which a given voter actually countersigned it.
pub trait SigningPolicySignInfo {
    fn sign_window_at(&self, reward_epoch_id: RewardEpochId) -> SignWindow;

    /// Zero means the voter has not signed (yet).
    fn voter_sign_block_at(&self, reward_epoch_id: RewardEpochId, voter: Address) -> BlockNumber;
}

// Blanket forwarding impls over `Arc<T>` (including `Arc<dyn Trait>`): the
// `weight-calculator` free functions are generic (`&impl EntityManagerView`,
// not `&dyn EntityManagerView`), so a late-bound `Arc<dyn Trait>` capability
// slot (§9 "Cyclic references") still satisfies them — `Arc<T>` is `Sized`
// even when `T` is not.

impl<T: EntityManagerView + ?Sized> EntityManagerView for Arc<T> {
    fn node_ids_of_at(&self, voter: Address, block: BlockNumber) -> Vec<NodeId> {
        (**self).node_ids_of_at(voter, block)
    }

    fn delegation_address_of_at(&self, voter: Address, block: BlockNumber) -> Address {
        (**self).delegation_address_of_at(voter, block)
    }

    fn signing_address_of_at(&self, voter: Address, block: BlockNumber) -> Address {
        (**self).signing_address_of_at(voter, block)
    }

    fn submit_address_of_at(&self, voter: Address, block: BlockNumber) -> Address {
        (**self).submit_address_of_at(voter, block)
    }

    fn submit_signatures_address_of_at(&self, voter: Address, block: BlockNumber) -> Address {
        (**self).submit_signatures_address_of_at(voter, block)
    }
}

impl<T: WNatView + ?Sized> WNatView for Arc<T> {
    fn total_vote_power_at(&self, block: BlockNumber) -> U256 {
        (**self).total_vote_power_at(block)
    }

    fn vote_power_of_at(&self, account: Address, block: BlockNumber) -> U256 {
        (**self).vote_power_of_at(account, block)
    }
}

impl<T: PChainStakeMirrorView + ?Sized> PChainStakeMirrorView for Arc<T> {
    fn batch_vote_power_at(&self, nodes: &[NodeId], block: BlockNumber) -> Vec<U256> {
        (**self).batch_vote_power_at(nodes, block)
    }
}

impl<T: ChillSource + ?Sized> ChillSource for Arc<T> {
    fn chilled_until(&self, entity: EntityId) -> RewardEpochId {
        (**self).chilled_until(entity)
    }
}

impl<T: ChillTable + ?Sized> ChillTable for Arc<T> {
    fn set_chilled_until(&self, entity: EntityId, until: RewardEpochId) {
        (**self).set_chilled_until(entity, until)
    }
}

impl<T: FeePercentageSchedule + ?Sized> FeePercentageSchedule for Arc<T> {
    fn fee_bips_at(&self, voter: Address, epoch: RewardEpochId) -> u16 {
        (**self).fee_bips_at(voter, epoch)
    }
}

impl<T: SigningPolicySignInfo + ?Sized> SigningPolicySignInfo for Arc<T> {
    fn sign_window_at(&self, reward_epoch_id: RewardEpochId) -> SignWindow {
        (**self).sign_window_at(reward_epoch_id)
    }

    fn voter_sign_block_at(&self, reward_epoch_id: RewardEpochId, voter: Address) -> BlockNumber {
        (**self).voter_sign_block_at(reward_epoch_id, voter)
    }
}
