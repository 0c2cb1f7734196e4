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

//! Deterministic in-memory fakes for the capability traits, mirroring the
//! teacher's `mock`-feature convention: enough behavior to drive the
//! scenario tests in `relay-harness` without a real chain client.

use std::collections::BTreeMap;
use std::sync::RwLock;

use dashmap::DashMap;
use relay_primitives::{Address, RewardEpochId, U256};

use crate::{
    BlockNumber, ChillSource, ChillTable, EntityId, EntityManagerView, FeePercentageSchedule,
    NodeId, PChainStakeMirrorView, SignWindow, SigningPolicySignInfo, WNatView,
};

/// A fake `EntityManager`: every lookup defaults to the zero value (empty
/// node list / `Address::ZERO`) until explicitly seeded.
#[derive(Default)]
pub struct FakeEntityManager {
    nodes: DashMap<(Address, BlockNumber), Vec<NodeId>>,
    delegation: DashMap<(Address, BlockNumber), Address>,
    signing: DashMap<(Address, BlockNumber), Address>,
    submit: DashMap<(Address, BlockNumber), Address>,
    submit_signatures: DashMap<(Address, BlockNumber), Address>,
}

impl FakeEntityManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_nodes(&self, voter: Address, block: BlockNumber, nodes: Vec<NodeId>) {
        self.nodes.insert((voter, block), nodes);
    }

    pub fn set_delegation(&self, voter: Address, block: BlockNumber, delegation: Address) {
        self.delegation.insert((voter, block), delegation);
    }

    pub fn set_signing(&self, voter: Address, block: BlockNumber, signing: Address) {
        self.signing.insert((voter, block), signing);
    }

    pub fn set_submit(&self, voter: Address, block: BlockNumber, submit: Address) {
        self.submit.insert((voter, block), submit);
    }

    pub fn set_submit_signatures(&self, voter: Address, block: BlockNumber, submit_signatures: Address) {
        self.submit_signatures.insert((voter, block), submit_signatures);
    }
}

impl EntityManagerView for FakeEntityManager {
    fn node_ids_of_at(&self, voter: Address, block: BlockNumber) -> Vec<NodeId> {
        self.nodes.get(&(voter, block)).map(|v| v.clone()).unwrap_or_default()
    }

    fn delegation_address_of_at(&self, voter: Address, block: BlockNumber) -> Address {
        self.delegation.get(&(voter, block)).map(|v| *v).unwrap_or(Address::ZERO)
    }

    fn signing_address_of_at(&self, voter: Address, block: BlockNumber) -> Address {
        self.signing.get(&(voter, block)).map(|v| *v).unwrap_or(Address::ZERO)
    }

    fn submit_address_of_at(&self, voter: Address, block: BlockNumber) -> Address {
        self.submit.get(&(voter, block)).map(|v| *v).unwrap_or(Address::ZERO)
    }

    fn submit_signatures_address_of_at(&self, voter: Address, block: BlockNumber) -> Address {
        self.submit_signatures.get(&(voter, block)).map(|v| *v).unwrap_or(Address::ZERO)
    }
}

/// A fake `wNat`: undelegated power defaults to zero.
#[derive(Default)]
pub struct FakeWNat {
    total: DashMap<BlockNumber, U256>,
    power: DashMap<(Address, BlockNumber), U256>,
}

impl FakeWNat {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_total_vote_power(&self, block: BlockNumber, total: U256) {
        self.total.insert(block, total);
    }

    pub fn set_vote_power(&self, account: Address, block: BlockNumber, power: U256) {
        self.power.insert((account, block), power);
    }
}

impl WNatView for FakeWNat {
    fn total_vote_power_at(&self, block: BlockNumber) -> U256 {
        self.total.get(&block).map(|v| *v).unwrap_or(U256::ZERO)
    }

    fn vote_power_of_at(&self, account: Address, block: BlockNumber) -> U256 {
        self.power.get(&(account, block)).map(|v| *v).unwrap_or(U256::ZERO)
    }
}

/// A fake `pChainStakeMirror`. Nodes not explicitly seeded contribute zero,
/// matching the "zero-valued when mirror disabled" rule of §4.3 step 1.
#[derive(Default)]
pub struct FakePChainStakeMirror {
    power: DashMap<(NodeId, BlockNumber), U256>,
}

impl FakePChainStakeMirror {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_vote_power(&self, node: NodeId, block: BlockNumber, power: U256) {
        self.power.insert((node, block), power);
    }
}

impl PChainStakeMirrorView for FakePChainStakeMirror {
    fn batch_vote_power_at(&self, nodes: &[NodeId], block: BlockNumber) -> Vec<U256> {
        nodes
            .iter()
            .map(|node| self.power.get(&(*node, block)).map(|v| *v).unwrap_or(U256::ZERO))
            .collect()
    }
}

/// A fake chill table.
#[derive(Default)]
pub struct FakeChillSource {
    chilled: DashMap<EntityId, RewardEpochId>,
}

impl FakeChillSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_chilled(&self, entity: impl Into<EntityId>, until: RewardEpochId) {
        self.chilled.insert(entity.into(), until);
    }

    pub fn clear(&self, entity: impl Into<EntityId>) {
        self.chilled.remove(&entity.into());
    }
}

impl ChillSource for FakeChillSource {
    fn chilled_until(&self, entity: EntityId) -> RewardEpochId {
        self.chilled.get(&entity).map(|v| *v).unwrap_or(RewardEpochId::ZERO)
    }
}

impl ChillTable for FakeChillSource {
    fn set_chilled_until(&self, entity: EntityId, until: RewardEpochId) {
        self.chilled.insert(entity, until);
    }
}

/// A fake fee-percentage schedule: an ordered-by-`validFromEpochId` list per
/// voter, resolved by taking the last entry with `validFromEpochId ≤ epoch`.
#[derive(Default)]
pub struct FakeFeeSchedule {
    entries: RwLock<BTreeMap<Address, Vec<(RewardEpochId, u16)>>>,
    default_bips: u16,
}

impl FakeFeeSchedule {
    pub fn new(default_bips: u16) -> Self {
        Self { entries: RwLock::new(BTreeMap::new()), default_bips }
    }

    /// Appends an entry. Callers are responsible for inserting in
    /// nondecreasing `valid_from` order, matching the source's append-only
    /// schedule.
    pub fn push_entry(&self, voter: Address, valid_from: RewardEpochId, bips: u16) {
        self.entries.write().unwrap().entry(voter).or_default().push((valid_from, bips));
    }
}

impl FeePercentageSchedule for FakeFeeSchedule {
    fn fee_bips_at(&self, voter: Address, epoch: RewardEpochId) -> u16 {
        self.entries
            .read()
            .unwrap()
            .get(&voter)
            .and_then(|entries| entries.iter().rev().find(|(valid_from, _)| *valid_from <= epoch))
            .map(|(_, bips)| *bips)
            .unwrap_or(self.default_bips)
    }
}

/// A fake signing-policy-sign timing source.
#[derive(Default)]
pub struct FakeSignInfo {
    windows: DashMap<RewardEpochId, SignWindow>,
    sign_blocks: DashMap<(RewardEpochId, Address), BlockNumber>,
}

impl FakeSignInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_window(&self, reward_epoch_id: RewardEpochId, window: SignWindow) {
        self.windows.insert(reward_epoch_id, window);
    }

    pub fn set_voter_sign_block(&self, reward_epoch_id: RewardEpochId, voter: Address, block: BlockNumber) {
        self.sign_blocks.insert((reward_epoch_id, voter), block);
    }
}

impl SigningPolicySignInfo for FakeSignInfo {
    fn sign_window_at(&self, reward_epoch_id: RewardEpochId) -> SignWindow {
        self.windows.get(&reward_epoch_id).map(|v| *v).unwrap_or_default()
    }

    fn voter_sign_block_at(&self, reward_epoch_id: RewardEpochId, voter: Address) -> BlockNumber {
        self.sign_blocks.get(&(reward_epoch_id, voter)).map(|v| *v).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_manager_defaults_to_zero_address() {
        let fake = FakeEntityManager::new();
        assert_eq!(fake.signing_address_of_at(Address::ZERO, 1), Address::ZERO);
        assert!(fake.node_ids_of_at(Address::ZERO, 1).is_empty());
    }

    #[test]
    fn fee_schedule_resolves_last_entry_not_exceeding_epoch() {
        let fake = FakeFeeSchedule::new(0);
        let voter = Address([1; 20]);
        fake.push_entry(voter, RewardEpochId(0), 100);
        fake.push_entry(voter, RewardEpochId(10), 200);
        assert_eq!(fake.fee_bips_at(voter, RewardEpochId(5)), 100);
        assert_eq!(fake.fee_bips_at(voter, RewardEpochId(10)), 200);
        assert_eq!(fake.fee_bips_at(voter, RewardEpochId(999)), 200);
    }

    #[test]
    fn fee_schedule_default_for_unknown_voter() {
        let fake = FakeFeeSchedule::new(42);
        assert_eq!(fake.fee_bips_at(Address::ZERO, RewardEpochId(0)), 42);
    }

    #[test]
    fn chill_source_defaults_to_not_chilled() {
        let fake = FakeChillSource::new();
        assert_eq!(fake.chilled_until(EntityId::from(Address::ZERO)), RewardEpochId::ZERO);
    }
}
