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

use entity_views::NodeId;
use relay_primitives::{Address, RewardEpochId, U256};

/// §6 "Events" plus §2's `VoterRegistrationInfo` bundle, folded into one
/// return-value enum the same way `relay-core::RelayEvent` does — the
/// registry only records these, a host dispatches them to its own bus.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VoterRegistryEvent {
    VoterRegistered {
        voter: Address,
        reward_epoch_id: RewardEpochId,
        signing_address: Address,
        delegation_address: Address,
        submit_address: Address,
        submit_signatures_address: Address,
        weight: U256,
        wnat_weight: U256,
        c_chain_stake_weight: U256,
        node_ids: Vec<NodeId>,
        node_weights: Vec<U256>,
    },
    VoterRemoved {
        voter: Address,
        reward_epoch_id: RewardEpochId,
    },
    VoterChilled {
        voter: Address,
        until_reward_epoch_id: RewardEpochId,
    },
}
