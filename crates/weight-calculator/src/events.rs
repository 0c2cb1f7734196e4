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

/// The `VoterRegistrationInfo` event bundle of §4.3 step 5 / §6 "Events".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistrationWeightInfo {
    pub voter: Address,
    pub reward_epoch_id: RewardEpochId,
    pub delegation_address: Address,
    pub fee_bips: u16,
    pub raw_wnat_vote_power: U256,
    pub capped_wnat_vote_power: U256,
    pub node_ids: Vec<NodeId>,
    pub node_weights: Vec<U256>,
}
