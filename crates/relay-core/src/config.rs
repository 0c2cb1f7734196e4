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

/// Deploy-time constants for reward-epoch/voting-round arithmetic and the
/// mode-3 forward-relay threshold increase (§4.2, §6 "Configuration").
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RelayConfig {
    pub first_reward_epoch_voting_round_id: u32,
    pub reward_epoch_duration_in_epochs: u32,
    /// `thresholdIncreasePercent`, applied when a mode-3 message is relayed
    /// forward under the previous epoch's committee.
    pub threshold_increase_percent: u32,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            first_reward_epoch_voting_round_id: 0,
            reward_epoch_duration_in_epochs: 5,
            threshold_increase_percent: 120,
        }
    }
}
