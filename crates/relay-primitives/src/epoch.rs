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

//! Reward-epoch and voting-round index newtypes.
//!
//! Both are logically sub-32-bit quantities on the wire (the reward epoch is
//! a 24-bit field, see `signing_policy`'s wire layout) but are kept as `u32`
//! in memory — the codec is the only place the 24-bit truncation is
//! enforced.

use derive_more::{Display, From, Into};

/// Index of a reward epoch, the coarse time unit during which one signing
/// policy is authoritative.
#[derive(
    Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Display, From, Into,
)]
pub struct RewardEpochId(pub u32);

impl RewardEpochId {
    pub const ZERO: RewardEpochId = RewardEpochId(0);

    pub fn next(self) -> Self {
        RewardEpochId(self.0 + 1)
    }

    /// `None` at epoch zero, which has no predecessor.
    pub fn prev(self) -> Option<Self> {
        self.0.checked_sub(1).map(RewardEpochId)
    }
}

/// Index of a voting round, a fine sub-interval inside a reward epoch.
#[derive(
    Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Display, From, Into,
)]
pub struct VotingRoundId(pub u32);
