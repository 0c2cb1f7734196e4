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

use relay_crypto::Digest;
use relay_primitives::{RewardEpochId, VotingRoundId};

/// Supplemented observability (SPEC_FULL §2): the relay only *records*
/// these, it does not dispatch them — a host wires the returned events to
/// its own bus, mirroring how the teacher's router records events without
/// owning delivery.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RelayEvent {
    PolicyInstalled { reward_epoch_id: RewardEpochId, hash: Digest },
    PolicyRotated { reward_epoch_id: RewardEpochId, hash: Digest },
    MerkleRootConfirmed {
        protocol_id: u8,
        voting_round_id: VotingRoundId,
        root: Digest,
        random_quality_score: u8,
    },
}
