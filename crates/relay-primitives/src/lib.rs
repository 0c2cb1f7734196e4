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

//! Primitive types shared by every crate in the signing-relay workspace:
//! the 20-byte Ethereum-style address, the fixed-point weight types used by
//! the voter registry and weight calculator, and the reward-epoch/voting-round
//! index newtypes.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod address;
mod epoch;
mod weight;

pub use address::Address;
pub use alloy_primitives::U256;
pub use epoch::{RewardEpochId, VotingRoundId};
pub use weight::NormalizedWeight;

/// Parts-per-million fixed-point fraction, as used for `wNatCapPPM`.
pub const PPM_DENOMINATOR: u32 = 1_000_000;

/// Basis points fixed-point fraction, as used for fee percentages.
pub const BIPS_DENOMINATOR: u32 = 10_000;

/// Largest value a normalized per-voter weight (and the policy threshold) can take.
pub const MAX_U16_WEIGHT: u32 = u16::MAX as u32;
