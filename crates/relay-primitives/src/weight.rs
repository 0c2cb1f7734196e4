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

//! Normalized, fixed-budget 16-bit voter weight.

use derive_more::{Display, From, Into};

/// A per-voter weight normalized into the `[0, 2^16 - 1]` budget that a
/// [`signing_policy`] wire entry and a relay threshold are expressed in.
#[derive(
    Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Display, From, Into,
)]
pub struct NormalizedWeight(pub u16);

impl NormalizedWeight {
    /// `2^16 - 1`, the fixed-point budget that normalized weights sum into.
    pub const BUDGET: u32 = u16::MAX as u32;
}
