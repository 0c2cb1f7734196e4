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

/// Deploy-time constants consumed by [`crate::calculate_registration_weight`]
/// and [`crate::burn_factor`] (§6 "Configuration").
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WeightCalculatorConfig {
    /// `wNatCapPPM`, ≤ `1_000_000`.
    pub wnat_cap_ppm: u32,
    pub sign_non_punishable_duration_seconds: u64,
    pub sign_non_punishable_duration_blocks: u64,
    pub sign_no_rewards_duration_blocks: u64,
}

impl Default for WeightCalculatorConfig {
    fn default() -> Self {
        Self {
            wnat_cap_ppm: 25_000,
            sign_non_punishable_duration_seconds: 3 * 3600,
            sign_non_punishable_duration_blocks: 900,
            sign_no_rewards_duration_blocks: 432_000,
        }
    }
}
