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

//! Registration-weight formula and burn-factor schedule (§4.3).
//!
//! Both functions are free functions parameterized over the capability
//! traits from `entity_views` rather than methods on a struct that owns a
//! chain client — the calculator itself holds no state beyond its
//! [`WeightCalculatorConfig`].

mod config;
mod events;
pub mod sqrt;

pub use config::WeightCalculatorConfig;
pub use events::RegistrationWeightInfo;

use entity_views::{
    BlockNumber, ChillSource, EntityId, EntityManagerView, FeePercentageSchedule,
    PChainStakeMirrorView, SigningPolicySignInfo, WNatView,
};
use relay_primitives::{Address, RewardEpochId, U256};
use sqrt::pow_three_quarters;

#[derive(Debug, thiserror::Error)]
pub enum WeightCalculatorError {
    #[error("signing policy for the next reward epoch has not been signed yet")]
    SigningPolicyNotSignedYet,
}

/// §4.3 "Registration weight". Returns the voter's `s^{3/4}` weight and the
/// `VoterRegistrationInfo` event bundle.
#[allow(clippy::too_many_arguments)]
pub fn calculate_registration_weight(
    config: &WeightCalculatorConfig,
    entity_manager: &impl EntityManagerView,
    wnat: &impl WNatView,
    pchain_mirror: &impl PChainStakeMirrorView,
    chill: &impl ChillSource,
    fee_schedule: &impl FeePercentageSchedule,
    voter: Address,
    reward_epoch_id: RewardEpochId,
    vote_power_block: BlockNumber,
) -> (U256, RegistrationWeightInfo) {
    let node_ids = entity_manager.node_ids_of_at(voter, vote_power_block);
    let raw_node_stakes = pchain_mirror.batch_vote_power_at(&node_ids, vote_power_block);

    let mut staking_sum = U256::ZERO;
    let mut node_weights = Vec::with_capacity(node_ids.len());
    for (node_id, raw_stake) in node_ids.iter().zip(raw_node_stakes.iter()) {
        let chilled = reward_epoch_id < chill.chilled_until(EntityId::from(*node_id));
        let stake = if chilled { U256::ZERO } else { *raw_stake };
        staking_sum += stake;
        node_weights.push(stake);
    }

    let delegation_address = entity_manager.delegation_address_of_at(voter, vote_power_block);
    let delegation_chilled = reward_epoch_id < chill.chilled_until(EntityId::from(delegation_address));

    let (raw_wnat_vote_power, capped_wnat_vote_power) = if delegation_chilled {
        (U256::ZERO, U256::ZERO)
    } else {
        let total = wnat.total_vote_power_at(vote_power_block);
        let cap = total * U256::from(config.wnat_cap_ppm) / U256::from(relay_primitives::PPM_DENOMINATOR);
        let raw = wnat.vote_power_of_at(delegation_address, vote_power_block);
        let capped = if cap < raw { cap } else { raw };
        staking_sum += capped;
        (raw, capped)
    };

    let weight = pow_three_quarters(staking_sum);
    let fee_bips = fee_schedule.fee_bips_at(voter, reward_epoch_id);

    tracing::debug!(
        %voter,
        reward_epoch_id = reward_epoch_id.0,
        %staking_sum,
        %weight,
        "computed registration weight"
    );

    (
        weight,
        RegistrationWeightInfo {
            voter,
            reward_epoch_id,
            delegation_address,
            fee_bips,
            raw_wnat_vote_power,
            capped_wnat_vote_power,
            node_ids,
            node_weights,
        },
    )
}

/// §4.3 "Burn factor": a quadratic-in-missed-blocks penalty in `[0, 1e6]`.
pub fn burn_factor(
    config: &WeightCalculatorConfig,
    sign_info: &impl SigningPolicySignInfo,
    reward_epoch_id: RewardEpochId,
    voter: Address,
) -> Result<u32, WeightCalculatorError> {
    let signed_epoch = reward_epoch_id.next();
    let window = sign_info.sign_window_at(signed_epoch);

    if window.end_ts == 0 {
        return Err(WeightCalculatorError::SigningPolicyNotSignedYet);
    }
    if window.end_ts - window.start_ts <= config.sign_non_punishable_duration_seconds {
        return Ok(0);
    }

    let last_ok_block = window.start_block + config.sign_non_punishable_duration_blocks;
    if window.end_block <= last_ok_block {
        return Ok(0);
    }

    let mut sign_block = sign_info.voter_sign_block_at(signed_epoch, voter);
    if sign_block == 0 {
        sign_block = window.end_block;
    }
    if sign_block <= last_ok_block {
        return Ok(0);
    }

    let missed = sign_block - last_ok_block;
    if missed >= config.sign_no_rewards_duration_blocks {
        tracing::warn!(%voter, reward_epoch_id = reward_epoch_id.0, "maximum burn factor applied");
        return Ok(relay_primitives::PPM_DENOMINATOR);
    }

    let ppm = relay_primitives::PPM_DENOMINATOR as u64;
    let l = missed * ppm / config.sign_no_rewards_duration_blocks;
    Ok((l * l / ppm) as u32)
}
