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

//! Wires `relay-core`, `voter-registry`, `voter-preregistry`,
//! `weight-calculator`, `submission-gate`, and the `entity-views` fakes
//! together end-to-end, driving the §8 concrete scenarios against the full
//! stack rather than any single crate in isolation.
//!
//! This crate's public API ([`build_signing_policy`],
//! [`assemble_rotation_calldata`]) exists to host integration tests; a real
//! host wires these crates itself and does not depend on `relay-harness`.

use anyhow::Context;
use relay_primitives::{Address, RewardEpochId};
use signing_policy::{SigningPolicy, Voter};
use voter_registry::SigningPolicySnapshot;

/// Turns a [`VoterRegistry`](voter_registry::VoterRegistry) snapshot into a
/// governance-ready [`SigningPolicy`] ready for `RelayCore::relay`. Bridging
/// the registry's read-side view and the wire codec is left to the host in
/// both source systems and here; this is the obvious glue, not a new
/// abstraction.
pub fn build_signing_policy(
    reward_epoch_id: RewardEpochId,
    starting_voting_round_id: u32,
    threshold: u16,
    random_seed: [u8; 32],
    snapshot: &SigningPolicySnapshot,
) -> SigningPolicy {
    let voters = snapshot
        .signing_addresses
        .iter()
        .zip(snapshot.normalized_weights.iter())
        .map(|(address, weight)| Voter { address: *address, weight: *weight })
        .collect();

    SigningPolicy { reward_epoch_id: reward_epoch_id.0, starting_voting_round_id, threshold, random_seed, voters }
}

/// Splices a mode-2 rotation payload: `reference || 0x00 || new_policy ||
/// signatures`. Checks both policies' §3 invariants up front with
/// `anyhow::Context` so a malformed test fixture fails at assembly time with
/// a pointed message, rather than surfacing as an opaque `RelayError` three
/// frames into `RelayCore::relay` — this is the one spot in the workspace
/// where `anyhow` is appropriate (an integration-harness convenience, not a
/// library error type; see SPEC_FULL.md §1).
pub fn assemble_rotation_calldata(
    reference: &SigningPolicy,
    new_policy: &SigningPolicy,
    signatures: &[[u8; 67]],
) -> anyhow::Result<Vec<u8>> {
    reference
        .check_invariants()
        .context("reference signing policy violates its §3 invariants")?;
    new_policy
        .check_invariants()
        .context("new signing policy violates its §3 invariants")?;

    let mut calldata = reference.encode();
    calldata.push(0); // rotation discriminator
    calldata.extend_from_slice(&new_policy.encode());
    for signature in signatures {
        calldata.extend_from_slice(signature);
    }
    Ok(calldata)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address_for(byte: u8) -> Address {
        relay_crypto::PublicKey::from(relay_crypto::PrivateKey([byte; 32])).to_address()
    }
    use entity_views::mock::{FakeChillSource, FakeEntityManager, FakeFeeSchedule, FakePChainStakeMirror, FakeWNat};
    use entity_views::{EntityId, NodeId};
    use relay_core::{RelayConfig, RelayCore, RelayEvent};
    use relay_crypto::{Digest, PrivateKey, Signature};
    use relay_kv::InMemoryRelayStorage;
    use relay_primitives::U256;
    use std::sync::Arc;
    use submission_gate::{SubmissionGate, SubmissionGateConfig};
    use voter_preregistry::VoterPreRegistry;
    use voter_registry::{Dependencies, VoterRegistry, VoterRegistryConfig, VoterRegistryEvent};
    use weight_calculator::WeightCalculatorConfig;

    fn key(byte: u8) -> PrivateKey {
        PrivateKey([byte; 32])
    }

    struct Stack {
        registry: VoterRegistry,
        entity_manager: Arc<FakeEntityManager>,
        wnat: Arc<FakeWNat>,
        pchain_mirror: Arc<FakePChainStakeMirror>,
        chill: Arc<FakeChillSource>,
    }

    fn stack(max_voters: u16) -> Stack {
        let entity_manager = Arc::new(FakeEntityManager::new());
        let wnat = Arc::new(FakeWNat::new());
        let pchain_mirror = Arc::new(FakePChainStakeMirror::new());
        let chill = Arc::new(FakeChillSource::new());
        let registry = VoterRegistry::new(VoterRegistryConfig { max_voters }, WeightCalculatorConfig::default());
        registry.set_dependencies(Dependencies {
            entity_manager: entity_manager.clone(),
            wnat: wnat.clone(),
            pchain_mirror: pchain_mirror.clone(),
            chill_table: chill.clone(),
            fee_schedule: Arc::new(FakeFeeSchedule::new(0)),
        });
        Stack { registry, entity_manager, wnat, pchain_mirror, chill }
    }

    fn prepare(stack: &Stack, block: u64, key_byte: u8, wnat_power: u64) -> Address {
        let voter = address_for(key_byte);
        stack.entity_manager.set_signing(voter, block, voter);
        stack.entity_manager.set_submit(voter, block, voter);
        stack.entity_manager.set_submit_signatures(voter, block, voter);
        stack.entity_manager.set_delegation(voter, block, voter);
        stack.wnat.set_total_vote_power(block, U256::from(1_000_000u64));
        stack.wnat.set_vote_power(voter, block, U256::from(wnat_power));
        voter
    }

    fn sign_entry(digest: Digest, key_byte: u8, index: u16) -> [u8; 67] {
        let sig = Signature::create(key(key_byte), digest).unwrap();
        let mut out = [0u8; 67];
        out[..65].copy_from_slice(&sig.to_v_r_s_bytes());
        out[65..].copy_from_slice(&index.to_be_bytes());
        out
    }

    /// Scenario 1+2 end to end: voters register into epoch 0 through the
    /// full weight-calculator path, the registry snapshots a signing
    /// policy, the policy is installed as genesis, a second committee
    /// registers into epoch 1, and the relay rotates to it on sufficient
    /// aggregated weight.
    #[test]
    fn full_epoch_lifecycle_installs_then_rotates() {
        let s0 = stack(10);
        let epoch0 = RewardEpochId(0);
        s0.registry.set_new_signing_policy_initialization_start_block_number(epoch0, 100).unwrap();
        s0.registry.open_registration(epoch0, 100).unwrap();

        let v1 = prepare(&s0, 100, 1, 300_000);
        let v2 = prepare(&s0, 100, 2, 300_000);
        let v3 = prepare(&s0, 100, 3, 400_000);
        for v in [v1, v2, v3] {
            s0.registry.system_registration(epoch0, v).unwrap();
        }

        let snapshot0 = s0.registry.create_signing_policy_snapshot(epoch0).unwrap();
        let p0 = build_signing_policy(epoch0, 0, 400, [0xaa; 32], &snapshot0);

        let relay = RelayCore::new(RelayConfig::default(), InMemoryRelayStorage::new());
        let events = relay.relay(&p0.encode()).unwrap();
        assert_eq!(events, vec![RelayEvent::PolicyInstalled { reward_epoch_id: epoch0, hash: p0.hash() }]);

        // Epoch 1 committee registers against the same stack's epoch-1 slot.
        let epoch1 = epoch0.next();
        s0.registry.set_new_signing_policy_initialization_start_block_number(epoch1, 200).unwrap();
        s0.registry.open_registration(epoch1, 200).unwrap();
        let w1 = prepare(&s0, 200, 4, 500_000);
        let w2 = prepare(&s0, 200, 5, 500_000);
        for v in [w1, w2] {
            s0.registry.system_registration(epoch1, v).unwrap();
        }
        let snapshot1 = s0.registry.create_signing_policy_snapshot(epoch1).unwrap();
        let p1 = build_signing_policy(epoch1, 2000, 300, [0xbb; 32], &snapshot1);

        let digest = p1.hash().eip191();
        // All three p0 voters sign; their combined normalized weight is
        // comfortably above p0's threshold of 400.
        let signatures = [
            sign_entry(digest, 1, 0),
            sign_entry(digest, 2, 1),
            sign_entry(digest, 3, 2),
        ];
        let input = assemble_rotation_calldata(&p0, &p1, &signatures).unwrap();

        let events = relay.relay(&input).unwrap();
        assert_eq!(events, vec![RelayEvent::PolicyRotated { reward_epoch_id: epoch1, hash: p1.hash() }]);
        assert_eq!(relay.last_initialized_reward_epoch(), Some(epoch1));
    }

    #[test]
    fn assemble_rotation_calldata_rejects_invariant_violation() {
        let mut p0 = SigningPolicy {
            reward_epoch_id: 0,
            starting_voting_round_id: 0,
            threshold: 500,
            random_seed: [0xaa; 32],
            voters: vec![Voter { address: address_for(1), weight: 300 }],
        };
        let p1 = SigningPolicy { reward_epoch_id: 1, threshold: 100, ..p0.clone() };
        // p0's threshold (500) is not strictly below its weight sum (300): invalid.
        let err = assemble_rotation_calldata(&p0, &p1, &[]).unwrap_err();
        assert!(err.to_string().contains("reference"));

        p0.threshold = 100;
        assemble_rotation_calldata(&p0, &p1, &[]).unwrap();
    }

    /// Scenario 6: a voter with one node whose stake is chilled for the
    /// registration epoch contributes zero from that node, reflected both
    /// in the registered weight and the emitted event's `node_weights`.
    #[test]
    fn chilled_node_contributes_zero_weight() {
        let s = stack(10);
        let epoch = RewardEpochId(0);
        s.registry.set_new_signing_policy_initialization_start_block_number(epoch, 50).unwrap();
        s.registry.open_registration(epoch, 50).unwrap();

        let voter = prepare(&s, 50, 1, 500_000);
        let node = NodeId([7; 20]);
        s.entity_manager.set_nodes(voter, 50, vec![node]);
        s.pchain_mirror.set_vote_power(node, 50, U256::from(50_000u64));
        s.chill.set_chilled(EntityId::from(node), epoch.next());

        let events = s.registry.system_registration(epoch, voter).unwrap();
        let registered = events
            .into_iter()
            .find_map(|e| match e {
                VoterRegistryEvent::VoterRegistered { node_weights, .. } => Some(node_weights),
                _ => None,
            })
            .unwrap();
        assert_eq!(registered, vec![U256::ZERO]);
    }

    /// Pre-registration and the epoch-manager-triggered replay into the
    /// registry, wired through `submission-gate`'s `initNewVotingRound` as
    /// the signal that a new voting round (and hence the next epoch's
    /// registration window) has begun.
    #[test]
    fn preregistration_replays_into_registry_on_trigger() {
        let s = stack(10);
        let epoch0 = RewardEpochId(0);
        s.registry.set_new_signing_policy_initialization_start_block_number(epoch0, 10).unwrap();
        s.registry.open_registration(epoch0, 10).unwrap();
        let voter = prepare(&s, 10, 9, 100_000);
        s.registry.system_registration(epoch0, voter).unwrap();

        let preregistry = VoterPreRegistry::new(s.entity_manager.clone());
        let epoch1 = epoch0.next();
        let digest = voter_registry::registration_digest(epoch1, voter);
        let sig = Signature::create(key(9), digest).unwrap();
        preregistry.pre_register_voter(&s.registry, epoch1, voter, sig).unwrap();

        let epoch_manager = Address([0x42; 20]);
        let gate = SubmissionGate::new(SubmissionGateConfig {
            governance: Address([0x01; 20]),
            epoch_manager,
            submit3_enabled: false,
            pass_target: Address::ZERO,
            pass_selector: [0; 4],
        });
        gate.init_new_voting_round(epoch_manager, Address([1; 20]), Address([2; 20]), Address([3; 20]), Address([4; 20]))
            .unwrap();

        s.registry.set_new_signing_policy_initialization_start_block_number(epoch1, 20).unwrap();
        s.registry.open_registration(epoch1, 20).unwrap();
        prepare(&s, 20, 9, 100_000);

        let (registry_events, failures) = preregistry.trigger_voter_registration(&s.registry, epoch1);
        assert!(failures.is_empty());
        assert!(registry_events.iter().any(|e| matches!(e, VoterRegistryEvent::VoterRegistered { .. })));
        assert!(s.registry.is_registered(voter, epoch1));
    }
}
