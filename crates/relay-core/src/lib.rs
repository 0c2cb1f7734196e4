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

//! §4.2 Relay: the single `relay(input)` entry point, dispatching on
//! `input`'s length into the three modes described in the module doc below,
//! plus the read-side views of §6.
//!
//! The relay is generic over [`RelayStorage`] (`relay-kv`'s trait) rather
//! than owning a concrete store — `RelayCore` is constructed once per host
//! and is the single owner of the three persistent maps (§9 "Global mutable
//! state").

mod config;
mod error;
mod events;
mod sig_aggregate;

pub use config::RelayConfig;
pub use error::RelayError;
pub use events::RelayEvent;

use relay_crypto::Digest;
use relay_primitives::{RewardEpochId, VotingRoundId};
use relay_kv::RelayStorage;
use signing_policy::PolicyView;

/// Size, in bytes, of the mode-3 protocol message header (§4.2).
const MESSAGE_LEN: usize = 38;
/// Size, in bytes, of one aggregated signature entry (§4.2).
const SIGNATURE_LEN: usize = 67;
/// `protocolId` discriminator value that selects mode 2 (policy rotation).
const ROTATION_DISCRIMINATOR: u8 = 0;

/// The committee-verified root of an accepted mode-3 submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProtocolMessage {
    pub protocol_id: u8,
    pub voting_round_id: VotingRoundId,
    pub random_quality_score: u8,
    pub merkle_root: Digest,
}

/// `rewardEpochIdFromVotingRoundId` (§4.2): integer division of the voting
/// round offset from `firstRewardEpochVotingRoundId` by the epoch duration.
/// A voting round id earlier than the configured origin has no reward
/// epoch; this is treated as a [`RelayError::WrongSignPolicyRewardEpoch`]
/// rather than panicking on underflow.
fn reward_epoch_id_from_voting_round_id(
    config: &RelayConfig,
    voting_round_id: VotingRoundId,
) -> Result<RewardEpochId, RelayError> {
    let offset = voting_round_id
        .0
        .checked_sub(config.first_reward_epoch_voting_round_id)
        .ok_or(RelayError::WrongSignPolicyRewardEpoch)?;
    Ok(RewardEpochId(offset / config.reward_epoch_duration_in_epochs))
}

/// `RelayCore` owns the three persistent maps of §3 `RelayState` behind a
/// pluggable [`RelayStorage`] and exposes the byte-exact `relay(input)`
/// entry point plus the read-side views of §6.
pub struct RelayCore<S: RelayStorage> {
    config: RelayConfig,
    storage: S,
}

impl<S: RelayStorage> RelayCore<S> {
    pub fn new(config: RelayConfig, storage: S) -> Self {
        Self { config, storage }
    }

    pub fn policy_hash(&self, reward_epoch_id: RewardEpochId) -> Option<Digest> {
        self.storage.policy_hash(reward_epoch_id)
    }

    pub fn merkle_root(&self, protocol_id: u8, voting_round_id: VotingRoundId) -> Option<Digest> {
        self.storage.merkle_root(protocol_id, voting_round_id)
    }

    pub fn last_initialized_reward_epoch(&self) -> Option<RewardEpochId> {
        self.storage.last_initialized_reward_epoch()
    }

    /// The sole entry point (§6 "Relay call encoding"): dispatches on
    /// `input`'s length and the byte at the reference policy's end into
    /// mode 1 (install), mode 2 (rotation), or mode 3 (protocol message).
    /// All-or-nothing: on error no storage write has happened (§5).
    pub fn relay(&self, input: &[u8]) -> Result<Vec<RelayEvent>, RelayError> {
        let ref_len = PolicyView::peek_wire_len(input)?;
        if input.len() == ref_len {
            return self.relay_install(PolicyView::parse(&input[..ref_len])?);
        }

        if input.len() < ref_len {
            return Err(RelayError::InvalidPolicyLength);
        }
        let reference = PolicyView::parse(&input[..ref_len])?;
        let stored_hash = self
            .storage
            .policy_hash(RewardEpochId(reference.reward_epoch_id()))
            .ok_or(RelayError::PolicyHashMismatch)?;
        if stored_hash != reference.hash() {
            return Err(RelayError::PolicyHashMismatch);
        }

        if input.len() < ref_len + 1 {
            return Err(RelayError::TooShortMessage);
        }
        let discriminator = input[ref_len];

        if discriminator == ROTATION_DISCRIMINATOR {
            self.relay_rotation(&reference, input, ref_len)
        } else {
            self.relay_protocol_message(&reference, input, ref_len)
        }
    }

    fn relay_install(&self, reference: PolicyView<'_>) -> Result<Vec<RelayEvent>, RelayError> {
        let reward_epoch_id = RewardEpochId(reference.reward_epoch_id());
        if self.storage.last_initialized_reward_epoch().is_some()
            || self.storage.policy_hash(reward_epoch_id).is_some()
        {
            return Err(RelayError::AlreadyInitialized);
        }

        let hash = reference.hash();
        self.storage.set_last_initialized_reward_epoch(reward_epoch_id);
        self.storage.set_policy_hash(reward_epoch_id, hash);

        tracing::debug!(reward_epoch_id = reward_epoch_id.0, %hash, "installed initial signing policy");
        Ok(vec![RelayEvent::PolicyInstalled { reward_epoch_id, hash }])
    }

    fn relay_rotation(
        &self,
        reference: &PolicyView<'_>,
        input: &[u8],
        ref_len: usize,
    ) -> Result<Vec<RelayEvent>, RelayError> {
        if input.len() < ref_len + 1 + signing_policy::HEADER_LEN {
            return Err(RelayError::NoNewSignPolicySize);
        }
        let new_policy_header = &input[ref_len + 1..];
        let new_len = PolicyView::peek_wire_len(new_policy_header)?;
        if input.len() < ref_len + 1 + new_len {
            return Err(RelayError::WrongSizeForNewSignPolicy);
        }
        let new_policy = PolicyView::parse(&input[ref_len + 1..ref_len + 1 + new_len])?;

        let last = self.storage.last_initialized_reward_epoch().unwrap_or_default();
        if new_policy.reward_epoch_id() != last.next().0 {
            return Err(RelayError::NotNextRewardEpoch);
        }

        let digest = new_policy.hash().eip191();
        let signature_start = ref_len + 1 + new_len;
        sig_aggregate::verify_weight(reference, &input[signature_start..], digest, reference.threshold() as u64)?;

        let new_epoch = RewardEpochId(new_policy.reward_epoch_id());
        let new_hash = new_policy.hash();
        self.storage.set_last_initialized_reward_epoch(new_epoch);
        self.storage.set_policy_hash(new_epoch, new_hash);

        tracing::debug!(reward_epoch_id = new_epoch.0, %new_hash, "rotated signing policy");
        Ok(vec![RelayEvent::PolicyRotated { reward_epoch_id: new_epoch, hash: new_hash }])
    }

    fn relay_protocol_message(
        &self,
        reference: &PolicyView<'_>,
        input: &[u8],
        ref_len: usize,
    ) -> Result<Vec<RelayEvent>, RelayError> {
        if input.len() < ref_len + MESSAGE_LEN {
            return Err(RelayError::TooShortMessage);
        }
        let message_bytes = &input[ref_len..ref_len + MESSAGE_LEN];
        let message = ProtocolMessage {
            protocol_id: message_bytes[0],
            voting_round_id: VotingRoundId(u32::from_be_bytes(message_bytes[1..5].try_into().unwrap())),
            random_quality_score: message_bytes[5],
            merkle_root: Digest(message_bytes[6..38].try_into().unwrap()),
        };

        let ref_epoch = RewardEpochId(reference.reward_epoch_id());
        let message_epoch = reward_epoch_id_from_voting_round_id(&self.config, message.voting_round_id)?;
        if message_epoch < ref_epoch || message_epoch > ref_epoch.next() {
            return Err(RelayError::WrongSignPolicyRewardEpoch);
        }
        if message_epoch == ref_epoch && message.voting_round_id.0 < reference.starting_voting_round_id() {
            return Err(RelayError::DelayedSignPolicy);
        }

        let threshold = if message_epoch == ref_epoch.next() {
            (reference.threshold() as u64 * self.config.threshold_increase_percent as u64) / 100
        } else {
            reference.threshold() as u64
        };

        let digest = Digest::keccak256(message_bytes).eip191();
        let signature_start = ref_len + MESSAGE_LEN;
        sig_aggregate::verify_weight(reference, &input[signature_start..], digest, threshold)?;

        // §9 Open Question: a re-submission over an already-set root is
        // treated as intentional (late re-attestation under a rotated
        // committee) and silently overwrites, matching the source relay.
        self.storage
            .set_merkle_root(message.protocol_id, message.voting_round_id, message.merkle_root);

        tracing::debug!(
            protocol_id = message.protocol_id,
            voting_round_id = message.voting_round_id.0,
            root = %message.merkle_root,
            "confirmed merkle root"
        );
        Ok(vec![RelayEvent::MerkleRootConfirmed {
            protocol_id: message.protocol_id,
            voting_round_id: message.voting_round_id,
            root: message.merkle_root,
            random_quality_score: message.random_quality_score,
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_crypto::{PrivateKey, Signature};
    use relay_kv::InMemoryRelayStorage;
    use relay_primitives::Address;
    use signing_policy::{SigningPolicy, Voter};

    fn key(byte: u8) -> PrivateKey {
        PrivateKey([byte; 32])
    }

    fn address(byte: u8) -> Address {
        relay_crypto::PublicKey::from(key(byte)).to_address()
    }

    fn policy(reward_epoch_id: u32, starting_voting_round_id: u32, threshold: u16, weights: &[(u8, u16)]) -> SigningPolicy {
        SigningPolicy {
            reward_epoch_id,
            starting_voting_round_id,
            threshold,
            random_seed: [0xab; 32],
            voters: weights
                .iter()
                .map(|(k, w)| Voter { address: address(*k), weight: *w })
                .collect(),
        }
    }

    fn sign(policy_digest: Digest, signer_key_byte: u8, index: u16) -> [u8; SIGNATURE_LEN] {
        let sig = Signature::create(key(signer_key_byte), policy_digest).unwrap();
        let mut out = [0u8; SIGNATURE_LEN];
        out[..65].copy_from_slice(&sig.to_v_r_s_bytes());
        out[65..].copy_from_slice(&index.to_be_bytes());
        out
    }

    fn core() -> RelayCore<InMemoryRelayStorage> {
        RelayCore::new(RelayConfig::default(), InMemoryRelayStorage::new())
    }

    #[test]
    fn genesis_install_then_reject_second_install() {
        let relay = core();
        let p0 = policy(0, 0, 500, &[(1, 300), (2, 300), (3, 400)]);
        let events = relay.relay(&p0.encode()).unwrap();
        assert_eq!(events, vec![RelayEvent::PolicyInstalled { reward_epoch_id: RewardEpochId(0), hash: p0.hash() }]);
        assert_eq!(relay.policy_hash(RewardEpochId(0)), Some(p0.hash()));

        let err = relay.relay(&p0.encode()).unwrap_err();
        assert!(matches!(err, RelayError::AlreadyInitialized));
    }

    #[test]
    fn rotation_with_exact_threshold_succeeds() {
        let relay = core();
        let p0 = policy(0, 0, 500, &[(1, 300), (2, 300), (3, 400)]);
        relay.relay(&p0.encode()).unwrap();

        let p1 = policy(1, 1000, 200, &[(4, 150), (5, 150)]);
        let digest = p1.hash().eip191();

        let mut input = p0.encode();
        input.push(0); // rotation discriminator
        input.extend_from_slice(&p1.encode());
        input.extend_from_slice(&sign(digest, 1, 0));
        input.extend_from_slice(&sign(digest, 3, 2));

        let events = relay.relay(&input).unwrap();
        assert_eq!(
            events,
            vec![RelayEvent::PolicyRotated { reward_epoch_id: RewardEpochId(1), hash: p1.hash() }]
        );
        assert_eq!(relay.last_initialized_reward_epoch(), Some(RewardEpochId(1)));
    }

    #[test]
    fn rotation_with_insufficient_weight_fails() {
        let relay = core();
        let p0 = policy(0, 0, 500, &[(1, 300), (2, 300), (3, 400)]);
        relay.relay(&p0.encode()).unwrap();

        let p1 = policy(1, 1000, 200, &[(4, 150), (5, 150)]);
        let digest = p1.hash().eip191();

        let mut input = p0.encode();
        input.push(0);
        input.extend_from_slice(&p1.encode());
        input.extend_from_slice(&sign(digest, 1, 0));

        let err = relay.relay(&input).unwrap_err();
        assert!(matches!(err, RelayError::NotEnoughWeight));
    }

    #[test]
    fn protocol_message_commits_root() {
        let relay = core();
        let p0 = policy(0, 0, 500, &[(1, 300), (2, 300), (3, 400)]);
        relay.relay(&p0.encode()).unwrap();

        let message = {
            let mut m = Vec::with_capacity(MESSAGE_LEN);
            m.push(7u8); // protocolId
            m.extend_from_slice(&10u32.to_be_bytes()); // votingRoundId, epoch 0 since default duration=5
            m.push(1); // randomQualityScore
            m.extend_from_slice(&[0x42; 32]);
            m
        };
        let digest = Digest::keccak256(&message).eip191();

        let mut input = p0.encode();
        input.extend_from_slice(&message);
        input.extend_from_slice(&sign(digest, 1, 0));
        input.extend_from_slice(&sign(digest, 2, 1));

        let events = relay.relay(&input).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(relay.merkle_root(7, VotingRoundId(10)), Some(Digest([0x42; 32])));
    }

    #[test]
    fn cross_committee_relay_raises_threshold() {
        let relay = core();
        let p0 = policy(0, 0, 500, &[(1, 300), (2, 300), (3, 400)]);
        relay.relay(&p0.encode()).unwrap();

        // default reward_epoch_duration_in_epochs = 5, so voting round 6 is epoch 1.
        let message = {
            let mut m = Vec::with_capacity(MESSAGE_LEN);
            m.push(7u8);
            m.extend_from_slice(&6u32.to_be_bytes());
            m.push(1);
            m.extend_from_slice(&[0x99; 32]);
            m
        };
        let digest = Digest::keccak256(&message).eip191();

        // threshold' = floor(500 * 120 / 100) = 600; voters 1+2+3 = 1000 > 600 needed.
        let mut under = p0.encode();
        under.extend_from_slice(&message);
        under.extend_from_slice(&sign(digest, 1, 0));
        under.extend_from_slice(&sign(digest, 2, 1));
        let err = relay.relay(&under).unwrap_err();
        assert!(matches!(err, RelayError::NotEnoughWeight));

        let mut ok = p0.encode();
        ok.extend_from_slice(&message);
        ok.extend_from_slice(&sign(digest, 1, 0));
        ok.extend_from_slice(&sign(digest, 2, 1));
        ok.extend_from_slice(&sign(digest, 3, 2));
        relay.relay(&ok).unwrap();
        assert_eq!(relay.merkle_root(7, VotingRoundId(6)), Some(Digest([0x99; 32])));
    }

    #[test]
    fn out_of_order_index_rejected_even_if_weight_would_suffice() {
        let relay = core();
        let p0 = policy(0, 0, 500, &[(1, 300), (2, 300), (3, 400)]);
        relay.relay(&p0.encode()).unwrap();

        let message = {
            let mut m = Vec::with_capacity(MESSAGE_LEN);
            m.push(7u8);
            m.extend_from_slice(&10u32.to_be_bytes());
            m.push(1);
            m.extend_from_slice(&[0x1; 32]);
            m
        };
        let digest = Digest::keccak256(&message).eip191();

        let mut input = p0.encode();
        input.extend_from_slice(&message);
        input.extend_from_slice(&sign(digest, 3, 2)); // index 2 first
        input.extend_from_slice(&sign(digest, 1, 0)); // then index 0: out of order

        let err = relay.relay(&input).unwrap_err();
        assert!(matches!(err, RelayError::IndexOutOfOrder));
    }

    #[test]
    fn delayed_sign_policy_rejected() {
        let relay = core();
        let p0 = policy(0, 1000, 500, &[(1, 300), (2, 300), (3, 400)]);
        relay.relay(&p0.encode()).unwrap();

        let message = {
            let mut m = Vec::with_capacity(MESSAGE_LEN);
            m.push(7u8);
            m.extend_from_slice(&5u32.to_be_bytes()); // before starting_voting_round_id
            m.push(1);
            m.extend_from_slice(&[0x1; 32]);
            m
        };
        let digest = Digest::keccak256(&message).eip191();

        let mut input = p0.encode();
        input.extend_from_slice(&message);
        input.extend_from_slice(&sign(digest, 1, 0));
        input.extend_from_slice(&sign(digest, 2, 1));

        let err = relay.relay(&input).unwrap_err();
        assert!(matches!(err, RelayError::DelayedSignPolicy));
    }
}
