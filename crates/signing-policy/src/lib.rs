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

//! §4.1 SigningPolicy codec.
//!
//! The wire format is packed, big-endian, with no alignment padding:
//!
//! ```text
//! offset  size  field
//! 0       2     N                         (number of voters)
//! 2       3     rewardEpochId
//! 5       4     startingVotingRoundId
//! 9       2     threshold
//! 11      32    randomSeed
//! 43      22·N  N × (address[20] || weight[2])
//! ```
//!
//! [`PolicyView`] is a zero-copy accessor over an immutable input buffer —
//! the relay hashes and verifies against raw calldata without ever copying
//! it into an owned [`SigningPolicy`]. [`SigningPolicy`] itself is the owned
//! form used by governance/voter-registry code that constructs new policies.

use relay_crypto::Digest;
use relay_primitives::Address;

/// Size, in bytes, of the fixed-length header (everything before the voter list).
pub const HEADER_LEN: usize = 43;
/// Size, in bytes, of one packed `(address, weight)` voter entry.
pub const VOTER_ENTRY_LEN: usize = 22;

/// Total wire length of a policy with `n` voters.
pub const fn wire_len(n: u16) -> usize {
    HEADER_LEN + VOTER_ENTRY_LEN * n as usize
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PolicyCodecError {
    /// Fewer than [`HEADER_LEN`] bytes — the voter count/header fields
    /// cannot even be read.
    #[error("Invalid sign policy metadata")]
    InvalidMetadata,
    /// The buffer's length does not equal `wire_len(n)` for the declared `n`.
    #[error("Invalid sign policy length")]
    InvalidLength,
}

/// One packed `(address, weight)` entry of a signing policy's voter list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Voter {
    pub address: Address,
    pub weight: u16,
}

/// The owned form of a signing policy, as constructed by governance
/// (mode 1) or by a reward-epoch snapshot (mode 2's new policy).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningPolicy {
    pub reward_epoch_id: u32,
    pub starting_voting_round_id: u32,
    pub threshold: u16,
    pub random_seed: [u8; 32],
    pub voters: Vec<Voter>,
}

impl SigningPolicy {
    /// Encodes `self` into the exact `43 + 22·N` byte wire layout.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(wire_len(self.voters.len() as u16));
        out.extend_from_slice(&(self.voters.len() as u16).to_be_bytes());
        out.extend_from_slice(&self.reward_epoch_id.to_be_bytes()[1..]); // low 3 bytes
        out.extend_from_slice(&self.starting_voting_round_id.to_be_bytes());
        out.extend_from_slice(&self.threshold.to_be_bytes());
        out.extend_from_slice(&self.random_seed);
        for voter in &self.voters {
            out.extend_from_slice(voter.address.as_ref());
            out.extend_from_slice(&voter.weight.to_be_bytes());
        }
        out
    }

    /// Decodes a policy, failing only on a length mismatch against the
    /// declared voter count — §4.1 does not ask the codec to enforce the
    /// sum/threshold/uniqueness invariants of §3, those are the caller's
    /// responsibility (see [`SigningPolicy::check_invariants`]).
    pub fn decode(bytes: &[u8]) -> Result<Self, PolicyCodecError> {
        PolicyView::parse(bytes).map(|view| view.to_owned())
    }

    pub fn hash(&self) -> Digest {
        Digest::keccak256(&self.encode())
    }

    pub fn wire_len(&self) -> usize {
        wire_len(self.voters.len() as u16)
    }

    /// Checks the §3 data-model invariants that the codec itself does not
    /// enforce: non-empty, unique addresses, weights summing within the
    /// 16-bit budget, and a threshold strictly below that sum.
    pub fn check_invariants(&self) -> Result<(), PolicyInvariantError> {
        if self.voters.is_empty() {
            return Err(PolicyInvariantError::Empty);
        }

        let mut seen = std::collections::BTreeSet::new();
        let mut sum: u32 = 0;
        for voter in &self.voters {
            if !seen.insert(voter.address) {
                return Err(PolicyInvariantError::DuplicateAddress(voter.address));
            }
            sum += voter.weight as u32;
        }

        if sum > relay_primitives::MAX_U16_WEIGHT {
            return Err(PolicyInvariantError::WeightOverflow);
        }
        if self.threshold as u32 >= sum {
            return Err(PolicyInvariantError::ThresholdNotBelowSum);
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PolicyInvariantError {
    #[error("signing policy has no voters")]
    Empty,
    #[error("duplicate voter address {0}")]
    DuplicateAddress(Address),
    #[error("voter weights sum above the 2^16-1 budget")]
    WeightOverflow,
    #[error("threshold is not strictly below the weight sum")]
    ThresholdNotBelowSum,
}

/// A zero-copy view over a byte buffer known (or claimed) to hold a packed
/// signing policy. Every accessor reads directly out of the backing slice;
/// [`PolicyView::hash`] hashes the exact backing range, never a re-encoded
/// copy.
#[derive(Clone, Copy)]
pub struct PolicyView<'a> {
    bytes: &'a [u8],
}

impl<'a> PolicyView<'a> {
    /// Reads the voter count and derives `wire_len(n)` from the first two
    /// bytes of `bytes`, without requiring `bytes` to be exactly that long.
    /// Used by the relay to learn where the reference policy ends before it
    /// knows the overall input length.
    pub fn peek_wire_len(bytes: &[u8]) -> Result<usize, PolicyCodecError> {
        if bytes.len() < HEADER_LEN {
            return Err(PolicyCodecError::InvalidMetadata);
        }
        let n = u16::from_be_bytes([bytes[0], bytes[1]]);
        Ok(wire_len(n))
    }

    /// Parses `bytes` as a policy, requiring its length to match exactly
    /// `wire_len(n)` for the declared `n`.
    pub fn parse(bytes: &'a [u8]) -> Result<Self, PolicyCodecError> {
        let expected = Self::peek_wire_len(bytes)?;
        if bytes.len() != expected {
            return Err(PolicyCodecError::InvalidLength);
        }
        Ok(Self { bytes })
    }

    pub fn voter_count(&self) -> u16 {
        u16::from_be_bytes([self.bytes[0], self.bytes[1]])
    }

    pub fn reward_epoch_id(&self) -> u32 {
        u32::from_be_bytes([0, self.bytes[2], self.bytes[3], self.bytes[4]])
    }

    pub fn starting_voting_round_id(&self) -> u32 {
        u32::from_be_bytes(self.bytes[5..9].try_into().unwrap())
    }

    pub fn threshold(&self) -> u16 {
        u16::from_be_bytes([self.bytes[9], self.bytes[10]])
    }

    pub fn random_seed(&self) -> [u8; 32] {
        self.bytes[11..43].try_into().unwrap()
    }

    fn voter_offset(index: u16) -> usize {
        HEADER_LEN + VOTER_ENTRY_LEN * index as usize
    }

    pub fn voter_address(&self, index: u16) -> Address {
        let off = Self::voter_offset(index);
        let mut out = [0u8; 20];
        out.copy_from_slice(&self.bytes[off..off + 20]);
        Address(out)
    }

    pub fn voter_weight(&self, index: u16) -> u16 {
        let off = Self::voter_offset(index) + 20;
        u16::from_be_bytes([self.bytes[off], self.bytes[off + 1]])
    }

    /// keccak256 over the exact backing byte range — this is `hash(policy)`.
    pub fn hash(&self) -> Digest {
        Digest::keccak256(self.bytes)
    }

    pub fn wire_len(&self) -> usize {
        self.bytes.len()
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn to_owned(&self) -> SigningPolicy {
        let n = self.voter_count();
        SigningPolicy {
            reward_epoch_id: self.reward_epoch_id(),
            starting_voting_round_id: self.starting_voting_round_id(),
            threshold: self.threshold(),
            random_seed: self.random_seed(),
            voters: (0..n)
                .map(|i| Voter {
                    address: self.voter_address(i),
                    weight: self.voter_weight(i),
                })
                .collect(),
        }
    }
}
