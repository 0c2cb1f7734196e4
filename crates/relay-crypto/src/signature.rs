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

//! Recoverable ECDSA signatures over a pre-hashed digest.

use crate::{
    digest::Digest,
    keys::{PrivateKey, PublicKey},
};
use derive_more::{Debug, Display};
use k256::ecdsa::{
    self, RecoveryId, SigningKey, VerifyingKey, signature::hazmat::PrehashVerifier,
};

/// Error produced while creating, recovering, or verifying a signature.
#[derive(Debug, thiserror::Error)]
pub enum SignatureError {
    #[error("ecrecover error")]
    Recovery,
    #[error("wrong signature")]
    Verification,
    #[error("malformed signature bytes")]
    Malformed,
}

type Result<T> = core::result::Result<T, SignatureError>;

/// A recoverable secp256k1 ECDSA signature, in `v || r || s` wire order
/// (matching the relay's §4.2 67-byte aggregation entry, whose trailing two
/// bytes are a separate voter index, not part of this type).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Display)]
#[debug("0x{}", hex::encode(self.to_v_r_s_bytes()))]
#[display("0x{}", hex::encode(self.to_v_r_s_bytes()))]
pub struct Signature {
    inner: ecdsa::Signature,
    recovery_id: RecoveryId,
}

pub type SignatureBytes = [u8; 65];

impl Signature {
    /// Signs a pre-hashed digest directly (no EIP-191 wrapping — callers
    /// that need the Ethereum "signed message" convention should call
    /// [`Digest::eip191`] before signing).
    pub fn create(private_key: PrivateKey, digest: Digest) -> Result<Self> {
        let (inner, recovery_id) = SigningKey::from(private_key)
            .sign_prehash_recoverable(digest.as_ref())
            .map_err(|_| SignatureError::Malformed)?;
        Ok(Self { inner, recovery_id })
    }

    /// Recovers the public key that produced this signature over `digest`.
    pub fn recover(&self, digest: Digest) -> Result<PublicKey> {
        VerifyingKey::recover_from_prehash(digest.as_ref(), &self.inner, self.recovery_id)
            .map(PublicKey::from)
            .map_err(|_| SignatureError::Recovery)
    }

    pub fn verify(&self, public_key: PublicKey, digest: Digest) -> Result<()> {
        VerifyingKey::from(public_key)
            .verify_prehash(digest.as_ref(), &self.inner)
            .map_err(|_| SignatureError::Verification)
    }

    /// Parses the `v || r || s` wire layout. `v` must be `27` or `28`
    /// (the pre-EIP-155 convention).
    pub fn from_v_r_s_bytes(bytes: SignatureBytes) -> Option<Self> {
        let v = bytes[0];
        let recovery_byte = v.checked_sub(27).filter(|v| *v <= 1)?;
        Some(Self {
            inner: ecdsa::Signature::from_slice(&bytes[1..]).ok()?,
            recovery_id: RecoveryId::from_byte(recovery_byte)?,
        })
    }

    pub fn to_v_r_s_bytes(self) -> SignatureBytes {
        let mut bytes = [0u8; 65];
        bytes[0] = self.recovery_id.to_byte() + 27;
        bytes[1..].copy_from_slice(self.inner.to_bytes().as_ref());
        bytes
    }
}
