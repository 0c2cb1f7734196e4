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

//! Secp256k1 key types.

use crate::digest::Digest;
use derive_more::{Debug, From};
use k256::{
    ecdsa::{SigningKey, VerifyingKey},
    elliptic_curve::sec1::ToEncodedPoint,
};
use relay_primitives::Address;
use sha3::{Digest as _, Keccak256};

/// A secp256k1 private key.
#[derive(Clone, Copy, From, Debug)]
#[debug("PrivateKey(..)")]
pub struct PrivateKey(pub [u8; 32]);

impl From<PrivateKey> for SigningKey {
    fn from(key: PrivateKey) -> Self {
        SigningKey::from_bytes((&key.0).into()).expect("32-byte scalar is a valid signing key")
    }
}

/// A secp256k1 public key, uncompressed.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PublicKey(VerifyingKey);

impl From<PrivateKey> for PublicKey {
    fn from(key: PrivateKey) -> Self {
        PublicKey(*SigningKey::from(key).verifying_key())
    }
}

impl From<VerifyingKey> for PublicKey {
    fn from(key: VerifyingKey) -> Self {
        PublicKey(key)
    }
}

impl From<PublicKey> for VerifyingKey {
    fn from(key: PublicKey) -> Self {
        key.0
    }
}

impl PublicKey {
    /// The uncompressed SEC1 encoding, without the leading `0x04` tag byte.
    fn to_uncompressed_tail(self) -> [u8; 64] {
        let point = self.0.to_encoded_point(false);
        let bytes = point.as_bytes();
        debug_assert_eq!(bytes.len(), 65);
        let mut out = [0u8; 64];
        out.copy_from_slice(&bytes[1..]);
        out
    }

    /// Derives the Ethereum-style address: the last 20 bytes of the
    /// keccak256 hash of the uncompressed public key (sans the `0x04` tag).
    pub fn to_address(self) -> Address {
        let hash = Keccak256::digest(self.to_uncompressed_tail());
        let mut out = [0u8; 20];
        out.copy_from_slice(&hash[12..]);
        Address(out)
    }
}

impl From<PublicKey> for Digest {
    fn from(key: PublicKey) -> Self {
        Digest::keccak256(&key.to_uncompressed_tail())
    }
}
