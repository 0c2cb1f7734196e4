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

//! Keccak256 digest type.
//!
//! A policy's identity (§3) and every signed message in the relay (§4.2) are
//! keccak256 digests of an exact byte range — this type exists so call sites
//! never have to juggle a bare `[u8; 32]`.

use derive_more::{Debug, Display, From, Into};
use sha3::{Digest as _, Keccak256};

/// A 32-byte Keccak256 digest.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into, Debug, Display)]
#[debug("0x{}", hex::encode(self.0))]
#[display("0x{}", hex::encode(self.0))]
pub struct Digest(pub [u8; 32]);

impl Digest {
    pub const ZERO: Digest = Digest([0u8; 32]);

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Hashes a single contiguous byte range. This is the only hashing
    /// entry point the wire-format codecs should use: it takes the exact
    /// bytes of a struct's packed encoding, never a re-serialized copy.
    pub fn keccak256(bytes: &[u8]) -> Self {
        Digest(Keccak256::digest(bytes).into())
    }

    /// The EIP-191 "Ethereum Signed Message" digest of a 32-byte hash:
    /// `keccak256("\x19Ethereum Signed Message:\n32" || hash)`.
    pub fn eip191(self) -> Self {
        let mut hasher = Keccak256::new();
        hasher.update(b"\x19Ethereum Signed Message:\n32");
        hasher.update(self.0);
        Digest(hasher.finalize().into())
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eip191_prefix_is_stable() {
        let d = Digest([0x11; 32]);
        let prefixed = d.eip191();
        assert_ne!(prefixed, d);
        // Re-hashing the same digest is deterministic.
        assert_eq!(prefixed, d.eip191());
    }
}
