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

//! Secp256k1 signing primitives for the relay: keccak256 digests, recoverable
//! ECDSA signatures, and the EIP-191 "Ethereum Signed Message" convention
//! used to sign every message the relay verifies (§4.2).

mod digest;
mod keys;
mod signature;

pub use digest::Digest;
pub use keys::{PrivateKey, PublicKey};
pub use signature::{Signature, SignatureBytes, SignatureError};
