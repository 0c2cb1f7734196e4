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

//! Shared signature-aggregation routine for modes 2 and 3 (§4.2).
//!
//! Each 67-byte entry is `v(1) || r(32) || s(32) || index(2)`. Indices must
//! strictly increase and stay within the reference policy's voter count;
//! the recovered signer must equal the voter at that index. Accumulation
//! stops as soon as the running weight total exceeds `threshold` — trailing
//! signature bytes beyond that point are never inspected.

use crate::error::RelayError;
use crate::SIGNATURE_LEN;
use relay_crypto::Signature;
use signing_policy::PolicyView;

pub fn verify_weight(
    reference: &PolicyView<'_>,
    signatures: &[u8],
    digest: relay_crypto::Digest,
    threshold: u64,
) -> Result<(), RelayError> {
    if signatures.len() % SIGNATURE_LEN != 0 {
        return Err(RelayError::WrongSignaturesLength);
    }

    let voter_count = reference.voter_count();
    let mut next_unused_index: u32 = 0;
    let mut accumulated: u64 = 0;

    for chunk in signatures.chunks_exact(SIGNATURE_LEN) {
        let index = u16::from_be_bytes([chunk[65], chunk[66]]);
        if index >= voter_count {
            return Err(RelayError::IndexOutOfRange);
        }
        if (index as u32) < next_unused_index {
            return Err(RelayError::IndexOutOfOrder);
        }
        next_unused_index = index as u32 + 1;

        let mut v_r_s = [0u8; 65];
        v_r_s.copy_from_slice(&chunk[..65]);
        let signature = Signature::from_v_r_s_bytes(v_r_s).ok_or(RelayError::EcrecoverError)?;
        let recovered = signature.recover(digest).map_err(RelayError::from)?;

        if recovered.to_address() != reference.voter_address(index) {
            return Err(RelayError::WrongSignature);
        }

        accumulated += reference.voter_weight(index) as u64;
        if accumulated > threshold {
            return Ok(());
        }
    }

    Err(RelayError::NotEnoughWeight)
}
