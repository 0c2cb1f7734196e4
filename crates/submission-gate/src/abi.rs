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

//! Minimal decoder for the Solidity `Error(string)` revert encoding, enough
//! to recover the human-readable reason `submitAndPass` re-reverts with.
//! No ABI crate is pulled in for this alone — the format is four fixed
//! fields (selector, offset, length, UTF-8 bytes) and decoding it by hand is
//! a few lines; see `SubmissionGate::decode_revert_reason`'s doc comment for
//! the layout.

const ERROR_SELECTOR: [u8; 4] = [0x08, 0xc3, 0x79, 0xa0];
const FALLBACK_REASON: &str = "Transaction reverted silently";

/// §7: "falling back to `Transaction reverted silently` for ≤ 67-byte
/// returndata". 67 bytes is one short of the 68-byte minimum a
/// `Error(string)`-encoded empty reason occupies (4-byte selector + 32-byte
/// offset + 32-byte length), so anything at or below that threshold cannot
/// carry a decodable reason.
pub fn decode_revert_reason(returndata: &[u8]) -> String {
    if returndata.len() <= 67 || returndata[..4] != ERROR_SELECTOR {
        return FALLBACK_REASON.to_string();
    }
    let payload = &returndata[4..];
    if payload.len() < 64 {
        return FALLBACK_REASON.to_string();
    }
    let len = u64::from_be_bytes(payload[56..64].try_into().unwrap()) as usize;
    let start = 64;
    let end = match start.checked_add(len) {
        Some(end) if end <= payload.len() => end,
        _ => return FALLBACK_REASON.to_string(),
    };
    String::from_utf8(payload[start..end].to_vec()).unwrap_or_else(|_| FALLBACK_REASON.to_string())
}
