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

use relay_crypto::SignatureError;
use signing_policy::PolicyCodecError;

/// The revert-string taxonomy of §6/§7, verbatim. Callers that need to
/// surface the canonical message (not just match on the variant) can rely
/// on `Display`/`to_string()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RelayError {
    #[error("Invalid sign policy metadata")]
    InvalidPolicyMetadata,
    #[error("Invalid sign policy length")]
    InvalidPolicyLength,
    #[error("Already initialized")]
    AlreadyInitialized,
    #[error("Signing policy hash mismatch")]
    PolicyHashMismatch,
    #[error("Too short message")]
    TooShortMessage,
    #[error("Delayed sign policy")]
    DelayedSignPolicy,
    #[error("Wrong sign policy reward epoch")]
    WrongSignPolicyRewardEpoch,
    #[error("No new sign policy size")]
    NoNewSignPolicySize,
    #[error("Wrong size for new sign policy")]
    WrongSizeForNewSignPolicy,
    #[error("Not next reward epoch")]
    NotNextRewardEpoch,
    #[error("Wrong signatures length")]
    WrongSignaturesLength,
    #[error("Index out of range")]
    IndexOutOfRange,
    #[error("Index out of order")]
    IndexOutOfOrder,
    #[error("ecrecover error")]
    EcrecoverError,
    #[error("Wrong signature")]
    WrongSignature,
    #[error("Not enough weight")]
    NotEnoughWeight,
}

impl From<PolicyCodecError> for RelayError {
    fn from(err: PolicyCodecError) -> Self {
        match err {
            PolicyCodecError::InvalidMetadata => RelayError::InvalidPolicyMetadata,
            PolicyCodecError::InvalidLength => RelayError::InvalidPolicyLength,
        }
    }
}

impl From<SignatureError> for RelayError {
    fn from(err: SignatureError) -> Self {
        match err {
            SignatureError::Recovery | SignatureError::Malformed => RelayError::EcrecoverError,
            SignatureError::Verification => RelayError::WrongSignature,
        }
    }
}
