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

/// §4.5 `preRegisterVoter` error taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum VoterPreRegistryError {
    #[error("voter registration for this reward epoch has already opened")]
    RegistrationAlreadyOpen,
    #[error("voter is not currently registered in the preceding reward epoch")]
    NotCurrentlyRegistered,
    #[error("recovered signer does not match the voter's signing address")]
    SignatureMismatch,
    #[error("voter has already pre-registered for this reward epoch")]
    AlreadyPreRegistered,
    /// Reward epoch zero has no predecessor to check current registration
    /// against.
    #[error("reward epoch has no preceding epoch")]
    NoPrecedingEpoch,
}
