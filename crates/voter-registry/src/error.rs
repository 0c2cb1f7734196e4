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

/// Error taxonomy for `registerVoter`/`systemRegistration`/`chillVoter`
/// (§4.4, §7 "Voter-lifecycle"/"Configuration"/"Authorization").
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum VoterRegistryError {
    /// §9 "Cyclic references": a call arrived before
    /// [`crate::VoterRegistry::set_dependencies`] populated the late-bound
    /// capability slot.
    #[error("voter registry dependencies are not wired yet")]
    DependenciesNotSet,
    #[error("voter is chilled for the target reward epoch")]
    Chilled,
    #[error("recovered signer does not match the voter's signing address")]
    SignatureMismatch,
    #[error("voter registration is not open for this reward epoch yet")]
    RegistrationNotOpen,
    #[error("calculated registration weight is zero")]
    ZeroWeight,
    #[error("voter's weight is not greater than the current minimum")]
    VotePowerTooLow,
    #[error("signing-policy initialization start block was already set for this epoch")]
    StartBlockAlreadySet,
    #[error("voting-power block was already set for this epoch")]
    VotePowerBlockAlreadySet,
}
