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

/// §4.6 / §7 "Authorization" and "Format" error kinds for the gate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionGateError {
    #[error("caller is not the epoch manager")]
    NotEpochManager,
    #[error("caller is not governance")]
    NotGovernance,
    /// Carries the decoded (or fallback) revert reason from the forwarded
    /// call, per §7 "`submitAndPass` decodes and re-reverts the inner
    /// reason".
    #[error("{0}")]
    PassReverted(String),
}
