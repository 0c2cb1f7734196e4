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

//! §4.6 SubmissionGate: four independent per-address one-shot allowlists
//! gating the submit1/submit2/submit3/submitSignatures turnstiles, plus a
//! governance-configured forwarding call (`submitAndPass`).

mod abi;
mod config;
mod error;
mod events;

pub use abi::decode_revert_reason;
pub use config::SubmissionGateConfig;
pub use error::SubmissionGateError;
pub use events::NewVotingRoundInitiated;

use dashmap::DashMap;
use relay_primitives::Address;

/// A host-supplied forwarding call for `submitAndPass`. Returns the raw
/// returndata on revert so the gate can decode the Solidity `Error(string)`
/// reason itself (§9 "Polymorphism": the core must not know the concrete
/// call mechanism).
pub trait ExternalCall {
    fn call(&self, target: Address, selector: [u8; 4], data: &[u8]) -> Result<Vec<u8>, Vec<u8>>;
}

/// One independent one-shot per-address slot: present means allowed,
/// consuming it clears it (§4.6).
#[derive(Default)]
struct Turnstile {
    allowed: DashMap<Address, ()>,
}

impl Turnstile {
    fn set(&self, address: Address) {
        self.allowed.insert(address, ());
    }

    /// Consumes the entry for `address` if present, returning whether it
    /// was. Matches the source's `submit1(...)` style turnstile: "consume an
    /// entry if present (returning true) and then clear it".
    fn consume(&self, address: Address) -> bool {
        self.allowed.remove(&address).is_some()
    }
}

pub struct SubmissionGate {
    config: SubmissionGateConfig,
    submit1: Turnstile,
    submit2: Turnstile,
    submit3: Turnstile,
    submit_signatures: Turnstile,
}

impl SubmissionGate {
    pub fn new(config: SubmissionGateConfig) -> Self {
        Self {
            config,
            submit1: Turnstile::default(),
            submit2: Turnstile::default(),
            submit3: Turnstile::default(),
            submit_signatures: Turnstile::default(),
        }
    }

    /// §4.6 `initNewVotingRound`, restricted to the epoch manager. `submit3`
    /// is only allowlisted when governance has enabled it; otherwise the
    /// slot is left empty and `submit3`'s turnstile call to any address
    /// returns `false` this round.
    pub fn init_new_voting_round(
        &self,
        caller: Address,
        submit1: Address,
        submit2: Address,
        submit3: Address,
        submit_signatures: Address,
    ) -> Result<NewVotingRoundInitiated, SubmissionGateError> {
        if caller != self.config.epoch_manager {
            return Err(SubmissionGateError::NotEpochManager);
        }

        self.submit1.set(submit1);
        self.submit2.set(submit2);
        self.submit_signatures.set(submit_signatures);
        let submit3_set = if self.config.submit3_enabled {
            self.submit3.set(submit3);
            Some(submit3)
        } else {
            None
        };

        tracing::debug!(%submit1, %submit2, %submit_signatures, "new voting round initiated");
        Ok(NewVotingRoundInitiated { submit1, submit2, submit3: submit3_set, submit_signatures })
    }

    pub fn submit1(&self, caller: Address) -> bool {
        self.submit1.consume(caller)
    }

    pub fn submit2(&self, caller: Address) -> bool {
        self.submit2.consume(caller)
    }

    pub fn submit3(&self, caller: Address) -> bool {
        self.submit3.consume(caller)
    }

    pub fn submit_signatures(&self, caller: Address) -> bool {
        self.submit_signatures.consume(caller)
    }

    /// §4.6 `submitAndPass`: forwards `call(target, selector || data)` to
    /// the governance-configured pair, decoding and re-reverting the inner
    /// reason on failure.
    pub fn submit_and_pass(
        &self,
        external: &impl ExternalCall,
        data: &[u8],
    ) -> Result<Vec<u8>, SubmissionGateError> {
        external
            .call(self.config.pass_target, self.config.pass_selector, data)
            .map_err(|returndata| SubmissionGateError::PassReverted(decode_revert_reason(&returndata)))
    }

    /// §4.6 governance setter for whether `submit3` is ever allowlisted.
    pub fn set_submit3_enabled(&mut self, caller: Address, enabled: bool) -> Result<(), SubmissionGateError> {
        if caller != self.config.governance {
            return Err(SubmissionGateError::NotGovernance);
        }
        self.config.submit3_enabled = enabled;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_primitives::Address;

    fn addr(byte: u8) -> Address {
        Address([byte; 20])
    }

    fn gate(submit3_enabled: bool) -> SubmissionGate {
        SubmissionGate::new(SubmissionGateConfig {
            governance: addr(1),
            epoch_manager: addr(2),
            submit3_enabled,
            pass_target: addr(9),
            pass_selector: [0xde, 0xad, 0xbe, 0xef],
        })
    }

    #[test]
    fn init_rejects_non_epoch_manager() {
        let g = gate(true);
        let err = g.init_new_voting_round(addr(99), addr(3), addr(4), addr(5), addr(6)).unwrap_err();
        assert_eq!(err, SubmissionGateError::NotEpochManager);
    }

    #[test]
    fn turnstile_is_one_shot() {
        let g = gate(true);
        g.init_new_voting_round(addr(2), addr(3), addr(4), addr(5), addr(6)).unwrap();
        assert!(g.submit1(addr(3)));
        assert!(!g.submit1(addr(3)));
        assert!(!g.submit1(addr(4)));
    }

    #[test]
    fn submit3_allowlist_gated_by_governance_flag() {
        let g = gate(false);
        let info = g.init_new_voting_round(addr(2), addr(3), addr(4), addr(5), addr(6)).unwrap();
        assert!(info.submit3.is_none());
        assert!(!g.submit3(addr(5)));
    }

    struct FakeExternalCall {
        result: Result<Vec<u8>, Vec<u8>>,
    }

    impl ExternalCall for FakeExternalCall {
        fn call(&self, _target: Address, _selector: [u8; 4], _data: &[u8]) -> Result<Vec<u8>, Vec<u8>> {
            self.result.clone()
        }
    }

    #[test]
    fn submit_and_pass_forwards_success() {
        let g = gate(true);
        let external = FakeExternalCall { result: Ok(vec![1, 2, 3]) };
        assert_eq!(g.submit_and_pass(&external, &[]).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn submit_and_pass_decodes_revert_reason() {
        let g = gate(true);
        let external = FakeExternalCall { result: Err(vec![0u8; 4]) };
        let err = g.submit_and_pass(&external, &[]).unwrap_err();
        assert_eq!(err, SubmissionGateError::PassReverted("Transaction reverted silently".to_string()));
    }
}
