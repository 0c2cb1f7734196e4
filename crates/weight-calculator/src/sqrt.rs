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

//! Integer square root matching EIP-7054's algorithm byte-for-byte: a
//! leading-bit-scan initial approximation, seven Newton iterations, and a
//! final `min(z, x/z)` correction to guarantee a floored result. The
//! `s^{3/4}` registration weight depends on this exact rounding behavior
//! (§4.3, §9 "Numeric care") — a library `isqrt` is not a substitute.

use relay_primitives::U256;

/// `floor(sqrt(x))` for any `x` in `[0, 2^256 - 1]`.
pub fn isqrt(x: U256) -> U256 {
    if x.is_zero() {
        return U256::ZERO;
    }

    let mut y = x;
    let mut z = U256::from(1u8);

    if y >= (U256::from(1u8) << 128) {
        y >>= 128;
        z <<= 64;
    }
    if y >= (U256::from(1u8) << 64) {
        y >>= 64;
        z <<= 32;
    }
    if y >= (U256::from(1u8) << 32) {
        y >>= 32;
        z <<= 16;
    }
    if y >= (U256::from(1u8) << 16) {
        y >>= 16;
        z <<= 8;
    }
    if y >= (U256::from(1u8) << 8) {
        y >>= 8;
        z <<= 4;
    }
    if y >= (U256::from(1u8) << 4) {
        y >>= 4;
        z <<= 2;
    }
    if y >= (U256::from(1u8) << 2) {
        z <<= 1;
    }

    for _ in 0..7 {
        z = (z + x / z) >> 1;
    }

    let round_down = x / z;
    if z < round_down { z } else { round_down }
}

/// `s^{3/4}` via two applications of [`isqrt`] (§4.3 step 5).
pub fn pow_three_quarters(s: U256) -> U256 {
    let sqrt_s = isqrt(s);
    let sqrt_sqrt_s = isqrt(sqrt_s);
    sqrt_s * sqrt_sqrt_s
}
