// Copyright © 2024 The revgate Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not use this file except
// in compliance with the License. You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software distributed under the
// License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either
// express or implied. See the License for the specific language governing permissions and
// limitations under the License.

//! Small bit-twiddling helpers shared by the arithmetic decompositions.

/// Smallest `n` such that `2^n >= value`. `ceil_lg2(0) == 0`, `ceil_lg2(1) == 0`.
pub fn ceil_lg2(value: u64) -> u32 {
    if value <= 1 {
        return 0;
    }
    64 - (value - 1).leading_zeros()
}

/// Largest `n` such that `2^n <= value`. Panics on `value == 0`.
pub fn floor_lg2(value: u64) -> u32 {
    assert!(value > 0, "floor_lg2(0) is undefined");
    63 - value.leading_zeros()
}

/// Number of leading zero bits in `value`'s `width`-bit representation.
pub fn leading_zero_bit_count(value: u64, width: u32) -> u32 {
    if value == 0 {
        return width;
    }
    width.saturating_sub(64 - value.leading_zeros())
}

/// Number of set bits in `value`.
pub fn popcnt(value: u64) -> u32 {
    value.count_ones()
}

/// The modular multiplicative inverse of `value` modulo `modulus`, if it exists (`gcd == 1`).
pub fn modular_multiplicative_inverse(value: i128, modulus: i128) -> Option<i128> {
    let (mut old_r, mut r) = (value, modulus);
    let (mut old_s, mut s) = (1i128, 0i128);
    while r != 0 {
        let quotient = old_r.div_euclid(r);
        let (new_r, new_s) = (old_r - quotient * r, old_s - quotient * s);
        old_r = r;
        r = new_r;
        old_s = s;
        s = new_s;
    }
    if old_r.abs() != 1 {
        return None;
    }
    Some(old_s.rem_euclid(modulus))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ceil_lg2_matches_powers_of_two() {
        assert_eq!(ceil_lg2(0), 0);
        assert_eq!(ceil_lg2(1), 0);
        assert_eq!(ceil_lg2(8), 3);
        assert_eq!(ceil_lg2(9), 4);
    }

    #[test]
    fn floor_lg2_matches_powers_of_two() {
        assert_eq!(floor_lg2(8), 3);
        assert_eq!(floor_lg2(9), 3);
        assert_eq!(floor_lg2(15), 3);
    }

    #[test]
    fn inverse_exists_only_when_coprime() {
        assert_eq!(modular_multiplicative_inverse(3, 7), Some(5));
        assert_eq!(modular_multiplicative_inverse(2, 4), None);
    }
}
