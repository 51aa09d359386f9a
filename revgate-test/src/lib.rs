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

//! Randomized cross-check helpers for the revgate toolkit.
//!
//! Mirrors `prepare_monte_carlo_gate_test` from the underlying quantum-gate-test tooling this
//! crate is modeled on: rather than asserting against one fixed case, these helpers drive many
//! randomly chosen inputs through two independent code paths and hand the caller paired results
//! to assert equal, so a regression in either path shows up as a mismatch rather than requiring
//! an exhaustive hand-written table.

use rand::Rng;

use revgate::ops::gates::add::PlusEqualGate;
use revgate::ops::gates::cmp::{Effect, IfLessThanThenGate};
use revgate::ops::{Operation, SignatureOp};
use revgate::prelude::*;

/// Picks a uniformly random `len`-bit value (`0` when `len == 0`).
pub fn random_bits(rng: &mut impl Rng, len: usize) -> u64 {
    if len == 0 || len >= 64 {
        return rng.random::<u64>() & mask(len);
    }
    rng.random_range(0..(1u64 << len))
}

fn mask(len: usize) -> u64 {
    if len >= 64 {
        u64::MAX
    } else {
        (1u64 << len) - 1
    }
}

/// One randomized trial's input and the two simulators' resulting values, for the caller to
/// `assert_eq!`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdditionTrial {
    /// The register's value before the addition.
    pub initial: u64,
    /// The constant added in.
    pub offset: u64,
    /// The carry bit added in alongside `offset`.
    pub carry_in: bool,
    /// The value a fully bit-decomposed (ripple-carry) simulation produced.
    pub decomposed: u64,
    /// The value the closed-form emulation fast path produced.
    pub emulated: u64,
}

/// Runs `trials` randomized `lvalue += offset + carry_in` additions, each through a pair of
/// independent [`Sim`]s — one decomposing the addition bit by bit, one fast-pathing it via
/// closed-form arithmetic — and returns every trial's paired results.
///
/// A correct decomposition makes `decomposed == emulated` on every trial; a bug in either the
/// ripple-carry construction or the closed-form fast path shows up as a mismatch.
pub fn cross_check_addition(lvalue_len: usize, trials: usize) -> Vec<AdditionTrial> {
    let mut rng = rand::rng();
    let mut results = Vec::with_capacity(trials);

    for _ in 0..trials {
        let initial = random_bits(&mut rng, lvalue_len);
        let offset = random_bits(&mut rng, lvalue_len);
        let carry_in = rng.random::<bool>();

        let decomposed = run_addition(lvalue_len, initial, offset, carry_in, false);
        let emulated = run_addition(lvalue_len, initial, offset, carry_in, true);

        results.push(AdditionTrial { initial, offset, carry_in, decomposed, emulated });
    }
    results
}

fn run_addition(len: usize, initial: u64, offset: u64, carry_in: bool, emulate: bool) -> u64 {
    let mut sim = Sim::new();
    sim.emulate_additions = emulate;
    let (sim, lvalue) = sim.run(|| {
        let lvalue = qalloc_int("lvalue", len);
        lvalue.xor_assign_const(initial);
        lvalue.add_assign_with_carry(
            &IntRValue::from(offset),
            &BoolRValue::from(carry_in),
            QubitIntersection::EMPTY,
        );
        lvalue
    });
    sim.get_int(&lvalue)
}

/// Runs `lvalue += offset + carry_in` and then immediately emulates its inverse via
/// [`Sim::apply_op_via_emulation`], returning the register to its starting value if the gate's
/// decomposition and its closed-form inverse agree on what "undo" means.
///
/// Returns `(initial, restored)` for the caller to `assert_eq!`; per the addition gate's
/// declared semantics these must always match.
pub fn random_addition_round_trip(lvalue_len: usize) -> (u64, u64) {
    let mut rng = rand::rng();
    let initial = random_bits(&mut rng, lvalue_len);
    let offset = random_bits(&mut rng, lvalue_len);
    let carry_in = rng.random::<bool>();

    let mut sim = Sim::new();
    let (mut sim, (lvalue, op)) = sim.run(|| {
        let lvalue = qalloc_int("lvalue", lvalue_len);
        lvalue.xor_assign_const(initial);
        let op = Operation::Signature(SignatureOp::PlusEqual(PlusEqualGate {
            lvalue: lvalue.clone(),
            offset: IntRValue::from(offset),
            carry_in: BoolRValue::from(carry_in),
        }));
        lvalue.add_assign_with_carry(
            &IntRValue::from(offset),
            &BoolRValue::from(carry_in),
            QubitIntersection::EMPTY,
        );
        (lvalue, op)
    });

    sim.apply_op_via_emulation(&op, false)
        .expect("PlusEqualGate always has a closed-form emulation");
    (initial, sim.get_int(&lvalue))
}

/// Same cross-check as [`cross_check_addition`], but for the comparator: drives
/// `if lhs < rhs { toggle(flag) }` through a decomposed and an emulated [`Sim`] and returns the
/// paired results.
pub fn cross_check_comparison(width: usize, trials: usize) -> Vec<(bool, bool)> {
    let mut rng = rand::rng();
    let mut results = Vec::with_capacity(trials);

    for _ in 0..trials {
        let lhs_val = random_bits(&mut rng, width);
        let rhs_val = random_bits(&mut rng, width);

        let decomposed = run_comparison(width, lhs_val, rhs_val, false);
        let emulated = run_comparison(width, lhs_val, rhs_val, true);
        results.push((decomposed, emulated));
    }
    results
}

fn run_comparison(width: usize, lhs_val: u64, rhs_val: u64, emulate: bool) -> bool {
    let mut sim = Sim::new();
    sim.emulate_additions = emulate;
    let (sim, (flag, _lhs, _rhs)) = sim.run(|| {
        let lhs = qalloc_int("lhs", width);
        let rhs = qalloc_int("rhs", width);
        lhs.xor_assign_const(lhs_val);
        rhs.xor_assign_const(rhs_val);
        let flag = qalloc("flag");
        let op = Operation::Signature(SignatureOp::IfLessThanThen(IfLessThanThenGate {
            lhs: lhs.clone(),
            rhs: rhs.clone(),
            or_equal: Box::new(BoolRValue::from(false)),
            effect: Effect::Toggle(flag.clone()),
        }));
        emit(op);
        (flag, lhs, rhs)
    });
    sim.get(&flag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addition_cross_check_agrees() {
        for trial in cross_check_addition(5, 30) {
            assert_eq!(
                trial.decomposed, trial.emulated,
                "mismatch on initial={} offset={} carry_in={}",
                trial.initial, trial.offset, trial.carry_in
            );
        }
    }

    #[test]
    fn addition_round_trips_back_to_start() {
        for _ in 0..20 {
            let (initial, restored) = random_addition_round_trip(6);
            assert_eq!(initial, restored);
        }
    }

    #[test]
    fn comparison_cross_check_agrees() {
        for (decomposed, emulated) in cross_check_comparison(4, 30) {
            assert_eq!(decomposed, emulated);
        }
    }
}
