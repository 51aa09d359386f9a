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

//! `IfLessThanThenGate`: applies an effect conditional on `lhs < rhs` (or `<=`).

use crate::handle::UniqueHandle;
use crate::ops::flag::{AllocOp, ReleaseOp};
use crate::ops::{toggle, Operation, PhaseFlipOp};
use crate::qubit::{Qubit, QubitIntersection};
use crate::quint::Quint;
use crate::register::{Qureg, RawQureg};
use crate::rvalue::{BoolRValue, Location};
use crate::RevgateError;

/// The action taken when `lhs < rhs` (or `<=`) holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Toggles a given qubit.
    Toggle(Qubit),
    /// Flips the phase.
    PhaseFlip,
}

/// `effect` conditional on `lhs < rhs`, or `lhs <= rhs` when `or_equal` holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IfLessThanThenGate {
    /// The left-hand comparison operand.
    pub lhs: Quint,
    /// The right-hand comparison operand.
    pub rhs: Quint,
    /// When true, the comparison is `<=` rather than `<`.
    pub or_equal: Box<BoolRValue>,
    /// The action performed conditional on the comparison.
    pub effect: Effect,
}

fn toggle1(q: &Qubit, controls: &QubitIntersection) -> Operation {
    toggle(RawQureg::from_iter([q.clone()]))
        .controlled_by(controls.clone())
        .expect("OP_TOGGLE is always controllable")
}

/// The underlying UMA-based subtract-and-test sweep shared by init and phase-flip forms.
///
/// Pads `lhs`/`rhs` to equal width, computes `rhs -= lhs + or_equal` into a fresh copy of `rhs`
/// (restoring the original `rhs` by uncomputing at the end), and applies `effect` conditional
/// on the resulting borrow-out bit.
pub(crate) fn if_less_than_then(
    lhs: &Quint,
    rhs: &Quint,
    or_equal: &BoolRValue,
    effect: Effect,
    controls: QubitIntersection,
) -> Result<(), RevgateError> {
    let ops = IfLessThanThenGate {
        lhs: lhs.clone(),
        rhs: rhs.clone(),
        or_equal: Box::new(or_equal.clone()),
        effect,
    }
    .decompose(controls);
    for op in ops {
        crate::lens::emit(op);
    }
    Ok(())
}

impl IfLessThanThenGate {
    pub(crate) fn decompose(&self, controls: QubitIntersection) -> Vec<Operation> {
        let n = self.lhs.len().max(self.rhs.len());
        if n == 0 {
            return Vec::new();
        }
        let mut ops = Vec::new();

        let handle = UniqueHandle::new("cmp_work");
        let work_qubits: Vec<Qubit> = (0..n + 1).map(|i| Qubit::indexed(handle.clone(), i)).collect();
        let work = Quint::new(RawQureg::new(work_qubits.clone()));
        ops.push(Operation::Alloc(AllocOp { qureg: work.qureg().clone(), x_basis: false }));

        // work[0..n] := rhs (zero-extended), work[n] := or_equal borrow seed.
        for i in 0..n {
            if i < self.rhs.len() {
                ops.push(toggle1(&work.bit(i), &controls.and_qubit(&self.rhs.bit(i))));
            }
        }
        match self.or_equal.as_ref() {
            BoolRValue::ConstBool(true) => ops.push(toggle1(&work.bit(n), &controls)),
            BoolRValue::ConstBool(false) => {}
            BoolRValue::QubitBacked(q) => ops.push(toggle1(&work.bit(n), &controls.and_qubit(q))),
            other => {
                if let Some(Location::Qubit(q)) = other.existing_storage_location() {
                    ops.push(toggle1(&work.bit(n), &controls.and_qubit(&q)));
                }
            }
        }

        // Inverted UMA sweep computing work -= lhs, borrow accumulating into work[n].
        let a: Vec<Qubit> = (0..n).map(|i| if i < self.lhs.len() { self.lhs.bit(i) } else { work.bit(n) }).collect();
        for i in (0..n).rev() {
            let b = work.bit(i);
            let carry = work.bit((i + 1).min(n));
            ops.push(toggle1(&carry, &controls.and(&a[i].and(&b))));
            ops.push(toggle1(&a[i].clone(), &controls.and_qubit(&carry)));
            ops.push(toggle1(&b, &controls.and_qubit(&a[i])));
        }

        // Apply the effect conditional on the final borrow bit (work[n] now holds `lhs < rhs`).
        let effect_controls = controls.and_qubit(&work.bit(n));
        ops.push(match &self.effect {
            Effect::Toggle(target) => toggle1(target, &effect_controls),
            Effect::PhaseFlip => Operation::PhaseFlip(PhaseFlipOp)
                .controlled_by(effect_controls)
                .expect("OP_PHASE_FLIP is always controllable"),
        });

        // Forward MAJ sweep to uncompute work back to zero.
        for i in 0..n {
            let b = work.bit(i);
            let carry = work.bit((i + 1).min(n));
            ops.push(toggle1(&b, &controls.and_qubit(&a[i])));
            ops.push(toggle1(&a[i].clone(), &controls.and_qubit(&carry)));
            ops.push(toggle1(&carry, &controls.and(&a[i].and(&b))));
        }
        for i in 0..n {
            if i < self.rhs.len() {
                ops.push(toggle1(&work.bit(i), &controls.and_qubit(&self.rhs.bit(i))));
            }
        }
        match self.or_equal.as_ref() {
            BoolRValue::ConstBool(true) => ops.push(toggle1(&work.bit(n), &controls)),
            BoolRValue::QubitBacked(q) => ops.push(toggle1(&work.bit(n), &controls.and_qubit(q))),
            _ => {}
        }

        ops.push(Operation::Release(ReleaseOp {
            qureg: work.qureg().clone(),
            x_basis: false,
            dirty: false,
        }));
        ops
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qalloc::{qalloc, qalloc_int};
    use crate::sim::Sim;

    fn less_than(lhs_val: u64, rhs_val: u64, width: usize, or_equal: bool) -> bool {
        let sim = Sim::new();
        let (sim, flag) = sim.run(|| {
            let lhs = qalloc_int("lhs", width);
            let rhs = qalloc_int("rhs", width);
            lhs.xor_assign_const(lhs_val);
            rhs.xor_assign_const(rhs_val);
            let flag = qalloc("flag");
            if_less_than_then(
                &lhs,
                &rhs,
                &BoolRValue::from(or_equal),
                Effect::Toggle(flag.clone()),
                QubitIntersection::EMPTY,
            )
            .expect("comparator always emits");
            flag
        });
        sim.get(&flag)
    }

    #[test]
    fn strictly_less_sets_the_flag() {
        assert!(less_than(37, 42, 6, false));
    }

    #[test]
    fn equal_operands_clear_the_flag_without_or_equal() {
        assert!(!less_than(42, 42, 6, false));
    }

    #[test]
    fn equal_operands_set_the_flag_with_or_equal() {
        assert!(less_than(42, 42, 6, true));
    }
}
