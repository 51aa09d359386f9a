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

//! `PlusEqualGate`: the Cuccaro ripple-carry adder, with a single carry qubit.

use crate::handle::UniqueHandle;
use crate::ops::flag::{AllocOp, ReleaseOp};
use crate::ops::gates::mult_add::PlusEqualTimesGate;
use crate::ops::gates::xor::XorOp;
use crate::ops::{toggle, Operation};
use crate::qubit::{Qubit, QubitIntersection};
use crate::quint::Quint;
use crate::register::{Qureg, RawQureg};
use crate::rvalue::{BoolRValue, IntRValue, Location};

/// In-place addition modulo `2^len(lvalue)`: `lvalue += offset + carry_in`.
///
/// Constant offsets and a constant/qubit `carry_in` are materialized into scratch ancillas that
/// are allocated, used, and released again within the same decomposition — so the produced
/// operation list is self-contained and carries no outstanding obligations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlusEqualGate {
    /// The register being added into.
    pub lvalue: Quint,
    /// The value added in, modulo the width of `lvalue`.
    pub offset: IntRValue,
    /// The initial carry bit.
    pub carry_in: BoolRValue,
}

/// `MAJ(c, b, a)`: `CNOT(a,b); CNOT(a,c); CCNOT(c,b,a)`.
fn maj(c: &Qubit, b: &Qubit, a: &Qubit, controls: &QubitIntersection) -> Vec<Operation> {
    vec![
        toggle(RawQureg::from_iter([b.clone()]))
            .controlled_by(controls.and_qubit(a))
            .unwrap(),
        toggle(RawQureg::from_iter([c.clone()]))
            .controlled_by(controls.and_qubit(a))
            .unwrap(),
        toggle(RawQureg::from_iter([a.clone()]))
            .controlled_by(controls.and(&c.and(b)))
            .unwrap(),
    ]
}

/// `UMA(c, b, a)`: `CCNOT(c,b,a); CNOT(a,c); CNOT(c,b)`.
fn uma(c: &Qubit, b: &Qubit, a: &Qubit, controls: &QubitIntersection) -> Vec<Operation> {
    vec![
        toggle(RawQureg::from_iter([a.clone()]))
            .controlled_by(controls.and(&c.and(b)))
            .unwrap(),
        toggle(RawQureg::from_iter([c.clone()]))
            .controlled_by(controls.and_qubit(a))
            .unwrap(),
        toggle(RawQureg::from_iter([b.clone()]))
            .controlled_by(controls.and_qubit(c))
            .unwrap(),
    ]
}

/// Builds a zero-initialized `len`-qubit scratch register as a self-contained `(alloc, qubits,
/// release)` triple; `ops` receives the alloc op up front and the release op is returned
/// separately so callers can place it after the scratch register's uncomputation.
fn fresh_scratch(name: &str, len: usize) -> (Quint, Operation, Operation) {
    let handle = UniqueHandle::new(name);
    let qubits: Vec<Qubit> = (0..len).map(|i| Qubit::indexed(handle.clone(), i)).collect();
    let qureg = RawQureg::new(qubits);
    let quint = Quint::new(qureg.clone());
    let alloc = Operation::Alloc(AllocOp { qureg: qureg.clone(), x_basis: false });
    let release = Operation::Release(ReleaseOp { qureg, x_basis: false, dirty: false });
    (quint, alloc, release)
}

/// Toggles each set bit of `mask` within `target`, conditional on `controls` — the constant-XOR
/// primitive used both to load and to uncompute scratch constants.
fn xor_const_ops(target: &Quint, mask: u64, controls: &QubitIntersection) -> Vec<Operation> {
    (0..target.len())
        .filter(|i| (mask >> i) & 1 == 1)
        .map(|i| {
            toggle(RawQureg::from_iter([target.bit(i)]))
                .controlled_by(controls.clone())
                .unwrap()
        })
        .collect()
}

/// Reverses the effect of `load`, the ops that materialized `offset` into `scratch`.
///
/// `ConstInt` and quint-backed loads are plain XORs and so are self-inverse; `ScaledInt` is a
/// genuine addition, so it is undone by running the same shift-and-add with the factor negated
/// rather than by replaying `load`.
fn unload_offset(
    offset: &IntRValue,
    scratch: &Quint,
    controls: &QubitIntersection,
    load: Vec<Operation>,
) -> Vec<Operation> {
    match offset {
        IntRValue::ScaledInt(factor, c) => PlusEqualTimesGate {
            lvalue: scratch.clone(),
            quantum_factor: factor.clone(),
            const_factor: c.wrapping_neg(),
        }
        .decompose(controls.clone()),
        _ => load,
    }
}

impl PlusEqualGate {
    pub(crate) fn decompose(&self, controls: QubitIntersection) -> Vec<Operation> {
        let n = self.lvalue.len();
        if n == 0 {
            return Vec::new();
        }
        let mut ops = Vec::new();

        // Materialize the carry-in into a scratch qubit (released again at the end).
        let (carry_scratch, carry_alloc, carry_release) = fresh_scratch("plus_equal_carry", 1);
        let carry = carry_scratch.bit(0);
        ops.push(carry_alloc);
        match &self.carry_in {
            BoolRValue::ConstBool(true) => {
                ops.push(toggle(RawQureg::from_iter([carry.clone()])).controlled_by(controls.clone()).unwrap());
            }
            BoolRValue::ConstBool(false) => {}
            BoolRValue::QubitBacked(src) => {
                ops.push(
                    toggle(RawQureg::from_iter([carry.clone()]))
                        .controlled_by(controls.and_qubit(src))
                        .unwrap(),
                );
            }
            _ => {
                // Other r-value kinds collapse to their existing storage when used as a carry.
                if let Some(Location::Qubit(src)) = self.carry_in.existing_storage_location() {
                    ops.push(
                        toggle(RawQureg::from_iter([carry.clone()]))
                            .controlled_by(controls.and_qubit(&src))
                            .unwrap(),
                    );
                }
            }
        }

        // Materialize `offset`'s full n bits into a scratch register, restored before release.
        // Only the low n bits of a wider offset matter, and a narrower one is zero-extended —
        // both fall out of addition/XOR being taken modulo 2^n.
        let (offset_backed, owns_offset, load): (Quint, bool, Vec<Operation>) = match &self.offset
        {
            IntRValue::QuintBacked(q) if q.len() == n => (q.clone(), false, Vec::new()),
            IntRValue::ConstInt(c) => {
                let (scratch, alloc, _release) = fresh_scratch("plus_equal_offset", n);
                ops.push(alloc);
                let load = xor_const_ops(&scratch, *c, &controls);
                ops.extend(load.clone());
                (scratch, true, load)
            }
            IntRValue::ScaledInt(factor, c) => {
                let (scratch, alloc, _release) = fresh_scratch("plus_equal_offset", n);
                ops.push(alloc);
                let load = PlusEqualTimesGate {
                    lvalue: scratch.clone(),
                    quantum_factor: factor.clone(),
                    const_factor: *c,
                }
                .decompose(controls.clone());
                ops.extend(load.clone());
                (scratch, true, load)
            }
            IntRValue::QuintBacked(q) => {
                let (scratch, alloc, _release) = fresh_scratch("plus_equal_offset", n);
                ops.push(alloc);
                let load = XorOp { lvalue: scratch.clone(), mask: q.clone() }.decompose(controls.clone());
                ops.extend(load.clone());
                (scratch, true, load)
            }
            other => {
                // `Controlled`/`Lookup` offsets fall back to their existing quint storage, if any;
                // anything else leaves the scratch at zero.
                let (scratch, alloc, _release) = fresh_scratch("plus_equal_offset", n);
                ops.push(alloc);
                let load = match other.existing_storage_location() {
                    Some(Location::Quint(q)) => {
                        XorOp { lvalue: scratch.clone(), mask: q }.decompose(controls.clone())
                    }
                    _ => Vec::new(),
                };
                ops.extend(load.clone());
                (scratch, true, load)
            }
        };

        let a: Vec<Qubit> = (0..n).map(|i| offset_backed.bit(i)).collect();
        let b: Vec<Qubit> = (0..n).map(|i| self.lvalue.bit(i)).collect();

        ops.extend(maj(&carry, &b[0], &a[0], &controls));
        for i in 1..n {
            ops.extend(maj(&a[i - 1], &b[i], &a[i], &controls));
        }
        // The carry out of bit n-1 is discarded here (mod 2^n semantics): no qubit captures it.
        for i in (1..n).rev() {
            ops.extend(uma(&a[i - 1], &b[i], &a[i], &controls));
        }
        ops.extend(uma(&carry, &b[0], &a[0], &controls));

        if owns_offset {
            ops.extend(unload_offset(&self.offset, &offset_backed, &controls, load));
            ops.push(Operation::Release(ReleaseOp {
                qureg: offset_backed.qureg().clone(),
                x_basis: false,
                dirty: false,
            }));
        }
        ops.push(carry_release);
        ops
    }
}
