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

//! A register viewed as a little-endian non-negative integer.

use std::fmt::{self, Display, Formatter};
use std::ops::Range;

use crate::ops::gates::add::PlusEqualGate;
use crate::ops::gates::mult_add::PlusEqualTimesGate;
use crate::ops::gates::xor::{XorConstOp, XorOp};
use crate::ops::{Operation, SignatureOp};
use crate::qubit::{Qubit, QubitIntersection};
use crate::register::{Qureg, RawQureg};
use crate::rvalue::{BoolRValue, IntRValue};

/// A little-endian integer view over a register: `qureg[0]` is the least significant bit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quint {
    qureg: RawQureg,
}

impl Quint {
    /// Wraps a register view as an integer view over the same qubits.
    pub fn new(qureg: RawQureg) -> Self {
        Quint { qureg }
    }

    /// Number of bits in this view.
    pub fn len(&self) -> usize {
        self.qureg.len()
    }

    /// True when this view has no bits (represents only the value zero).
    pub fn is_empty(&self) -> bool {
        self.qureg.is_empty()
    }

    /// The underlying register view.
    pub fn qureg(&self) -> &RawQureg {
        &self.qureg
    }

    /// The qubit holding bit `i` (the `2^i` place).
    pub fn bit(&self, i: usize) -> Qubit {
        self.qureg.get(i)
    }

    /// A sub-view over `range`, itself a `Quint` over the sliced qubits.
    pub fn slice(&self, range: Range<usize>) -> Quint {
        Quint::new(self.qureg.slice(range))
    }

    /// `self ^= mask`, toggling each bit of `self` where the corresponding constant bit is set.
    pub fn xor_assign_const(&self, mask: u64) {
        self.xor_assign_const_controlled(mask, QubitIntersection::EMPTY);
    }

    /// `self ^= mask` conditional on `controls`.
    pub fn xor_assign_const_controlled(&self, mask: u64, controls: QubitIntersection) {
        let op = Operation::Signature(SignatureOp::XorConst(XorConstOp {
            lvalue: self.clone(),
            mask,
        }));
        crate::lens::emit(op.controlled_by(controls).expect("OP_XOR_C is controllable"));
    }

    /// `self ^= other`, bitwise, position by position.
    pub fn xor_assign(&self, other: &Quint) {
        self.xor_assign_controlled(other, QubitIntersection::EMPTY);
    }

    /// `self ^= other` conditional on `controls`.
    pub fn xor_assign_controlled(&self, other: &Quint, controls: QubitIntersection) {
        let op = Operation::Signature(SignatureOp::Xor(XorOp {
            lvalue: self.clone(),
            mask: other.clone(),
        }));
        crate::lens::emit(op.controlled_by(controls).expect("OP_XOR is controllable"));
    }

    /// `self += offset`, modulo `2^len(self)`, with no carry-in.
    pub fn add_assign(&self, offset: &IntRValue) {
        self.add_assign_with_carry(offset, &BoolRValue::from(false), QubitIntersection::EMPTY);
    }

    /// `self += offset` with an explicit carry-in, conditional on `controls`.
    pub fn add_assign_with_carry(
        &self,
        offset: &IntRValue,
        carry_in: &BoolRValue,
        controls: QubitIntersection,
    ) {
        let op = Operation::Signature(SignatureOp::PlusEqual(PlusEqualGate {
            lvalue: self.clone(),
            offset: offset.clone(),
            carry_in: carry_in.clone(),
        }));
        crate::lens::emit(op.controlled_by(controls).expect("PlusEqualGate is controllable"));
    }

    /// `self -= offset`, i.e. `self += (-offset)` modulo `2^len(self)`.
    pub fn sub_assign(&self, offset: &IntRValue) {
        self.add_assign(&offset.negate());
    }

    /// `self += quantum_factor * const_factor`.
    pub fn add_assign_times(&self, quantum_factor: &Quint, const_factor: u64) {
        self.add_assign_times_controlled(quantum_factor, const_factor, QubitIntersection::EMPTY);
    }

    /// `self += quantum_factor * const_factor` conditional on `controls`.
    pub fn add_assign_times_controlled(
        &self,
        quantum_factor: &Quint,
        const_factor: u64,
        controls: QubitIntersection,
    ) {
        let op = Operation::Signature(SignatureOp::PlusEqualTimes(PlusEqualTimesGate {
            lvalue: self.clone(),
            quantum_factor: quantum_factor.clone(),
            const_factor,
        }));
        crate::lens::emit(op.controlled_by(controls).expect("PlusEqualTimesGate is controllable"));
    }

    /// Builds the `lhs < rhs` (or `lhs <= rhs` when `or_equal` is set) comparison r-value.
    pub fn less_than(&self, rhs: &Quint) -> crate::rvalue::LessThanRValue {
        crate::rvalue::LessThanRValue::new(self.clone(), rhs.clone(), BoolRValue::from(false))
    }

    /// Builds the `lhs <= rhs` comparison r-value.
    pub fn less_than_or_equal(&self, rhs: &Quint) -> crate::rvalue::LessThanRValue {
        crate::rvalue::LessThanRValue::new(self.clone(), rhs.clone(), BoolRValue::from(true))
    }
}

impl Qureg for Quint {
    fn len(&self) -> usize {
        self.qureg.len()
    }

    fn get(&self, index: usize) -> Qubit {
        self.qureg.get(index)
    }
}

impl Display for Quint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Quint{}", self.qureg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::register::NamedQureg;

    #[test]
    fn slice_keeps_little_endian_order() {
        let base = NamedQureg::new("x", 4);
        let q = Quint::new(base.slice(0..4));
        let sub = q.slice(1..3);
        assert_eq!(sub.bit(0), base.get(1));
        assert_eq!(sub.bit(1), base.get(2));
    }
}
