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

//! `OP_XOR` and `OP_XOR_C`: bitwise XOR into a quint, by another quint or by a constant mask.

use crate::ops::{toggle, Operation};
use crate::qubit::QubitIntersection;
use crate::quint::Quint;
use crate::register::{Qureg, RawQureg};

/// `lvalue ^= mask`, toggling `lvalue[i]` under `controls ∧ mask[i]` for each bit position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XorOp {
    /// The register being XORed into.
    pub lvalue: Quint,
    /// The register supplying the mask bits.
    pub mask: Quint,
}

impl XorOp {
    pub(crate) fn decompose(&self, controls: QubitIntersection) -> Vec<Operation> {
        (0..self.lvalue.len().min(self.mask.len()))
            .map(|i| {
                let c = controls.and_qubit(&self.mask.bit(i));
                toggle(RawQureg::from_iter([self.lvalue.bit(i)]))
                    .controlled_by(c)
                    .expect("OP_TOGGLE is always controllable")
            })
            .collect()
    }
}

/// `lvalue ^= mask`, toggling the corresponding qubit for each set bit of the constant `mask`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XorConstOp {
    /// The register being XORed into.
    pub lvalue: Quint,
    /// The classically-known bitmask.
    pub mask: u64,
}

impl XorConstOp {
    pub(crate) fn decompose(&self, controls: QubitIntersection) -> Vec<Operation> {
        (0..self.lvalue.len())
            .filter(|i| (self.mask >> i) & 1 == 1)
            .map(|i| {
                toggle(RawQureg::from_iter([self.lvalue.bit(i)]))
                    .controlled_by(controls.clone())
                    .expect("OP_TOGGLE is always controllable")
            })
            .collect()
    }
}
