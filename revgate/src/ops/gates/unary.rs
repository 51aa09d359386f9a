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

//! `LetUnaryGate`/`DelUnaryGate`: expand a binary register into a one-hot register, and back.

use crate::ops::{toggle, Operation};
use crate::qubit::QubitIntersection;
use crate::quint::Quint;
use crate::register::RawQureg;

use super::let_and::{DelAndGate, LetAndGate};

/// Expands `binary` into a one-hot register `lvalue`, where `lvalue.len() >= 2^binary.len()`.
///
/// Built as a binary-counter "split" tree: `lvalue[0]` starts selected (under `controls`);
/// at each level `i`, every currently-selected slot `j` splits into `j` and `j + 2^i`
/// conditional on bit `i` of `binary`, using [`LetAndGate`] to mint the new slot's qubit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetUnaryGate {
    /// The one-hot output register.
    pub lvalue: Quint,
    /// The binary index selecting which slot of `lvalue` ends up set.
    pub binary: Quint,
}

/// Uncomputes a one-hot register set by [`LetUnaryGate`], in reverse split order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelUnaryGate {
    /// The one-hot register being uncomputed.
    pub lvalue: Quint,
    /// The binary index that was used to build `lvalue`.
    pub binary: Quint,
}

fn toggle_xor(a: crate::qubit::Qubit, onto: crate::qubit::Qubit, controls: &QubitIntersection) -> Operation {
    toggle(RawQureg::from_iter([onto]))
        .controlled_by(controls.and_qubit(&a))
        .expect("OP_TOGGLE is always controllable")
}

impl LetUnaryGate {
    pub(crate) fn decompose(&self, controls: QubitIntersection) -> Vec<Operation> {
        let mut ops = Vec::new();
        if self.lvalue.is_empty() {
            return ops;
        }

        ops.extend(LetAndGate { lvalue: self.lvalue.bit(0) }.decompose(controls.clone()));

        for i in 0..self.binary.len() {
            let q = self.binary.bit(i);
            let width = 1usize << i;
            if width >= self.lvalue.len() {
                break;
            }
            for j in 0..width {
                let hi = j + width;
                if hi >= self.lvalue.len() {
                    break;
                }
                let split_controls = controls.and_qubit(&self.lvalue.bit(j)).and_qubit(&q);
                ops.extend(LetAndGate { lvalue: self.lvalue.bit(hi) }.decompose(split_controls));
                ops.push(toggle_xor(self.lvalue.bit(hi), self.lvalue.bit(j), &controls));
            }
        }
        ops
    }
}

impl DelUnaryGate {
    pub(crate) fn decompose(&self, controls: QubitIntersection) -> Vec<Operation> {
        let mut ops = Vec::new();
        if self.lvalue.is_empty() {
            return ops;
        }

        let levels: Vec<usize> = (0..self.binary.len())
            .take_while(|&i| (1usize << i) < self.lvalue.len())
            .collect();

        for &i in levels.iter().rev() {
            let q = self.binary.bit(i);
            let width = 1usize << i;
            for j in (0..width).rev() {
                let hi = j + width;
                if hi >= self.lvalue.len() {
                    continue;
                }
                ops.push(toggle_xor(self.lvalue.bit(hi), self.lvalue.bit(j), &controls));
                let split_controls = controls.and_qubit(&self.lvalue.bit(j)).and_qubit(&q);
                ops.push(
                    Operation::Signature(crate::ops::SignatureOp::DelAnd(DelAndGate {
                        lvalue: self.lvalue.bit(hi),
                    }))
                    .controlled_by(split_controls)
                    .expect("DelAnd is controllable"),
                );
            }
        }

        ops.push(
            Operation::Signature(crate::ops::SignatureOp::DelAnd(DelAndGate {
                lvalue: self.lvalue.bit(0),
            }))
            .controlled_by(controls)
            .expect("DelAnd is controllable"),
        );
        ops
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::SignatureOp;
    use crate::qalloc::qalloc_int;
    use crate::sim::Sim;

    fn expand_unary(binary_val: u64, binary_len: usize, lvalue_len: usize) -> u64 {
        let sim = Sim::new();
        let (sim, lvalue) = sim.run(|| {
            let binary = qalloc_int("binary", binary_len);
            binary.xor_assign_const(binary_val);
            let lvalue = qalloc_int("lvalue", lvalue_len);
            let op = Operation::Signature(SignatureOp::LetUnary(LetUnaryGate {
                lvalue: lvalue.clone(),
                binary: binary.clone(),
            }));
            crate::lens::emit(op);
            lvalue
        });
        sim.get_int(&lvalue)
    }

    #[test]
    fn expands_every_three_bit_value_to_one_hot() {
        for b in 0..8u64 {
            assert_eq!(expand_unary(b, 3, 8), 1u64 << b);
        }
    }
}
