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

//! `PlusEqualTimesGate`: `lvalue += quantum_factor * const_factor`, via repeated shift-and-add.

use crate::ops::Operation;
use crate::qubit::QubitIntersection;
use crate::quint::Quint;
use crate::rvalue::{BoolRValue, IntRValue};

use super::add::PlusEqualGate;

/// `lvalue += quantum_factor * const_factor`, modulo the width of `lvalue`.
///
/// Decomposes into one controlled [`PlusEqualGate`] per bit of `quantum_factor`: bit `i`
/// contributes `const_factor << i`, conditional on that bit being set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlusEqualTimesGate {
    /// The register accumulated into.
    pub lvalue: Quint,
    /// The quantum multiplicand.
    pub quantum_factor: Quint,
    /// The classical multiplicand.
    pub const_factor: u64,
}

impl PlusEqualTimesGate {
    pub(crate) fn decompose(&self, controls: QubitIntersection) -> Vec<Operation> {
        let mut ops = Vec::new();
        for i in 0..self.quantum_factor.len() {
            let bit_controls = controls.and_qubit(&self.quantum_factor.bit(i));
            let shifted = self.const_factor.wrapping_shl(i as u32);
            let add = PlusEqualGate {
                lvalue: self.lvalue.clone(),
                offset: IntRValue::ConstInt(shifted),
                carry_in: BoolRValue::ConstBool(false),
            };
            ops.extend(add.decompose(bit_controls));
        }
        ops
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qalloc::qalloc_int;
    use crate::sim::Sim;

    #[test]
    fn accumulates_scaled_quantum_factor() {
        let sim = Sim::new();
        let (sim, out) = sim.run(|| {
            let factor = qalloc_int("factor", 8);
            factor.xor_assign_const(15);
            let out = qalloc_int("out", 10);
            out.add_assign_times(&factor, 235);
            out.add_assign(&IntRValue::from(4));
            out
        });
        assert_eq!(sim.get_int(&out), (15 * 235 + 4) % 1024);
    }
}
