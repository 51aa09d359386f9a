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

//! `LetAndGate`/`DelAndGate`: initialize and uncompute a qubit holding the AND of active controls.

use crate::ops::{toggle, Operation};
use crate::qubit::{Qubit, QubitIntersection};
use crate::register::RawQureg;

/// Sets a fresh qubit to the AND of the active controls: `lvalue ^= controls`.
///
/// Assumes `lvalue` starts at zero, as freshly allocated qubits do; the result is `1` exactly
/// when every control qubit is `1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetAndGate {
    /// The qubit receiving the AND of the controls.
    pub lvalue: Qubit,
}

/// Uncomputes a qubit set by [`LetAndGate`] via measurement-based phase fixup.
///
/// Measures `lvalue` in the X basis; a `true` result means the uncomputation would otherwise
/// leave a stray global phase, corrected by a phase flip conditional on the active controls.
/// The correction is conditional on a runtime measurement outcome, so unlike `LetAnd` this has
/// no static decomposition — a terminal sink applies it directly, the same way it applies
/// [`XorLookupOp`](super::lookup::XorLookupOp).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelAndGate {
    /// The qubit being uncomputed.
    pub lvalue: Qubit,
}

impl LetAndGate {
    pub(crate) fn decompose(&self, controls: QubitIntersection) -> Vec<Operation> {
        vec![toggle(RawQureg::from_iter([self.lvalue.clone()]))
            .controlled_by(controls)
            .expect("OP_TOGGLE is always controllable")]
    }
}
