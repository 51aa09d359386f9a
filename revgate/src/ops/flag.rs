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

//! Flag operations: no classical-state permutation, only lifecycle/measurement metadata.

use std::cell::RefCell;
use std::rc::Rc;

use crate::qubit::Qubit;
use crate::register::RawQureg;

/// Registers a qureg's qubits as live. Cannot be controlled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocOp {
    /// The qubits entering the live state.
    pub qureg: RawQureg,
    /// When true, qubits initialize to a uniform-random bit rather than zero.
    pub x_basis: bool,
}

impl AllocOp {
    pub(crate) fn hqslang(&self) -> &'static str {
        "AllocQuregOperation"
    }
}

/// Deregisters a qureg's qubits from the live state. Cannot be controlled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseOp {
    /// The qubits leaving the live state.
    pub qureg: RawQureg,
    /// Whether the qubits were allocated in the X basis.
    pub x_basis: bool,
    /// When false, every released qubit must be in the zero state (enforced by the simulator).
    pub dirty: bool,
}

impl ReleaseOp {
    pub(crate) fn hqslang(&self) -> &'static str {
        "ReleaseQuregOperation"
    }
}

/// How a raw measured bit vector is interpreted into a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureInterpretation {
    /// Each bit is reported individually, in register order.
    Bits,
    /// The bit vector is interpreted as a little-endian unsigned integer.
    LittleEndianInt,
}

/// Destructively reads a set of qubits, optionally resetting them to zero.
///
/// Measurement cannot be controlled and has no defined inverse.
#[derive(Debug, Clone)]
pub struct MeasureOp {
    /// The qubits being measured.
    pub targets: RawQureg,
    /// How the raw bit vector should be interpreted.
    pub interpret: MeasureInterpretation,
    /// Whether the targets are cleared to zero after reading.
    pub reset: bool,
    /// Populated by the terminal sink with the bits read, in register order.
    pub raw_results: Rc<RefCell<Option<Vec<bool>>>>,
}

impl PartialEq for MeasureOp {
    fn eq(&self, other: &Self) -> bool {
        self.targets == other.targets && self.interpret == other.interpret && self.reset == other.reset
    }
}
impl Eq for MeasureOp {}

impl MeasureOp {
    /// Builds an as-yet-unresolved measurement of `targets`.
    pub fn new(targets: RawQureg, interpret: MeasureInterpretation, reset: bool) -> Self {
        MeasureOp {
            targets,
            interpret,
            reset,
            raw_results: Rc::new(RefCell::new(None)),
        }
    }

    /// The bits read by the terminal sink, once resolved.
    pub fn raw_results(&self) -> Option<Vec<bool>> {
        self.raw_results.borrow().clone()
    }

    /// Interprets the resolved bits as a little-endian unsigned integer, if resolved.
    pub fn as_int(&self) -> Option<u64> {
        self.raw_results().map(|bits| {
            bits.iter()
                .enumerate()
                .fold(0u64, |acc, (i, &b)| acc | ((b as u64) << i))
        })
    }
}

/// X-basis measurement used for measurement-based uncomputation (phase fixup).
///
/// No defined inverse; callers decide, from the classical result, whether to emit a
/// compensating `OP_PHASE_FLIP`.
#[derive(Debug, Clone)]
pub struct MeasureXOp {
    /// The qubit being measured and reset.
    pub target: Qubit,
    /// Populated by the terminal sink with the bit read.
    pub result: Rc<RefCell<Option<bool>>>,
}

impl PartialEq for MeasureXOp {
    fn eq(&self, other: &Self) -> bool {
        self.target == other.target
    }
}
impl Eq for MeasureXOp {}

impl MeasureXOp {
    /// Builds an as-yet-unresolved X-basis measurement of `target`.
    pub fn new(target: Qubit) -> Self {
        MeasureXOp {
            target,
            result: Rc::new(RefCell::new(None)),
        }
    }

    /// The bit read by the terminal sink, once resolved.
    pub fn result(&self) -> Option<bool> {
        *self.result.borrow()
    }
}
