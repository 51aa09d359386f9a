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

//! The operation taxonomy: the indivisible units flowing through the lens stack.

pub mod flag;
pub mod gates;
pub mod let_del_rvalue;

pub use flag::{AllocOp, MeasureOp, MeasureXOp, ReleaseOp};
pub use gates::toggle_phase::PhaseFlipOp;
pub use let_del_rvalue::{DelRValueOp, LetRValueOp};

use crate::qubit::{not_controllable, Qubit, QubitIntersection};
use crate::register::{Qureg, RawQureg};
use crate::RevgateError;

use gates::add::PlusEqualGate;
use gates::cmp::IfLessThanThenGate;
use gates::let_and::{DelAndGate, LetAndGate};
use gates::lookup::XorLookupOp;
use gates::mult_add::PlusEqualTimesGate;
use gates::unary::{DelUnaryGate, LetUnaryGate};
use gates::xor::{XorConstOp, XorOp};

/// An unconditional bitwise NOT over a register. Fundamental: interpreted directly by sinks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleOp {
    /// The qubits toggled by this operation.
    pub targets: RawQureg,
}

/// A parameterized, reusable gate description plus its bound arguments.
///
/// Each variant pairs a gate's classical semantics (`emulate`) with its decomposition (`do`),
/// per the signature-gate contract; the schema of each variant's fields is fixed statically
/// rather than derived by reflection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureOp {
    /// `lvalue ^= mask`, position by position.
    Xor(XorOp),
    /// `lvalue ^= mask` for a classically-known mask.
    XorConst(XorConstOp),
    /// In-place modular addition, the Cuccaro ripple-carry adder.
    PlusEqual(PlusEqualGate),
    /// `effect` conditional on `lhs < rhs` (or `<=` with `or_equal`).
    IfLessThanThen(IfLessThanThenGate),
    /// `lvalue += quantum_factor * const_factor`.
    PlusEqualTimes(PlusEqualTimesGate),
    /// Initializes a fresh qubit to the AND of the active controls.
    LetAnd(LetAndGate),
    /// Uncomputes a qubit set by [`LetAnd`](SignatureOp::LetAnd), via measurement-based phase fixup.
    DelAnd(DelAndGate),
    /// Expands a binary register into a one-hot register.
    LetUnary(LetUnaryGate),
    /// Uncomputes a one-hot register set by [`LetUnary`](SignatureOp::LetUnary).
    DelUnary(DelUnaryGate),
    /// Toggles `lvalue` by the table row selected by `address`.
    XorLookup(XorLookupOp),
}

impl SignatureOp {
    fn hqslang(&self) -> &'static str {
        match self {
            SignatureOp::Xor(_) => "OP_XOR",
            SignatureOp::XorConst(_) => "OP_XOR_C",
            SignatureOp::PlusEqual(_) => "PlusEqualGate",
            SignatureOp::IfLessThanThen(_) => "IfLessThanThenGate",
            SignatureOp::PlusEqualTimes(_) => "PlusEqualTimesGate",
            SignatureOp::LetAnd(_) => "LetAnd",
            SignatureOp::DelAnd(_) => "DelAnd",
            SignatureOp::LetUnary(_) => "LetUnary",
            SignatureOp::DelUnary(_) => "DelUnary",
            SignatureOp::XorLookup(_) => "XorLookupOperation",
        }
    }
}

/// The indivisible unit flowing through the emission pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Fundamental bitwise NOT.
    Toggle(ToggleOp),
    /// Fundamental phase flip; classically invisible.
    PhaseFlip(PhaseFlipOp),
    /// Registers a qureg as live state.
    Alloc(AllocOp),
    /// Deregisters a qureg from live state.
    Release(ReleaseOp),
    /// Destructively reads a set of qubits.
    Measure(MeasureOp),
    /// X-basis measurement used for measurement-based uncomputation.
    MeasureX(MeasureXOp),
    /// A parameterized, reusable arithmetic/logic gate.
    Signature(SignatureOp),
    /// `inner`, additionally gated by `controls`. Nested controls are merged on construction.
    Controlled(Box<Operation>, QubitIntersection),
    /// The reverse of `inner`. Double-wrapping collapses on construction.
    Inverse(Box<Operation>),
    /// Binds an r-value into a provided l-value.
    LetRValue(LetRValueOp),
    /// The inverse of [`LetRValue`](Operation::LetRValue): unbinds a previously-bound l-value.
    DelRValue(DelRValueOp),
}

impl Operation {
    /// The gate name used in error messages and rendering.
    pub fn hqslang(&self) -> &'static str {
        match self {
            Operation::Toggle(_) => "OP_TOGGLE",
            Operation::PhaseFlip(_) => "OP_PHASE_FLIP",
            Operation::Alloc(_) => "AllocQuregOperation",
            Operation::Release(_) => "ReleaseQuregOperation",
            Operation::Measure(_) => "MeasureOperation",
            Operation::MeasureX(_) => "MeasureXForPhaseKickOperation",
            Operation::Signature(g) => g.hqslang(),
            Operation::Controlled(inner, _) => inner.hqslang(),
            Operation::Inverse(inner) => inner.hqslang(),
            Operation::LetRValue(_) => "LetRValueOperation",
            Operation::DelRValue(_) => "DelRValueOperation",
        }
    }

    /// Returns a controlled version of `self`.
    ///
    /// An empty control set returns `self` unchanged. A non-empty one merges with any existing
    /// outer control (`op.controlled_by(a).controlled_by(b) == op.controlled_by(a ∧ b)`).
    /// `AllocQuregOperation` and `ReleaseQuregOperation` cannot be controlled.
    pub fn controlled_by(self, controls: QubitIntersection) -> Result<Operation, RevgateError> {
        if controls.is_empty() {
            return Ok(self);
        }
        match self {
            Operation::Alloc(op) => Err(not_controllable2(op.hqslang())),
            Operation::Release(op) => Err(not_controllable2(op.hqslang())),
            Operation::Measure(_) => Err(RevgateError::MeasurementNotControllable),
            Operation::MeasureX(_) => Err(RevgateError::MeasurementNotControllable),
            Operation::Controlled(inner, existing) => {
                Ok(Operation::Controlled(inner, existing.and(&controls)))
            }
            other => Ok(Operation::Controlled(Box::new(other), controls)),
        }
    }

    /// Returns the reversed operation.
    ///
    /// `inverse()` is an involution: `op.inverse().inverse()` is structurally `op`.
    pub fn inverse(&self) -> Result<Operation, RevgateError> {
        match self {
            Operation::Toggle(_) | Operation::PhaseFlip(_) => Ok(self.clone()),
            Operation::Alloc(_) | Operation::Release(_) => {
                Err(RevgateError::NotInvertible { hqslang: self.hqslang() })
            }
            Operation::Measure(_) | Operation::MeasureX(_) => {
                Err(RevgateError::NotInvertible { hqslang: self.hqslang() })
            }
            Operation::Signature(g) => match g {
                SignatureOp::Xor(_) | SignatureOp::XorConst(_) | SignatureOp::XorLookup(_) => {
                    Ok(self.clone())
                }
                SignatureOp::PlusEqual(g) => Ok(Operation::Signature(SignatureOp::PlusEqual(
                    PlusEqualGate {
                        lvalue: g.lvalue.clone(),
                        offset: g.offset.negate(),
                        carry_in: g.carry_in.clone(),
                    },
                ))),
                SignatureOp::PlusEqualTimes(g) => Ok(Operation::Signature(
                    SignatureOp::PlusEqualTimes(PlusEqualTimesGate {
                        lvalue: g.lvalue.clone(),
                        quantum_factor: g.quantum_factor.clone(),
                        const_factor: g.const_factor.wrapping_neg(),
                    }),
                )),
                SignatureOp::IfLessThanThen(_) => {
                    Err(RevgateError::NotInvertible { hqslang: self.hqslang() })
                }
                SignatureOp::LetAnd(g) => Ok(Operation::Signature(SignatureOp::DelAnd(
                    DelAndGate { lvalue: g.lvalue.clone() },
                ))),
                SignatureOp::DelAnd(g) => Ok(Operation::Signature(SignatureOp::LetAnd(
                    LetAndGate { lvalue: g.lvalue.clone() },
                ))),
                SignatureOp::LetUnary(g) => Ok(Operation::Signature(SignatureOp::DelUnary(
                    DelUnaryGate { lvalue: g.lvalue.clone(), binary: g.binary.clone() },
                ))),
                SignatureOp::DelUnary(g) => Ok(Operation::Signature(SignatureOp::LetUnary(
                    LetUnaryGate { lvalue: g.lvalue.clone(), binary: g.binary.clone() },
                ))),
            },
            Operation::Controlled(inner, controls) => {
                Ok(Operation::Controlled(Box::new(inner.inverse()?), controls.clone()))
            }
            Operation::Inverse(inner) => Ok((**inner).clone()),
            Operation::LetRValue(op) => Ok(Operation::DelRValue(DelRValueOp {
                rvalue: op.rvalue.clone(),
                location: op.location.clone(),
            })),
            Operation::DelRValue(op) => Ok(Operation::LetRValue(LetRValueOp {
                rvalue: op.rvalue.clone(),
                location: op.location.clone(),
            })),
        }
    }

    /// Lowers `self` to a sequence of more-fundamental operations, under `controls`.
    ///
    /// Fundamental operations (`Toggle`, `PhaseFlip`, `Alloc`, `Release`, `Measure`, `MeasureX`,
    /// and the table-driven `XorLookup`) have no decomposition; callers special-case them.
    pub fn decompose(&self, controls: QubitIntersection) -> Result<Vec<Operation>, RevgateError> {
        match self {
            Operation::Toggle(_)
            | Operation::PhaseFlip(_)
            | Operation::Alloc(_)
            | Operation::Release(_)
            | Operation::Measure(_)
            | Operation::MeasureX(_)
            | Operation::LetRValue(_)
            | Operation::DelRValue(_) => {
                Err(RevgateError::FundamentalOperation { hqslang: self.hqslang() })
            }
            Operation::Signature(SignatureOp::XorLookup(_))
            | Operation::Signature(SignatureOp::DelAnd(_)) => {
                Err(RevgateError::FundamentalOperation { hqslang: self.hqslang() })
            }
            Operation::Signature(SignatureOp::Xor(g)) => Ok(g.decompose(controls)),
            Operation::Signature(SignatureOp::XorConst(g)) => Ok(g.decompose(controls)),
            Operation::Signature(SignatureOp::PlusEqual(g)) => Ok(g.decompose(controls)),
            Operation::Signature(SignatureOp::IfLessThanThen(g)) => Ok(g.decompose(controls)),
            Operation::Signature(SignatureOp::PlusEqualTimes(g)) => Ok(g.decompose(controls)),
            Operation::Signature(SignatureOp::LetAnd(g)) => Ok(g.decompose(controls)),
            Operation::Signature(SignatureOp::LetUnary(g)) => Ok(g.decompose(controls)),
            Operation::Signature(SignatureOp::DelUnary(g)) => Ok(g.decompose(controls)),
            Operation::Controlled(inner, own_controls) => {
                inner.decompose(controls.and(own_controls))
            }
            Operation::Inverse(inner) => {
                let sub_ops = inner.decompose(controls)?;
                sub_ops.into_iter().rev().map(|op| op.inverse()).collect()
            }
        }
    }

    /// True for `Toggle`/`PhaseFlip`/`Alloc`/`Release`/`Measure`/`MeasureX`/table-driven lookups:
    /// operations a terminal sink must interpret directly rather than decompose.
    pub fn is_fundamental(&self) -> bool {
        matches!(
            self,
            Operation::Toggle(_)
                | Operation::PhaseFlip(_)
                | Operation::Alloc(_)
                | Operation::Release(_)
                | Operation::Measure(_)
                | Operation::MeasureX(_)
                | Operation::LetRValue(_)
                | Operation::DelRValue(_)
                | Operation::Signature(SignatureOp::XorLookup(_))
                | Operation::Signature(SignatureOp::DelAnd(_))
        )
    }
}

fn not_controllable2(hqslang: &'static str) -> RevgateError {
    not_controllable(hqslang)
}

pub(crate) fn toggle(targets: RawQureg) -> Operation {
    Operation::Toggle(ToggleOp { targets })
}

pub(crate) fn toggle_qubit_controlled(
    target: Qubit,
    controls: QubitIntersection,
) -> Result<Operation, RevgateError> {
    toggle(RawQureg::from_iter([target])).controlled_by(controls)
}
