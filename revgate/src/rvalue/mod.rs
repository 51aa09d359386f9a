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

//! Abstract values that can be read, phase-flipped-on, or materialized into storage.

pub mod table;

use std::fmt::{self, Display, Formatter};

use crate::ops::gates::toggle_phase::PhaseFlipOp;
use crate::ops::Operation;
use crate::qubit::{Qubit, QubitIntersection};
use crate::quint::Quint;
use crate::register::{NamedQureg, Qureg, RawQureg};
use crate::RevgateError;

pub use table::LookupTable;

/// An l-value: a location an r-value can be materialized into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// A single addressable bit.
    Qubit(Qubit),
    /// A little-endian integer register.
    Quint(Quint),
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Location::Qubit(q) => write!(f, "{q}"),
            Location::Quint(q) => write!(f, "{q}"),
        }
    }
}

/// A control-wrapped boolean value, used to build `controls ∧ value` expressions inline.
pub fn controlled_by(controls: QubitIntersection, value: BoolRValue) -> BoolRValue {
    BoolRValue::Controlled(Box::new(value), controls)
}

/// Lifts a plain qubit into a [`BoolRValue`] for use with r-value combinators.
pub fn hold(qubit: Qubit) -> BoolRValue {
    BoolRValue::QubitBacked(qubit)
}

/// An abstract boolean-valued expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoolRValue {
    /// A fixed, classically-known boolean.
    ConstBool(bool),
    /// The value currently held by a qubit.
    QubitBacked(Qubit),
    /// Another r-value, additionally gated by a control set.
    Controlled(Box<BoolRValue>, QubitIntersection),
    /// `lhs < rhs` or `lhs <= rhs`, see [`LessThanRValue`].
    LessThan(LessThanRValue),
}

impl From<bool> for BoolRValue {
    fn from(b: bool) -> Self {
        BoolRValue::ConstBool(b)
    }
}

impl From<Qubit> for BoolRValue {
    fn from(q: Qubit) -> Self {
        BoolRValue::QubitBacked(q)
    }
}

impl From<LessThanRValue> for BoolRValue {
    fn from(cmp: LessThanRValue) -> Self {
        BoolRValue::LessThan(cmp)
    }
}

impl BoolRValue {
    /// The registers whose permutation defines this value's truth, for simulation.
    pub fn permutation_registers(&self) -> Vec<RawQureg> {
        match self {
            BoolRValue::ConstBool(_) => Vec::new(),
            BoolRValue::QubitBacked(q) => vec![RawQureg::from_iter([q.clone()])],
            BoolRValue::Controlled(inner, controls) => {
                let mut regs = inner.permutation_registers();
                regs.push(controls.to_qureg());
                regs
            }
            BoolRValue::LessThan(cmp) => cmp.permutation_registers(),
        }
    }

    /// Returns the existing location backing this value, if it is already stored somewhere.
    pub fn existing_storage_location(&self) -> Option<Location> {
        match self {
            BoolRValue::QubitBacked(q) => Some(Location::Qubit(q.clone())),
            _ => None,
        }
    }

    /// A fresh, zero-initialized location suitable for holding this value.
    pub fn make_storage_location(&self, name: impl Into<String>) -> Location {
        Location::Qubit(Qubit::new(name))
    }

    /// Emits operations that set `loc` to this value's truth, conditional on `controls`.
    ///
    /// Assumes `loc` starts at zero.
    pub fn init_storage_location(
        &self,
        loc: &Location,
        controls: QubitIntersection,
    ) -> Result<(), RevgateError> {
        let target = match loc {
            Location::Qubit(q) => q,
            Location::Quint(_) => {
                return Err(RevgateError::UnrepresentableOperation {
                    hqslang: "BoolRValue::init_storage_location",
                    msg: "a boolean r-value cannot initialize a quint location".into(),
                })
            }
        };
        match self {
            BoolRValue::ConstBool(true) => {
                target.toggle_controlled_by(controls);
                Ok(())
            }
            BoolRValue::ConstBool(false) => Ok(()),
            BoolRValue::QubitBacked(src) => {
                target.toggle_controlled_by(controls.and_qubit(src));
                Ok(())
            }
            BoolRValue::Controlled(inner, extra) => {
                inner.init_storage_location(loc, controls.and(extra))
            }
            BoolRValue::LessThan(cmp) => cmp.init_into(target, controls),
        }
    }

    /// The reversible inverse of [`init_storage_location`](Self::init_storage_location).
    pub fn del_storage_location(
        &self,
        loc: &Location,
        controls: QubitIntersection,
    ) -> Result<(), RevgateError> {
        crate::lens::invert_scope(|| self.init_storage_location(loc, controls))
    }

    /// Classically evaluates this value by reading bits through `read`.
    ///
    /// Used by the simulator to interpret `LetRValue`/`DelRValue` and the comparator's fast
    /// emulation path directly against its own state, without re-entering the emission stack.
    pub(crate) fn evaluate(&self, read: &dyn Fn(&Qubit) -> bool) -> bool {
        match self {
            BoolRValue::ConstBool(b) => *b,
            BoolRValue::QubitBacked(q) => read(q),
            BoolRValue::Controlled(inner, controls) => {
                controls.iter().all(|q| read(q)) && inner.evaluate(read)
            }
            BoolRValue::LessThan(cmp) => cmp.evaluate(read),
        }
    }

    /// Emits a phase flip conditional on `controls ∧ (this value is true)`.
    pub fn phase_flip_if(&self, controls: QubitIntersection) -> Result<(), RevgateError> {
        match self {
            BoolRValue::ConstBool(true) => {
                crate::lens::emit(
                    Operation::PhaseFlip(PhaseFlipOp)
                        .controlled_by(controls)
                        .expect("OP_PHASE_FLIP is controllable"),
                );
                Ok(())
            }
            BoolRValue::ConstBool(false) => Ok(()),
            BoolRValue::QubitBacked(q) => {
                crate::lens::emit(
                    Operation::PhaseFlip(PhaseFlipOp)
                        .controlled_by(controls.and_qubit(q))
                        .expect("OP_PHASE_FLIP is controllable"),
                );
                Ok(())
            }
            BoolRValue::Controlled(inner, extra) => inner.phase_flip_if(controls.and(extra)),
            BoolRValue::LessThan(cmp) => cmp.phase_flip_if(controls),
        }
    }
}

/// An abstract non-negative integer-valued expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntRValue {
    /// A fixed, classically-known integer.
    ConstInt(u64),
    /// The value currently held by a quint.
    QuintBacked(Quint),
    /// `quint * const_factor`.
    ScaledInt(Quint, u64),
    /// Another r-value, additionally gated by a control set: contributes zero when false.
    Controlled(Box<IntRValue>, QubitIntersection),
    /// A row of a lookup table, selected by a quint address.
    Lookup(LookupRValue),
}

impl From<u64> for IntRValue {
    fn from(v: u64) -> Self {
        IntRValue::ConstInt(v)
    }
}

impl From<Quint> for IntRValue {
    fn from(q: Quint) -> Self {
        IntRValue::QuintBacked(q)
    }
}

impl IntRValue {
    /// The registers whose permutation defines this value, for simulation.
    pub fn permutation_registers(&self) -> Vec<RawQureg> {
        match self {
            IntRValue::ConstInt(_) => Vec::new(),
            IntRValue::QuintBacked(q) => vec![q.qureg().clone()],
            IntRValue::ScaledInt(q, _) => vec![q.qureg().clone()],
            IntRValue::Controlled(inner, controls) => {
                let mut regs = inner.permutation_registers();
                regs.push(controls.to_qureg());
                regs
            }
            IntRValue::Lookup(lookup) => vec![lookup.address.qureg().clone()],
        }
    }

    /// Returns the existing location backing this value, if it is already stored somewhere.
    pub fn existing_storage_location(&self) -> Option<Location> {
        match self {
            IntRValue::QuintBacked(q) => Some(Location::Quint(q.clone())),
            _ => None,
        }
    }

    /// A fresh, zero-initialized `min_len`-bit location suitable for holding this value.
    pub fn make_storage_location(&self, name: impl Into<String>, min_len: usize) -> Location {
        Location::Quint(Quint::new(NamedQureg::new(name, min_len).slice(0..min_len)))
    }

    /// Emits operations that set `loc` to this value, conditional on `controls`.
    ///
    /// Assumes `loc` starts at zero.
    pub fn init_storage_location(
        &self,
        loc: &Location,
        controls: QubitIntersection,
    ) -> Result<(), RevgateError> {
        let target = match loc {
            Location::Quint(q) => q,
            Location::Qubit(_) => {
                return Err(RevgateError::UnrepresentableOperation {
                    hqslang: "IntRValue::init_storage_location",
                    msg: "an integer r-value cannot initialize a qubit location".into(),
                })
            }
        };
        match self {
            IntRValue::ConstInt(c) => {
                target.xor_assign_const_controlled(*c, controls);
                Ok(())
            }
            IntRValue::QuintBacked(src) => {
                target.xor_assign_controlled(src, controls);
                Ok(())
            }
            IntRValue::ScaledInt(factor, c) => {
                target.add_assign_times_controlled(factor, *c, controls);
                Ok(())
            }
            IntRValue::Controlled(inner, extra) => {
                inner.init_storage_location(loc, controls.and(extra))
            }
            IntRValue::Lookup(lookup) => lookup.init_into(target, controls),
        }
    }

    /// The reversible inverse of [`init_storage_location`](Self::init_storage_location).
    pub fn del_storage_location(
        &self,
        loc: &Location,
        controls: QubitIntersection,
    ) -> Result<(), RevgateError> {
        crate::lens::invert_scope(|| self.init_storage_location(loc, controls))
    }

    /// Classically evaluates this value by reading bits through `read`.
    pub(crate) fn evaluate(&self, read: &dyn Fn(&Qubit) -> bool) -> u64 {
        match self {
            IntRValue::ConstInt(c) => *c,
            IntRValue::QuintBacked(q) => read_quint(q, read),
            IntRValue::ScaledInt(q, c) => read_quint(q, read).wrapping_mul(*c),
            IntRValue::Controlled(inner, controls) => {
                if controls.iter().all(|q| read(q)) {
                    inner.evaluate(read)
                } else {
                    0
                }
            }
            IntRValue::Lookup(lookup) => lookup.evaluate(read),
        }
    }

    /// Negates this value modulo the width it will eventually be added into.
    pub fn negate(&self) -> IntRValue {
        match self {
            IntRValue::ConstInt(c) => IntRValue::ConstInt(c.wrapping_neg()),
            other => IntRValue::ScaledInt(
                match other.existing_storage_location() {
                    Some(Location::Quint(q)) => q,
                    _ => panic!("negate() only supports constants and quint-backed values"),
                },
                u64::MAX,
            ),
        }
    }
}

/// `lhs < rhs`, or `lhs <= rhs` when `or_equal` holds, as a reusable r-value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessThanRValue {
    pub(crate) lhs: Quint,
    pub(crate) rhs: Quint,
    pub(crate) or_equal: Box<BoolRValue>,
}

impl LessThanRValue {
    /// Builds the comparison `lhs < rhs` (or `<=` when `or_equal` holds).
    pub fn new(lhs: Quint, rhs: Quint, or_equal: BoolRValue) -> Self {
        LessThanRValue {
            lhs,
            rhs,
            or_equal: Box::new(or_equal),
        }
    }

    fn permutation_registers(&self) -> Vec<RawQureg> {
        vec![self.lhs.qureg().clone(), self.rhs.qureg().clone()]
    }

    fn init_into(&self, target: &Qubit, controls: QubitIntersection) -> Result<(), RevgateError> {
        crate::ops::gates::cmp::if_less_than_then(
            &self.lhs,
            &self.rhs,
            &self.or_equal,
            crate::ops::gates::cmp::Effect::Toggle(target.clone()),
            controls,
        )
    }

    fn phase_flip_if(&self, controls: QubitIntersection) -> Result<(), RevgateError> {
        crate::ops::gates::cmp::if_less_than_then(
            &self.lhs,
            &self.rhs,
            &self.or_equal,
            crate::ops::gates::cmp::Effect::PhaseFlip,
            controls,
        )
    }

    pub(crate) fn evaluate(&self, read: &dyn Fn(&Qubit) -> bool) -> bool {
        let lhs = read_quint(&self.lhs, read);
        let rhs = read_quint(&self.rhs, read);
        if self.or_equal.evaluate(read) {
            lhs <= rhs
        } else {
            lhs < rhs
        }
    }
}

/// Reads a little-endian integer out of `quint` through `read`.
pub(crate) fn read_quint(quint: &Quint, read: &dyn Fn(&Qubit) -> bool) -> u64 {
    (0..quint.len()).fold(0u64, |acc, i| acc | ((read(&quint.bit(i)) as u64) << i))
}

/// Either concrete r-value kind, for contexts (like [`LetRValueOperation`](crate::ops::LetRValueOp))
/// that bind a value of unknown shape into a matching location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnyRValue {
    /// A boolean-valued expression, materializing into a [`Location::Qubit`].
    Bool(BoolRValue),
    /// An integer-valued expression, materializing into a [`Location::Quint`].
    Int(IntRValue),
}

impl From<BoolRValue> for AnyRValue {
    fn from(v: BoolRValue) -> Self {
        AnyRValue::Bool(v)
    }
}

impl From<IntRValue> for AnyRValue {
    fn from(v: IntRValue) -> Self {
        AnyRValue::Int(v)
    }
}

impl AnyRValue {
    /// Emits operations that set `loc` to this value, conditional on `controls`.
    pub fn init_storage_location(
        &self,
        loc: &Location,
        controls: QubitIntersection,
    ) -> Result<(), RevgateError> {
        match self {
            AnyRValue::Bool(v) => v.init_storage_location(loc, controls),
            AnyRValue::Int(v) => v.init_storage_location(loc, controls),
        }
    }

    /// The reversible inverse of [`init_storage_location`](Self::init_storage_location).
    pub fn del_storage_location(
        &self,
        loc: &Location,
        controls: QubitIntersection,
    ) -> Result<(), RevgateError> {
        match self {
            AnyRValue::Bool(v) => v.del_storage_location(loc, controls),
            AnyRValue::Int(v) => v.del_storage_location(loc, controls),
        }
    }
}

/// A read-only row-selected value: `table.values()[address]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRValue {
    pub table: LookupTable,
    pub address: Quint,
}

impl LookupRValue {
    /// Builds a lookup r-value selecting `table[address]`.
    pub fn new(table: LookupTable, address: Quint) -> Self {
        LookupRValue { table, address }
    }

    fn init_into(&self, target: &Quint, controls: QubitIntersection) -> Result<(), RevgateError> {
        crate::ops::gates::lookup::xor_lookup(target, &self.table, &self.address, controls)
    }

    pub(crate) fn evaluate(&self, read: &dyn Fn(&Qubit) -> bool) -> u64 {
        let address = read_quint(&self.address, read);
        self.table.get(address as usize).unwrap_or(0)
    }
}
