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

//! Single bit cells and the control sets built out of them.

use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};
use std::ops::BitAnd;

use crate::handle::UniqueHandle;
use crate::lens::emit;
use crate::ops::{Operation, ToggleOp};
use crate::register::RawQureg;
use crate::RevgateError;

/// One bit cell: a handle, optionally indexed into a family sharing that handle.
///
/// With `index = None` the qubit is a singleton; with `Some(i)` it is bit `i` of an indexed
/// family. Equality is structural over `(handle, index)`, unlike `UniqueHandle` itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Qubit {
    handle: UniqueHandle,
    index: Option<usize>,
}

impl Qubit {
    /// Creates a singleton qubit with the given display name hint.
    pub fn new(name: impl Into<String>) -> Self {
        Qubit {
            handle: UniqueHandle::new(name),
            index: None,
        }
    }

    /// Creates a qubit that is bit `index` of the family sharing `handle`.
    pub fn indexed(handle: UniqueHandle, index: usize) -> Self {
        Qubit {
            handle,
            index: Some(index),
        }
    }

    /// The handle backing this qubit.
    pub fn handle(&self) -> &UniqueHandle {
        &self.handle
    }

    /// The index of this qubit within its handle's family, if any.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Returns `self & other` as a two-qubit control intersection.
    pub fn and(&self, other: &Qubit) -> QubitIntersection {
        QubitIntersection::from_iter([self.clone(), other.clone()])
    }

    /// Emits a toggle (`OP_TOGGLE`) on this qubit, unconditionally.
    pub fn toggle(&self) {
        emit(Operation::Toggle(ToggleOp {
            targets: RawQureg::from_iter([self.clone()]),
        }));
    }

    /// Emits a toggle on this qubit conditional on `controls`.
    pub fn toggle_controlled_by(&self, controls: QubitIntersection) {
        let op = Operation::Toggle(ToggleOp {
            targets: RawQureg::from_iter([self.clone()]),
        });
        match op.controlled_by(controls) {
            Ok(op) => emit(op),
            Err(_) => unreachable!("OP_TOGGLE is always controllable"),
        }
    }
}

impl Display for Qubit {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.index {
            None => write!(f, "{}", self.handle),
            Some(i) => write!(f, "{}[{}]", self.handle, i),
        }
    }
}

impl BitAnd for Qubit {
    type Output = QubitIntersection;

    fn bitand(self, rhs: Qubit) -> QubitIntersection {
        QubitIntersection::from_iter([self, rhs])
    }
}

impl BitAnd<QubitIntersection> for Qubit {
    type Output = QubitIntersection;

    fn bitand(self, rhs: QubitIntersection) -> QubitIntersection {
        rhs.and_qubit(&self)
    }
}

/// A multiplicative AND of qubits, used as a control set.
///
/// Order is irrelevant and duplicates are elided; the empty intersection is the
/// "always true" control that every unconditional operation carries implicitly.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QubitIntersection {
    qubits: BTreeSet<Qubit>,
}

impl Ord for Qubit {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.handle.id(), self.index).cmp(&(other.handle.id(), other.index))
    }
}

impl PartialOrd for Qubit {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl QubitIntersection {
    /// The intersection of zero qubits: always true, controls nothing away.
    pub const EMPTY: QubitIntersection = QubitIntersection {
        qubits: BTreeSet::new(),
    };

    /// Builds an intersection from an iterator of qubits, deduplicating as it goes.
    pub fn from_iter(qubits: impl IntoIterator<Item = Qubit>) -> Self {
        QubitIntersection {
            qubits: qubits.into_iter().collect(),
        }
    }

    /// Number of distinct qubits in this control set.
    pub fn len(&self) -> usize {
        self.qubits.len()
    }

    /// True when this is the always-true empty control.
    pub fn is_empty(&self) -> bool {
        self.qubits.is_empty()
    }

    /// Iterates the distinct qubits making up this control set.
    pub fn iter(&self) -> impl Iterator<Item = &Qubit> {
        self.qubits.iter()
    }

    /// Returns the union (logical AND) of `self` and `other`.
    pub fn and(&self, other: &QubitIntersection) -> QubitIntersection {
        QubitIntersection {
            qubits: self.qubits.union(&other.qubits).cloned().collect(),
        }
    }

    /// Returns the union of `self` and a single extra qubit.
    pub fn and_qubit(&self, qubit: &Qubit) -> QubitIntersection {
        let mut qubits = self.qubits.clone();
        qubits.insert(qubit.clone());
        QubitIntersection { qubits }
    }

    /// Attempts to build a qureg of this control set's qubits, in iteration (sorted) order.
    pub fn to_qureg(&self) -> RawQureg {
        RawQureg::from_iter(self.qubits.iter().cloned())
    }
}

impl From<Qubit> for QubitIntersection {
    fn from(q: Qubit) -> Self {
        QubitIntersection::from_iter([q])
    }
}

impl BitAnd for QubitIntersection {
    type Output = QubitIntersection;

    fn bitand(self, rhs: QubitIntersection) -> QubitIntersection {
        self.and(&rhs)
    }
}

impl Display for QubitIntersection {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, q) in self.qubits.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{q}")?;
        }
        write!(f, "]")
    }
}

/// Wraps an unrepresentable control attempt into a [`RevgateError`].
pub(crate) fn not_controllable(hqslang: &'static str) -> RevgateError {
    RevgateError::NotControllable { hqslang }
}
