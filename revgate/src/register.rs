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

//! Read-only ordered views over sets of qubits.

use std::fmt::{self, Display, Formatter};
use std::ops::Range;
use std::rc::Rc;

use crate::handle::UniqueHandle;
use crate::qubit::Qubit;

/// An ordered sequence of qubits.
///
/// `RawQureg` and `NamedQureg` are the two concrete views; both are cheap to construct and
/// clone (registers never own qubit state, the simulator does).
pub trait Qureg: Clone + PartialEq + std::fmt::Debug + Display {
    /// Number of qubits in the view.
    fn len(&self) -> usize;

    /// True when the view has no qubits.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The qubit at position `index`.
    fn get(&self, index: usize) -> Qubit;

    /// Materializes every qubit of the view, in order.
    fn to_vec(&self) -> Vec<Qubit> {
        (0..self.len()).map(|i| self.get(i)).collect()
    }

    /// A sub-slice view of `self` over `range`.
    ///
    /// A range view covering the whole register collapses to a `RawQureg` wrapping the same
    /// qubits (structural identity, tested by [`QubitIntersection`](crate::qubit::QubitIntersection)-free equality).
    fn slice(&self, range: Range<usize>) -> RawQureg {
        RawQureg::from_iter((range.start..range.end.min(self.len())).map(|i| self.get(i)))
    }
}

/// An explicit ordered list of qubits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawQureg {
    qubits: Rc<[Qubit]>,
}

impl RawQureg {
    /// Wraps an explicit, already-ordered list of qubits.
    pub fn new(qubits: Vec<Qubit>) -> Self {
        RawQureg {
            qubits: qubits.into(),
        }
    }

    /// Builds a `RawQureg` from any iterator of qubits.
    pub fn from_iter(qubits: impl IntoIterator<Item = Qubit>) -> Self {
        RawQureg::new(qubits.into_iter().collect())
    }

    /// Borrows the underlying qubit slice.
    pub fn qubits(&self) -> &[Qubit] {
        &self.qubits
    }
}

impl Qureg for RawQureg {
    fn len(&self) -> usize {
        self.qubits.len()
    }

    fn get(&self, index: usize) -> Qubit {
        self.qubits[index].clone()
    }
}

impl Display for RawQureg {
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

/// A register backed by a single handle: `Qubit(handle, 0..length)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedQureg {
    handle: UniqueHandle,
    length: usize,
}

impl NamedQureg {
    /// Allocates a fresh handle and wraps it as a `length`-qubit named register.
    pub fn new(name: impl Into<String>, length: usize) -> Self {
        NamedQureg {
            handle: UniqueHandle::new(name),
            length,
        }
    }

    /// The handle backing every qubit of this register.
    pub fn handle(&self) -> &UniqueHandle {
        &self.handle
    }
}

impl Qureg for NamedQureg {
    fn len(&self) -> usize {
        self.length
    }

    fn get(&self, index: usize) -> Qubit {
        assert!(index < self.length, "index {index} out of bounds for NamedQureg of length {}", self.length);
        Qubit::indexed(self.handle.clone(), index)
    }
}

impl Display for NamedQureg {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_range_collapses_to_identity() {
        let base = NamedQureg::new("q", 4);
        let full = base.slice(0..4);
        assert_eq!(full, RawQureg::new(base.to_vec()));
    }

    #[test]
    fn partial_range_is_a_proper_subset() {
        let base = NamedQureg::new("q", 4);
        let sub = base.slice(1..3);
        assert_eq!(sub.to_vec(), vec![base.get(1), base.get(2)]);
    }
}
