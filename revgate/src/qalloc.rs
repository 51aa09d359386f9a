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

//! Scoped ancilla allocation: guaranteed release on normal exit, suppressed on unwind.

use crate::ops::{AllocOp, Operation, ReleaseOp};
use crate::qubit::Qubit;
use crate::quint::Quint;
use crate::register::{NamedQureg, Qureg, RawQureg};

/// Allocates a single fresh qubit, zero-initialized, and registers it as live state.
pub fn qalloc(name: &str) -> Qubit {
    let handle = crate::handle::UniqueHandle::new(name);
    let qubit = Qubit::indexed(handle, 0);
    let qureg = RawQureg::from_iter([qubit.clone()]);
    crate::lens::emit(Operation::Alloc(AllocOp { qureg, x_basis: false }));
    qubit
}

/// Allocates a fresh `len`-bit register, zero-initialized, and registers it as live state.
pub fn qalloc_int(name: &str, len: usize) -> Quint {
    let named = NamedQureg::new(name, len);
    let qureg = named.slice(0..len);
    crate::lens::emit(Operation::Alloc(AllocOp { qureg: qureg.clone(), x_basis: false }));
    Quint::new(qureg)
}

/// Deregisters `qubit`, requiring it to be in the zero state unless `dirty` is set.
pub fn qfree(qubit: Qubit, dirty: bool) {
    let qureg = RawQureg::from_iter([qubit]);
    crate::lens::emit(Operation::Release(ReleaseOp { qureg, x_basis: false, dirty }));
}

/// Deregisters every qubit of `quint`, requiring zero state unless `dirty` is set.
pub fn qfree_int(quint: Quint, dirty: bool) {
    crate::lens::emit(Operation::Release(ReleaseOp {
        qureg: quint.qureg().clone(),
        x_basis: false,
        dirty,
    }));
}

/// A scope guard holding a single ancilla qubit, released on normal drop.
///
/// Release is suppressed when the guard drops during an unwind, so a failure's classical
/// state is left intact for inspection (mirroring a context manager's `__exit__` seeing the
/// exception and skipping its cleanup).
#[derive(Debug)]
pub struct QallocGuard {
    qubit: Option<Qubit>,
}

impl QallocGuard {
    /// The guarded qubit.
    pub fn qubit(&self) -> &Qubit {
        self.qubit.as_ref().expect("qubit taken exactly once, at drop")
    }
}

impl Drop for QallocGuard {
    fn drop(&mut self) {
        if std::thread::panicking() {
            return;
        }
        if let Some(qubit) = self.qubit.take() {
            qfree(qubit, false);
        }
    }
}

/// Allocates a qubit for the duration of `body`, releasing it on normal return.
///
/// If `body` panics, the release is skipped so the simulator's state reflects the failure.
pub fn qmanaged<R>(name: &str, body: impl FnOnce(&Qubit) -> R) -> R {
    let guard = QallocGuard { qubit: Some(qalloc(name)) };
    body(guard.qubit())
}

/// A scope guard holding an ancilla register, released on normal drop.
#[derive(Debug)]
pub struct QallocIntGuard {
    quint: Option<Quint>,
}

impl QallocIntGuard {
    /// The guarded register.
    pub fn quint(&self) -> &Quint {
        self.quint.as_ref().expect("quint taken exactly once, at drop")
    }
}

impl Drop for QallocIntGuard {
    fn drop(&mut self) {
        if std::thread::panicking() {
            return;
        }
        if let Some(quint) = self.quint.take() {
            qfree_int(quint, false);
        }
    }
}

/// Allocates a `len`-bit register for the duration of `body`, releasing it on normal return.
pub fn qmanaged_int<R>(name: &str, len: usize, body: impl FnOnce(&Quint) -> R) -> R {
    let guard = QallocIntGuard { quint: Some(qalloc_int(name, len)) };
    body(guard.quint())
}
