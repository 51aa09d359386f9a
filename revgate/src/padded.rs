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

//! Scoped views that top a short register up to a minimum length for the duration of a call.

use crate::ops::{Operation, ReleaseOp};
use crate::qalloc::qalloc_int;
use crate::qubit::Qubit;
use crate::register::{Qureg, RawQureg};

/// Pads `base` up to `min_len` qubits for the duration of `body`.
///
/// If `base` is already at least `min_len` long, `body` runs against `base` unchanged and no
/// allocation occurs. Otherwise, a fresh register of length `min_len - base.len()` is allocated,
/// concatenated onto `base`, passed to `body`, and released again on normal return. A panic
/// inside `body` suppresses the release, leaving the padding qubits live for inspection.
pub fn pad<R>(base: &RawQureg, min_len: usize, body: impl FnOnce(&RawQureg) -> R) -> R {
    if base.len() >= min_len {
        return body(base);
    }
    let extra_len = min_len - base.len();
    let extra = qalloc_int("pad", extra_len);
    let combined = RawQureg::from_iter(base.qubits().iter().cloned().chain(extra.to_vec()));

    struct ReleaseGuard {
        extra: Option<RawQureg>,
    }
    impl Drop for ReleaseGuard {
        fn drop(&mut self) {
            if std::thread::panicking() {
                return;
            }
            if let Some(qureg) = self.extra.take() {
                crate::lens::emit(Operation::Release(ReleaseOp {
                    qureg,
                    x_basis: false,
                    dirty: false,
                }));
            }
        }
    }
    let _guard = ReleaseGuard { extra: Some(extra.qureg().clone()) };

    body(&combined)
}

/// Pads every `(register, min_len)` pair in `specs` for the duration of `body`, releasing all
/// padding qubits together on normal return (in reverse allocation order).
pub fn pad_all<R>(
    specs: &[(RawQureg, usize)],
    body: impl FnOnce(&[RawQureg]) -> R,
) -> R {
    pad_all_rec(specs, Vec::with_capacity(specs.len()), body)
}

fn pad_all_rec<R>(
    remaining: &[(RawQureg, usize)],
    mut padded: Vec<RawQureg>,
    body: impl FnOnce(&[RawQureg]) -> R,
) -> R {
    match remaining.split_first() {
        None => body(&padded),
        Some(((base, min_len), rest)) => pad(base, *min_len, |combined| {
            padded.push(combined.clone());
            pad_all_rec(rest, padded, body)
        }),
    }
}

/// Allocates a fresh qubit only if `existing` is `None`, releasing it (if allocated) on scope
/// exit; returns whichever qubit `body` should use.
pub fn pad_qubit<R>(existing: Option<Qubit>, name: &str, body: impl FnOnce(&Qubit) -> R) -> R {
    match existing {
        Some(q) => body(&q),
        None => crate::qalloc::qmanaged(name, body),
    }
}
