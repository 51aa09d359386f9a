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

//! Glob-importable surface for programs building circuits against revgate.
//!
//! ```
//! use revgate::prelude::*;
//!
//! let (sim, value) = Sim::new().run(|| {
//!     let a = qalloc_int("a", 4);
//!     a.xor_assign_const(5);
//!     a
//! });
//! assert_eq!(sim.get_int(&value), 5);
//! ```

pub use crate::lens::{capture, condition, emit, invert, invert_scope, Lens};
pub use crate::ops::Operation;
pub use crate::padded::{pad, pad_all, pad_qubit};
pub use crate::qalloc::{qalloc, qalloc_int, qfree, qfree_int, qmanaged, qmanaged_int};
pub use crate::qubit::{Qubit, QubitIntersection};
pub use crate::quint::Quint;
pub use crate::register::{NamedQureg, RawQureg, Qureg};
pub use crate::rvalue::{controlled_by, hold, BoolRValue, IntRValue, LessThanRValue, LookupRValue, LookupTable};
pub use crate::sim::Sim;
pub use crate::RevgateError;
