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

#![deny(missing_debug_implementations)]

//! # revgate
//!
//! A toolkit for describing reversible classical arithmetic circuits and running them
//! through a pipeline of "lenses": a classical bit-state simulator, a recognized-operation
//! renderer, and a Toffoli-equivalent gate counter.
//!
//! A program allocates qubit registers, builds up [`Quint`](crate::quint::Quint) and
//! [`Qubit`](crate::qubit::Qubit) values, and drives arithmetic on them with operator overloads
//! (`+=`, `^=`) and comparison constructors. Every such call emits an [`Operation`](crate::ops::Operation)
//! onto the lens that is currently on top of the thread-local [`emission stack`](crate::lens).
//! The bottom-most lens in a composed stack is usually [`Sim`](crate::sim::Sim), the classical
//! simulator that cross-checks every reversible decomposition against its declared semantics.

pub const REVGATE_VERSION: &str = env!("CARGO_PKG_VERSION");

use thiserror::Error;

/// Errors that can occur while building, emitting, or simulating a revgate circuit.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum RevgateError {
    /// A register or rvalue was used with an operand kind it does not support.
    #[error("Operation {hqslang} cannot act on a value of this kind: {msg}")]
    UnrepresentableOperation {
        /// Name of the operation that was asked to act on an unsupported operand.
        hqslang: &'static str,
        /// Human readable detail.
        msg: String,
    },
    /// An `AllocQuregOperation` targeted a qubit that is already live in the simulator.
    #[error("Qubit {qubit} is already allocated")]
    AlreadyAllocated {
        /// Display form of the offending qubit.
        qubit: String,
    },
    /// A `ReleaseQuregOperation` with `dirty = false` found a qubit that was not in the zero state.
    #[error("Failed to uncompute {qubit}: released qubit was not in the zero state")]
    DirtyRelease {
        /// Display form of the offending qubit.
        qubit: String,
    },
    /// `AllocQuregOperation`/`ReleaseQuregOperation` cannot be wrapped in a control.
    #[error("Can't control {hqslang}")]
    NotControllable {
        /// Name of the operation that was asked to be controlled.
        hqslang: &'static str,
    },
    /// `inverse()` was called on an operation with no defined inverse (most flag operations).
    #[error("{hqslang} has no defined inverse")]
    NotInvertible {
        /// Name of the operation that was asked to invert.
        hqslang: &'static str,
    },
    /// `do(controls)` was called on a fundamental operation; callers must special-case these.
    #[error("{hqslang} is fundamental and has no decomposition")]
    FundamentalOperation {
        /// Name of the fundamental operation.
        hqslang: &'static str,
    },
    /// A register view or slice index was out of bounds.
    #[error("Index {index} out of bounds for register of length {length}")]
    IndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// The length of the register that was indexed.
        length: usize,
    },
    /// A `LetAnd`/`LetUnary`-style initialization ran on a location that was not in the zero state.
    #[error("{hqslang} requires {location} to start at zero")]
    NotZeroInitialized {
        /// Name of the operation that required a zero-initialized location.
        hqslang: &'static str,
        /// Display form of the offending location.
        location: String,
    },
    /// A measurement was attempted while holding an outer control; measurement cannot be controlled.
    #[error("Can't control a measurement")]
    MeasurementNotControllable,
    /// The emission stack was empty when an operation was emitted.
    #[error("No lens is active; emit() requires a capture/condition/invert/Sim scope")]
    EmptyLensStack,
}

pub mod handle;
pub mod lens;
pub mod ops;
pub mod padded;
pub mod qalloc;
pub mod qubit;
pub mod quint;
pub mod register;
pub mod rvalue;
pub mod sim;
pub mod util;

pub mod prelude;

pub use handle::UniqueHandle;
pub use lens::{capture, condition, emit, invert, Lens};
pub use ops::Operation;
pub use padded::{pad, pad_all};
pub use qalloc::{qalloc, qalloc_int, qfree, qmanaged, qmanaged_int};
pub use qubit::{Qubit, QubitIntersection};
pub use quint::Quint;
pub use register::{NamedQureg, RawQureg, Qureg};
pub use rvalue::{controlled_by, hold, BoolRValue, IntRValue};
pub use sim::Sim;
