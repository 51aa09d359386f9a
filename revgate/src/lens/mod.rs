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

//! The emission pipeline: a thread-local stack of composable operation-stream transformers.
//!
//! `emit(op)` always enters at the top of the stack. Each lens's [`Lens::modify`] returns the
//! operations to forward to the lens below it; the stack is walked down to index zero, the
//! terminal sink (ordinarily a [`Sim`](crate::sim::Sim)).

pub mod capture;
pub mod condition;
pub mod count_nots;
pub mod invert;
pub mod render;

pub use capture::CaptureLens;
pub use condition::ConditionLens;
pub use count_nots::CountNots;
pub use invert::InvertLens;
pub use render::RenderedCircuitLens;

use std::any::Any;
use std::cell::RefCell;
use std::fmt::Debug;

use crate::ops::Operation;
use crate::qubit::QubitIntersection;
use crate::RevgateError;

/// A stream transformer in the emission pipeline.
///
/// `modify` receives one operation and returns zero or more operations to forward to the next
/// lens down the stack. The default behavior for a pass-through lens is the identity mapping.
pub trait Lens: Debug {
    /// Transforms `op`, returning the operations to forward further down the stack.
    fn modify(&mut self, op: Operation) -> Vec<Operation>;

    /// Enables downcasting a popped, boxed lens back to its concrete type to read out its state.
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

thread_local! {
    static LENS_STACK: RefCell<Vec<Box<dyn Lens>>> = RefCell::new(Vec::new());
}

/// Pushes `lens` onto the top of this thread's emission stack.
pub fn push(lens: Box<dyn Lens>) {
    LENS_STACK.with(|stack| stack.borrow_mut().push(lens));
}

/// Pops the top lens off this thread's emission stack.
///
/// Panics if the stack is empty; callers only pop a lens they (or a nested scope) pushed.
pub fn pop() -> Box<dyn Lens> {
    LENS_STACK
        .with(|stack| stack.borrow_mut().pop())
        .expect("pop() called with no lens on the stack")
}

/// Injects `op` into the top lens of this thread's emission stack.
///
/// Panics if no lens is installed — a program must push at least a terminal sink
/// (typically [`Sim`](crate::sim::Sim)) before emitting any operation.
pub fn emit(op: Operation) {
    let top = LENS_STACK.with(|stack| stack.borrow().len());
    assert!(top > 0, "{}", RevgateError::EmptyLensStack);

    let mut queue = vec![(top - 1, op)];
    while let Some((index, op)) = queue.pop() {
        let produced =
            LENS_STACK.with(|stack| stack.borrow_mut()[index].modify(op));
        if index == 0 {
            continue;
        }
        for sub_op in produced.into_iter().rev() {
            queue.push((index - 1, sub_op));
        }
    }
}

/// Runs `body` with a fresh [`CaptureLens`] on top of the stack, returning `body`'s result
/// alongside every operation it emitted, in emission order.
pub fn capture<R>(body: impl FnOnce() -> R) -> (R, Vec<Operation>) {
    push(Box::new(CaptureLens::default()));
    let result = body();
    let lens = pop();
    let ops = lens
        .into_any()
        .downcast::<CaptureLens>()
        .expect("capture() always pops the CaptureLens it pushed")
        .captured()
        .to_vec();
    (result, ops)
}

/// Runs `body` with a [`ConditionLens(controls)`](ConditionLens) on top of the stack, so every
/// operation `body` emits is additionally gated by `controls`.
pub fn condition<R>(controls: QubitIntersection, body: impl FnOnce() -> R) -> R {
    push(Box::new(ConditionLens::new(controls)));
    let result = body();
    pop();
    result
}

/// Runs `body` with an [`InvertLens`] on top of the stack: every operation `body` emits is
/// replaced by its inverse and forwarded in reverse order once the scope exits.
pub fn invert<R>(body: impl FnOnce() -> R) -> R {
    push(Box::new(InvertLens::default()));
    let result = body();
    let lens = pop();
    let inverted = lens
        .into_any()
        .downcast::<InvertLens>()
        .expect("invert() always pops the InvertLens it pushed")
        .flush();
    for op in inverted {
        emit(op);
    }
    result
}

/// Runs `body` behind an `InvertLens`, and — only if `body` succeeds — forwards the inverse of
/// everything it emitted, in reverse order, instead of the originals.
///
/// Used to implement `del_storage_location` as "run `init_storage_location`, but replace its
/// effect with its inverse." If `body` returns `Err`, the buffered operations are discarded and
/// nothing is forwarded — mirroring the rule that an exceptional exit suppresses the matching
/// closing action.
pub fn invert_scope<T>(
    body: impl FnOnce() -> Result<T, RevgateError>,
) -> Result<T, RevgateError> {
    push(Box::new(InvertLens::default()));
    let result = body();
    let lens = pop();
    let value = result?;
    let inverted = lens
        .into_any()
        .downcast::<InvertLens>()
        .expect("invert_scope() always pops the InvertLens it pushed")
        .flush();
    for op in inverted {
        emit(op);
    }
    Ok(value)
}
