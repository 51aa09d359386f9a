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

//! A lens that buffers received operations and replays their inverses in reverse order.

use std::any::Any;

use crate::ops::Operation;

use super::Lens;

/// Buffers every received operation, inverted, and only forwards them (in reverse arrival
/// order) when [`flush`](InvertLens::flush) is called at scope exit.
#[derive(Debug, Default)]
pub struct InvertLens {
    buffered: Vec<Operation>,
}

impl InvertLens {
    /// Consumes the lens, returning its buffered operations in reverse-of-arrival order —
    /// the sequence that undoes everything the lens received, in reverse time.
    pub fn flush(self) -> Vec<Operation> {
        let mut ops = self.buffered;
        ops.reverse();
        ops
    }
}

impl Lens for InvertLens {
    fn modify(&mut self, op: Operation) -> Vec<Operation> {
        let inverted = op
            .inverse()
            .expect("attempted to invert a non-invertible operation inside an invert() scope");
        self.buffered.push(inverted);
        Vec::new()
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}
