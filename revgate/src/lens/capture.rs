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

//! A lens that records every operation it receives, unmodified.

use std::any::Any;

use crate::ops::Operation;

use super::Lens;

/// Collects every received operation into an ordered list. `modify` is the identity.
#[derive(Debug, Default)]
pub struct CaptureLens {
    ops: Vec<Operation>,
}

impl CaptureLens {
    /// The operations captured so far, in receipt order.
    pub fn captured(&self) -> &[Operation] {
        &self.ops
    }
}

impl Lens for CaptureLens {
    fn modify(&mut self, op: Operation) -> Vec<Operation> {
        self.ops.push(op.clone());
        vec![op]
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}
