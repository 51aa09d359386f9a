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

//! A lens that gates every received operation on a fixed control set.

use std::any::Any;

use crate::ops::Operation;
use crate::qubit::QubitIntersection;

use super::Lens;

/// Wraps every received operation with `controlled_by(controls)` and forwards it.
#[derive(Debug)]
pub struct ConditionLens {
    controls: QubitIntersection,
}

impl ConditionLens {
    /// Builds a lens that additionally gates everything passing through on `controls`.
    pub fn new(controls: QubitIntersection) -> Self {
        ConditionLens { controls }
    }
}

impl Lens for ConditionLens {
    fn modify(&mut self, op: Operation) -> Vec<Operation> {
        vec![op
            .controlled_by(self.controls.clone())
            .expect("condition() scopes only wrap controllable operations")]
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}
