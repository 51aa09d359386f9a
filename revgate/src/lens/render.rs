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

//! A minimal stand-in for the circuit-diagram renderer: recognized operations are rendered to
//! readable lines, unrecognized ones pass through unrendered. Both kinds are always forwarded.

use std::any::Any;

use crate::ops::{Operation, SignatureOp};

use super::Lens;

/// Renders recognized operations into human-readable lines while forwarding every operation,
/// recognized or not, unchanged to the lens below.
///
/// This stands in for the full circuit-diagram renderer, which is an external collaborator;
/// only the contract it relies on — that it sees every operation, including ones nested inside
/// `Controlled`/`Inverse` wrappers — is implemented here.
#[derive(Debug, Default)]
pub struct RenderedCircuitLens {
    lines: Vec<String>,
}

impl RenderedCircuitLens {
    /// The rendered lines collected so far, in receipt order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    fn render(op: &Operation) -> Option<String> {
        match op {
            Operation::Toggle(t) => Some(format!("X {}", t.targets)),
            Operation::PhaseFlip(_) => Some("Z".to_string()),
            Operation::Measure(m) => Some(format!("M {}", m.targets)),
            Operation::MeasureX(m) => Some(format!("MX {}", m.target)),
            Operation::Controlled(inner, controls) => {
                Self::render(inner).map(|rendered| format!("C[{controls}] {rendered}"))
            }
            Operation::Signature(SignatureOp::XorLookup(g)) => {
                Some(format!("LOOKUP {} <- table[{}]", g.lvalue, g.address))
            }
            _ => None,
        }
    }
}

impl Lens for RenderedCircuitLens {
    fn modify(&mut self, op: Operation) -> Vec<Operation> {
        if let Some(rendered) = Self::render(&op) {
            self.lines.push(rendered);
        }
        vec![op]
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}
