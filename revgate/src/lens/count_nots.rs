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

//! A lens that tallies Toffoli-equivalent gate cost, keyed by control-set size.

use std::any::Any;
use std::collections::BTreeMap;

use crate::ops::Operation;
use crate::register::Qureg;

use super::Lens;

/// Counts `OP_TOGGLE` occurrences, bucketed by the number of active controls.
///
/// A toggle with `k <= 1` controls contributes `len(targets)` bare/CNOT-equivalent gates.
/// A toggle with `k >= 2` controls contributes one Toffoli-equivalent gate plus, for
/// multi-target fan-out, `2 * (len(targets) - 1)` extra CNOT-equivalents (the standard
/// fan-out-then-collapse construction for applying one control set to many targets).
#[derive(Debug, Default)]
pub struct CountNots {
    counts: BTreeMap<usize, u64>,
}

impl CountNots {
    /// The tally so far, keyed by `"controls-{k}"`-style bucket index.
    pub fn counts(&self) -> &BTreeMap<usize, u64> {
        &self.counts
    }

    fn record(&mut self, controls: usize, targets: usize) {
        if targets == 0 {
            return;
        }
        if controls <= 1 {
            *self.counts.entry(controls).or_insert(0) += targets as u64;
        } else {
            *self.counts.entry(controls).or_insert(0) += 1;
            *self.counts.entry(1).or_insert(0) += 2 * (targets as u64 - 1);
        }
    }
}

fn unwrap_controls(op: &Operation) -> (usize, &Operation) {
    match op {
        Operation::Controlled(inner, controls) => (controls.len(), inner.as_ref()),
        other => (0, other),
    }
}

impl Lens for CountNots {
    fn modify(&mut self, op: Operation) -> Vec<Operation> {
        let (controls, inner) = unwrap_controls(&op);
        if let Operation::Toggle(toggle) = inner {
            self.record(controls, toggle.targets.len());
        }
        vec![op]
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}
