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

//! End-to-end scenarios that exercise a composed lens stack rather than a single gate in
//! isolation: gate counting and rendered phase-fixup both need `Sim` layered above an observing
//! lens so the observer sees the fully decomposed operation stream.

use revgate::lens::{self, CountNots, RenderedCircuitLens};
use revgate::ops::gates::let_and::{DelAndGate, LetAndGate};
use revgate::ops::{Operation, SignatureOp};
use revgate::prelude::*;

/// Gate counting: `CountNots` must sit below `Sim` so it only ever sees fundamental toggles.
#[test]
fn gate_counts_are_bucketed_by_control_width() {
    lens::push(Box::new(CountNots::default()));

    let sim = Sim::new();
    let (_sim, ()) = sim.run(|| {
        let out = qalloc_int("out", 100);
        let factor = qalloc_int("factor", 8);
        factor.xor_assign_const(15);
        out.add_assign_times(&factor, 235);
        out.add_assign(&IntRValue::from(4));
    });

    let counts = lens::pop()
        .into_any()
        .downcast::<CountNots>()
        .expect("the CountNots pushed above is popped back here")
        .counts()
        .clone();

    assert!(counts.get(&0).copied().unwrap_or(0) > 0, "expected bare NOTs: {counts:?}");
    assert!(counts.get(&1).copied().unwrap_or(0) > 0, "expected CNOT-equivalents: {counts:?}");
    let toffoli_equivalents: u64 = counts.iter().filter(|&(&k, _)| k >= 2).map(|(_, &n)| n).sum();
    assert!(
        toffoli_equivalents > 0 && toffoli_equivalents <= 1000,
        "expected a modest number of multi-control toggles: {counts:?}"
    );
}

/// `DelAnd`'s measurement-based uncompute: with a biased measurement outcome of `true`, the
/// rendered stream carries both the X-basis measurement and the compensating controlled phase
/// flip; with a biased outcome of `false`, only the measurement appears.
#[test]
fn del_and_renders_phase_fixup_only_when_the_measurement_is_true() {
    assert!(render_del_and(true).iter().any(|line| line.starts_with("MX")));
    assert!(render_del_and(true).iter().any(|line| line.contains('Z')));

    let lines = render_del_and(false);
    assert!(lines.iter().any(|line| line.starts_with("MX")));
    assert!(!lines.iter().any(|line| line.contains('Z')));
}

fn render_del_and(phase_fixup_bias: bool) -> Vec<String> {
    lens::push(Box::new(RenderedCircuitLens::default()));

    let mut sim = Sim::new();
    sim.phase_fixup_bias = Some(phase_fixup_bias);
    let (_sim, ()) = sim.run(|| {
        let q0 = qalloc("q0");
        let q1 = qalloc("q1");
        let q2 = qalloc("q2");
        let controls = QubitIntersection::EMPTY.and_qubit(&q1).and_qubit(&q2);

        let let_and = Operation::Signature(SignatureOp::LetAnd(LetAndGate { lvalue: q0.clone() }))
            .controlled_by(controls.clone())
            .expect("LetAnd is controllable");
        emit(let_and);

        let del_and = Operation::Signature(SignatureOp::DelAnd(DelAndGate { lvalue: q0 }))
            .controlled_by(controls)
            .expect("DelAnd is controllable");
        emit(del_and);
    });

    lens::pop()
        .into_any()
        .downcast::<RenderedCircuitLens>()
        .expect("the RenderedCircuitLens pushed above is popped back here")
        .lines()
        .to_vec()
}
