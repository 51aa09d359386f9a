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

//! `XorLookupOp`: `lvalue ^= table[address]`, a fundamental table-driven operation.

use crate::qubit::QubitIntersection;
use crate::quint::Quint;
use crate::rvalue::LookupTable;
use crate::RevgateError;

/// `lvalue ^= table[address]`.
///
/// Has no decomposition into more-fundamental operations — a real lookup table is implemented
/// out-of-band (classical RAM, a QROM construction, …), so a terminal sink must interpret this
/// operation directly by reading its own state for `address`'s concrete value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XorLookupOp {
    /// The register XORed with the selected table row.
    pub lvalue: Quint,
    /// The table being read.
    pub table: LookupTable,
    /// The register selecting which table row to read.
    pub address: Quint,
}

/// Emits `lvalue ^= table[address]`, conditional on `controls`.
pub(crate) fn xor_lookup(
    target: &Quint,
    table: &LookupTable,
    address: &Quint,
    controls: QubitIntersection,
) -> Result<(), RevgateError> {
    let op = crate::ops::Operation::Signature(crate::ops::SignatureOp::XorLookup(XorLookupOp {
        lvalue: target.clone(),
        table: table.clone(),
        address: address.clone(),
    }))
    .controlled_by(controls)?;
    crate::lens::emit(op);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qalloc::qalloc_int;
    use crate::sim::Sim;

    #[test]
    fn selects_the_row_named_by_the_address() {
        let table = LookupTable::new(vec![3, 5, 9, 12]);
        let sim = Sim::new();
        let (sim, lvalue) = sim.run(|| {
            let address = qalloc_int("address", 2);
            address.xor_assign_const(2);
            let lvalue = qalloc_int("lvalue", 4);
            xor_lookup(&lvalue, &table, &address, QubitIntersection::EMPTY)
                .expect("lookup always emits");
            lvalue
        });
        assert_eq!(sim.get_int(&lvalue), 9);
    }
}
