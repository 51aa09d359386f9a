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

//! Read-only classical tables, addressed by a quint for lookup-based r-values.

use std::sync::Arc;

/// An immutable, classically-known table of non-negative integers.
///
/// Cloning is cheap: the backing storage is reference-counted, matching a process-wide
/// immutable descriptor the way a [`SignatureOp`](crate::ops::SignatureOp) is immutable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTable {
    values: Arc<[u64]>,
}

impl LookupTable {
    /// Builds a table from its row values, in address order.
    pub fn new(values: impl Into<Vec<u64>>) -> Self {
        LookupTable {
            values: values.into().into(),
        }
    }

    /// The table's rows.
    pub fn values(&self) -> &[u64] {
        &self.values
    }

    /// Number of addressable rows.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The value at `address`, or `None` if out of range.
    pub fn get(&self, address: usize) -> Option<u64> {
        self.values.get(address).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_returns_row_by_address() {
        let table = LookupTable::new(vec![1, 2, 4, 8]);
        assert_eq!(table.get(2), Some(4));
        assert_eq!(table.get(4), None);
    }
}
