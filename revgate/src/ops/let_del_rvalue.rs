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

//! Binds and unbinds r-values into provided l-values.

use crate::rvalue::{AnyRValue, Location};

/// Binds `rvalue` into `location`, assuming `location` starts zeroed.
///
/// `DelRValueOp` is its structural inverse; per the storage-location contract, `do` for this
/// variant routes through [`AnyRValue::init_storage_location`], not the `del` path — see
/// [`DelRValueOp`] for why the two are not simply mirror images of the same call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetRValueOp {
    /// The value being bound.
    pub rvalue: AnyRValue,
    /// The location it is bound into.
    pub location: Location,
}

/// Unbinds a value previously bound by `LetRValueOp`, restoring `location` to zero.
///
/// Unlike `LetRValueOp`, this variant's decomposition routes through
/// [`AnyRValue::del_storage_location`] (the inverted computation), not `init` again — the two
/// must not be confused, since calling `init` twice would double-apply rather than uncompute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelRValueOp {
    /// The value being unbound.
    pub rvalue: AnyRValue,
    /// The location it is unbound from.
    pub location: Location,
}
