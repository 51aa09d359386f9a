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

//! Arithmetic and logic gate decompositions: the core reversible building blocks.

pub mod add;
pub mod cmp;
pub mod let_and;
pub mod lookup;
pub mod mult_add;
pub mod toggle_phase;
pub mod unary;
pub mod xor;
