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

//! The two fundamental, non-decomposable operations.

/// Applies a −1 phase conditional on the active control intersection. Classically invisible:
/// the simulator's bit store is unaffected, but the operation still appears in the stream for
/// rendering and gate-counting lenses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PhaseFlipOp;
