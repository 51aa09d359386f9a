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

//! Globally unique, name-hinted identities used to back qubits and registers.

use std::fmt::{self, Display, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_HANDLE_ID: AtomicU64 = AtomicU64::new(0);

/// A globally unique identity carrying a display name hint.
///
/// Equality and hashing are by identity, not by name: two handles created with the same
/// name are always distinct. The counter backing [`UniqueHandle::new`] is the one process-wide
/// mutable datum in revgate; it only needs to be unique; it does not need to be sequential
/// across runs.
#[derive(Debug, Clone, Eq)]
pub struct UniqueHandle {
    id: u64,
    name: String,
}

impl UniqueHandle {
    /// Creates a fresh handle with the given display name hint.
    pub fn new(name: impl Into<String>) -> Self {
        let id = NEXT_HANDLE_ID.fetch_add(1, Ordering::Relaxed);
        UniqueHandle {
            id,
            name: name.into(),
        }
    }

    /// Returns the display name hint this handle was created with.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the process-wide unique id backing this handle's identity.
    ///
    /// Exposed crate-internally for ordering qubits in sets/maps; it carries no meaning
    /// beyond "distinct handles get distinct ids" and is not guaranteed to reflect creation
    /// order across threads.
    pub(crate) fn id(&self) -> u64 {
        self.id
    }
}

impl PartialEq for UniqueHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl std::hash::Hash for UniqueHandle {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Display for UniqueHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl From<&str> for UniqueHandle {
    fn from(name: &str) -> Self {
        UniqueHandle::new(name)
    }
}

impl From<String> for UniqueHandle {
    fn from(name: String) -> Self {
        UniqueHandle::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinct_handles_with_same_name_are_not_equal() {
        let a = UniqueHandle::new("q");
        let b = UniqueHandle::new("q");
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }
}
