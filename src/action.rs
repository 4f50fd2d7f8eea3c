use std::fmt;

use arbitrary::Arbitrary;
use serde::{Deserialize, Serialize};

use super::Len;

/// Single step of an [`Operation`](super::Operation)'s traversal over a
/// document.
#[derive(Arbitrary, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action<T> {
    /// Advances the cursor over the given number of elements, copying them
    /// unchanged.
    Retain(usize),

    /// Inserts the given payload at the cursor.
    Insert(T),

    /// Asserts that the given payload immediately follows the cursor, then
    /// removes it.
    Delete(T),
}

impl<T> Action<T>
where
    T: Len,
{
    /// Number of document elements this action consumes.
    pub fn pre_len(&self) -> usize {
        match self {
            Action::Retain(n) => *n,
            Action::Insert(_) => 0,
            Action::Delete(payload) => payload.len(),
        }
    }

    /// Number of document elements this action produces.
    pub fn post_len(&self) -> usize {
        match self {
            Action::Retain(n) => *n,
            Action::Insert(payload) => payload.len(),
            Action::Delete(_) => 0,
        }
    }
}

impl<T> Len for Action<T>
where
    T: Len,
{
    fn len(&self) -> usize {
        match self {
            Action::Retain(n) => *n,
            Action::Insert(payload) | Action::Delete(payload) => payload.len(),
        }
    }
}

impl<T> fmt::Display for Action<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Retain(n) => write!(f, "R({n})"),
            Action::Insert(payload) => write!(f, "I({payload})"),
            Action::Delete(payload) => write!(f, "D({payload})"),
        }
    }
}
