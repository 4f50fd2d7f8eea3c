use std::fmt;

use arbitrary::Arbitrary;
use serde::{Deserialize, Serialize};

use super::{Action, Len, Seq};

/// Ordered series of [`Action`]s that together describe one complete
/// traversal of a document.
#[derive(Arbitrary, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation<T> {
    actions: Vec<Action<T>>,
}

impl<T> Operation<T>
where
    T: Seq,
{
    /// Returns a new empty operation.
    pub fn new() -> Operation<T> {
        Operation {
            actions: Default::default(),
        }
    }

    /// Returns this operation with a retain over the given number of elements
    /// appended.
    pub fn retain(mut self, n: usize) -> Self {
        self.push(Action::Retain(n));
        self
    }

    /// Returns this operation with an insert of the given payload appended.
    pub fn insert(mut self, payload: impl Into<T>) -> Self {
        self.push(Action::Insert(payload.into()));
        self
    }

    /// Returns this operation with a delete of the given payload appended.
    pub fn delete(mut self, payload: impl Into<T>) -> Self {
        self.push(Action::Delete(payload.into()));
        self
    }

    /// Appends the given action to this operation, merging it into the last
    /// action when both are of the same variant. Zero-length actions are
    /// dropped, so a built operation is always in canonical form.
    pub fn push(&mut self, action: Action<T>) {
        if action.len() == 0 {
            return;
        }

        match (self.actions.last_mut(), action) {
            (Some(Action::Retain(last)), Action::Retain(n)) => match last.overflowing_add(n) {
                (sum, false) => *last = sum,
                (sum, true) => {
                    *last = usize::MAX;
                    self.actions.push(Action::Retain(sum + 1));
                }
            },
            (Some(Action::Insert(last)), Action::Insert(payload)) => *last = last.concat(&payload),
            (Some(Action::Delete(last)), Action::Delete(payload)) => *last = last.concat(&payload),
            (_, action) => self.actions.push(action),
        }
    }

    /// Number of elements a document must have for this operation to apply
    /// to it.
    pub fn pre_len(&self) -> usize {
        self.actions
            .iter()
            .fold(0, |sum, action| sum.saturating_add(action.pre_len()))
    }

    /// Number of elements the document will have after this operation has
    /// been applied.
    pub fn post_len(&self) -> usize {
        self.actions
            .iter()
            .fold(0, |sum, action| sum.saturating_add(action.post_len()))
    }

    /// Returns an iterator over the actions in this operation.
    pub fn actions(&self) -> impl Iterator<Item = &Action<T>> {
        <[_]>::iter(&self.actions)
    }

    /// Returns `true` if this operation holds no actions.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Returns this operation inflated such that every action affects exactly
    /// one element. For example, a `Retain(6)` becomes six consecutive
    /// `Retain(1)`.
    ///
    /// The result is not in canonical form; [`Operation::reduce`] folds it
    /// back.
    pub fn expand(&self) -> Operation<T> {
        let mut actions = Vec::new();

        for action in &self.actions {
            match action {
                Action::Retain(n) => actions.extend((0..*n).map(|_| Action::Retain(1))),
                Action::Insert(payload) => {
                    actions.extend(payload.iter().map(|elem| Action::Insert(T::unit(elem))))
                }
                Action::Delete(payload) => {
                    actions.extend(payload.iter().map(|elem| Action::Delete(T::unit(elem))))
                }
            }
        }

        Operation { actions }
    }

    /// Returns this operation in canonical form: consecutive actions of the
    /// same variant merged, zero-length actions dropped.
    pub fn reduce(self) -> Operation<T> {
        self.actions.into_iter().collect()
    }

    pub(crate) fn into_vec(self) -> Vec<Action<T>> {
        self.actions
    }
}

impl<T> Extend<Action<T>> for Operation<T>
where
    T: Seq,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = Action<T>>,
    {
        iter.into_iter().for_each(|action| self.push(action))
    }
}

impl<T> FromIterator<Action<T>> for Operation<T>
where
    T: Seq,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Action<T>>,
    {
        let mut op = Operation::new();
        op.extend(iter);
        op
    }
}

impl<T> IntoIterator for Operation<T> {
    type Item = Action<T>;

    type IntoIter = std::vec::IntoIter<Action<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.into_iter()
    }
}

impl<T> fmt::Display for Operation<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for action in &self.actions {
            write!(f, "{action}")?;
        }

        Ok(())
    }
}
