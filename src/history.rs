use super::{Operation, Seq};

/// Implemented by stores that keep a server's committed operation log.
pub trait History<T>
where
    T: Seq,
{
    /// Returns the current revision, i.e. the number of committed operations.
    fn revision(&self) -> usize;

    /// Appends an operation to the history and returns the new revision.
    fn store(&mut self, op: Operation<T>) -> usize;

    /// Returns an iterator over all committed operations whose index is at
    /// least `from`, in commit order, together with that index.
    fn iterate(&self, from: usize) -> Box<dyn Iterator<Item = (usize, &Operation<T>)> + '_>;
}

/// The simplest possible [`History`] implementation, holding the committed
/// operations in an in-memory vector.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryHistory<T> {
    ops: Vec<Operation<T>>,
}

impl<T> MemoryHistory<T>
where
    T: Seq,
{
    /// Returns a new empty history.
    pub fn new() -> MemoryHistory<T> {
        MemoryHistory {
            ops: Default::default(),
        }
    }
}

impl<T> History<T> for MemoryHistory<T>
where
    T: Seq,
{
    fn revision(&self) -> usize {
        self.ops.len()
    }

    fn store(&mut self, op: Operation<T>) -> usize {
        self.ops.push(op);
        self.ops.len()
    }

    fn iterate(&self, from: usize) -> Box<dyn Iterator<Item = (usize, &Operation<T>)> + '_> {
        Box::new(<[Operation<T>]>::iter(&self.ops).enumerate().skip(from))
    }
}
