use tracing::debug;

use super::{compose, transform, Document, Error, History, Operation};

/// Operation as committed by the server: the rebased form together with the
/// revision its commit produced. This is the record broadcast to every
/// client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Committed<T> {
    /// Revision produced by this commit. A client that has folded the
    /// operation in may use this as the parent of its next proposal.
    pub revision: usize,

    /// The committed operation, rebased past all history concurrent with it.
    pub operation: Operation<T>,
}

/// Authoritative endpoint of the collaboration loop.
///
/// The server owns the canonical document and the history of every committed
/// operation. Incoming operations declare the revision they were authored
/// against; the server rebases them past everything committed since, applies
/// them, and appends them to the history.
pub struct Server<D, H>
where
    D: Document,
    H: History<D::Seq>,
{
    document: D,
    history: H,
}

impl<D, H> Server<D, H>
where
    D: Document,
    H: History<D::Seq>,
{
    /// Returns a new server around the given document and history.
    pub fn new(document: D, history: H) -> Server<D, H> {
        Server { document, history }
    }

    /// Returns the canonical document.
    pub fn document(&self) -> &D {
        &self.document
    }

    /// Returns the history of committed operations.
    pub fn history(&self) -> &H {
        &self.history
    }

    /// Returns the server's current revision.
    pub fn revision(&self) -> usize {
        self.history.revision()
    }

    /// Accepts an operation authored against `parent_revision`.
    ///
    /// Every operation committed since that revision is composed into a
    /// single concurrent operation, the incoming operation is transformed
    /// past it, and the result is applied to the canonical document and
    /// appended to the history. Returns the committed record to broadcast to
    /// all clients. On error nothing is committed and the document is
    /// unchanged.
    pub fn apply(
        &mut self,
        parent_revision: usize,
        op: Operation<D::Seq>,
    ) -> Result<Committed<D::Seq>, Error> {
        let mut meanwhile: Option<Operation<D::Seq>> = None;
        for (_, committed) in self.history.iterate(parent_revision) {
            meanwhile = Some(match meanwhile {
                Some(meanwhile) => compose(meanwhile, committed.clone())?,
                None => committed.clone(),
            });
        }

        let op = match meanwhile {
            Some(meanwhile) => transform(meanwhile, op)?.1,
            None => op,
        };

        self.document.apply(&op)?;

        let revision = self.history.store(op.clone());
        debug!(revision, "committed operation");

        Ok(Committed {
            revision,
            operation: op,
        })
    }
}
