use tracing::debug;

use super::{compose, transform, Document, Error, Operation};

/// Editing endpoint of the collaboration loop.
///
/// A client owns its replica of the document and keeps at most one operation
/// in flight toward the server. Further local edits made while waiting for an
/// acknowledgement are composed into a single buffer, so the server only ever
/// sees one outstanding operation per client.
///
/// The client moves through three states, derived from which pending
/// operations are present:
///
/// - synchronized: no in-flight operation and no buffer;
/// - awaiting: an operation is in flight, nothing is buffered;
/// - awaiting with buffer: both are present.
///
/// A buffer only exists while an operation is in flight.
pub struct Client<D>
where
    D: Document,
{
    document: D,
    in_flight: Option<Operation<D::Seq>>,
    buffer: Option<Operation<D::Seq>>,
}

impl<D> Client<D>
where
    D: Document,
{
    /// Returns a new synchronized client editing the given document replica.
    pub fn new(document: D) -> Client<D> {
        Client {
            document,
            in_flight: None,
            buffer: None,
        }
    }

    /// Returns the client's replica of the document.
    pub fn document(&self) -> &D {
        &self.document
    }

    /// Returns the operation sent to the server but not yet acknowledged.
    pub fn in_flight(&self) -> Option<&Operation<D::Seq>> {
        self.in_flight.as_ref()
    }

    /// Returns the local edits made while waiting for an acknowledgement.
    pub fn buffer(&self) -> Option<&Operation<D::Seq>> {
        self.buffer.as_ref()
    }

    /// Applies an operation produced by the local editor.
    ///
    /// If the client was synchronized, the operation becomes the in-flight
    /// operation and is returned so the caller can hand it to the transport.
    /// While an operation is in flight, edits accumulate in the buffer
    /// instead and produce no network traffic. On error the client is left
    /// unchanged.
    pub fn apply_local(
        &mut self,
        op: Operation<D::Seq>,
    ) -> Result<Option<&Operation<D::Seq>>, Error> {
        let buffered = match (&self.in_flight, &self.buffer) {
            (Some(_), Some(buffer)) => Some(compose(buffer.clone(), op.clone())?),
            _ => None,
        };

        self.document.apply(&op)?;

        if self.in_flight.is_none() {
            debug!(pre = op.pre_len(), post = op.post_len(), "sending operation");
            self.in_flight = Some(op);
            return Ok(self.in_flight.as_ref());
        }

        match buffered {
            Some(buffered) => {
                debug!(
                    pre = buffered.pre_len(),
                    post = buffered.post_len(),
                    "composed edit into buffer"
                );
                self.buffer = Some(buffered);
            }
            None => {
                debug!(pre = op.pre_len(), post = op.post_len(), "buffered edit");
                self.buffer = Some(op);
            }
        }

        Ok(None)
    }

    /// Folds in an operation another client committed, as broadcast by the
    /// server.
    ///
    /// The received operation is rebased past the in-flight operation and
    /// then past the buffer, and the resulting form is applied to the
    /// document. The rebased in-flight operation and buffer replace their
    /// previous values: they are the versions the server will eventually
    /// acknowledge. On error the client is left unchanged.
    pub fn apply_received(&mut self, op: Operation<D::Seq>) -> Result<(), Error> {
        let Some(in_flight) = &self.in_flight else {
            return self.document.apply(&op);
        };

        let (in_flight, op) = transform(in_flight.clone(), op)?;

        let Some(buffer) = &self.buffer else {
            self.document.apply(&op)?;
            debug!(pre = op.pre_len(), post = op.post_len(), "rebased received operation");
            self.in_flight = Some(in_flight);
            return Ok(());
        };

        let (buffer, op) = transform(buffer.clone(), op)?;

        self.document.apply(&op)?;
        debug!(pre = op.pre_len(), post = op.post_len(), "rebased received operation");
        self.in_flight = Some(in_flight);
        self.buffer = Some(buffer);

        Ok(())
    }

    /// Handles the server's acknowledgement of the in-flight operation.
    ///
    /// If edits were buffered in the meantime, the buffer is promoted to the
    /// new in-flight operation and returned so the caller can hand it to the
    /// transport; otherwise the client is synchronized again. Fails with
    /// [`Error::UnexpectedAck`] if no operation was in flight.
    pub fn on_server_ack(&mut self) -> Result<Option<&Operation<D::Seq>>, Error> {
        if self.in_flight.is_none() {
            return Err(Error::UnexpectedAck);
        }

        match self.buffer.take() {
            Some(buffer) => {
                debug!(
                    pre = buffer.pre_len(),
                    post = buffer.post_len(),
                    "sending buffered operation"
                );
                self.in_flight = Some(buffer);
                Ok(self.in_flight.as_ref())
            }
            None => {
                debug!("synchronized");
                self.in_flight = None;
                Ok(None)
            }
        }
    }
}
