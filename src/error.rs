use thiserror::Error;

/// Failure modes of the core OT functions and control loops.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// The operation does not account for the entire length of the existing
    /// document, or does not line up with its counterpart operation.
    #[error("document size mismatch")]
    DocumentSizeMismatch,

    /// An action requested to delete data that was not present in the
    /// existing document or in its counterpart operation.
    #[error("delete mismatch")]
    DeleteMismatch,

    /// The server acknowledged an operation while none was in flight.
    #[error("acknowledgement received with no operation in flight")]
    UnexpectedAck,
}
