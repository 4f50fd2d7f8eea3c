use super::{Action, Error, Operation, Seq};

/// Applies `op` to `doc` and returns the resulting sequence.
///
/// Fails with [`Error::DocumentSizeMismatch`] unless the operation accounts
/// for every element of `doc`, and with [`Error::DeleteMismatch`] if a delete
/// payload does not match the document content at its position. `doc` itself
/// is never modified, so a failed application leaves no partial state behind.
pub fn apply<T>(doc: &T, op: &Operation<T>) -> Result<T, Error>
where
    T: Seq,
{
    if op.pre_len() != doc.len() {
        return Err(Error::DocumentSizeMismatch);
    }

    let mut elems = doc.iter();
    let mut out = Vec::new();

    for action in op.actions() {
        match action {
            Action::Retain(n) => {
                for _ in 0..*n {
                    match elems.next() {
                        Some(elem) => out.push(elem),
                        None => return Err(Error::DocumentSizeMismatch),
                    }
                }
            }
            Action::Insert(payload) => out.extend(payload.iter()),
            Action::Delete(payload) => {
                for expected in payload.iter() {
                    match elems.next() {
                        Some(elem) if elem == expected => {}
                        Some(_) => return Err(Error::DeleteMismatch),
                        None => return Err(Error::DocumentSizeMismatch),
                    }
                }
            }
        }
    }

    if elems.next().is_some() {
        return Err(Error::DocumentSizeMismatch);
    }

    Ok(out.into_iter().collect())
}
