use super::{Action, Error, Operation, Seq};

/// Transforms two operations authored concurrently against the same document
/// so that they can be applied in either order.
///
/// Requires `a.pre_len() == b.pre_len()`; otherwise this fails with
/// [`Error::DocumentSizeMismatch`]. Returns `(a', b')` in reduced form such
/// that applying `a` then `b'` and applying `b` then `a'` produce the same
/// document.
///
/// When both sides insert at the same cursor, `b`'s insert lands first in the
/// merged document. This tie-break is deterministic and not commutative, so
/// the two endpoints of a transform must agree on who plays which side.
pub fn transform<T>(a: Operation<T>, b: Operation<T>) -> Result<(Operation<T>, Operation<T>), Error>
where
    T: Seq,
{
    if a.pre_len() != b.pre_len() {
        return Err(Error::DocumentSizeMismatch);
    }

    let a = a.expand().into_vec();
    let b = b.expand().into_vec();

    let (mut i, mut j) = (0, 0);
    let mut a_prime = Operation::new();
    let mut b_prime = Operation::new();

    loop {
        match (a.get(i), b.get(j)) {
            (None, None) => break,

            // one side is exhausted; the other may only be appending inserts
            (Some(Action::Insert(x)), None) => {
                a_prime.push(Action::Insert(x.clone()));
                b_prime.push(Action::Retain(1));
                i += 1;
            }
            (None, Some(Action::Insert(y))) => {
                a_prime.push(Action::Retain(1));
                b_prime.push(Action::Insert(y.clone()));
                j += 1;
            }
            (Some(_), None) | (None, Some(_)) => return Err(Error::DocumentSizeMismatch),

            // both insert at the same cursor: b's insert goes first, and a
            // retains over it while its own insert stays pending
            (Some(Action::Insert(_)), Some(Action::Insert(y))) => {
                a_prime.push(Action::Retain(1));
                b_prime.push(Action::Insert(y.clone()));
                j += 1;
            }

            // a inserts content b never saw; b retains over it
            (Some(Action::Insert(x)), Some(Action::Delete(_) | Action::Retain(_))) => {
                a_prime.push(Action::Insert(x.clone()));
                b_prime.push(Action::Retain(1));
                i += 1;
            }

            // b inserts content a never saw; a retains over it
            (Some(Action::Delete(_) | Action::Retain(_)), Some(Action::Insert(y))) => {
                a_prime.push(Action::Retain(1));
                b_prime.push(Action::Insert(y.clone()));
                j += 1;
            }

            // both agreed to delete the same element; nothing remains to do
            (Some(Action::Delete(_)), Some(Action::Delete(_))) => {
                i += 1;
                j += 1;
            }

            // a deletes the element b merely retained
            (Some(Action::Delete(x)), Some(Action::Retain(_))) => {
                a_prime.push(Action::Delete(x.clone()));
                i += 1;
                j += 1;
            }

            // b deletes the element a merely retained
            (Some(Action::Retain(_)), Some(Action::Delete(y))) => {
                b_prime.push(Action::Delete(y.clone()));
                i += 1;
                j += 1;
            }

            (Some(Action::Retain(_)), Some(Action::Retain(_))) => {
                a_prime.push(Action::Retain(1));
                b_prime.push(Action::Retain(1));
                i += 1;
                j += 1;
            }
        }
    }

    Ok((a_prime, b_prime))
}
