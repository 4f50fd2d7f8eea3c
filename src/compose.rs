use super::{Action, Error, Operation, Seq};

/// Merges `a` and `b` into a single operation with the same effect as
/// applying `a` and then `b` in sequence.
///
/// Requires that `b` act on the output of `a`, i.e. `a.post_len() ==
/// b.pre_len()`; otherwise this fails with [`Error::DocumentSizeMismatch`].
/// A delete in `b` that contradicts what `a` inserted fails with
/// [`Error::DeleteMismatch`]. The result is in reduced form.
pub fn compose<T>(a: Operation<T>, b: Operation<T>) -> Result<Operation<T>, Error>
where
    T: Seq,
{
    if a.post_len() != b.pre_len() {
        return Err(Error::DocumentSizeMismatch);
    }

    let a = a.expand().into_vec();
    let b = b.expand().into_vec();

    let (mut i, mut j) = (0, 0);
    let mut composed = Operation::new();

    loop {
        match (a.get(i), b.get(j)) {
            // b is exhausted; whatever remains of a settles below
            (_, None) => break,

            // a is exhausted, so b's inserts land after everything a produced
            (None, Some(Action::Insert(y))) => {
                composed.push(Action::Insert(y.clone()));
                j += 1;
            }
            (None, Some(_)) => break,

            // independent inserts; b's goes first so its run coalesces
            (Some(Action::Insert(x)), Some(Action::Insert(y))) => {
                composed.push(Action::Insert(y.clone()));
                composed.push(Action::Insert(x.clone()));
                i += 1;
                j += 1;
            }

            // b deletes the element a inserted; the two cancel out
            (Some(Action::Insert(x)), Some(Action::Delete(y))) => {
                if x != y {
                    return Err(Error::DeleteMismatch);
                }
                i += 1;
                j += 1;
            }

            // b retains the element a inserted
            (Some(Action::Insert(x)), Some(Action::Retain(_))) => {
                composed.push(Action::Insert(x.clone()));
                i += 1;
                j += 1;
            }

            // a's delete acts on content b never saw; replay it verbatim
            (Some(Action::Delete(x)), Some(Action::Insert(y))) => {
                composed.push(Action::Delete(x.clone()));
                composed.push(Action::Insert(y.clone()));
                i += 1;
                j += 1;
            }
            (Some(Action::Delete(x)), Some(Action::Delete(y))) => {
                composed.push(Action::Delete(x.clone()));
                composed.push(Action::Delete(y.clone()));
                i += 1;
                j += 1;
            }
            (Some(Action::Delete(x)), Some(Action::Retain(_))) => {
                composed.push(Action::Delete(x.clone()));
                i += 1;
            }

            (Some(Action::Retain(_)), Some(Action::Insert(y))) => {
                composed.push(Action::Insert(y.clone()));
                j += 1;
            }
            (Some(Action::Retain(_)), Some(Action::Delete(y))) => {
                composed.push(Action::Delete(y.clone()));
                i += 1;
                j += 1;
            }
            (Some(Action::Retain(_)), Some(Action::Retain(_))) => {
                composed.push(Action::Retain(1));
                i += 1;
                j += 1;
            }
        }
    }

    // trailing inserts in a are content b never reached
    while let Some(Action::Insert(x)) = a.get(i) {
        composed.push(Action::Insert(x.clone()));
        i += 1;
    }

    if i < a.len() || j < b.len() {
        return Err(Error::DocumentSizeMismatch);
    }

    Ok(composed)
}
