use super::{apply, Error, Len, Operation, Seq};

/// Implemented by containers that can materialize operations.
pub trait Document {
    /// Element-sequence type this document holds.
    type Seq: Seq;

    /// Applies the given operation to this document.
    ///
    /// Application is atomic: it either applies the entire operation or fails
    /// leaving the document unchanged.
    fn apply(&mut self, op: &Operation<Self::Seq>) -> Result<(), Error>;

    /// Returns the length of this document in elements.
    fn len(&self) -> usize;

    /// Returns `true` if this document contains no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Text document backed by a growable string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextDocument {
    contents: String,
}

impl TextDocument {
    /// Returns a new text document with the given starting contents.
    pub fn new(initial: impl Into<String>) -> TextDocument {
        TextDocument {
            contents: initial.into(),
        }
    }

    /// Returns the current contents of the document.
    pub fn contents(&self) -> &str {
        &self.contents
    }
}

impl Document for TextDocument {
    type Seq = String;

    fn apply(&mut self, op: &Operation<String>) -> Result<(), Error> {
        self.contents = apply(&self.contents, op)?;
        Ok(())
    }

    fn len(&self) -> usize {
        Len::len(&self.contents)
    }
}
