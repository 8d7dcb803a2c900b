/// Options for controlling create and update operations.
///
/// # Examples
///
/// ```rust,ignore
/// use polyglot::collection::{insert_if_absent, WriteOptions};
///
/// // Plain update: the record must already exist
/// let options = WriteOptions::default();
///
/// // Upsert: create the record when no record with that id exists
/// let options = insert_if_absent();
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    insert_if_absent: bool,
}

impl WriteOptions {
    pub fn new(insert_if_absent: bool) -> Self {
        Self { insert_if_absent }
    }

    /// Returns whether an update may create a missing record.
    pub fn is_insert_if_absent(&self) -> bool {
        self.insert_if_absent
    }
}

/// Creates `WriteOptions` with insert-if-absent behavior.
pub fn insert_if_absent() -> WriteOptions {
    WriteOptions::new(true)
}
