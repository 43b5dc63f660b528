//! Bucket cursor
//!
//! Ordered first/next traversal over the entries of a bucket.

use redb::{Range, ReadableTable};

use crate::error::Result;

/// A key-value pair copied out of the store
pub type Entry = (Vec<u8>, Vec<u8>);

/// Traversal handle over a bucket in key order
///
/// A fresh cursor is positioned before the first key. Each call to
/// [`Cursor::next_entry`] moves one key forward; `None` means exhausted.
pub struct Cursor<'t, T>
where
    T: ReadableTable<&'static [u8], &'static [u8]>,
{
    table: &'t T,
    entries: Range<'t, &'static [u8], &'static [u8]>,
}

impl<'t, T> Cursor<'t, T>
where
    T: ReadableTable<&'static [u8], &'static [u8]>,
{
    /// Create a cursor positioned before the first key
    pub fn open(table: &'t T) -> Result<Self> {
        let entries = table.iter()?;
        Ok(Self { table, entries })
    }

    /// Move to the first key and return it
    pub fn first(&mut self) -> Result<Option<Entry>> {
        self.entries = self.table.iter()?;
        self.next_entry()
    }

    /// Advance to the next key in order
    pub fn next_entry(&mut self) -> Result<Option<Entry>> {
        match self.entries.next() {
            Some(item) => {
                let (key, value) = item?;
                Ok(Some((key.value().to_vec(), value.value().to_vec())))
            }
            None => Ok(None),
        }
    }
}
