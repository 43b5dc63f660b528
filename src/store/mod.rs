//! Store Module
//!
//! Handle over the single persisted store file.
//!
//! ## Responsibilities
//! - Open or create the store file
//! - Hand out read and write transactions
//! - Resolve bucket names to table definitions
//! - Close the file exactly once
//!
//! ## Engine Model
//! The file is a `redb` database. A bucket is a `redb` table keyed and valued
//! by raw bytes, ordered lexicographically by key.
//!
//! - **Write transactions** are serialized by the engine and commit atomically
//! - **Read transactions** see a consistent snapshot taken when they begin

mod cursor;

pub use cursor::{Cursor, Entry};

use std::path::{Path, PathBuf};
use std::time::Instant;

use redb::{Database, ReadOnlyTable, ReadTransaction, TableDefinition, TableError, WriteTransaction};

use crate::error::{BenchError, Result};

/// Table definition of a bucket: byte keys to byte values
pub type BucketDef<'a> = TableDefinition<'a, &'static [u8], &'static [u8]>;

/// Read-only view of a bucket inside a read transaction
pub type BucketView = ReadOnlyTable<&'static [u8], &'static [u8]>;

/// Build the table definition for a bucket name
pub fn bucket_def(name: &str) -> BucketDef<'_> {
    TableDefinition::new(name)
}

/// Open store handle
pub struct Store {
    /// Underlying engine handle
    db: Database,

    /// Location of the store file
    path: PathBuf,
}

impl Store {
    /// Open the store file, creating it if it does not exist
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let db = Database::create(&path).map_err(|source| BenchError::StoreOpen {
            path: path.clone(),
            source,
        })?;

        tracing::debug!("Opened store at {}", path.display());
        Ok(Self { db, path })
    }

    /// Begin a snapshot read transaction
    pub fn begin_read(&self) -> Result<ReadTransaction> {
        Ok(self.db.begin_read()?)
    }

    /// Begin a write transaction (blocks while another writer is active)
    pub fn begin_write(&self) -> Result<WriteTransaction> {
        Ok(self.db.begin_write()?)
    }

    /// Open a bucket for reading
    ///
    /// A bucket that was never created is reported as
    /// [`BenchError::BucketMissing`] rather than a generic table error.
    pub fn open_bucket(&self, txn: &ReadTransaction, name: &str) -> Result<BucketView> {
        match txn.open_table(bucket_def(name)) {
            Ok(table) => Ok(table),
            Err(TableError::TableDoesNotExist(_)) => Err(BenchError::BucketMissing(name.to_string())),
            Err(e) => Err(e.into()),
        }
    }

    /// Get the store file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Close the store, releasing the file
    pub fn close(self) {
        let start = Instant::now();
        drop(self.db);
        tracing::debug!("Closed store at {} in {:?}", self.path.display(), start.elapsed());
    }
}
