//! Bucket guarantor
//!
//! Makes sure the named bucket exists before any phase touches it.

use crate::error::{BenchError, Result};
use crate::store::{bucket_def, Store};

/// Create the bucket if it is absent, inside one write transaction
///
/// Idempotent: once the bucket exists this commits an empty transaction.
pub fn ensure_bucket(store: &Store, name: &str) -> Result<()> {
    let txn = store.begin_write()?;

    // Opening a table in a write transaction creates it when missing
    txn.open_table(bucket_def(name))?;
    txn.commit()?;

    tracing::debug!("Bucket {:?} ensured in {}", name, store.path().display());
    Ok(())
}

/// Check whether the bucket exists, without creating it
pub fn bucket_exists(store: &Store, name: &str) -> Result<bool> {
    let txn = store.begin_read()?;
    match store.open_bucket(&txn, name) {
        Ok(_) => Ok(true),
        Err(BenchError::BucketMissing(_)) => Ok(false),
        Err(e) => Err(e),
    }
}
