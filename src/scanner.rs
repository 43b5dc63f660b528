//! Full scanner
//!
//! Counts every key of a bucket by walking a cursor in key order inside one
//! read transaction. The count reflects the snapshot the transaction saw.

use std::time::{Duration, Instant};

use crate::error::Result;
use crate::store::{Cursor, Store};

/// Outcome of one full scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    /// Distinct keys visited
    pub count: u64,

    /// Wall-clock time of the scan
    pub elapsed: Duration,
}

/// Walk every key of the bucket and count them
pub fn count_keys(store: &Store, bucket_name: &str) -> Result<ScanReport> {
    let start = Instant::now();
    let txn = store.begin_read()?;
    let bucket = store.open_bucket(&txn, bucket_name)?;

    let mut cursor = Cursor::open(&bucket)?;
    let mut count = 0u64;
    while cursor.next_entry()?.is_some() {
        count += 1;
    }

    let report = ScanReport {
        count,
        elapsed: start.elapsed(),
    };
    tracing::debug!("Scanned {} keys in bucket {:?}", report.count, bucket_name);

    Ok(report)
}
