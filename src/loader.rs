//! Bulk loader
//!
//! Inserts a batch of freshly keyed records plus the present sentinels in a
//! single write transaction.
//!
//! ## Write Path
//! 1. Begin one write transaction
//! 2. Insert `load_count` generated keys with the marker value
//! 3. Rewrite both present sentinels with the marker value
//! 4. Commit: the whole batch lands, or none of it does
//!
//! The absent sentinel is never written, so lookups always have a key that
//! is guaranteed to be missing.

use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::config::Config;
use crate::error::Result;
use crate::store::{bucket_def, Store};

// =============================================================================
// Key Sources
// =============================================================================

/// Supplies keys for generated records
pub trait KeySource {
    /// Produce the next key
    fn next_key(&mut self) -> String;
}

/// Random UUID v4 keys in hyphenated lowercase form
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidKeys;

impl KeySource for UuidKeys {
    fn next_key(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

impl<F> KeySource for F
where
    F: FnMut() -> String,
{
    fn next_key(&mut self) -> String {
        self()
    }
}

// =============================================================================
// Loader
// =============================================================================

/// Outcome of one committed bulk load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    /// Generated records written
    pub generated: usize,

    /// Sentinel records written
    pub sentinels_written: usize,

    /// Writes that replaced a key already in the bucket
    pub overwritten: usize,

    /// Wall-clock time including the commit
    pub elapsed: Duration,
}

impl LoadReport {
    /// Number of keys the bucket grew by
    pub fn new_keys(&self) -> usize {
        self.generated + self.sentinels_written - self.overwritten
    }
}

/// Writes generated records and sentinels into one bucket
#[derive(Debug, Clone)]
pub struct BulkLoader {
    bucket_name: String,
    count: usize,
    marker: Vec<u8>,
    sentinels: [String; 2],
}

impl BulkLoader {
    /// Build a loader from the run configuration
    pub fn new(config: &Config) -> Self {
        Self {
            bucket_name: config.bucket_name.clone(),
            count: config.load_count,
            marker: config.marker.clone(),
            sentinels: config.sentinels.present.clone(),
        }
    }

    /// Number of generated records per load
    pub fn count(&self) -> usize {
        self.count
    }

    /// Short human label for the load size, e.g. `50k`
    pub fn count_label(&self) -> String {
        if self.count >= 1000 && self.count % 1000 == 0 {
            format!("{}k", self.count / 1000)
        } else {
            self.count.to_string()
        }
    }

    /// Run one load inside a single write transaction
    ///
    /// Any error aborts the transaction; nothing from this load is visible.
    pub fn load<K>(&self, store: &Store, keys: &mut K) -> Result<LoadReport>
    where
        K: KeySource + ?Sized,
    {
        let start = Instant::now();
        let txn = store.begin_write()?;
        let mut overwritten = 0;

        {
            let mut bucket = txn.open_table(bucket_def(&self.bucket_name))?;

            for _ in 0..self.count {
                let key = keys.next_key();
                if bucket.insert(key.as_bytes(), self.marker.as_slice())?.is_some() {
                    overwritten += 1;
                }
            }

            // Sentinels go last so they always hold the marker
            for sentinel in &self.sentinels {
                if bucket.insert(sentinel.as_bytes(), self.marker.as_slice())?.is_some() {
                    overwritten += 1;
                }
            }
        }

        txn.commit()?;

        let report = LoadReport {
            generated: self.count,
            sentinels_written: self.sentinels.len(),
            overwritten,
            elapsed: start.elapsed(),
        };

        tracing::info!(
            "Committed {} records to bucket {:?} ({} overwritten) in {:?}",
            report.generated + report.sentinels_written,
            self.bucket_name,
            report.overwritten,
            report.elapsed
        );

        Ok(report)
    }
}
