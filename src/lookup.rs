//! Point lookup
//!
//! Resolves a single key inside one read transaction. Missing keys are a
//! normal result, not an error.

use std::time::{Duration, Instant};

use crate::error::Result;
use crate::store::Store;

/// Result of looking up one key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup {
    /// Key that was requested
    pub key: String,

    /// Stored value, `None` when the key is absent
    ///
    /// A key bound to an empty value comes back as `Some("")`.
    pub value: Option<String>,

    /// Wall-clock time of the lookup
    pub elapsed: Duration,
}

impl Lookup {
    /// Whether the key was found
    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }

    /// Value as printed in the report: absent renders as empty
    pub fn display_value(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }
}

/// Fetch the value bound to `key`
pub fn find_key(store: &Store, bucket_name: &str, key: &str) -> Result<Lookup> {
    let start = Instant::now();
    let txn = store.begin_read()?;
    let bucket = store.open_bucket(&txn, bucket_name)?;

    let value = bucket
        .get(key.as_bytes())?
        .map(|guard| String::from_utf8_lossy(guard.value()).into_owned());

    let lookup = Lookup {
        key: key.to_string(),
        value,
        elapsed: start.elapsed(),
    };
    tracing::debug!(
        "Lookup {} => {}",
        lookup.key,
        lookup.value.as_deref().unwrap_or("<absent>")
    );

    Ok(lookup)
}
