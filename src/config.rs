//! Configuration for bucketbench
//!
//! Centralized configuration with the harness's fixed defaults. Every
//! component receives the values it needs from here instead of reading
//! process-wide constants, so tests can point the harness at a temporary
//! store with a small load.

use std::path::PathBuf;

use crate::error::{BenchError, Result};

// =============================================================================
// Defaults
// =============================================================================

/// Store file used when no path is configured (relative to cwd)
pub const DEFAULT_STORE_PATH: &str = "./db-1.redb";

/// Bucket every phase works against
pub const DEFAULT_BUCKET_NAME: &str = "b1";

/// Records generated per bulk load
pub const DEFAULT_LOAD_COUNT: usize = 50_000;

/// Value stored under every key
pub const DEFAULT_MARKER: &[u8] = b"1";

/// Sentinel written by every load (A)
pub const SENTINEL_A: &str = "afffe217-9890-4bb8-adf3-d025700fdb3e";

/// Sentinel written by every load (B)
pub const SENTINEL_B: &str = "dfffe217-9890-4bb8-adf3-d025700fdb3e";

/// Sentinel that is never written (C)
pub const SENTINEL_C: &str = "ffffe217-9890-4bb8-adf3-d025700fdb3e";

/// Fixed keys used for reproducible presence/absence checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentinelKeys {
    /// Keys rewritten after every bulk load
    pub present: [String; 2],

    /// Key deliberately never written
    pub absent: String,
}

impl SentinelKeys {
    /// Keys in the order the find phase looks them up: absent first
    pub fn lookup_order(&self) -> [&str; 3] {
        [&self.absent, &self.present[0], &self.present[1]]
    }
}

impl Default for SentinelKeys {
    fn default() -> Self {
        Self {
            present: [SENTINEL_A.to_string(), SENTINEL_B.to_string()],
            absent: SENTINEL_C.to_string(),
        }
    }
}

/// Main configuration for a harness run
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Store Configuration
    // -------------------------------------------------------------------------
    /// Path of the single store file (created if missing)
    pub store_path: PathBuf,

    /// Name of the bucket all phases use
    pub bucket_name: String,

    // -------------------------------------------------------------------------
    // Load Configuration
    // -------------------------------------------------------------------------
    /// Number of generated records per bulk load
    pub load_count: usize,

    /// Constant value written under every key
    pub marker: Vec<u8>,

    /// Sentinel keys
    pub sentinels: SentinelKeys,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            bucket_name: DEFAULT_BUCKET_NAME.to_string(),
            load_count: DEFAULT_LOAD_COUNT,
            marker: DEFAULT_MARKER.to_vec(),
            sentinels: SentinelKeys::default(),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check the configuration before any store is touched
    pub fn validate(&self) -> Result<()> {
        if self.bucket_name.is_empty() {
            return Err(BenchError::Config("bucket name must not be empty".into()));
        }
        if self.marker.is_empty() {
            return Err(BenchError::Config("marker value must not be empty".into()));
        }
        if self.sentinels.present.contains(&self.sentinels.absent) {
            return Err(BenchError::Config(format!(
                "absent sentinel {} is also a present sentinel",
                self.sentinels.absent
            )));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the store file path
    pub fn store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.store_path = path.into();
        self
    }

    /// Set the bucket name
    pub fn bucket_name(mut self, name: impl Into<String>) -> Self {
        self.config.bucket_name = name.into();
        self
    }

    /// Set how many records a bulk load generates
    pub fn load_count(mut self, count: usize) -> Self {
        self.config.load_count = count;
        self
    }

    /// Set the value written under every key
    pub fn marker(mut self, marker: impl Into<Vec<u8>>) -> Self {
        self.config.marker = marker.into();
        self
    }

    /// Set the sentinel keys
    pub fn sentinels(mut self, sentinels: SentinelKeys) -> Self {
        self.config.sentinels = sentinels;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
