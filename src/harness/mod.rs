//! Harness Module
//!
//! Drives one run against the store and writes the human-readable report.
//!
//! ## Run Sequence
//! ```text
//! open store → ensure bucket → [find] → [count] → [add] → close store
//!            → memory counters → goodbye line
//! ```
//!
//! Every failure is tagged with its [`Phase`] and returned; the first one
//! stops the run and later phases never execute.

mod selection;

pub use selection::{Phase, PhaseSelection, ADD_TOKEN, COUNT_TOKEN, FIND_TOKEN};

use std::fmt;
use std::io::Write;
use std::time::Duration;

use crate::bucket::{bucket_exists, ensure_bucket};
use crate::config::Config;
use crate::error::{BenchError, Result};
use crate::instrument::{timed, MemStats};
use crate::loader::{BulkLoader, KeySource, LoadReport, UuidKeys};
use crate::lookup::{find_key, Lookup};
use crate::scanner::{count_keys, ScanReport};
use crate::store::Store;

/// Code printed on the goodbye line
pub const BYE_CODE: u32 = 111;

/// Everything a run observed
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub open_elapsed: Duration,
    /// Whether this run had to create the bucket
    pub bucket_created: bool,
    pub lookups: Vec<Lookup>,
    pub scan: Option<ScanReport>,
    pub load: Option<LoadReport>,
    pub close_elapsed: Duration,
    pub memory: MemStats,
}

impl RunReport {
    /// Find the lookup result for `key`, if the find phase ran
    pub fn lookup(&self, key: &str) -> Option<&Lookup> {
        self.lookups.iter().find(|l| l.key == key)
    }
}

/// Runs the selected phases against the configured store
pub struct Harness {
    config: Config,
    loader: BulkLoader,
}

impl Harness {
    /// Create a harness after validating the configuration
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let loader = BulkLoader::new(&config);
        Ok(Self { config, loader })
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run with random UUID keys for the load phase
    pub fn run<W: Write>(&self, selection: PhaseSelection, out: &mut W) -> Result<RunReport> {
        self.run_with_keys(selection, &mut UuidKeys, out)
    }

    /// Run with a caller-supplied key source for the load phase
    pub fn run_with_keys<K, W>(
        &self,
        selection: PhaseSelection,
        keys: &mut K,
        out: &mut W,
    ) -> Result<RunReport>
    where
        K: KeySource + ?Sized,
        W: Write,
    {
        let config = &self.config;
        let mut report = RunReport::default();

        tracing::info!(
            "Running phases {:?} against {}",
            selection.phases(),
            config.store_path.display()
        );

        let (store, open_elapsed) = timed(|| Store::open(&config.store_path));
        let store = store.map_err(|e| e.in_phase(Phase::Open))?;
        report.open_elapsed = open_elapsed;
        emit(out, format_args!("Open() took {:?}", open_elapsed))?;

        let existed = bucket_exists(&store, &config.bucket_name)
            .map_err(|e| e.in_phase(Phase::EnsureBucket))?;
        ensure_bucket(&store, &config.bucket_name).map_err(|e| e.in_phase(Phase::EnsureBucket))?;
        tracing::debug!(
            "Bucket {:?} {}",
            config.bucket_name,
            if existed { "already existed" } else { "created" }
        );
        report.bucket_created = !existed;

        if selection.find {
            for key in config.sentinels.lookup_order() {
                let lookup = find_key(&store, &config.bucket_name, key)
                    .map_err(|e| e.in_phase(Phase::Find))?;
                emit(out, format_args!("Find key took {:?}", lookup.elapsed))?;
                emit(
                    out,
                    format_args!("Finding key {} => {}", lookup.key, lookup.display_value()),
                )?;
                report.lookups.push(lookup);
            }
        }

        if selection.count {
            let scan = count_keys(&store, &config.bucket_name)
                .map_err(|e| e.in_phase(Phase::Count))?;
            emit(out, format_args!("Found {} keys", scan.count))?;
            emit(out, format_args!("Counting took {:?}", scan.elapsed))?;
            report.scan = Some(scan);
        }

        if selection.add {
            let label = self.loader.count_label();
            tracing::debug!("Loading {} generated records", self.loader.count());
            emit(out, format_args!("Adding {} keys...", label))?;
            let load = self
                .loader
                .load(&store, keys)
                .map_err(|e| e.in_phase(Phase::Add))?;
            emit(out, format_args!("Adding {} keys took {:?}", label, load.elapsed))?;
            report.load = Some(load);
        }

        let ((), close_elapsed) = timed(|| store.close());
        report.close_elapsed = close_elapsed;
        emit(out, format_args!("Close() took {:?}", close_elapsed))?;

        report.memory = MemStats::snapshot();
        tracing::debug!(
            "Allocator: {} allocations, {} frees",
            report.memory.allocations,
            report.memory.frees
        );
        emit(out, format_args!("{}", report.memory))?;
        emit(out, format_args!("Bye! {}", BYE_CODE))?;

        Ok(report)
    }
}

/// Write one report line
fn emit<W: Write>(out: &mut W, line: fmt::Arguments<'_>) -> Result<()> {
    writeln!(out, "{}", line).map_err(|e| BenchError::from(e).in_phase(Phase::Report))
}
