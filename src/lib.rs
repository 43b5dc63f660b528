//! # bucketbench
//!
//! Exercise harness for an embedded, single-file, ordered key-value store:
//! - Bucket guarantor (create-if-absent in one write transaction)
//! - Bulk loader (generated records + sentinel keys, one atomic batch)
//! - Full scanner (ordered cursor walk in one read transaction)
//! - Point lookup (present value or explicit absence)
//! - Per-phase timing and process memory counters
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Harness / Phase Selector                  │
//! │            (open → bucket → find → count → add → close)      │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!     ┌─────────────┬───┴─────────┬─────────────┐
//!     ▼             ▼             ▼             ▼
//! ┌────────┐  ┌──────────┐  ┌──────────┐  ┌──────────┐
//! │ Bucket │  │  Loader  │  │ Scanner  │  │  Lookup  │
//! │ (write)│  │ (write)  │  │  (read)  │  │  (read)  │
//! └───┬────┘  └────┬─────┘  └────┬─────┘  └────┬─────┘
//!     └────────────┴──────┬──────┴─────────────┘
//!                         ▼
//!                 ┌──────────────┐
//!                 │    Store     │
//!                 │ (redb file)  │
//!                 └──────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod store;
pub mod bucket;
pub mod loader;
pub mod scanner;
pub mod lookup;
pub mod instrument;
pub mod harness;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{BenchError, Result};
pub use config::{Config, SentinelKeys};
pub use harness::{Harness, Phase, PhaseSelection, RunReport};
pub use store::Store;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of bucketbench
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
