//! bucketbench Binary
//!
//! Opens the store, runs the phases named on the command line and prints
//! timings and memory counters.
//!
//! Usage: `bucketbench [f] [c] [a]`
//! - `f`: look up the sentinel keys
//! - `c`: count every key
//! - `a`: add 50k generated keys plus sentinels

use std::io;

use bucketbench::instrument::TrackingAllocator;
use bucketbench::{Config, Harness, PhaseSelection};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

#[global_allocator]
static GLOBAL: TrackingAllocator = TrackingAllocator::new();

/// bucketbench
#[derive(Parser, Debug)]
#[command(name = "bucketbench")]
#[command(about = "Exercise an embedded key-value store: find (f), count (c), add (a)")]
#[command(version)]
struct Args {
    /// Phase tokens: f = find, c = count, a = add (order and repeats do not matter)
    #[arg(num_args = 0.., allow_hyphen_values = true)]
    phases: Vec<String>,
}

fn main() {
    // Initialize tracing/logging (stderr keeps stdout for the report)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,bucketbench=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let selection = PhaseSelection::from_tokens(&args.phases);

    tracing::info!("bucketbench v{}", bucketbench::VERSION);

    let harness = match Harness::new(Config::default()) {
        Ok(h) => h,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = harness.run(selection, &mut out) {
        tracing::error!("Run aborted: {}", e);
        std::process::exit(1);
    }
}
