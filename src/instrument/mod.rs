//! Instrumentation Module
//!
//! Phase timing and process memory reporting.

pub mod memory;

pub use memory::{bytes_to_mib, MemStats, TrackingAllocator};

use std::time::{Duration, Instant};

/// Run `f` and return its output with the wall-clock time it took
pub fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let out = f();
    (out, start.elapsed())
}
