//! Process memory counters
//!
//! [`TrackingAllocator`] wraps the system allocator and keeps running
//! totals. The binary installs it as the global allocator; without it every
//! snapshot reads zero.

use std::alloc::{GlobalAlloc, Layout, System};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

const MIB: usize = 1024 * 1024;

static LIVE_BYTES: AtomicUsize = AtomicUsize::new(0);
static TOTAL_BYTES: AtomicUsize = AtomicUsize::new(0);
static PEAK_BYTES: AtomicUsize = AtomicUsize::new(0);
static ALLOCATIONS: AtomicUsize = AtomicUsize::new(0);
static FREES: AtomicUsize = AtomicUsize::new(0);

/// Counting wrapper over [`System`]
pub struct TrackingAllocator;

impl TrackingAllocator {
    pub const fn new() -> Self {
        Self
    }

    fn record_alloc(size: usize) {
        ALLOCATIONS.fetch_add(1, Ordering::Relaxed);
        TOTAL_BYTES.fetch_add(size, Ordering::Relaxed);
        let live = LIVE_BYTES.fetch_add(size, Ordering::Relaxed) + size;
        PEAK_BYTES.fetch_max(live, Ordering::Relaxed);
    }

    fn record_free(size: usize) {
        FREES.fetch_add(1, Ordering::Relaxed);
        LIVE_BYTES.fetch_sub(size, Ordering::Relaxed);
    }
}

impl Default for TrackingAllocator {
    fn default() -> Self {
        Self::new()
    }
}

unsafe impl GlobalAlloc for TrackingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = System.alloc(layout);
        if !ptr.is_null() {
            Self::record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        let ptr = System.alloc_zeroed(layout);
        if !ptr.is_null() {
            Self::record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout);
        Self::record_free(layout.size());
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new_ptr = System.realloc(ptr, layout, new_size);
        if !new_ptr.is_null() {
            Self::record_free(layout.size());
            Self::record_alloc(new_size);
        }
        new_ptr
    }
}

/// Point-in-time view of the allocator counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemStats {
    /// Bytes currently allocated
    pub alloc: usize,

    /// Bytes allocated over the process lifetime
    pub total_alloc: usize,

    /// High-water mark of live bytes obtained from the system allocator
    pub sys: usize,

    /// Garbage-collection cycles; always zero in Rust
    pub num_gc: u32,

    /// Allocation calls so far
    pub allocations: usize,

    /// Deallocation calls so far
    pub frees: usize,
}

impl MemStats {
    /// Read the current counters
    pub fn snapshot() -> Self {
        Self {
            alloc: LIVE_BYTES.load(Ordering::Relaxed),
            total_alloc: TOTAL_BYTES.load(Ordering::Relaxed),
            sys: PEAK_BYTES.load(Ordering::Relaxed),
            num_gc: 0,
            allocations: ALLOCATIONS.load(Ordering::Relaxed),
            frees: FREES.load(Ordering::Relaxed),
        }
    }
}

impl fmt::Display for MemStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Alloc = {} MiB\tTotalAlloc = {} MiB\tSys = {} MiB\tNumGC = {}",
            bytes_to_mib(self.alloc),
            bytes_to_mib(self.total_alloc),
            bytes_to_mib(self.sys),
            self.num_gc
        )
    }
}

/// Whole mebibytes, rounded down
pub fn bytes_to_mib(bytes: usize) -> usize {
    bytes / MIB
}
