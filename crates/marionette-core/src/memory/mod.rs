// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Memory accounting shared by the framework allocator and its readers.
//!
//! A registered allocator (see `marionette-data`) increments these global
//! counters; any part of the runtime can read them in a thread-safe manner.

use std::alloc::Layout;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

// --- Global Memory Counters ---

/// Bytes currently allocated through the tracking allocator.
pub static CURRENTLY_ALLOCATED_BYTES: AtomicUsize = AtomicUsize::new(0);

/// Peak number of bytes ever allocated simultaneously.
pub static PEAK_ALLOCATED_BYTES: AtomicU64 = AtomicU64::new(0);

/// Total number of allocation calls.
pub static TOTAL_ALLOCATIONS: AtomicU64 = AtomicU64::new(0);

/// Total number of deallocation calls.
pub static TOTAL_DEALLOCATIONS: AtomicU64 = AtomicU64::new(0);

/// Allocator handed to the native framework at start-up.
///
/// Engines route their model and motion buffers through it so that the host
/// can account for them.
pub trait FrameworkAllocator: std::fmt::Debug + Send + Sync {
    /// Allocates a block described by `layout`. Returns null on failure.
    ///
    /// # Safety
    ///
    /// `layout` must have a non-zero size.
    unsafe fn allocate(&self, layout: Layout) -> *mut u8;

    /// Releases a block returned by [`FrameworkAllocator::allocate`].
    ///
    /// # Safety
    ///
    /// `ptr` must come from this allocator with the same `layout`.
    unsafe fn deallocate(&self, ptr: *mut u8, layout: Layout);
}

/// A snapshot of the global memory counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryStats {
    /// Bytes currently in use.
    pub current_allocated_bytes: usize,
    /// Highest simultaneous usage seen.
    pub peak_allocated_bytes: u64,
    /// Number of allocations performed.
    pub total_allocations: u64,
    /// Number of deallocations performed.
    pub total_deallocations: u64,
}

impl MemoryStats {
    /// Allocations not yet released.
    pub fn live_allocations(&self) -> i64 {
        self.total_allocations as i64 - self.total_deallocations as i64
    }
}

/// Takes a snapshot of all global memory counters.
pub fn get_memory_stats() -> MemoryStats {
    MemoryStats {
        current_allocated_bytes: CURRENTLY_ALLOCATED_BYTES.load(Ordering::Relaxed),
        peak_allocated_bytes: PEAK_ALLOCATED_BYTES.load(Ordering::Relaxed),
        total_allocations: TOTAL_ALLOCATIONS.load(Ordering::Relaxed),
        total_deallocations: TOTAL_DEALLOCATIONS.load(Ordering::Relaxed),
    }
}
