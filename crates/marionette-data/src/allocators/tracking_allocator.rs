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

//! An allocator that tracks memory usage.

use marionette_core::memory::*;
use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::Ordering;

/// A wrapper around a `GlobalAlloc` implementation that updates the global
/// memory counters defined in `marionette_core::memory` on every call.
///
/// It serves as the default [`FrameworkAllocator`] and can also be registered
/// process-wide:
///
/// ```rust,ignore
/// use marionette_data::TrackingAllocator;
///
/// #[global_allocator]
/// static GLOBAL: TrackingAllocator = TrackingAllocator::new(std::alloc::System);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct TrackingAllocator<A = System> {
    inner: A,
}

impl<A> TrackingAllocator<A> {
    /// Creates a tracking allocator around `inner`.
    pub const fn new(inner: A) -> Self {
        Self { inner }
    }
}

fn record_alloc(size: usize) {
    let previous = CURRENTLY_ALLOCATED_BYTES.fetch_add(size, Ordering::Relaxed);
    PEAK_ALLOCATED_BYTES.fetch_max(previous.saturating_add(size) as u64, Ordering::Relaxed);
    TOTAL_ALLOCATIONS.fetch_add(1, Ordering::Relaxed);
}

fn record_dealloc(size: usize) {
    // Saturate: blocks allocated before registration were never counted.
    let _ = CURRENTLY_ALLOCATED_BYTES.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |current| {
        Some(current.saturating_sub(size))
    });
    TOTAL_DEALLOCATIONS.fetch_add(1, Ordering::Relaxed);
}

unsafe impl<A: GlobalAlloc> GlobalAlloc for TrackingAllocator<A> {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = self.inner.alloc(layout);
        if !ptr.is_null() {
            record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        record_dealloc(layout.size());
        self.inner.dealloc(ptr, layout);
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        let ptr = self.inner.alloc_zeroed(layout);
        if !ptr.is_null() {
            record_alloc(layout.size());
        }
        ptr
    }
}

impl<A: GlobalAlloc + std::fmt::Debug + Send + Sync> FrameworkAllocator for TrackingAllocator<A> {
    unsafe fn allocate(&self, layout: Layout) -> *mut u8 {
        let ptr = self.alloc(layout);
        if ptr.is_null() {
            log::warn!(
                "Framework allocation of {} bytes (align {}) failed",
                layout.size(),
                layout.align()
            );
        }
        ptr
    }

    unsafe fn deallocate(&self, ptr: *mut u8, layout: Layout) {
        self.dealloc(ptr, layout);
    }
}
