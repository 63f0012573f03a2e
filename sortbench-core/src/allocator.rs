//! Allocation Tracking
//!
//! `TrackingAllocator` wraps the system allocator. While an
//! [`AllocationSession`] is open on a thread, every allocation and
//! deallocation made *by that thread* updates a net byte counter and its
//! high-water mark. Sessions are thread-local, so a measurement running on
//! one thread is never charged for another thread's allocations.
//!
//! Install it once in the binary:
//!
//! ```ignore
//! #[global_allocator]
//! static GLOBAL: sortbench_core::TrackingAllocator = sortbench_core::TrackingAllocator;
//! ```

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

/// Global allocator that records per-thread allocation sessions
pub struct TrackingAllocator;

/// Set the first time any allocation is routed through `TrackingAllocator`
static INSTALLED: AtomicBool = AtomicBool::new(false);

struct SessionState {
    active: Cell<bool>,
    /// Net bytes since the session began; negative when the call frees memory it did not allocate
    current: Cell<isize>,
    peak: Cell<usize>,
}

impl SessionState {
    const fn new() -> Self {
        Self {
            active: Cell::new(false),
            current: Cell::new(0),
            peak: Cell::new(0),
        }
    }

    fn reset(&self) {
        self.current.set(0);
        self.peak.set(0);
    }
}

thread_local! {
    static SESSION: SessionState = const { SessionState::new() };
}

#[inline]
fn on_alloc(size: usize) {
    let _ = SESSION.try_with(|s| {
        if s.active.get() {
            let current = s.current.get().saturating_add(size as isize);
            s.current.set(current);
            if current > 0 && current as usize > s.peak.get() {
                s.peak.set(current as usize);
            }
        }
    });
}

#[inline]
fn on_dealloc(size: usize) {
    let _ = SESSION.try_with(|s| {
        if s.active.get() {
            s.current.set(s.current.get().saturating_sub(size as isize));
        }
    });
}

#[inline]
fn mark_installed() {
    if !INSTALLED.load(Ordering::Relaxed) {
        INSTALLED.store(true, Ordering::Relaxed);
    }
}

unsafe impl GlobalAlloc for TrackingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        mark_installed();
        // SAFETY: forwarded unchanged to the system allocator.
        let ptr = unsafe { System.alloc(layout) };
        if !ptr.is_null() {
            on_alloc(layout.size());
        }
        ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        mark_installed();
        // SAFETY: forwarded unchanged to the system allocator.
        let ptr = unsafe { System.alloc_zeroed(layout) };
        if !ptr.is_null() {
            on_alloc(layout.size());
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        // SAFETY: `ptr` was allocated by `System` with this layout.
        unsafe { System.dealloc(ptr, layout) };
        on_dealloc(layout.size());
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        // SAFETY: caller upholds the `GlobalAlloc::realloc` contract.
        let new_ptr = unsafe { System.realloc(ptr, layout, new_size) };
        if !new_ptr.is_null() {
            // Both blocks may be live during the copy; count the new one first.
            on_alloc(new_size);
            on_dealloc(layout.size());
        }
        new_ptr
    }
}

/// Whether `TrackingAllocator` is the process's global allocator
pub fn is_installed() -> bool {
    drop(std::hint::black_box(Box::new(0u64)));
    INSTALLED.load(Ordering::Relaxed)
}

/// Reasons a session cannot be opened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TrackingError {
    #[error("TrackingAllocator is not installed as #[global_allocator]")]
    NotInstalled,
    #[error("an allocation session is already open on this thread")]
    AlreadyActive,
}

/// Figures read back when a session finishes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllocationStats {
    /// Highest net byte count reached during the session
    pub peak_bytes: u64,
}

/// An open tracking session on the current thread.
///
/// Dropping the session closes it, so tracking never outlives the scope
/// that opened it, even when that scope unwinds.
#[derive(Debug)]
pub struct AllocationSession {
    // Sessions are tied to the thread-local state of the thread that opened them.
    _not_send: std::marker::PhantomData<*const ()>,
}

impl AllocationSession {
    /// Open a session on the current thread.
    pub fn begin() -> Result<Self, TrackingError> {
        if !is_installed() {
            return Err(TrackingError::NotInstalled);
        }
        SESSION.with(|s| {
            if s.active.get() {
                return Err(TrackingError::AlreadyActive);
            }
            s.reset();
            s.active.set(true);
            Ok(())
        })?;
        Ok(Self {
            _not_send: std::marker::PhantomData,
        })
    }

    /// Close the session and return its figures
    pub fn finish(self) -> AllocationStats {
        let stats = SESSION.with(|s| AllocationStats {
            peak_bytes: s.peak.get() as u64,
        });
        drop(self);
        stats
    }
}

impl Drop for AllocationSession {
    fn drop(&mut self) {
        let _ = SESSION.try_with(|s| s.active.set(false));
    }
}

/// Whether a session is currently open on this thread
pub fn session_active() -> bool {
    SESSION.try_with(|s| s.active.get()).unwrap_or(false)
}
