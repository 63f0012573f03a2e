//! Stop Requests
//!
//! A thread cannot be killed from outside. When a measurement overruns its
//! budget the collector raises that measurement's [`StopHandle`] and waits
//! for the worker thread to exit. The built-in algorithms call
//! [`checkpoint`] once per outer step, which unwinds out of the sort as soon
//! as a stop has been requested on the current thread.

use std::cell::RefCell;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

thread_local! {
    static STOP_FLAG: RefCell<Option<Arc<AtomicBool>>> = const { RefCell::new(None) };
}

/// Unwind payload raised by [`checkpoint`] once a stop was requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stopped;

/// Shared stop flag for one measurement
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    flag: Arc<AtomicBool>,
}

impl StopHandle {
    /// Fresh handle with no stop requested
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the thread this handle is bound to to stop
    pub fn request_stop(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Whether [`StopHandle::request_stop`] has been called
    pub fn is_stop_requested(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    /// Bind this handle to the current thread until the guard is dropped.
    pub fn bind(&self) -> StopBinding {
        let previous = STOP_FLAG.with(|slot| slot.replace(Some(Arc::clone(&self.flag))));
        StopBinding {
            previous,
            _not_send: std::marker::PhantomData,
        }
    }
}

/// Restores the thread's previous stop flag on drop
#[derive(Debug)]
pub struct StopBinding {
    previous: Option<Arc<AtomicBool>>,
    _not_send: std::marker::PhantomData<*const ()>,
}

impl Drop for StopBinding {
    fn drop(&mut self) {
        let previous = self.previous.take();
        let _ = STOP_FLAG.try_with(|slot| slot.replace(previous));
    }
}

/// Whether a stop was requested for the measurement on this thread
#[inline]
pub fn stop_requested() -> bool {
    STOP_FLAG
        .try_with(|slot| {
            slot.borrow()
                .as_ref()
                .is_some_and(|flag| flag.load(Ordering::Relaxed))
        })
        .unwrap_or(false)
}

/// Unwind with [`Stopped`] if a stop was requested on this thread.
///
/// A no-op on threads with no bound [`StopHandle`].
#[inline]
pub fn checkpoint() {
    if stop_requested() {
        std::panic::resume_unwind(Box::new(Stopped));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbound_thread_never_stops() {
        assert!(!stop_requested());
        checkpoint();
    }

    #[test]
    fn test_checkpoint_unwinds_after_request() {
        let handle = StopHandle::new();
        let _binding = handle.bind();
        checkpoint();

        handle.request_stop();
        assert!(stop_requested());
        let payload = std::panic::catch_unwind(checkpoint).unwrap_err();
        assert!(payload.is::<Stopped>());
    }

    #[test]
    fn test_binding_restores_previous_flag() {
        let outer = StopHandle::new();
        outer.request_stop();
        let _outer_binding = outer.bind();
        {
            let _inner = StopHandle::new().bind();
            assert!(!stop_requested());
        }
        assert!(stop_requested());
    }

    #[test]
    fn test_request_seen_from_other_thread() {
        let handle = StopHandle::new();
        let worker_handle = handle.clone();
        let worker = std::thread::spawn(move || {
            let _binding = worker_handle.bind();
            while !stop_requested() {
                std::thread::yield_now();
            }
            worker_handle.is_stop_requested()
        });
        handle.request_stop();
        assert!(worker.join().unwrap());
    }
}
