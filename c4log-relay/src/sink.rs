//! Atomic storage for the registered log callback
//!
//! A `LogSink` holds at most one `LogFn`. It is a single pointer-sized atomic,
//! so readers on LiteCore's logging threads always see either the previous or
//! the newly installed callback, never a mixture. Relaxed ordering suffices:
//! the function pointer carries no data that must be published with it.

use crate::types::{LogDomain, LogFn, LogLevel};
use std::fmt;
use std::os::raw::{c_char, c_void};
use std::ptr;
use std::sync::atomic::{AtomicPtr, Ordering};

/// The process-wide sink read by [`crate::trampoline`]
///
/// Created empty at process start and never destroyed.
pub static GLOBAL_SINK: LogSink = LogSink::new();

/// Optional, atomically swappable log callback
pub struct LogSink {
    callback: AtomicPtr<c_void>,
}

impl LogSink {
    /// Create an empty sink
    pub const fn new() -> Self {
        Self {
            callback: AtomicPtr::new(ptr::null_mut()),
        }
    }

    /// Replace the current callback; `None` stops relaying
    pub fn store(&self, callback: Option<LogFn>) {
        let raw = match callback {
            Some(f) => f as *mut c_void,
            None => ptr::null_mut(),
        };
        self.callback.store(raw, Ordering::Relaxed);
    }

    /// The callback currently installed, if any
    pub fn load(&self) -> Option<LogFn> {
        let raw = self.callback.load(Ordering::Relaxed);
        if raw.is_null() {
            None
        } else {
            // Only `store` writes non-null values, and it writes `LogFn`s.
            Some(unsafe { std::mem::transmute::<*mut c_void, LogFn>(raw) })
        }
    }

    pub fn is_armed(&self) -> bool {
        !self.callback.load(Ordering::Relaxed).is_null()
    }

    /// Forward one event to the current callback, if there is one
    ///
    /// Performs a single atomic load and at most one call; never allocates.
    ///
    /// # Safety
    /// `msg` must satisfy whatever the installed callback expects of it,
    /// normally a NUL-terminated string valid for the duration of the call.
    #[inline]
    pub unsafe fn dispatch(&self, domain: LogDomain, level: LogLevel, msg: *const c_char) {
        if let Some(callback) = self.load() {
            callback(domain, level, msg);
        }
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LogSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogSink")
            .field("callback", &self.callback.load(Ordering::Relaxed))
            .finish()
    }
}
