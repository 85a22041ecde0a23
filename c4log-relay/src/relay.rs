//! Callback relay: registration and the library-facing trampoline
//!
//! LiteCore can only call a capture-less C function, so the relay installs a
//! fixed trampoline with the facility and keeps the caller's callback in a
//! static [`LogSink`]. Registering a new callback swaps the sink and re-arms
//! the facility; the trampoline reads whatever the sink holds at event time.

use crate::facility::LogFacility;
use crate::sink::{LogSink, GLOBAL_SINK};
use crate::types::{LogFn, LogLevel, RawLogCallback, Result};

/// Define a LiteCore-compatible trampoline bound to a static [`LogSink`]
///
/// The generated function has the [`RawLogCallback`] signature. It forwards
/// domain, level and the unformatted message to the sink's current callback
/// and ignores the variadic arguments.
///
/// ```
/// use c4log_relay::{log_trampoline, LogSink};
///
/// static AUDIT_SINK: LogSink = LogSink::new();
/// log_trampoline!(fn audit_trampoline => AUDIT_SINK);
/// ```
#[macro_export]
macro_rules! log_trampoline {
    ($(#[$meta:meta])* $vis:vis fn $name:ident => $sink:path) => {
        $(#[$meta])*
        $vis unsafe extern "C" fn $name(
            domain: $crate::LogDomain,
            level: $crate::LogLevel,
            fmt: *const ::std::os::raw::c_char,
            _args: $crate::RawVaList,
        ) {
            unsafe { $sink.dispatch(domain, level, fmt) }
        }
    };
}

log_trampoline!(
    /// The trampoline installed with LiteCore; forwards to [`GLOBAL_SINK`]
    ///
    /// Safe to call concurrently from any number of threads. Performs one
    /// relaxed atomic load and at most one call, and never allocates.
    ///
    /// # Safety
    /// Meant to be called by LiteCore's logging facility. `fmt` must be what
    /// the registered callback expects, normally a NUL-terminated string.
    pub fn trampoline => GLOBAL_SINK
);

/// Register `callback` as the process-wide log sink
///
/// Stores the callback (or clears it with `None`), then asks `facility` to
/// route events at or above `level` through [`trampoline`], replacing any
/// earlier destination. The sink is replaced even when the facility refuses
/// the registration; the error is returned to the caller.
pub fn set_callback<F>(facility: &F, level: LogLevel, callback: Option<LogFn>) -> Result<()>
where
    F: LogFacility + ?Sized,
{
    Relay::new(facility).set_callback(level, callback)
}

/// A relay bound to one facility and one sink
///
/// [`Relay::new`] uses the process-wide sink; [`Relay::with_sink`] pairs a
/// facility with a sink and a trampoline generated by [`log_trampoline!`],
/// so independent relays never see each other's callbacks.
#[derive(Debug)]
pub struct Relay<F> {
    facility: F,
    sink: &'static LogSink,
    trampoline: RawLogCallback,
}

impl<F: LogFacility> Relay<F> {
    /// Create a relay over the process-wide sink
    pub fn new(facility: F) -> Self {
        Self::with_sink(facility, &GLOBAL_SINK, trampoline)
    }

    /// Create a relay over a dedicated sink and its trampoline
    pub fn with_sink(facility: F, sink: &'static LogSink, trampoline: RawLogCallback) -> Self {
        Self {
            facility,
            sink,
            trampoline,
        }
    }

    /// Replace the sink's callback and arm the facility at `level`
    ///
    /// The trampoline always takes over LiteCore's callback slot with
    /// preformatted messages; the `va_list` it receives is never read, so
    /// LiteCore must expand the format string before calling it.
    pub fn set_callback(&self, level: LogLevel, callback: Option<LogFn>) -> Result<()> {
        log::debug!(
            "{} log callback at level {}",
            if callback.is_some() { "Installing" } else { "Clearing" },
            level
        );

        self.sink.store(callback);

        if let Err(e) = self
            .facility
            .write_to_callback(level, Some(self.trampoline), true)
        {
            log::warn!("Logging facility rejected callback registration: {}", e);
            return Err(e);
        }
        Ok(())
    }

    /// Stop relaying; the facility stays armed but events go nowhere
    pub fn disable(&self, level: LogLevel) -> Result<()> {
        self.set_callback(level, None)
    }

    pub fn sink(&self) -> &'static LogSink {
        self.sink
    }

    pub fn facility(&self) -> &F {
        &self.facility
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LogDomain, RelayError};
    use std::cell::RefCell;
    use std::os::raw::c_char;
    use std::ptr;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Facility that records what it was asked to install
    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<(LogLevel, Option<usize>, bool)>>,
        reject: bool,
    }

    impl LogFacility for Recorder {
        fn write_to_callback(
            &self,
            level: LogLevel,
            callback: Option<RawLogCallback>,
            preformatted: bool,
        ) -> Result<()> {
            self.calls
                .borrow_mut()
                .push((level, callback.map(|f| f as usize), preformatted));
            if self.reject {
                Err(RelayError::RegistrationFailed("rejected".into()))
            } else {
                Ok(())
            }
        }
    }

    static UNIT_SINK: LogSink = LogSink::new();
    log_trampoline!(fn unit_trampoline => UNIT_SINK);

    static HITS: AtomicUsize = AtomicUsize::new(0);

    unsafe extern "C" fn counting(_: LogDomain, _: LogLevel, _: *const c_char) {
        HITS.fetch_add(1, Ordering::SeqCst);
    }

    #[test]
    fn test_set_callback_arms_facility_with_trampoline() {
        let relay = Relay::with_sink(Recorder::default(), &UNIT_SINK, unit_trampoline);
        relay.set_callback(LogLevel::INFO, Some(counting)).unwrap();

        let calls = relay.facility().calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0],
            (LogLevel::INFO, Some(unit_trampoline as RawLogCallback as usize), true)
        );
        assert!(relay.sink().is_armed());

        unsafe { unit_trampoline(LogDomain::NULL, LogLevel::INFO, ptr::null(), ptr::null_mut()) };
        assert_eq!(HITS.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_rejected_registration_is_surfaced() {
        static REJECT_SINK: LogSink = LogSink::new();
        log_trampoline!(fn reject_trampoline => REJECT_SINK);

        let facility = Recorder {
            reject: true,
            ..Default::default()
        };
        let relay = Relay::with_sink(facility, &REJECT_SINK, reject_trampoline);

        let result = relay.set_callback(LogLevel::WARNING, Some(counting));
        assert!(matches!(result, Err(RelayError::RegistrationFailed(_))));
        // The sink is still replaced
        assert!(REJECT_SINK.is_armed());
    }

    #[test]
    fn test_disable_always_asks_for_preformatted_messages() {
        static DISABLE_SINK: LogSink = LogSink::new();
        log_trampoline!(fn disable_trampoline => DISABLE_SINK);

        let relay = Relay::with_sink(Recorder::default(), &DISABLE_SINK, disable_trampoline);
        relay.set_callback(LogLevel::INFO, Some(counting)).unwrap();
        relay.disable(LogLevel::ERROR).unwrap();

        let calls = relay.facility().calls.borrow();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].0, LogLevel::ERROR);
        // Both registrations ask for preformatted messages
        assert!(calls.iter().all(|call| call.2));
        assert!(!DISABLE_SINK.is_armed());
    }
}
