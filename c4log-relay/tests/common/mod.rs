//! Shared test helpers: an in-process stand-in for LiteCore's logging facility
#![allow(dead_code, unused_macros)]

use c4log_relay::{KnownDomains, LogDomain, LogFacility, LogLevel, RawLogCallback, RelayError, Result};
use std::ffi::CStr;
use std::os::raw::{c_char, c_void};
use std::ptr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub const DEFAULT_DOMAIN: LogDomain = LogDomain::from_raw(0x10 as *mut c_void);
pub const DB_DOMAIN: LogDomain = LogDomain::from_raw(0x20 as *mut c_void);
pub const QUERY_DOMAIN: LogDomain = LogDomain::from_raw(0x30 as *mut c_void);
pub const SYNC_DOMAIN: LogDomain = LogDomain::from_raw(0x40 as *mut c_void);
pub const WS_DOMAIN: LogDomain = LogDomain::from_raw(0x50 as *mut c_void);

/// One event as seen by a recording callback
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Event {
    pub domain: usize,
    pub level: i8,
    pub msg: String,
}

impl Event {
    pub fn new(domain: LogDomain, level: LogLevel, msg: &str) -> Self {
        Self {
            domain: domain.as_raw() as usize,
            level: level.as_raw(),
            msg: msg.to_string(),
        }
    }

    /// Copy an event out of raw callback arguments
    ///
    /// # Safety
    /// `msg` must be null or a valid NUL-terminated string.
    pub unsafe fn capture(domain: LogDomain, level: LogLevel, msg: *const c_char) -> Self {
        let msg = if msg.is_null() {
            "<null>".to_string()
        } else {
            CStr::from_ptr(msg).to_string_lossy().into_owned()
        };
        Self {
            domain: domain.as_raw() as usize,
            level: level.as_raw(),
            msg,
        }
    }
}

/// Define a `LogFn` that appends every event to its own static store
macro_rules! recording_callback {
    ($name:ident => $store:ident) => {
        static $store: ::std::sync::Mutex<Vec<crate::common::Event>> =
            ::std::sync::Mutex::new(Vec::new());

        unsafe extern "C" fn $name(
            domain: ::c4log_relay::LogDomain,
            level: ::c4log_relay::LogLevel,
            msg: *const ::std::os::raw::c_char,
        ) {
            let event = crate::common::Event::capture(domain, level, msg);
            $store.lock().unwrap().push(event);
        }
    };
}

/// What the facility was last asked to install
#[derive(Debug, Clone, Copy)]
pub struct Installed {
    pub level: LogLevel,
    pub callback: Option<RawLogCallback>,
    pub preformatted: bool,
}

/// Fake logging facility that delivers events synchronously on the caller's thread
#[derive(Debug, Default)]
pub struct FakeFacility {
    installed: Mutex<Option<Installed>>,
    registrations: AtomicUsize,
}

impl FakeFacility {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn installed(&self) -> Option<Installed> {
        *self.installed.lock().unwrap()
    }

    pub fn registrations(&self) -> usize {
        self.registrations.load(Ordering::SeqCst)
    }

    /// Log one event; returns true if it passed the level threshold
    pub fn emit(&self, domain: LogDomain, level: LogLevel, msg: &CStr) -> bool {
        self.emit_raw(domain, level, msg.as_ptr())
    }

    pub fn emit_raw(&self, domain: LogDomain, level: LogLevel, msg: *const c_char) -> bool {
        let installed = match self.installed() {
            Some(installed) => installed,
            None => return false,
        };
        match installed.callback {
            Some(callback) if level >= installed.level => {
                unsafe { callback(domain, level, msg, ptr::null_mut()) };
                true
            }
            _ => false,
        }
    }
}

impl LogFacility for FakeFacility {
    fn write_to_callback(
        &self,
        level: LogLevel,
        callback: Option<RawLogCallback>,
        preformatted: bool,
    ) -> Result<()> {
        if !level.is_known() {
            return Err(RelayError::InvalidLevel(level.as_raw()));
        }
        self.registrations.fetch_add(1, Ordering::SeqCst);
        *self.installed.lock().unwrap() = Some(Installed {
            level,
            callback,
            preformatted,
        });
        Ok(())
    }

    fn known_domains(&self) -> KnownDomains {
        KnownDomains {
            default: DEFAULT_DOMAIN,
            database: DB_DOMAIN,
            query: QUERY_DOMAIN,
            sync: SYNC_DOMAIN,
            websocket: WS_DOMAIN,
        }
    }
}
