//! Link-time bindings to LiteCore's logging API
//!
//! Only built with the `litecore` feature, where `build.rs` adds LiteCore to
//! the link line. Also exports `c4log_setRustCallback` (see
//! `include/c4log_relay.h`) for C callers.

use crate::facility::{KnownDomains, LogFacility};
use crate::types::{LogDomain, LogFn, LogLevel, RawLogCallback, RelayError, Result};
use std::ffi::CString;
use std::os::raw::c_char;

#[allow(non_snake_case)]
extern "C" {
    fn c4log_writeToCallback(level: LogLevel, callback: Option<RawLogCallback>, preformatted: bool);
    fn c4log_getDomain(name: *const c_char, create: bool) -> LogDomain;
}

/// LiteCore's logging facility, linked into the binary
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkedFacility;

impl LogFacility for LinkedFacility {
    fn write_to_callback(
        &self,
        level: LogLevel,
        callback: Option<RawLogCallback>,
        preformatted: bool,
    ) -> Result<()> {
        if !level.is_known() {
            return Err(RelayError::InvalidLevel(level.as_raw()));
        }
        unsafe { c4log_writeToCallback(level, callback, preformatted) };
        Ok(())
    }

    fn known_domains(&self) -> KnownDomains {
        KnownDomains::resolve_with(|name| match CString::new(name) {
            Ok(name) => unsafe { c4log_getDomain(name.as_ptr(), false) },
            Err(_) => LogDomain::NULL,
        })
    }
}

/// C entry point: register `callback` (or null) as the log sink
///
/// Best effort: a rejected registration is logged, never reported.
#[no_mangle]
#[allow(non_snake_case)]
pub extern "C" fn c4log_setRustCallback(level: LogLevel, callback: Option<LogFn>) {
    if let Err(e) = crate::relay::set_callback(&LinkedFacility, level, callback) {
        log::warn!("c4log_setRustCallback({}) failed: {}", level, e);
    }
}
