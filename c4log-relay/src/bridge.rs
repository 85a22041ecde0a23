//! Forward LiteCore log events into the `log` facade
//!
//! Installing the bridge registers [`forward_to_log`] as the relay's sink.
//! Each event becomes a `log` record with target `litecore`, prefixed with
//! a short domain tag (`db`, `query`, `sync`, ...).

use crate::facility::{KnownDomains, LogFacility};
use crate::relay::Relay;
use crate::types::{LogDomain, LogLevel, RelayError, Result};
use once_cell::sync::OnceCell;
use std::ffi::CStr;
use std::os::raw::c_char;

/// `log` target used for forwarded records
pub const LOG_TARGET: &str = "litecore";

static DOMAINS: OnceCell<KnownDomains> = OnceCell::new();
static INSTALLED: OnceCell<Result<()>> = OnceCell::new();

/// Route LiteCore logs at or above `level` into the `log` facade
///
/// The facility's domain handles are captured on the first installation.
pub fn install<F: LogFacility>(relay: &Relay<F>, level: LogLevel) -> Result<()> {
    DOMAINS.get_or_init(|| relay.facility().known_domains());
    relay.set_callback(level, Some(forward_to_log))
}

/// Install the bridge once per process; later calls report the first outcome
pub fn install_once<F: LogFacility>(relay: &Relay<F>, level: LogLevel) -> Result<()> {
    replay(INSTALLED.get_or_init(|| install(relay, level)))
}

/// Copy a stored outcome, keeping the error's variant
fn replay(outcome: &Result<()>) -> Result<()> {
    let Err(e) = outcome else {
        return Ok(());
    };
    Err(match e {
        RelayError::InvalidLevel(level) => RelayError::InvalidLevel(*level),
        RelayError::RegistrationFailed(msg) => RelayError::RegistrationFailed(msg.clone()),
        RelayError::LibraryLoad(msg) => RelayError::LibraryLoad(msg.clone()),
        RelayError::MissingSymbol(msg) => RelayError::MissingSymbol(msg.clone()),
        RelayError::ConfigParse(msg) => RelayError::ConfigParse(msg.clone()),
        RelayError::InvalidData(msg) => RelayError::InvalidData(msg.clone()),
        RelayError::IoError(e) => RelayError::IoError(std::io::Error::new(e.kind(), e.to_string())),
    })
}

/// Map a LiteCore severity onto a `log` level
///
/// LiteCore's debug level is noisier than most hosts' debug, so it lands on
/// trace and everything shifts down one step.
pub fn to_log_level(level: LogLevel) -> log::Level {
    match level {
        LogLevel::DEBUG => log::Level::Trace,
        LogLevel::VERBOSE => log::Level::Debug,
        LogLevel::INFO => log::Level::Info,
        LogLevel::WARNING => log::Level::Warn,
        LogLevel::ERROR | LogLevel::NONE => log::Level::Error,
        _ => log::Level::Info,
    }
}

/// Short tag for a domain using the handles captured at install time
pub fn domain_name(domain: LogDomain) -> &'static str {
    match DOMAINS.get() {
        Some(domains) => domains.name_of(domain),
        None => "unkndmn",
    }
}

/// Sink that emits each event as a `log` record
///
/// # Safety
/// `msg` must be null or a NUL-terminated string valid for the call.
pub unsafe extern "C" fn forward_to_log(domain: LogDomain, level: LogLevel, msg: *const c_char) {
    let level = to_log_level(level);
    if !log::log_enabled!(target: LOG_TARGET, level) {
        return;
    }

    let domain = domain_name(domain);
    if msg.is_null() {
        log::log!(target: LOG_TARGET, level, "{} <null>", domain);
    } else {
        let msg = CStr::from_ptr(msg);
        log::log!(target: LOG_TARGET, level, "{} {}", domain, msg.to_string_lossy());
    }
}
