//! Core types shared by the relay
//!
//! The domain and level types mirror LiteCore's `C4LogDomain` and `C4LogLevel`
//! at the ABI level so they can cross the C boundary unchanged. The relay never
//! interprets them beyond what the `log` bridge needs.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::os::raw::{c_char, c_void};
use std::str::FromStr;

/// Result type for relay operations
pub type Result<T> = std::result::Result<T, RelayError>;

/// Opaque log domain handle owned by LiteCore (`C4LogDomain`)
///
/// Domains are allocated once by the library and live until process exit,
/// so the handle is compared by identity and freely shared across threads.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LogDomain(*mut c_void);

// LiteCore domains are immutable, process-lifetime objects.
unsafe impl Send for LogDomain {}
unsafe impl Sync for LogDomain {}

impl LogDomain {
    /// A null domain, never produced by LiteCore itself
    pub const NULL: LogDomain = LogDomain(std::ptr::null_mut());

    /// Wrap a raw `C4LogDomain` pointer
    pub const fn from_raw(ptr: *mut c_void) -> Self {
        LogDomain(ptr)
    }

    /// The raw `C4LogDomain` pointer
    pub const fn as_raw(self) -> *mut c_void {
        self.0
    }

    pub fn is_null(self) -> bool {
        self.0.is_null()
    }
}

impl Default for LogDomain {
    fn default() -> Self {
        LogDomain::NULL
    }
}

/// Log severity as defined by LiteCore (`C4LogLevel`, an `int8_t` enum)
///
/// Values outside the known range are carried through unchanged; only the
/// facility implementations refuse to hand them to the C library.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LogLevel(i8);

impl LogLevel {
    pub const DEBUG: LogLevel = LogLevel(0);
    pub const VERBOSE: LogLevel = LogLevel(1);
    pub const INFO: LogLevel = LogLevel(2);
    pub const WARNING: LogLevel = LogLevel(3);
    pub const ERROR: LogLevel = LogLevel(4);
    pub const NONE: LogLevel = LogLevel(5);

    /// Wrap a raw level value without validation
    pub const fn from_raw(raw: i8) -> Self {
        LogLevel(raw)
    }

    /// The raw `C4LogLevel` value
    pub const fn as_raw(self) -> i8 {
        self.0
    }

    /// True if this is one of the levels LiteCore defines
    pub fn is_known(self) -> bool {
        (Self::DEBUG.0..=Self::NONE.0).contains(&self.0)
    }

    /// Lowercase name of a known level
    pub fn name(self) -> Option<&'static str> {
        match self {
            LogLevel::DEBUG => Some("debug"),
            LogLevel::VERBOSE => Some("verbose"),
            LogLevel::INFO => Some("info"),
            LogLevel::WARNING => Some("warning"),
            LogLevel::ERROR => Some("error"),
            LogLevel::NONE => Some("none"),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "level({})", self.0),
        }
    }
}

impl TryFrom<i8> for LogLevel {
    type Error = RelayError;

    fn try_from(raw: i8) -> Result<Self> {
        let level = LogLevel(raw);
        if level.is_known() {
            Ok(level)
        } else {
            Err(RelayError::InvalidLevel(raw))
        }
    }
}

impl FromStr for LogLevel {
    type Err = RelayError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::DEBUG),
            "verbose" => Ok(LogLevel::VERBOSE),
            "info" => Ok(LogLevel::INFO),
            "warning" | "warn" => Ok(LogLevel::WARNING),
            "error" => Ok(LogLevel::ERROR),
            "none" => Ok(LogLevel::NONE),
            other => Err(RelayError::InvalidData(format!(
                "Unknown log level name: {:?}",
                other
            ))),
        }
    }
}

impl Serialize for LogLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self.name() {
            Some(name) => serializer.serialize_str(name),
            None => serializer.serialize_i8(self.0),
        }
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Name(String),
            Raw(i8),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Name(name) => name.parse().map_err(de::Error::custom),
            Repr::Raw(raw) => LogLevel::try_from(raw).map_err(de::Error::custom),
        }
    }
}

/// Opaque `va_list` handed to LiteCore callbacks
///
/// The relay never reads it. On the supported targets a `va_list` parameter
/// is passed as a single pointer, so it crosses the boundary as one.
pub type RawVaList = *mut c_void;

/// Sink signature registered by callers (`C4LogCallbackR`)
///
/// `Option<LogFn>` has the same ABI as a nullable C function pointer.
pub type LogFn = unsafe extern "C" fn(domain: LogDomain, level: LogLevel, msg: *const c_char);

/// Callback signature LiteCore invokes (`C4LogCallback`)
pub type RawLogCallback = unsafe extern "C" fn(
    domain: LogDomain,
    level: LogLevel,
    fmt: *const c_char,
    args: RawVaList,
);

/// Errors that can occur while arming the relay
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("Invalid log level: {0}")]
    InvalidLevel(i8),

    #[error("Log callback registration failed: {0}")]
    RegistrationFailed(String),

    #[error("Failed to load LiteCore library: {0}")]
    LibraryLoad(String),

    #[error("Symbol not found in LiteCore library: {0}")]
    MissingSymbol(String),

    #[error("Failed to parse config: {0}")]
    ConfigParse(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_names_round_trip() {
        for raw in 0..=5 {
            let level = LogLevel::try_from(raw).unwrap();
            let name = level.name().unwrap();
            assert_eq!(name.parse::<LogLevel>().unwrap(), level);
            assert_eq!(level.to_string(), name);
        }
        assert_eq!("WARN".parse::<LogLevel>().unwrap(), LogLevel::WARNING);
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_unknown_levels_pass_through() {
        let odd = LogLevel::from_raw(42);
        assert!(!odd.is_known());
        assert_eq!(odd.as_raw(), 42);
        assert_eq!(odd.to_string(), "level(42)");
        assert!(matches!(LogLevel::try_from(-1), Err(RelayError::InvalidLevel(-1))));
    }

    #[test]
    fn test_level_ordering() {
        assert!(LogLevel::DEBUG < LogLevel::VERBOSE);
        assert!(LogLevel::WARNING < LogLevel::ERROR);
        assert!(LogLevel::ERROR < LogLevel::NONE);
    }

    #[test]
    fn test_domain_identity() {
        let mut a = 1u8;
        let mut b = 2u8;
        let da = LogDomain::from_raw(&mut a as *mut u8 as *mut c_void);
        let db = LogDomain::from_raw(&mut b as *mut u8 as *mut c_void);
        assert_eq!(da, da);
        assert_ne!(da, db);
        assert!(LogDomain::default().is_null());
        assert!(!da.is_null());
    }
}
