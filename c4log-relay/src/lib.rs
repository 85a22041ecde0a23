//! LiteCore Log Relay
//!
//! Routes Couchbase LiteCore's log callbacks to a single, swappable sink.
//!
//! # Architecture
//!
//! LiteCore calls a capture-less C function for every log event, from
//! whichever of its threads produced the event. This crate installs a fixed
//! [`trampoline`] with LiteCore and keeps the caller's callback in a
//! process-wide [`LogSink`], an atomic function pointer. Swapping the
//! callback is a single atomic store; delivering an event is a single atomic
//! load and a call.
//!
//! The crate does NOT:
//! - Format LiteCore's printf-style messages (the raw format string is passed through)
//! - Queue, buffer or filter events beyond LiteCore's own level threshold
//! - Order events racing with a callback swap (either sink may receive them)
//!
//! LiteCore itself is reached through the [`LogFacility`] trait: linked at
//! build time (`litecore` feature), loaded at runtime ([`DynamicFacility`]),
//! or faked in tests.
//!
//! # Example Usage
//!
//! ```no_run
//! use c4log_relay::{bridge, DynamicFacility, LogLevel, Relay, RelayConfig};
//! use std::path::Path;
//!
//! let config = RelayConfig::load(Path::new("relay.toml")).unwrap();
//! let facility = DynamicFacility::open("libLiteCore.so").unwrap().leak();
//!
//! // Send LiteCore's logs to the `log` facade from now on
//! let relay = Relay::new(facility);
//! bridge::install(&relay, config.min_level).unwrap();
//!
//! // ...and later stop relaying
//! relay.disable(LogLevel::ERROR).unwrap();
//! ```

// Public modules
pub mod bridge;
pub mod config;
pub mod dynamic;
pub mod facility;
pub mod relay;
pub mod sink;
pub mod types;

#[cfg(feature = "litecore")]
pub mod ffi;

// Re-export main types for convenience
pub use config::RelayConfig;
pub use dynamic::DynamicFacility;
pub use facility::{KnownDomains, LogFacility};
pub use relay::{set_callback, trampoline, Relay};
pub use sink::{LogSink, GLOBAL_SINK};
pub use types::{LogDomain, LogFn, LogLevel, RawLogCallback, RawVaList, RelayError, Result};

#[cfg(feature = "litecore")]
pub use ffi::LinkedFacility;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
