//! The seam between the relay and LiteCore's logging facility
//!
//! LiteCore exposes logging through two C calls: `c4log_writeToCallback`,
//! which installs a callback for all events at or above a level, and
//! `c4log_getDomain`, which looks up a domain handle by name. This trait
//! stands in for them so the relay can be driven by a linked library, a
//! library loaded at runtime, or an in-process fake.

use crate::types::{LogDomain, LogLevel, RawLogCallback, Result};

/// LiteCore domain names used by `c4log_getDomain`
pub const DEFAULT_DOMAIN_NAME: &str = "";
pub const DATABASE_DOMAIN_NAME: &str = "DB";
pub const QUERY_DOMAIN_NAME: &str = "Query";
pub const SYNC_DOMAIN_NAME: &str = "Sync";
pub const WEBSOCKET_DOMAIN_NAME: &str = "WS";

/// A logging facility that can route its events to a C callback
pub trait LogFacility {
    /// Route every event at or above `level` to `callback`
    ///
    /// The callback replaces any destination installed before it. With
    /// `preformatted` set, LiteCore expands the format string itself and the
    /// callback's `va_list` carries nothing; with it clear, the message is the
    /// raw format string and only the `va_list` holds its arguments.
    fn write_to_callback(
        &self,
        level: LogLevel,
        callback: Option<RawLogCallback>,
        preformatted: bool,
    ) -> Result<()>;

    /// Handles of the well-known domains, for naming events
    fn known_domains(&self) -> KnownDomains {
        KnownDomains::default()
    }
}

impl<F: LogFacility + ?Sized> LogFacility for &F {
    fn write_to_callback(
        &self,
        level: LogLevel,
        callback: Option<RawLogCallback>,
        preformatted: bool,
    ) -> Result<()> {
        (**self).write_to_callback(level, callback, preformatted)
    }

    fn known_domains(&self) -> KnownDomains {
        (**self).known_domains()
    }
}

/// Handles of LiteCore's built-in log domains
///
/// Any entry may be null if the facility could not resolve it; null entries
/// never match an incoming domain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KnownDomains {
    pub default: LogDomain,
    pub database: LogDomain,
    pub query: LogDomain,
    pub sync: LogDomain,
    pub websocket: LogDomain,
}

impl KnownDomains {
    /// Resolve all built-in domains through a name lookup
    pub fn resolve_with<L>(mut lookup: L) -> Self
    where
        L: FnMut(&str) -> LogDomain,
    {
        Self {
            default: lookup(DEFAULT_DOMAIN_NAME),
            database: lookup(DATABASE_DOMAIN_NAME),
            query: lookup(QUERY_DOMAIN_NAME),
            sync: lookup(SYNC_DOMAIN_NAME),
            websocket: lookup(WEBSOCKET_DOMAIN_NAME),
        }
    }

    /// Short tag for a domain, as printed by the `log` bridge
    pub fn name_of(&self, domain: LogDomain) -> &'static str {
        if domain.is_null() {
            return "unkndmn";
        }
        if domain == self.default {
            "def"
        } else if domain == self.database {
            "db"
        } else if domain == self.query {
            "query"
        } else if domain == self.sync {
            "sync"
        } else if domain == self.websocket {
            "websock"
        } else {
            "unkndmn"
        }
    }
}
