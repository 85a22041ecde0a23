//! LiteCore loaded at runtime
//!
//! For hosts that ship LiteCore as a shared library next to the executable
//! instead of linking it. The library is opened with `libloading` and the
//! two logging entry points are resolved on demand.

use crate::facility::{KnownDomains, LogFacility};
use crate::types::{LogDomain, LogLevel, RawLogCallback, RelayError, Result};
use libloading::{Library, Symbol};
use std::ffi::CString;
use std::os::raw::c_char;
use std::path::{Path, PathBuf};

const WRITE_TO_CALLBACK: &[u8] = b"c4log_writeToCallback\0";
const GET_DOMAIN: &[u8] = b"c4log_getDomain\0";

type WriteToCallbackFn =
    unsafe extern "C" fn(level: LogLevel, callback: Option<RawLogCallback>, preformatted: bool);
type GetDomainFn = unsafe extern "C" fn(name: *const c_char, create: bool) -> LogDomain;

/// A LiteCore shared library opened at runtime
///
/// The trampoline installed through this facility lives in this crate, but
/// LiteCore itself must stay loaded while it logs: keep the facility alive,
/// or [`leak`](DynamicFacility::leak) it.
#[derive(Debug)]
pub struct DynamicFacility {
    library: Library,
    path: PathBuf,
}

impl DynamicFacility {
    /// Open a LiteCore shared library and check it exports the logging API
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::info!("Loading LiteCore library: {:?}", path);

        let library = unsafe { Library::new(path) }
            .map_err(|e| RelayError::LibraryLoad(format!("{}: {}", path.display(), e)))?;

        let facility = Self {
            library,
            path: path.to_path_buf(),
        };
        facility.write_to_callback_fn()?;

        log::debug!("LiteCore logging API resolved in {:?}", path);
        Ok(facility)
    }

    /// Keep the library loaded for the rest of the process
    pub fn leak(self) -> &'static DynamicFacility {
        Box::leak(Box::new(self))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_to_callback_fn(&self) -> Result<Symbol<'_, WriteToCallbackFn>> {
        unsafe { self.library.get(WRITE_TO_CALLBACK) }
            .map_err(|e| RelayError::MissingSymbol(format!("c4log_writeToCallback ({})", e)))
    }

    fn get_domain_fn(&self) -> Option<Symbol<'_, GetDomainFn>> {
        unsafe { self.library.get(GET_DOMAIN) }.ok()
    }
}

impl LogFacility for DynamicFacility {
    fn write_to_callback(
        &self,
        level: LogLevel,
        callback: Option<RawLogCallback>,
        preformatted: bool,
    ) -> Result<()> {
        if !level.is_known() {
            return Err(RelayError::InvalidLevel(level.as_raw()));
        }
        let write_to_callback = self.write_to_callback_fn()?;
        unsafe { write_to_callback(level, callback, preformatted) };
        Ok(())
    }

    fn known_domains(&self) -> KnownDomains {
        let Some(get_domain) = self.get_domain_fn() else {
            log::warn!("c4log_getDomain not exported by {:?}; domains will be unnamed", self.path);
            return KnownDomains::default();
        };

        KnownDomains::resolve_with(|name| match CString::new(name) {
            Ok(name) => unsafe { get_domain(name.as_ptr(), false) },
            Err(_) => LogDomain::NULL,
        })
    }
}
