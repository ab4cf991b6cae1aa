//! One-time application setup
//!
//! [`Bootstrap`] owns the guards for the process-wide hooks the app installs
//! (panic logging, the logging transport wrapper) and resolves device
//! emulation for the web build. The panic hook is installed at most once per
//! process however many bootstraps run; the transport guard is per bootstrap.
//! Nothing is ever torn down.

use crate::config::{DeviceKind, Platform};
use crate::error::TransportFailure;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Once;

/// Storage key of the remembered emulated device
pub const EMULATION_KEY: &str = "emulated_device";

static PANIC_LOGGING: Once = Once::new();

/// Safe-area padding around the app, in logical pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SafeAreaInsets {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

impl SafeAreaInsets {
    /// Insets a web build shows when pretending to be `device`
    pub fn simulated(device: DeviceKind) -> Self {
        match device {
            DeviceKind::Ios => Self {
                top: 47,
                bottom: 20,
                ..Self::default()
            },
            DeviceKind::Android => Self {
                top: 40,
                ..Self::default()
            },
        }
    }
}

/// Small persistent key-value store (browser local storage on the web)
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// In-process store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: FxHashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

/// Outgoing request seam
pub trait Transport {
    fn fetch(&self, url: &str) -> Result<String, TransportFailure>;
}

/// Logs failed requests and hands the failure back unchanged
pub struct LoggedTransport<T> {
    inner: T,
    logging: bool,
}

impl<T> LoggedTransport<T> {
    pub fn is_logging(&self) -> bool {
        self.logging
    }

    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: Transport> Transport for LoggedTransport<T> {
    fn fetch(&self, url: &str) -> Result<String, TransportFailure> {
        let result = self.inner.fetch(url);
        if self.logging {
            if let Err(failure) = &result {
                tracing::error!(url, error = %failure, "[FetchError]");
            }
        }
        result
    }
}

impl<T> fmt::Debug for LoggedTransport<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggedTransport")
            .field("logging", &self.logging)
            .finish_non_exhaustive()
    }
}

/// Initialisation guards and device emulation for one app instance
#[derive(Debug)]
pub struct Bootstrap<S = MemoryStore> {
    platform: Platform,
    store: S,
    error_logging: bool,
    transport_wrapped: bool,
    emulated: Option<DeviceKind>,
}

impl Bootstrap<MemoryStore> {
    pub fn new(platform: Platform) -> Self {
        Self::with_store(platform, MemoryStore::default())
    }
}

impl<S: KeyValueStore> Bootstrap<S> {
    pub fn with_store(platform: Platform, store: S) -> Self {
        Self {
            platform,
            store,
            error_logging: false,
            transport_wrapped: false,
            emulated: None,
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Route panics through `tracing`, chaining the previous hook.
    ///
    /// The hook goes in once per process. Returns `true` only for the call
    /// that installed it.
    pub fn install_error_logging(&mut self) -> bool {
        self.error_logging = true;
        let mut installed = false;
        PANIC_LOGGING.call_once(|| {
            install_panic_hook();
            installed = true;
        });
        if installed {
            tracing::debug!("error logging installed");
        }
        installed
    }

    pub fn error_logging_installed(&self) -> bool {
        self.error_logging
    }

    /// Wrap `inner` in the failure-logging transport.
    ///
    /// Only the first wrap on the web logs; later wraps, and every wrap on
    /// native platforms, pass straight through.
    pub fn wrap_transport<T: Transport>(&mut self, inner: T) -> LoggedTransport<T> {
        let logging = self.platform == Platform::Web && !self.transport_wrapped;
        if logging {
            self.transport_wrapped = true;
            tracing::debug!("transport wrapped with failure logging");
        }
        LoggedTransport { inner, logging }
    }

    /// Resolve the emulated device from the `emulate` query parameter.
    ///
    /// A query value is remembered for later launches; without one the
    /// remembered value is used. Native platforms never emulate.
    pub fn resolve_emulation(&mut self, query: Option<&str>) -> Option<DeviceKind> {
        if self.platform != Platform::Web {
            return None;
        }
        let raw = match query {
            Some(value) => {
                self.store.set(EMULATION_KEY, value);
                Some(value.to_string())
            }
            None => self.store.get(EMULATION_KEY),
        };
        self.emulated = raw.as_deref().and_then(|value| value.parse().ok());
        if let (Some(raw), None) = (&raw, self.emulated) {
            tracing::warn!(device = %raw, "unknown emulated device, using real insets");
        }
        self.emulated
    }

    pub fn emulated(&self) -> Option<DeviceKind> {
        self.emulated
    }

    /// Insets to lay the app out with
    pub fn insets(&self, actual: SafeAreaInsets) -> SafeAreaInsets {
        match (self.platform, self.emulated) {
            (Platform::Web, Some(device)) => SafeAreaInsets::simulated(device),
            _ => actual,
        }
    }
}

fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_default();
        let payload = info
            .payload()
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| info.payload().downcast_ref::<String>().map(String::as_str))
            .unwrap_or("<non-string panic>");
        tracing::error!(%location, payload, "[GlobalError] (fatal)");
        previous(info);
    }));
}
