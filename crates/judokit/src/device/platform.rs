use std::collections::{HashMap, HashSet};

use bon::Builder;
use judokit_core::device::UnavailabilityReason;

/// Where a device parameter is read from.
///
/// The key names the platform property, e.g. `Build("FINGERPRINT")` or
/// `SecureSetting("android_id")`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    /// Locale, time zone, screen, network address and location.
    Runtime(&'static str),
    /// Values the SDK supplies itself rather than looking them up on the host.
    Sdk(&'static str),
    Telephony(&'static str),
    Wifi(&'static str),
    Bluetooth(&'static str),
    Build(&'static str),
    SecureSetting(&'static str),
    GlobalSetting(&'static str),
    SystemSetting(&'static str),
    PackageManager(&'static str),
    Display(&'static str),
}

/// Runtime permissions and privileges that gate collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    ReadPhoneState,
    ReadPhoneNumbers,
    SendSms,
    CarrierPrivileges,
    AccessWifiState,
    Bluetooth,
    Internet,
    AccessNetworkState,
    AccessFineLocation,
    AccessCoarseLocation,
    RequestInstallPackages,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum PlatformError {
    #[error("Permission denied: {0}")]
    Security(String),

    #[error("Not supported on this platform version")]
    Unsupported,

    #[error("Restricted in this market or region")]
    Restricted,

    #[error("Platform call failed: {0}")]
    Failure(String),
}

impl PlatformError {
    pub fn reason(&self) -> UnavailabilityReason {
        match self {
            PlatformError::Security(_) => UnavailabilityReason::PermissionRequired,
            PlatformError::Unsupported => UnavailabilityReason::UnsupportedPlatform,
            PlatformError::Restricted => UnavailabilityReason::MarketRestricted,
            PlatformError::Failure(_) => UnavailabilityReason::NullOrBlank,
        }
    }
}

/// The host device, as seen by the collector.
pub trait DevicePlatform {
    /// Platform API level, e.g. `28` for Android 9.
    fn sdk_version(&self) -> u32;

    fn has_capability(&self, capability: Capability) -> bool;

    /// Read one property. `Ok(None)` means the platform returned no value.
    fn lookup(&self, source: Source) -> Result<Option<String>, PlatformError>;

    fn is_debugger_attached(&self) -> bool {
        false
    }

    /// Host-side root detection, on top of the build-tag heuristic.
    fn is_rooted(&self) -> bool {
        false
    }

    fn is_tampered(&self) -> bool {
        false
    }
}

/// A [`DevicePlatform`] backed by values gathered up front.
#[derive(Builder, Debug, Clone, Default)]
pub struct StaticPlatform {
    pub sdk_version: u32,
    #[builder(default)]
    pub capabilities: HashSet<Capability>,
    #[builder(default)]
    pub values: HashMap<Source, String>,
    #[builder(default)]
    pub errors: HashMap<Source, PlatformError>,
    #[builder(default)]
    pub debugger_attached: bool,
    #[builder(default)]
    pub rooted: bool,
    #[builder(default)]
    pub tampered: bool,
}

impl StaticPlatform {
    pub fn with_value(mut self, source: Source, value: impl Into<String>) -> Self {
        self.values.insert(source, value.into());
        self
    }

    pub fn with_error(mut self, source: Source, error: PlatformError) -> Self {
        self.errors.insert(source, error);
        self
    }

    pub fn with_capability(mut self, capability: Capability) -> Self {
        self.capabilities.insert(capability);
        self
    }
}

impl DevicePlatform for StaticPlatform {
    fn sdk_version(&self) -> u32 {
        self.sdk_version
    }

    fn has_capability(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    fn lookup(&self, source: Source) -> Result<Option<String>, PlatformError> {
        if let Some(error) = self.errors.get(&source) {
            return Err(error.clone());
        }
        Ok(self.values.get(&source).cloned())
    }

    fn is_debugger_attached(&self) -> bool {
        self.debugger_attached
    }

    fn is_rooted(&self) -> bool {
        self.rooted
    }

    fn is_tampered(&self) -> bool {
        self.tampered
    }
}
