//! 3-D Secure device data.
//!
//! A [`DeviceData`] snapshot splits every named device parameter into the
//! values that could be read and the ones that could not, each tagged with an
//! [`UnavailabilityReason`]. It is built once per payment attempt and is only
//! ever embedded, as [`ThreeDSDeviceData`], in an authentication request.

use std::{collections::BTreeMap, fmt::Display};

use serde::{Deserialize, Serialize};

/// Version of the device data format sent to the gateway.
pub const DEVICE_DATA_VERSION: &str = "1.4";

/// Why a parameter is missing from the available set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UnavailabilityReason {
    /// Market or regional restriction on the parameter.
    #[serde(rename = "RE01")]
    MarketRestricted,
    /// The platform version does not support the parameter.
    #[serde(rename = "RE02")]
    UnsupportedPlatform,
    /// Collection needs a permission the host has not been granted.
    #[serde(rename = "RE03")]
    PermissionRequired,
    /// The value came back null or blank.
    #[serde(rename = "RE04")]
    NullOrBlank,
}

impl UnavailabilityReason {
    pub fn code(&self) -> &'static str {
        match self {
            UnavailabilityReason::MarketRestricted => "RE01",
            UnavailabilityReason::UnsupportedPlatform => "RE02",
            UnavailabilityReason::PermissionRequired => "RE03",
            UnavailabilityReason::NullOrBlank => "RE04",
        }
    }
}

impl Display for UnavailabilityReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SecurityWarning {
    /// The device is rooted or jailbroken.
    #[serde(rename = "SW01")]
    Jailbroken,
    /// The integrity of the SDK has been tampered with.
    #[serde(rename = "SW02")]
    Tampered,
    /// The app is running on an emulator.
    #[serde(rename = "SW03")]
    Emulator,
    /// A debugger is attached to the app.
    #[serde(rename = "SW04")]
    DebuggerAttached,
    /// The OS or OS version is not supported.
    #[serde(rename = "SW05")]
    UnsupportedOs,
}

impl SecurityWarning {
    pub fn code(&self) -> &'static str {
        match self {
            SecurityWarning::Jailbroken => "SW01",
            SecurityWarning::Tampered => "SW02",
            SecurityWarning::Emulator => "SW03",
            SecurityWarning::DebuggerAttached => "SW04",
            SecurityWarning::UnsupportedOs => "SW05",
        }
    }
}

impl Display for SecurityWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Snapshot of device parameters.
///
/// A parameter id appears in at most one of the two maps.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeviceData {
    available: BTreeMap<String, String>,
    unavailable: BTreeMap<String, UnavailabilityReason>,
    security_warnings: Vec<SecurityWarning>,
}

impl DeviceData {
    /// Assemble a snapshot. An id present in both maps is kept as available.
    pub fn new(
        available: BTreeMap<String, String>,
        mut unavailable: BTreeMap<String, UnavailabilityReason>,
        mut security_warnings: Vec<SecurityWarning>,
    ) -> Self {
        unavailable.retain(|id, _| !available.contains_key(id));
        security_warnings.sort();
        security_warnings.dedup();
        DeviceData {
            available,
            unavailable,
            security_warnings,
        }
    }

    pub fn available(&self) -> &BTreeMap<String, String> {
        &self.available
    }

    pub fn unavailable(&self) -> &BTreeMap<String, UnavailabilityReason> {
        &self.unavailable
    }

    pub fn security_warnings(&self) -> &[SecurityWarning] {
        &self.security_warnings
    }

    pub fn value(&self, id: &str) -> Option<&str> {
        self.available.get(id).map(String::as_str)
    }

    pub fn reason(&self, id: &str) -> Option<UnavailabilityReason> {
        self.unavailable.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.available.len() + self.unavailable.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Device data as it appears in the gateway payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreeDSDeviceData {
    #[serde(rename = "DV")]
    pub version: String,
    #[serde(rename = "DD")]
    pub device_data: BTreeMap<String, String>,
    #[serde(rename = "DPNA")]
    pub unavailability_reasons: BTreeMap<String, UnavailabilityReason>,
    #[serde(rename = "SW", default)]
    pub security_warnings: Vec<SecurityWarning>,
}

impl From<DeviceData> for ThreeDSDeviceData {
    fn from(data: DeviceData) -> Self {
        ThreeDSDeviceData {
            version: DEVICE_DATA_VERSION.to_string(),
            device_data: data.available,
            unavailability_reasons: data.unavailable,
            security_warnings: data.security_warnings,
        }
    }
}
