use std::collections::BTreeMap;

use bon::Builder;
use judokit_core::device::{DeviceData, UnavailabilityReason};

use super::{
    parameters::{PROBES, Probe, api_level},
    platform::{DevicePlatform, Source},
    warnings,
};

/// Version reported under `C015`.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Reported under `C001`.
pub const PLATFORM_NAME: &str = "Android";

/// Outcome of evaluating one probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Available(String),
    Unavailable(UnavailabilityReason),
}

/// Builds a [`DeviceData`] snapshot from a [`DevicePlatform`].
#[derive(Builder, Debug, Clone)]
pub struct DeviceDataCollector {
    /// Reported under `C014` when set.
    #[builder(into)]
    pub sdk_app_id: Option<String>,
    /// Hosts below this level get an unsupported-OS warning.
    #[builder(default = api_level::LOLLIPOP)]
    pub min_supported_sdk: u32,
}

impl Default for DeviceDataCollector {
    fn default() -> Self {
        DeviceDataCollector::builder().build()
    }
}

impl DeviceDataCollector {
    pub fn collect<P: DevicePlatform + ?Sized>(&self, platform: &P) -> DeviceData {
        let mut available = BTreeMap::new();
        let mut unavailable = BTreeMap::new();

        for probe in PROBES {
            match self.evaluate(probe, platform) {
                ProbeOutcome::Available(value) => {
                    available.insert(probe.id.to_string(), value);
                }
                ProbeOutcome::Unavailable(reason) => {
                    unavailable.insert(probe.id.to_string(), reason);
                }
            }
        }

        let security_warnings = warnings::detect(platform, self.min_supported_sdk);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "Device data collected: available={}, unavailable={}, warnings={:?}",
            available.len(),
            unavailable.len(),
            security_warnings
        );

        DeviceData::new(available, unavailable, security_warnings)
    }

    /// Evaluate a single probe.
    ///
    /// Gates are checked before the platform is touched: capabilities first,
    /// then withheld parameters, then the platform level.
    pub fn evaluate<P: DevicePlatform + ?Sized>(
        &self,
        probe: &Probe,
        platform: &P,
    ) -> ProbeOutcome {
        if !probe.permitted(|capability| platform.has_capability(capability)) {
            return ProbeOutcome::Unavailable(UnavailabilityReason::PermissionRequired);
        }
        if let Some(reason) = probe.withheld {
            return ProbeOutcome::Unavailable(reason);
        }
        if platform.sdk_version() < probe.min_sdk {
            return ProbeOutcome::Unavailable(UnavailabilityReason::UnsupportedPlatform);
        }

        let value = match probe.source {
            Source::Sdk("platform") => Ok(Some(PLATFORM_NAME.to_string())),
            Source::Sdk("platformLevel") => Ok(Some(platform.sdk_version().to_string())),
            Source::Sdk("appId") => Ok(self.sdk_app_id.clone()),
            Source::Sdk("version") => Ok(Some(SDK_VERSION.to_string())),
            source => platform.lookup(source),
        };

        match value {
            Ok(Some(value)) if !value.trim().is_empty() => ProbeOutcome::Available(value),
            Ok(_) => ProbeOutcome::Unavailable(probe.on_missing),
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::debug!("Probe {} failed: {err}", probe.id);

                ProbeOutcome::Unavailable(err.reason())
            }
        }
    }
}
