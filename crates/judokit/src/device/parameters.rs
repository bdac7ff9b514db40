//! Catalogue of device parameters collected for 3-D Secure.
//!
//! Every parameter is one [`Probe`]: where to read it, which platform level
//! and capabilities it needs, and what to report when nothing comes back.
//! Probes are independent; the collector evaluates them one after another.

use judokit_core::device::UnavailabilityReason::{self, *};

use super::platform::{
    Capability,
    Source::{self, *},
};

pub mod api_level {
    pub const LOLLIPOP: u32 = 21;
    pub const LOLLIPOP_MR1: u32 = 22;
    pub const M: u32 = 23;
    pub const N: u32 = 24;
    pub const O: u32 = 26;
    pub const P: u32 = 28;
}

use api_level::*;

/// Capability requirement: any one of the inner sets, each granted in full.
pub type Requirement = &'static [&'static [Capability]];

const NONE: Requirement = &[];
const PHONE_STATE: Requirement = &[
    &[Capability::ReadPhoneState],
    &[Capability::CarrierPrivileges],
];
const PHONE_STATE_ONLY: Requirement = &[&[Capability::ReadPhoneState]];
const LINE1_NUMBER: Requirement = &[
    &[
        Capability::ReadPhoneState,
        Capability::ReadPhoneNumbers,
        Capability::SendSms,
    ],
    &[Capability::CarrierPrivileges],
];
const WIFI: Requirement = &[&[Capability::AccessWifiState]];
const BLUETOOTH: Requirement = &[&[Capability::Bluetooth]];
const NETWORK: Requirement = &[&[Capability::Internet, Capability::AccessNetworkState]];
const LOCATION: Requirement = &[
    &[Capability::AccessFineLocation],
    &[Capability::AccessCoarseLocation],
];
const INSTALL_PACKAGES: Requirement = &[&[Capability::RequestInstallPackages]];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Probe {
    pub id: &'static str,
    pub source: Source,
    /// Lowest platform level exposing the value.
    pub min_sdk: u32,
    pub requires: Requirement,
    /// Reason reported when the lookup yields nothing.
    pub on_missing: UnavailabilityReason,
    /// Parameters the SDK never reads, with the reason always reported.
    pub withheld: Option<UnavailabilityReason>,
}

const fn probe(id: &'static str, source: Source) -> Probe {
    Probe {
        id,
        source,
        min_sdk: 0,
        requires: NONE,
        on_missing: NullOrBlank,
        withheld: None,
    }
}

impl Probe {
    const fn since(mut self, min_sdk: u32) -> Self {
        self.min_sdk = min_sdk;
        self
    }

    const fn requires(mut self, requires: Requirement) -> Self {
        self.requires = requires;
        self
    }

    const fn missing(mut self, reason: UnavailabilityReason) -> Self {
        self.on_missing = reason;
        self
    }

    const fn withheld(mut self, reason: UnavailabilityReason) -> Self {
        self.withheld = Some(reason);
        self
    }

    /// Whether the granted capabilities satisfy the requirement.
    pub fn permitted(&self, granted: impl Fn(Capability) -> bool) -> bool {
        self.requires.is_empty()
            || self
                .requires
                .iter()
                .any(|set| set.iter().all(|&capability| granted(capability)))
    }
}

pub const PROBES: &[Probe] = &[
    // Common
    probe("C001", Sdk("platform")),
    probe("C002", Build("MODEL")),
    probe("C003", Build("VERSION.RELEASE")),
    probe("C004", Sdk("platformLevel")),
    probe("C005", Runtime("locale")).since(N),
    probe("C006", Runtime("timeZone")),
    probe("C007", Runtime("advertisingId")).withheld(NullOrBlank),
    probe("C008", Display("screenResolution")),
    probe("C009", Bluetooth("name")).requires(BLUETOOTH),
    probe("C010", Runtime("ipAddress")).requires(NETWORK),
    probe("C011", Runtime("latitude"))
        .requires(LOCATION)
        .missing(PermissionRequired),
    probe("C012", Runtime("longitude"))
        .requires(LOCATION)
        .missing(PermissionRequired),
    probe("C013", Runtime("packageName")),
    probe("C014", Sdk("appId")),
    probe("C015", Sdk("version")),
    // Telephony
    probe("A001", Telephony("deviceId"))
        .since(O)
        .requires(PHONE_STATE),
    probe("A002", Telephony("subscriberId")).requires(PHONE_STATE),
    probe("A003", Telephony("deviceSoftwareVersion")).requires(PHONE_STATE),
    probe("A004", Telephony("groupIdLevel1")).requires(PHONE_STATE),
    probe("A005", Telephony("line1Number")).requires(LINE1_NUMBER),
    probe("A006", Telephony("mmsUAProfUrl")),
    probe("A007", Telephony("mmsUserAgent")),
    probe("A008", Telephony("networkCountryIso")),
    probe("A009", Telephony("networkOperator")),
    probe("A010", Telephony("networkOperatorName")),
    probe("A011", Telephony("networkType")),
    probe("A012", Telephony("phoneCount")).since(M),
    probe("A013", Telephony("phoneType")),
    probe("A014", Telephony("simCountryIso")),
    probe("A015", Telephony("simOperator")),
    probe("A016", Telephony("simOperatorName")),
    probe("A017", Telephony("simSerialNumber")).requires(PHONE_STATE),
    probe("A018", Telephony("simState")),
    probe("A019", Telephony("voiceMailAlphaTag")).requires(PHONE_STATE),
    probe("A020", Telephony("voiceMailNumber")).requires(PHONE_STATE),
    probe("A021", Telephony("hasIccCard")),
    probe("A022", Telephony("isHearingAidCompatibilitySupported")).since(M),
    probe("A023", Telephony("isNetworkRoaming")),
    probe("A024", Telephony("isSmsCapable")).since(LOLLIPOP),
    probe("A025", Telephony("isTtySupported"))
        .since(P)
        .requires(PHONE_STATE_ONLY),
    probe("A026", Telephony("isVoiceCapable")).since(LOLLIPOP_MR1),
    probe("A027", Telephony("isWorldPhone")).since(M),
    // Wifi
    probe("A028", Wifi("macAddress")).requires(WIFI),
    probe("A029", Wifi("bssid")).requires(WIFI),
    probe("A030", Wifi("ssid")).requires(WIFI),
    probe("A031", Wifi("networkId")).requires(WIFI),
    probe("A032", Wifi("is5GHzBandSupported"))
        .since(LOLLIPOP)
        .requires(WIFI),
    probe("A033", Wifi("isDeviceToApRttSupported"))
        .since(P)
        .requires(WIFI),
    probe("A034", Wifi("isEnhancedPowerReportingSupported"))
        .since(LOLLIPOP)
        .requires(WIFI),
    probe("A035", Wifi("isP2pSupported"))
        .since(LOLLIPOP)
        .requires(WIFI),
    probe("A036", Wifi("isPreferredNetworkOffloadSupported"))
        .since(LOLLIPOP)
        .requires(WIFI),
    probe("A037", Wifi("isScanAlwaysAvailable"))
        .requires(WIFI)
        .withheld(UnsupportedPlatform),
    probe("A038", Wifi("isTdlsSupported"))
        .since(LOLLIPOP)
        .requires(WIFI),
    // Bluetooth
    probe("A039", Bluetooth("address")).requires(BLUETOOTH),
    probe("A040", Bluetooth("bondedDevices")).requires(BLUETOOTH),
    probe("A041", Bluetooth("isEnabled")).requires(BLUETOOTH),
    // Build
    probe("A042", Build("BOARD")),
    probe("A043", Build("BOOTLOADER")),
    probe("A044", Build("BRAND")),
    probe("A045", Build("DEVICE")),
    probe("A046", Build("DISPLAY")),
    probe("A047", Build("FINGERPRINT")),
    probe("A048", Build("HARDWARE")),
    probe("A049", Build("ID")),
    probe("A050", Build("MANUFACTURER")),
    probe("A051", Build("PRODUCT")),
    probe("A052", Build("RADIO")),
    probe("A053", Build("SERIAL")).since(O).requires(PHONE_STATE),
    probe("A054", Build("SUPPORTED_32_BIT_ABIS")).since(LOLLIPOP),
    probe("A055", Build("SUPPORTED_64_BIT_ABIS")).since(LOLLIPOP),
    probe("A056", Build("TAGS")),
    probe("A057", Build("TIME")),
    probe("A058", Build("TYPE")),
    probe("A059", Build("USER")),
    probe("A060", Build("VERSION.CODENAME")),
    probe("A061", Build("VERSION.INCREMENTAL")),
    probe("A062", Build("VERSION.PREVIEW_SDK_INT")).since(M),
    probe("A063", Sdk("platformLevel")),
    probe("A064", Build("VERSION.SECURITY_PATCH")).since(M),
    // Secure settings
    probe("A065", SecureSetting("accessibility_display_inversion_enabled")).since(LOLLIPOP),
    probe("A066", SecureSetting("accessibility_enabled")).missing(UnsupportedPlatform),
    probe("A067", SecureSetting("speak_password")).withheld(UnsupportedPlatform),
    probe("A068", SecureSetting("allowed_geolocation_origins")).missing(UnsupportedPlatform),
    probe("A069", SecureSetting("android_id")).missing(UnsupportedPlatform),
    probe("A071", SecureSetting("default_input_method")).missing(UnsupportedPlatform),
    probe("A073", SecureSetting("enabled_accessibility_services")).missing(UnsupportedPlatform),
    probe("A074", SecureSetting("enabled_input_methods")).missing(UnsupportedPlatform),
    probe("A075", SecureSetting("input_method_selector_visibility")).missing(UnsupportedPlatform),
    probe("A076", PackageManager("canRequestPackageInstalls"))
        .since(O)
        .requires(INSTALL_PACKAGES),
    probe("A077", Runtime("isLocationEnabled")).since(P),
    probe("A078", SecureSetting("skip_first_use_hints"))
        .since(LOLLIPOP)
        .missing(UnsupportedPlatform),
    probe("A079", SecureSetting("sys_prop_setting_version")).withheld(UnsupportedPlatform),
    probe("A080", SecureSetting("tts_default_pitch")).missing(UnsupportedPlatform),
    probe("A081", SecureSetting("tts_default_rate")).missing(UnsupportedPlatform),
    probe("A082", SecureSetting("tts_default_synth")).missing(UnsupportedPlatform),
    probe("A083", SecureSetting("tts_enabled_plugins")).missing(UnsupportedPlatform),
    // Global settings
    probe("A084", GlobalSetting("adb_enabled")),
    probe("A085", GlobalSetting("airplane_mode_radios")),
    probe("A086", GlobalSetting("always_finish_activities")),
    probe("A087", GlobalSetting("animator_duration_scale")),
    probe("A088", GlobalSetting("auto_time")),
    probe("A089", GlobalSetting("auto_time_zone")),
    probe("A070", GlobalSetting("data_roaming")),
    probe("A090", GlobalSetting("development_settings_enabled")),
    probe("A072", GlobalSetting("device_provisioned")),
    probe("A091", GlobalSetting("http_proxy")),
    probe("A092", GlobalSetting("network_preference")),
    probe("A093", GlobalSetting("stay_on_while_plugged_in")),
    probe("A094", GlobalSetting("transition_animation_scale")),
    probe("A095", GlobalSetting("usb_mass_storage_enabled")),
    probe("A096", GlobalSetting("use_google_mail")),
    probe("A097", GlobalSetting("wait_for_debugger")),
    probe("A098", GlobalSetting("wifi_networks_available_notification_on"))
        .withheld(UnsupportedPlatform),
    // System settings
    probe("A099", SystemSetting("accelerometer_rotation")),
    probe("A100", SystemSetting("bluetooth_discoverability")),
    probe("A101", SystemSetting("bluetooth_discoverability_timeout")),
    probe("A102", SystemSetting("date_format")),
    probe("A103", SystemSetting("dtmf_tone_type")).since(M),
    probe("A104", SystemSetting("dtmf_tone")),
    probe("A105", SystemSetting("end_button_behavior")),
    probe("A106", SystemSetting("font_scale")),
    probe("A107", SystemSetting("haptic_feedback_enabled")),
    probe("A108", SystemSetting("mode_ringer_streams_affected")),
    probe("A109", SystemSetting("notification_sound")),
    probe("A110", SystemSetting("mute_streams_affected")),
    probe("A111", SystemSetting("ringtone")),
    probe("A112", SystemSetting("screen_brightness")),
    probe("A113", SystemSetting("screen_brightness_mode")),
    probe("A114", SystemSetting("screen_off_timeout")),
    probe("A115", SystemSetting("sound_effects_enabled")),
    probe("A116", SystemSetting("auto_caps")),
    probe("A117", SystemSetting("auto_punctuate")),
    probe("A118", SystemSetting("auto_replace")),
    probe("A119", SystemSetting("show_password")),
    probe("A120", SystemSetting("time_12_24")),
    probe("A121", SystemSetting("user_rotation")),
    probe("A122", SystemSetting("vibrate_on")),
    probe("A123", SystemSetting("vibrate_when_ringing")).since(M),
    // Package manager and display
    probe("A124", PackageManager("isSafeMode")),
    probe("A125", PackageManager("installedApplications")),
    probe("A126", PackageManager("installerPackageName")),
    probe("A127", PackageManager("systemAvailableFeatures")),
    probe("A128", PackageManager("systemSharedLibraryNames")),
    probe("A129", Runtime("externalStorageState")),
    probe("A130", Runtime("availableLocales")),
    probe("A131", Display("density")),
    probe("A132", Display("densityDpi")),
    probe("A133", Display("scaledDensity")),
    probe("A134", Display("xdpi")),
    probe("A135", Display("ydpi")),
    probe("A136", Runtime("externalStorageTotalBytes")),
];

pub fn find(id: &str) -> Option<&'static Probe> {
    PROBES.iter().find(|probe| probe.id == id)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_catalogue_is_complete_and_unique() {
        let ids: HashSet<&str> = PROBES.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), PROBES.len());
        assert_eq!(PROBES.len(), 15 + 136);

        for n in 1..=15 {
            assert!(ids.contains(format!("C{n:03}").as_str()));
        }
        for n in 1..=136 {
            assert!(ids.contains(format!("A{n:03}").as_str()));
        }
    }

    #[test]
    fn test_line1_requirement() {
        use Capability::*;

        let probe = find("A005").unwrap();
        let only = |granted: &'static [Capability]| move |c: Capability| granted.contains(&c);

        assert!(probe.permitted(only(&[ReadPhoneState, ReadPhoneNumbers, SendSms])));
        assert!(probe.permitted(only(&[CarrierPrivileges])));
        assert!(!probe.permitted(only(&[ReadPhoneState, ReadPhoneNumbers])));
        assert!(!probe.permitted(only(&[])));
    }
}
