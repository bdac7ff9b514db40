use std::collections::HashSet;

use judokit::device::{
    Capability, DeviceDataCollector, PlatformError, Source, StaticPlatform,
    parameters::{PROBES, api_level},
};
use judokit_core::device::{SecurityWarning, ThreeDSDeviceData, UnavailabilityReason};

const ALL_CAPABILITIES: [Capability; 11] = [
    Capability::ReadPhoneState,
    Capability::ReadPhoneNumbers,
    Capability::SendSms,
    Capability::CarrierPrivileges,
    Capability::AccessWifiState,
    Capability::Bluetooth,
    Capability::Internet,
    Capability::AccessNetworkState,
    Capability::AccessFineLocation,
    Capability::AccessCoarseLocation,
    Capability::RequestInstallPackages,
];

/// A device that answers every lookup with a value.
fn full_device(sdk_version: u32, capabilities: &[Capability]) -> StaticPlatform {
    let mut platform = StaticPlatform::builder()
        .sdk_version(sdk_version)
        .capabilities(capabilities.iter().copied().collect())
        .build();
    for probe in PROBES {
        platform = platform.with_value(probe.source, format!("value of {}", probe.id));
    }
    platform
}

#[test]
fn test_every_parameter_lands_in_exactly_one_bucket() {
    let sdk_versions = [19, api_level::LOLLIPOP, api_level::M, api_level::O, 33];
    let capability_sets: [&[Capability]; 4] = [
        &[],
        &ALL_CAPABILITIES,
        &[Capability::ReadPhoneState, Capability::Internet],
        &[Capability::CarrierPrivileges, Capability::AccessCoarseLocation],
    ];

    for sdk_version in sdk_versions {
        for capabilities in capability_sets {
            let data = DeviceDataCollector::default().collect(&full_device(sdk_version, capabilities));

            let available: HashSet<&str> = data.available().keys().map(String::as_str).collect();
            let unavailable: HashSet<&str> =
                data.unavailable().keys().map(String::as_str).collect();

            assert!(available.is_disjoint(&unavailable));
            assert_eq!(
                available.len() + unavailable.len(),
                PROBES.len(),
                "sdk={sdk_version}, capabilities={capabilities:?}"
            );
        }
    }
}

#[test]
fn test_no_permissions_on_recent_device() {
    let data = DeviceDataCollector::default().collect(&full_device(33, &[]));

    for id in ["A001", "A002", "A005", "A028", "A039", "C009", "C010", "C011", "A076"] {
        assert_eq!(
            data.reason(id),
            Some(UnavailabilityReason::PermissionRequired),
            "{id}"
        );
    }
    assert_eq!(data.value("C002"), Some("value of C002"));
    assert_eq!(data.value("A047"), Some("value of A047"));
}

#[test]
fn test_version_gates() {
    let data =
        DeviceDataCollector::default().collect(&full_device(api_level::LOLLIPOP, &ALL_CAPABILITIES));

    // Android 6 and later.
    for id in ["A012", "A022", "A027", "A062", "A064", "A103", "A123"] {
        assert_eq!(
            data.reason(id),
            Some(UnavailabilityReason::UnsupportedPlatform),
            "{id}"
        );
    }
    assert_eq!(data.value("A024"), Some("value of A024"));
    assert_eq!(data.value("A032"), Some("value of A032"));
}

#[test]
fn test_withheld_parameters_are_never_read() {
    let data = DeviceDataCollector::default().collect(&full_device(33, &ALL_CAPABILITIES));

    assert_eq!(data.reason("C007"), Some(UnavailabilityReason::NullOrBlank));
    for id in ["A037", "A067", "A079", "A098"] {
        assert_eq!(
            data.reason(id),
            Some(UnavailabilityReason::UnsupportedPlatform),
            "{id}"
        );
    }
}

#[test]
fn test_platform_errors_do_not_abort_collection() {
    let platform = full_device(33, &ALL_CAPABILITIES)
        .with_error(
            Source::Telephony("simSerialNumber"),
            PlatformError::Security("READ_PRIVILEGED_PHONE_STATE".into()),
        )
        .with_error(Source::Wifi("macAddress"), PlatformError::Restricted)
        .with_error(Source::GlobalSetting("adb_enabled"), PlatformError::Unsupported)
        .with_error(
            Source::Display("density"),
            PlatformError::Failure("no display".into()),
        );

    let data = DeviceDataCollector::default().collect(&platform);

    assert_eq!(data.reason("A017"), Some(UnavailabilityReason::PermissionRequired));
    assert_eq!(data.reason("A028"), Some(UnavailabilityReason::MarketRestricted));
    assert_eq!(data.reason("A084"), Some(UnavailabilityReason::UnsupportedPlatform));
    assert_eq!(data.reason("A131"), Some(UnavailabilityReason::NullOrBlank));
    assert_eq!(data.value("A085"), Some("value of A085"));
    assert_eq!(data.len(), PROBES.len());
}

#[test]
fn test_missing_secure_settings() {
    let platform = StaticPlatform::builder().sdk_version(33).build();
    let data = DeviceDataCollector::default().collect(&platform);

    assert_eq!(data.reason("A069"), Some(UnavailabilityReason::UnsupportedPlatform));
    assert_eq!(data.reason("A065"), Some(UnavailabilityReason::NullOrBlank));
    assert_eq!(data.reason("A084"), Some(UnavailabilityReason::NullOrBlank));
}

#[test]
fn test_emulator_payload() {
    let platform = full_device(33, &ALL_CAPABILITIES)
        .with_value(Source::Build("HARDWARE"), "ranchu")
        .with_value(Source::Build("TAGS"), "release-keys");
    let collector = DeviceDataCollector::builder().sdk_app_id("app-id").build();

    let payload = ThreeDSDeviceData::from(collector.collect(&platform));

    assert_eq!(payload.version, "1.4");
    assert_eq!(payload.security_warnings, vec![SecurityWarning::Emulator]);
    assert_eq!(payload.device_data.get("C014").map(String::as_str), Some("app-id"));
}
