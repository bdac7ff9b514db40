use judokit::device::{Capability, DeviceDataCollector, Source, StaticPlatform};
use judokit_core::device::ThreeDSDeviceData;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    // A mid-range handset with only the network permissions granted.
    let platform = StaticPlatform::builder()
        .sdk_version(31)
        .build()
        .with_capability(Capability::Internet)
        .with_capability(Capability::AccessNetworkState)
        .with_value(Source::Build("MODEL"), "Pixel 6")
        .with_value(Source::Build("MANUFACTURER"), "Google")
        .with_value(Source::Build("BRAND"), "google")
        .with_value(Source::Build("DEVICE"), "oriole")
        .with_value(Source::Build("PRODUCT"), "oriole")
        .with_value(Source::Build("HARDWARE"), "oriole")
        .with_value(Source::Build("TAGS"), "release-keys")
        .with_value(
            Source::Build("FINGERPRINT"),
            "google/oriole/oriole:12/SD1A.210817.036/7805805:user/release-keys",
        );

    let collector = DeviceDataCollector::builder()
        .sdk_app_id("3f0e3c9e-9fb5-4d62-8f1c-4e9f0a3b2c11")
        .build();
    let device_data = collector.collect(&platform);

    tracing::info!(
        "Collected {} parameters, {} available",
        device_data.len(),
        device_data.available().len()
    );

    let payload = ThreeDSDeviceData::from(device_data);
    println!(
        "{}",
        serde_json::to_string_pretty(&payload).expect("Failed to serialize device data")
    );
}
