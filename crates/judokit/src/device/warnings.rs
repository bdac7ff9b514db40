//! Security warning heuristics.

use judokit_core::device::SecurityWarning;

use super::platform::{DevicePlatform, Source};

const EMULATOR_MODELS: &[&str] = &["google_sdk", "Emulator", "Android SDK built for x86"];
const EMULATOR_PRODUCTS: &[&str] = &[
    "sdk_google",
    "google_sdk",
    "sdk",
    "sdk_x86",
    "vbox86p",
    "emulator",
    "simulator",
];

struct BuildInfo<'p, P: ?Sized> {
    platform: &'p P,
}

impl<P: DevicePlatform + ?Sized> BuildInfo<'_, P> {
    /// A failed or empty lookup reads as an empty string.
    fn get(&self, field: &'static str) -> String {
        self.platform
            .lookup(Source::Build(field))
            .ok()
            .flatten()
            .unwrap_or_default()
    }
}

pub fn detect<P: DevicePlatform + ?Sized>(
    platform: &P,
    min_supported_sdk: u32,
) -> Vec<SecurityWarning> {
    let mut warnings = Vec::new();

    if is_rooted(platform) {
        warnings.push(SecurityWarning::Jailbroken);
    }
    if platform.is_tampered() {
        warnings.push(SecurityWarning::Tampered);
    }
    if is_emulator(platform) {
        warnings.push(SecurityWarning::Emulator);
    }
    if platform.is_debugger_attached() {
        warnings.push(SecurityWarning::DebuggerAttached);
    }
    if platform.sdk_version() < min_supported_sdk {
        warnings.push(SecurityWarning::UnsupportedOs);
    }

    warnings
}

pub fn is_rooted<P: DevicePlatform + ?Sized>(platform: &P) -> bool {
    platform.is_rooted() || BuildInfo { platform }.get("TAGS").contains("test-keys")
}

pub fn is_emulator<P: DevicePlatform + ?Sized>(platform: &P) -> bool {
    let build = BuildInfo { platform };
    let fingerprint = build.get("FINGERPRINT");
    let hardware = build.get("HARDWARE");
    let model = build.get("MODEL");
    let product = build.get("PRODUCT");

    (build.get("BRAND").starts_with("generic") && build.get("DEVICE").starts_with("generic"))
        || fingerprint.starts_with("generic")
        || fingerprint.starts_with("unknown")
        || hardware.contains("goldfish")
        || hardware.contains("ranchu")
        || EMULATOR_MODELS.iter().any(|m| model.contains(m))
        || build.get("MANUFACTURER").contains("Genymotion")
        || EMULATOR_PRODUCTS.iter().any(|p| product.contains(p))
}
