//! 3-D Secure device data collection.
//!
//! The host implements [`DevicePlatform`] over whatever the OS exposes, or
//! fills a [`StaticPlatform`] up front. [`DeviceDataCollector::collect`] then
//! walks the [`parameters::PROBES`] table and returns a
//! [`DeviceData`](judokit_core::device::DeviceData) snapshot:
//!
//! ```
//! use judokit::device::{DeviceDataCollector, Source, StaticPlatform};
//!
//! let platform = StaticPlatform::builder()
//!     .sdk_version(33)
//!     .build()
//!     .with_value(Source::Build("MODEL"), "Pixel 6");
//!
//! let data = DeviceDataCollector::default().collect(&platform);
//! assert_eq!(data.value("C002"), Some("Pixel 6"));
//! ```

pub mod collector;
pub mod parameters;
pub mod platform;
pub mod warnings;

pub use collector::{DeviceDataCollector, PLATFORM_NAME, ProbeOutcome, SDK_VERSION};
pub use platform::{Capability, DevicePlatform, PlatformError, Source, StaticPlatform};
