//! Core types shared by the judo payment SDK.
//!
//! Nothing in this crate performs I/O. It holds the wire model of the judo
//! gateway and the pure logic that runs on every keystroke of a card-entry
//! form:
//!
//! - [`card_network`]: card brand classification from a PAN prefix.
//! - [`validation`]: card-entry field validators.
//! - [`api_error`]: the structured error body returned by the gateway.
//! - [`result`]: the terminal outcome handed back to the host application.
//! - [`device`]: 3-D Secure device data and its reason/warning vocabularies.
//! - [`card_verification`]: the 3-D Secure challenge and its result.
//! - [`types`]: amounts, order statuses, payment methods and helpers.

pub mod api_error;
pub mod card_network;
pub mod card_verification;
pub mod device;
pub mod errors;
pub mod result;
pub mod types;
pub mod validation;
