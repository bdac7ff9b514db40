//! Payment capture SDK for the judo gateway.
//!
//! This crate holds everything a host application needs between the
//! card-entry form and the final [`JudoPaymentResult`](judokit_core::result::JudoPaymentResult):
//!
//! - [`config`]: merchant configuration and credentials.
//! - [`device`]: 3-D Secure device data collection over a host platform.
//! - [`threeds`]: the 3-D Secure challenge inside an embedded web view.
//! - [`gateway`]: the gateway REST API and its HTTP client.
//! - [`poller`]: status polling for bank-redirect orders.
//! - [`flow`]: card, Google Pay and iDEAL payment flows.
//!
//! Wire types and pure logic live in [`judokit_core`], re-exported as [`core`].
//!
//! # Features
//!
//! - `gateway-client` (default): [`gateway::GatewayClient`] over `reqwest`.
//! - `tracing` (default): debug logs at flow boundaries.

pub use judokit_core as core;

pub mod config;
pub mod device;
pub mod flow;
pub mod gateway;
pub mod poller;
pub mod threeds;
