//! Core types used across the judo SDK.

mod amount;
mod common;
mod order_status;
mod payment_method;

pub use amount::*;
pub use common::*;
pub use order_status::*;
pub use payment_method::*;
