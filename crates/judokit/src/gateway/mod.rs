//! Judo gateway REST API.
//!
//! [`PaymentApi`] and [`BankApi`] describe the gateway calls the payment
//! flows make. [`GatewayClient`] implements both over HTTP; tests and hosts
//! with their own transport can supply other implementations.

use std::future::Future;

use judokit_core::card_verification::CardVerificationResult;

pub mod requests;
pub mod responses;

#[cfg(feature = "gateway-client")]
pub mod client;

#[cfg(feature = "gateway-client")]
pub use client::{GatewayClient, GatewayError};
pub use requests::*;
pub use responses::*;

/// Card transactions.
pub trait PaymentApi {
    type Error: std::error::Error;

    /// `POST transactions/payments`
    fn payment(
        &self,
        request: &PaymentRequest,
    ) -> impl Future<Output = Result<Receipt, Self::Error>>;

    /// `POST transactions/payments` with a card token.
    fn token_payment(
        &self,
        request: &TokenPaymentRequest,
    ) -> impl Future<Output = Result<Receipt, Self::Error>>;

    /// `POST transactions/preauths`
    fn pre_auth(
        &self,
        request: &PaymentRequest,
    ) -> impl Future<Output = Result<Receipt, Self::Error>>;

    /// `POST transactions/registercard`
    fn register_card(
        &self,
        request: &PaymentRequest,
    ) -> impl Future<Output = Result<Receipt, Self::Error>>;

    /// `POST transactions/collections`
    fn collection(
        &self,
        request: &CollectionRequest,
    ) -> impl Future<Output = Result<Receipt, Self::Error>>;

    /// `POST transactions/refunds`
    fn refund(
        &self,
        request: &RefundRequest,
    ) -> impl Future<Output = Result<Receipt, Self::Error>>;

    /// `PUT transactions/{receiptId}` with the ACS result.
    fn complete_3ds(
        &self,
        receipt_id: &str,
        result: &CardVerificationResult,
    ) -> impl Future<Output = Result<Receipt, Self::Error>>;

    /// `POST transactions/payments` with a Google Pay wallet.
    fn google_pay_payment(
        &self,
        request: &GooglePayRequest,
    ) -> impl Future<Output = Result<Receipt, Self::Error>>;
}

/// Bank-redirect orders.
pub trait BankApi {
    type Error: std::error::Error;

    /// `POST order/bank/sale`
    fn sale(
        &self,
        request: &IdealSaleRequest,
    ) -> impl Future<Output = Result<IdealSaleResponse, Self::Error>>;

    /// `GET order/bank/statusrequest/{orderId}`
    fn status(
        &self,
        order_id: &str,
    ) -> impl Future<Output = Result<BankSaleStatusResponse, Self::Error>>;
}
