//! Terminal outcome of a payment attempt.
//!
//! Every flow ends by producing exactly one [`JudoPaymentResult`], which the
//! host application receives together with a numeric result code.

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::{api_error::ApiError, card_network::CardNetwork, types::AmountValue};

pub const PAYMENT_SUCCESS: i32 = 2;
pub const PAYMENT_ERROR: i32 = 3;
pub const PAYMENT_CANCELLED: i32 = 4;

/// Error codes raised by the SDK itself rather than by the gateway.
pub mod codes {
    pub const USER_CANCELLED: i32 = -1;
    pub const REQUEST_FAILED: i32 = -2;
    pub const RESPONSE_PARSING: i32 = -3;
    pub const CARD_VERIFICATION_FAILED: i32 = -4;
    pub const ORDER_FAILED: i32 = -5;
    pub const ORDER_TIMEOUT: i32 = -6;
    pub const PAYMENT_DECLINED: i32 = -7;
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardToken {
    pub end_date: Option<String>,
    #[serde(rename = "cardLastfour")]
    pub last_four: Option<String>,
    #[serde(rename = "cardToken")]
    pub token: Option<String>,
    #[serde(rename = "cardType", default)]
    pub card_type: i32,
    #[serde(rename = "cardScheme")]
    pub scheme: Option<String>,
}

impl CardToken {
    pub fn network(&self) -> CardNetwork {
        CardNetwork::with_identifier(self.card_type)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Consumer {
    pub consumer_token: Option<String>,
    pub your_consumer_reference: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Builder, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JudoResult {
    pub receipt_id: Option<String>,
    pub original_receipt_id: Option<String>,
    pub partner_service_fee: Option<String>,
    pub your_payment_reference: Option<String>,
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    pub created_at: Option<String>,
    pub merchant_name: Option<String>,
    pub appears_on_statement_as: Option<String>,
    pub original_amount: Option<AmountValue>,
    pub net_amount: Option<AmountValue>,
    pub amount: Option<AmountValue>,
    pub currency: Option<String>,
    pub card_details: Option<CardToken>,
    pub consumer: Option<Consumer>,
    pub result: Option<String>,
}

/// An error surfaced to the host application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JudoError {
    pub code: i32,
    pub message: String,
    #[serde(default)]
    pub details: Vec<JudoError>,
}

impl JudoError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        JudoError {
            code,
            message: message.into(),
            details: Vec::new(),
        }
    }

    pub fn user_cancelled() -> Self {
        JudoError::new(codes::USER_CANCELLED, "User cancelled the payment.")
    }

    pub fn request_failed(message: impl Into<String>) -> Self {
        JudoError::new(codes::REQUEST_FAILED, message)
    }
}

impl From<ApiError> for JudoError {
    fn from(error: ApiError) -> Self {
        JudoError {
            code: error.code,
            message: error.message,
            details: error
                .details
                .into_iter()
                .map(|d| JudoError::new(d.code, d.message))
                .collect(),
        }
    }
}

impl std::fmt::Display for JudoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "JudoError(code={}, message='{}')", self.code, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JudoPaymentResult {
    Success(JudoResult),
    Error(JudoError),
    UserCancelled(JudoError),
}

impl JudoPaymentResult {
    pub fn success(result: JudoResult) -> Self {
        JudoPaymentResult::Success(result)
    }

    pub fn error(error: impl Into<JudoError>) -> Self {
        JudoPaymentResult::Error(error.into())
    }

    pub fn user_cancelled() -> Self {
        JudoPaymentResult::UserCancelled(JudoError::user_cancelled())
    }

    /// Result code handed to the host application.
    pub fn code(&self) -> i32 {
        match self {
            JudoPaymentResult::Success(_) => PAYMENT_SUCCESS,
            JudoPaymentResult::Error(_) => PAYMENT_ERROR,
            JudoPaymentResult::UserCancelled(_) => PAYMENT_CANCELLED,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, JudoPaymentResult::Success(_))
    }

    pub fn as_success(&self) -> Option<&JudoResult> {
        match self {
            JudoPaymentResult::Success(result) => Some(result),
            _ => None,
        }
    }

    pub fn as_error(&self) -> Option<&JudoError> {
        match self {
            JudoPaymentResult::Error(error) | JudoPaymentResult::UserCancelled(error) => Some(error),
            JudoPaymentResult::Success(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_error::ApiErrorDetail;

    #[test]
    fn test_result_codes() {
        assert_eq!(
            JudoPaymentResult::success(JudoResult::default()).code(),
            PAYMENT_SUCCESS
        );
        assert_eq!(
            JudoPaymentResult::error(JudoError::request_failed("offline")).code(),
            PAYMENT_ERROR
        );

        let cancelled = JudoPaymentResult::user_cancelled();
        assert_eq!(cancelled.code(), PAYMENT_CANCELLED);
        assert_eq!(cancelled.as_error().map(|e| e.code), Some(codes::USER_CANCELLED));
    }

    #[test]
    fn test_judo_error_from_api_error() {
        let api_error = ApiError {
            code: 1,
            category: 2,
            message: "Invalid request".into(),
            details: vec![ApiErrorDetail {
                code: 30,
                message: "Card number is invalid".into(),
                field_name: "cardNumber".into(),
            }],
        };

        let error = JudoError::from(api_error);
        assert_eq!(error.code, 1);
        assert_eq!(error.details.len(), 1);
        assert_eq!(error.details[0].code, 30);
    }

    #[test]
    fn test_card_token_wire_names() {
        let token: CardToken = serde_json::from_str(
            r#"{"endDate":"1229","cardLastfour":"1111","cardToken":"tok","cardType":1}"#,
        )
        .unwrap();
        assert_eq!(token.last_four.as_deref(), Some("1111"));
        assert_eq!(token.network(), CardNetwork::Visa);
    }
}
