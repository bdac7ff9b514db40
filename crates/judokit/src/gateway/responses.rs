use judokit_core::{
    card_verification::CardVerificationModel,
    result::{CardToken, Consumer, JudoResult},
    types::{AmountValue, OrderStatus},
};
use serde::{Deserialize, Serialize};

/// Outcome of a card transaction as reported in [`Receipt::result`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionResult {
    Success,
    Declined,
    RequiresThreeDSecure,
    Error,
    Unknown,
}

impl TransactionResult {
    pub fn parse(value: &str) -> Self {
        match value {
            "Success" => TransactionResult::Success,
            "Declined" => TransactionResult::Declined,
            "Requires 3D Secure" => TransactionResult::RequiresThreeDSecure,
            "Error" => TransactionResult::Error,
            _ => TransactionResult::Unknown,
        }
    }
}

/// Transaction response of the gateway.
///
/// A `Requires 3D Secure` receipt carries `acsUrl`, `md` and `paReq`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
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
    pub message: Option<String>,
    pub acs_url: Option<String>,
    pub md: Option<String>,
    pub pa_req: Option<String>,
}

impl Receipt {
    pub fn transaction_result(&self) -> TransactionResult {
        self.result
            .as_deref()
            .map(TransactionResult::parse)
            .unwrap_or(TransactionResult::Unknown)
    }

    pub fn is_success(&self) -> bool {
        self.transaction_result() == TransactionResult::Success
    }

    /// The challenge to show, when the receipt asks for one.
    pub fn card_verification_model(&self) -> Option<CardVerificationModel> {
        if self.transaction_result() != TransactionResult::RequiresThreeDSecure {
            return None;
        }
        Some(CardVerificationModel {
            receipt_id: self.receipt_id.clone()?,
            acs_url: self.acs_url.clone()?,
            md: self.md.clone()?,
            pa_req: self.pa_req.clone()?,
        })
    }

    pub fn to_judo_result(&self) -> JudoResult {
        JudoResult {
            receipt_id: self.receipt_id.clone(),
            original_receipt_id: self.original_receipt_id.clone(),
            partner_service_fee: self.partner_service_fee.clone(),
            your_payment_reference: self.your_payment_reference.clone(),
            transaction_type: self.transaction_type.clone(),
            created_at: self.created_at.clone(),
            merchant_name: self.merchant_name.clone(),
            appears_on_statement_as: self.appears_on_statement_as.clone(),
            original_amount: self.original_amount.clone(),
            net_amount: self.net_amount.clone(),
            amount: self.amount.clone(),
            currency: self.currency.clone(),
            card_details: self.card_details.clone(),
            consumer: self.consumer.clone(),
            result: self.result.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdealSaleResponse {
    pub order_id: String,
    /// Bank page the user is sent to.
    pub redirect_url: String,
    pub merchant_payment_reference: Option<String>,
    pub site_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetails {
    pub order_id: String,
    pub order_status: OrderStatus,
    pub order_failure_reason: Option<String>,
    pub timestamp: Option<String>,
    pub amount: Option<AmountValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankSaleStatusResponse {
    pub merchant_payment_reference: Option<String>,
    pub merchant_consumer_reference: Option<String>,
    pub order_details: OrderDetails,
}

impl BankSaleStatusResponse {
    pub fn status(&self) -> OrderStatus {
        self.order_details.order_status
    }

    pub fn to_judo_result(&self) -> JudoResult {
        JudoResult::builder()
            .receipt_id(self.order_details.order_id.clone())
            .maybe_amount(self.order_details.amount.clone())
            .currency("EUR".to_string())
            .maybe_your_payment_reference(self.merchant_payment_reference.clone())
            .maybe_created_at(self.order_details.timestamp.clone())
            .result(self.order_details.order_status.as_str().to_string())
            .consumer(Consumer {
                consumer_token: None,
                your_consumer_reference: self.merchant_consumer_reference.clone(),
            })
            .build()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_three_d_secure_receipt() {
        let receipt: Receipt = serde_json::from_value(json!({
            "receiptId": "1234",
            "result": "Requires 3D Secure",
            "message": "Issuer authentication required",
            "acsUrl": "https://acs.example/challenge",
            "md": "md-value",
            "paReq": "pa-req"
        }))
        .unwrap();

        assert_eq!(
            receipt.transaction_result(),
            TransactionResult::RequiresThreeDSecure
        );
        let model = receipt.card_verification_model().unwrap();
        assert_eq!(model.receipt_id, "1234");
        assert_eq!(model.acs_url, "https://acs.example/challenge");
    }

    #[test]
    fn test_success_receipt_to_result() {
        let receipt: Receipt = serde_json::from_value(json!({
            "receiptId": "1234",
            "type": "Payment",
            "result": "Success",
            "amount": 1.5,
            "currency": "GBP",
            "cardDetails": {
                "cardLastfour": "1111",
                "endDate": "1230",
                "cardToken": "tok",
                "cardType": 1
            }
        }))
        .unwrap();

        assert!(receipt.is_success());
        assert!(receipt.card_verification_model().is_none());

        let result = receipt.to_judo_result();
        assert_eq!(result.transaction_type.as_deref(), Some("Payment"));
        assert_eq!(result.amount.unwrap().as_str(), "1.5");
    }

    #[test]
    fn test_unknown_order_status() {
        let status: BankSaleStatusResponse = serde_json::from_value(json!({
            "orderDetails": { "orderId": "ord-1", "orderStatus": "EXPIRED" }
        }))
        .unwrap();

        assert_eq!(status.status(), OrderStatus::Other);
        assert!(!status.status().is_pending());
    }
}
