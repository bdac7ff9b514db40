use bon::Builder;
use judokit_core::{
    device::ThreeDSDeviceData,
    types::{AmountValue, Currency, Record},
};
use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, JudoConfig};

/// Device details attached to every card transaction.
#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientDetails {
    #[builder(into)]
    pub device_identifier: Option<String>,
    #[serde(flatten)]
    pub device_data: Option<ThreeDSDeviceData>,
}

/// Card details entered by the user.
#[derive(Builder, Clone, PartialEq, Eq)]
pub struct CardDetails {
    #[builder(into)]
    pub card_number: String,
    /// `MM/YY`.
    #[builder(into)]
    pub expiry_date: String,
    #[builder(into)]
    pub security_code: String,
    #[builder(into)]
    pub start_date: Option<String>,
    #[builder(into)]
    pub issue_number: Option<String>,
}

impl std::fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let last_four = self
            .card_number
            .get(self.card_number.len().saturating_sub(4)..)
            .unwrap_or_default();
        f.debug_struct("CardDetails")
            .field("card_number", &format!("****{last_four}"))
            .field("expiry_date", &self.expiry_date)
            .finish_non_exhaustive()
    }
}

/// Card payment, pre-authorization and card registration body.
#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    #[builder(into)]
    pub judo_id: String,
    #[builder(into)]
    pub your_consumer_reference: String,
    #[builder(into)]
    pub your_payment_reference: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub your_payment_meta_data: Option<Record<String>>,
    #[builder(into)]
    pub amount: AmountValue,
    pub currency: Currency,
    #[builder(into)]
    pub card_number: String,
    #[builder(into)]
    pub expiry_date: String,
    #[builder(into)]
    pub cv2: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub issue_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_details: Option<ClientDetails>,
}

impl PaymentRequest {
    pub fn from_config(
        config: &JudoConfig,
        card: CardDetails,
        client_details: Option<ClientDetails>,
    ) -> Self {
        PaymentRequest {
            judo_id: config.judo_id.clone(),
            your_consumer_reference: config.reference.consumer_reference.clone(),
            your_payment_reference: config.reference.payment_reference.clone(),
            your_payment_meta_data: config.reference.metadata.clone(),
            amount: config.amount.amount.clone(),
            currency: config.amount.currency.clone(),
            card_number: card.card_number.split_whitespace().collect(),
            expiry_date: card.expiry_date,
            cv2: card.security_code,
            start_date: card.start_date,
            issue_number: card.issue_number,
            client_details,
        }
    }
}

/// Payment with a previously tokenized card.
#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPaymentRequest {
    #[builder(into)]
    pub judo_id: String,
    #[builder(into)]
    pub your_consumer_reference: String,
    #[builder(into)]
    pub your_payment_reference: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub your_payment_meta_data: Option<Record<String>>,
    #[builder(into)]
    pub amount: AmountValue,
    pub currency: Currency,
    #[builder(into)]
    pub consumer_token: String,
    #[builder(into)]
    pub card_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub cv2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_details: Option<ClientDetails>,
}

#[derive(Builder, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GooglePayWallet {
    #[builder(into)]
    pub card_network: String,
    #[builder(into)]
    pub card_details: String,
    /// Payment token returned by Google Pay, passed through untouched.
    #[builder(into)]
    pub token: String,
}

#[derive(Builder, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimaryAccountDetails {
    #[builder(into)]
    pub name: Option<String>,
    #[builder(into)]
    pub account_number: Option<String>,
    #[builder(into)]
    pub date_of_birth: Option<String>,
    #[builder(into)]
    pub post_code: Option<String>,
}

#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GooglePayRequest {
    #[builder(into)]
    pub judo_id: String,
    #[builder(into)]
    pub amount: AmountValue,
    pub currency: Currency,
    #[builder(into)]
    pub your_payment_reference: String,
    #[builder(into)]
    pub your_consumer_reference: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub your_payment_meta_data: Option<Record<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_account_details: Option<PrimaryAccountDetails>,
    pub google_pay_wallet: GooglePayWallet,
}

impl GooglePayRequest {
    pub fn from_config(config: &JudoConfig, wallet: GooglePayWallet) -> Self {
        GooglePayRequest {
            judo_id: config.judo_id.clone(),
            amount: config.amount.amount.clone(),
            currency: config.amount.currency.clone(),
            your_payment_reference: config.reference.payment_reference.clone(),
            your_consumer_reference: config.reference.consumer_reference.clone(),
            your_payment_meta_data: config.reference.metadata.clone(),
            primary_account_details: None,
            google_pay_wallet: wallet,
        }
    }

    /// Reject blank required fields.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require("judoId", &self.judo_id)?;
        require("amount", self.amount.as_str())?;
        require("yourConsumerReference", &self.your_consumer_reference)?;
        require("yourPaymentReference", &self.your_payment_reference)?;
        require("googlePayWallet.token", &self.google_pay_wallet.token)
    }
}

/// Bank-redirect sale for iDEAL.
#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdealSaleRequest {
    #[builder(into)]
    pub judo_id: String,
    #[builder(into)]
    pub amount: AmountValue,
    #[builder(into, default = "EUR".to_string())]
    pub currency: String,
    #[builder(into, default = "NL".to_string())]
    pub country: String,
    #[builder(into, default = "IDEAL".to_string())]
    pub payment_method: String,
    /// Bank identifier code of the issuing bank.
    #[builder(into)]
    pub bic: String,
    #[builder(into)]
    pub merchant_payment_reference: String,
    #[builder(into)]
    pub merchant_consumer_reference: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_metadata: Option<Record<String>>,
}

impl IdealSaleRequest {
    pub fn from_config(config: &JudoConfig, bic: impl Into<String>) -> Self {
        IdealSaleRequest::builder()
            .judo_id(config.judo_id.clone())
            .amount(config.amount.amount.clone())
            .bic(bic)
            .merchant_payment_reference(config.reference.payment_reference.clone())
            .merchant_consumer_reference(config.reference.consumer_reference.clone())
            .maybe_payment_metadata(config.reference.metadata.clone())
            .build()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        require("judoId", &self.judo_id)?;
        require("bic", &self.bic)?;
        require("merchantPaymentReference", &self.merchant_payment_reference)?;
        require("merchantConsumerReference", &self.merchant_consumer_reference)
    }
}

/// Collection of funds held by an earlier pre-authorization.
#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionRequest {
    /// Receipt of the pre-authorization.
    #[builder(into)]
    pub receipt_id: String,
    #[builder(into)]
    pub amount: AmountValue,
    #[builder(into)]
    pub your_payment_reference: String,
}

impl CollectionRequest {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require("receiptId", &self.receipt_id)?;
        require_amount(&self.amount)?;
        require("yourPaymentReference", &self.your_payment_reference)
    }
}

/// Refund of a settled payment or collection, in full or in part.
#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundRequest {
    #[builder(into)]
    pub receipt_id: String,
    #[builder(into)]
    pub amount: AmountValue,
    #[builder(into)]
    pub your_payment_reference: String,
}

impl RefundRequest {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require("receiptId", &self.receipt_id)?;
        require_amount(&self.amount)?;
        require("yourPaymentReference", &self.your_payment_reference)
    }
}

fn require_amount(amount: &AmountValue) -> Result<(), ConfigError> {
    if amount.is_zero() {
        Err(ConfigError::MissingField("amount"))
    } else {
        Ok(())
    }
}

fn require(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        Err(ConfigError::MissingField(field))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use judokit_core::device::UnavailabilityReason;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_client_details_flatten_device_data() {
        let details = ClientDetails::builder()
            .device_identifier("device-1")
            .device_data(ThreeDSDeviceData {
                version: "1.4".into(),
                device_data: BTreeMap::from([("C001".into(), "Android".into())]),
                unavailability_reasons: BTreeMap::from([(
                    "A001".into(),
                    UnavailabilityReason::PermissionRequired,
                )]),
                security_warnings: vec![],
            })
            .build();

        assert_eq!(
            serde_json::to_value(&details).unwrap(),
            json!({
                "deviceIdentifier": "device-1",
                "DV": "1.4",
                "DD": { "C001": "Android" },
                "DPNA": { "A001": "RE03" },
                "SW": []
            })
        );
    }

    #[test]
    fn test_card_details_debug_is_masked() {
        let card = CardDetails::builder()
            .card_number("4111111111111111")
            .expiry_date("12/30")
            .security_code("123")
            .build();
        let debug = format!("{card:?}");
        assert!(debug.contains("****1111"));
        assert!(!debug.contains("4111111111111111"));
        assert!(!debug.contains("123\""));
    }

    #[test]
    fn test_ideal_sale_defaults() {
        let request = IdealSaleRequest::builder()
            .judo_id("100200300")
            .amount(AmountValue::from(10u32))
            .bic("RABONL2U")
            .merchant_payment_reference("payment")
            .merchant_consumer_reference("consumer")
            .build();

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["currency"], "EUR");
        assert_eq!(body["country"], "NL");
        assert_eq!(body["paymentMethod"], "IDEAL");
        assert_eq!(body["amount"], "10");
        assert!(body.get("paymentMetadata").is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_google_pay_requires_token() {
        let request = GooglePayRequest::builder()
            .judo_id("100200300")
            .amount(AmountValue::from(5u32))
            .currency("GBP".parse().unwrap())
            .your_payment_reference("payment")
            .your_consumer_reference("consumer")
            .google_pay_wallet(
                GooglePayWallet::builder()
                    .card_network("VISA")
                    .card_details("1111")
                    .token("")
                    .build(),
            )
            .build();

        assert!(matches!(
            request.validate(),
            Err(ConfigError::MissingField("googlePayWallet.token"))
        ));
    }

    #[test]
    fn test_refund_and_collection_bodies() {
        let refund = RefundRequest::builder()
            .receipt_id("1001")
            .amount("2.50".parse::<AmountValue>().unwrap())
            .your_payment_reference("refund-1")
            .build();
        assert_eq!(
            serde_json::to_value(&refund).unwrap(),
            json!({ "receiptId": "1001", "amount": "2.50", "yourPaymentReference": "refund-1" })
        );
        assert!(refund.validate().is_ok());

        let collection = CollectionRequest::builder()
            .receipt_id(" ")
            .amount(AmountValue::from(10u32))
            .your_payment_reference("collection-1")
            .build();
        assert!(matches!(
            collection.validate(),
            Err(ConfigError::MissingField("receiptId"))
        ));

        let zero = RefundRequest {
            amount: AmountValue::from(0u32),
            ..refund
        };
        assert!(matches!(zero.validate(), Err(ConfigError::MissingField("amount"))));
    }
}
