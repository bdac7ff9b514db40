//! Payment flows.
//!
//! Each flow drives the gateway calls of one payment method and maps the
//! outcome to a [`JudoPaymentResult`]. Card flows may stop half way with a
//! 3-D Secure challenge, which the host shows in a
//! [`CardVerificationSession`](crate::threeds::CardVerificationSession)
//! before calling [`complete_card_verification`].

use judokit_core::{
    card_verification::{CardVerificationModel, CardVerificationResult},
    result::{JudoError, JudoPaymentResult, codes},
};

use crate::{
    gateway::{
        BankApi, CollectionRequest, GooglePayRequest, IdealSaleRequest, IdealSaleResponse,
        PaymentApi, PaymentRequest, Receipt, RefundRequest, TokenPaymentRequest, TransactionResult,
    },
    poller::{PollError, PollOutcome, PollState, StatusPoller},
};

/// Where a card transaction stands after the gateway answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardPaymentStep {
    Completed(JudoPaymentResult),
    RequiresVerification(CardVerificationModel),
}

impl CardPaymentStep {
    pub fn as_completed(&self) -> Option<&JudoPaymentResult> {
        match self {
            CardPaymentStep::Completed(result) => Some(result),
            _ => None,
        }
    }

    pub fn as_verification(&self) -> Option<&CardVerificationModel> {
        match self {
            CardPaymentStep::RequiresVerification(model) => Some(model),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardTransaction {
    Payment,
    PreAuth,
    RegisterCard,
}

/// Map a receipt that needs no further action.
pub fn receipt_to_result(receipt: &Receipt) -> JudoPaymentResult {
    let message = |fallback: &str| {
        receipt
            .message
            .clone()
            .unwrap_or_else(|| fallback.to_string())
    };

    match receipt.transaction_result() {
        TransactionResult::Success => JudoPaymentResult::success(receipt.to_judo_result()),
        TransactionResult::Declined => JudoPaymentResult::error(JudoError::new(
            codes::PAYMENT_DECLINED,
            message("The payment was declined."),
        )),
        TransactionResult::RequiresThreeDSecure => JudoPaymentResult::error(JudoError::new(
            codes::CARD_VERIFICATION_FAILED,
            message("Card verification could not be completed."),
        )),
        TransactionResult::Error | TransactionResult::Unknown => JudoPaymentResult::error(
            JudoError::request_failed(message("The payment could not be processed.")),
        ),
    }
}

pub fn receipt_to_step(receipt: Receipt) -> CardPaymentStep {
    match receipt.card_verification_model() {
        Some(model) => {
            #[cfg(feature = "tracing")]
            tracing::debug!("3DS challenge required: receipt='{}'", model.receipt_id);

            CardPaymentStep::RequiresVerification(model)
        }
        None => CardPaymentStep::Completed(receipt_to_result(&receipt)),
    }
}

pub async fn pay_with_card<A>(
    api: &A,
    transaction: CardTransaction,
    request: &PaymentRequest,
) -> CardPaymentStep
where
    A: PaymentApi,
    A::Error: Into<JudoError>,
{
    #[cfg(feature = "tracing")]
    tracing::debug!(
        "Submitting card transaction: kind={transaction:?}, reference='{}'",
        request.your_payment_reference
    );

    let receipt = match transaction {
        CardTransaction::Payment => api.payment(request).await,
        CardTransaction::PreAuth => api.pre_auth(request).await,
        CardTransaction::RegisterCard => api.register_card(request).await,
    };

    match receipt {
        Ok(receipt) => receipt_to_step(receipt),
        Err(err) => CardPaymentStep::Completed(JudoPaymentResult::error(err.into())),
    }
}

pub async fn pay_with_token<A>(api: &A, request: &TokenPaymentRequest) -> CardPaymentStep
where
    A: PaymentApi,
    A::Error: Into<JudoError>,
{
    match api.token_payment(request).await {
        Ok(receipt) => receipt_to_step(receipt),
        Err(err) => CardPaymentStep::Completed(JudoPaymentResult::error(err.into())),
    }
}

/// Finish a transaction once the ACS handed back its result.
///
/// A second challenge for the same transaction is treated as a failure.
pub async fn complete_card_verification<A>(
    api: &A,
    receipt_id: &str,
    result: &CardVerificationResult,
) -> JudoPaymentResult
where
    A: PaymentApi,
    A::Error: Into<JudoError>,
{
    #[cfg(feature = "tracing")]
    tracing::debug!("Completing 3DS: receipt='{receipt_id}'");

    match api.complete_3ds(receipt_id, result).await {
        Ok(receipt) => receipt_to_result(&receipt),
        Err(err) => JudoPaymentResult::error(err.into()),
    }
}

pub async fn pay_with_google_pay<A>(api: &A, request: &GooglePayRequest) -> JudoPaymentResult
where
    A: PaymentApi,
    A::Error: Into<JudoError>,
{
    match api.google_pay_payment(request).await {
        Ok(receipt) => receipt_to_result(&receipt),
        Err(err) => JudoPaymentResult::error(err.into()),
    }
}

/// Settle funds held by a pre-authorization.
pub async fn collect_pre_auth<A>(api: &A, request: &CollectionRequest) -> JudoPaymentResult
where
    A: PaymentApi,
    A::Error: Into<JudoError>,
{
    #[cfg(feature = "tracing")]
    tracing::debug!("Collecting pre-auth: receipt='{}'", request.receipt_id);

    match api.collection(request).await {
        Ok(receipt) => receipt_to_result(&receipt),
        Err(err) => JudoPaymentResult::error(err.into()),
    }
}

pub async fn refund<A>(api: &A, request: &RefundRequest) -> JudoPaymentResult
where
    A: PaymentApi,
    A::Error: Into<JudoError>,
{
    #[cfg(feature = "tracing")]
    tracing::debug!("Refunding: receipt='{}', amount={}", request.receipt_id, request.amount);

    match api.refund(request).await {
        Ok(receipt) => receipt_to_result(&receipt),
        Err(err) => JudoPaymentResult::error(err.into()),
    }
}

/// Create the iDEAL order. The user is then sent to `redirect_url`.
pub async fn start_ideal_sale<B>(
    api: &B,
    request: &IdealSaleRequest,
) -> Result<IdealSaleResponse, JudoPaymentResult>
where
    B: BankApi,
    B::Error: Into<JudoError>,
{
    let response = api
        .sale(request)
        .await
        .map_err(|err| JudoPaymentResult::error(err.into()))?;

    #[cfg(feature = "tracing")]
    tracing::debug!("iDEAL order created: order='{}'", response.order_id);

    Ok(response)
}

/// Poll the order after the bank redirect and map the final status.
pub async fn complete_ideal_payment<B>(
    api: &B,
    poller: &StatusPoller,
    order_id: &str,
    on_state: impl FnMut(PollState),
) -> JudoPaymentResult
where
    B: BankApi,
    B::Error: Into<JudoError>,
{
    match poller.poll(api, order_id, on_state).await {
        Ok(outcome) => poll_outcome_to_result(outcome),
        Err(PollError::Request(err)) => JudoPaymentResult::error(err.into()),
    }
}

pub fn poll_outcome_to_result(outcome: PollOutcome) -> JudoPaymentResult {
    match outcome {
        PollOutcome::Succeeded(response) => JudoPaymentResult::success(response.to_judo_result()),
        PollOutcome::Failed(response) => {
            let details = &response.order_details;
            let message = match &details.order_failure_reason {
                Some(reason) => format!(
                    "Order {} failed with status {}: {reason}",
                    details.order_id,
                    details.order_status.as_str()
                ),
                None => format!(
                    "Order {} failed with status {}",
                    details.order_id,
                    details.order_status.as_str()
                ),
            };
            JudoPaymentResult::error(JudoError::new(codes::ORDER_FAILED, message))
        }
        PollOutcome::TimedOut(response) => JudoPaymentResult::error(JudoError::new(
            codes::ORDER_TIMEOUT,
            format!(
                "Order {} is still pending; check its status later",
                response.order_details.order_id
            ),
        )),
    }
}

#[cfg(test)]
mod tests {
    use judokit_core::result::PAYMENT_ERROR;

    use super::*;

    fn receipt(result: &str) -> Receipt {
        Receipt {
            receipt_id: Some("1234".into()),
            result: Some(result.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_receipt_results() {
        assert!(receipt_to_result(&receipt("Success")).is_success());

        let declined = receipt_to_result(&receipt("Declined"));
        assert_eq!(declined.code(), PAYMENT_ERROR);
        assert_eq!(declined.as_error().unwrap().code, codes::PAYMENT_DECLINED);

        let error = receipt_to_result(&receipt("Error"));
        assert_eq!(error.as_error().unwrap().code, codes::REQUEST_FAILED);
    }

    #[test]
    fn test_three_d_secure_step() {
        let mut challenge = receipt("Requires 3D Secure");
        challenge.acs_url = Some("https://acs.example/".into());
        challenge.md = Some("md".into());
        challenge.pa_req = Some("pareq".into());

        let step = receipt_to_step(challenge);
        assert_eq!(step.as_verification().unwrap().receipt_id, "1234");

        // Without the challenge fields there is nothing to show.
        let step = receipt_to_step(receipt("Requires 3D Secure"));
        assert_eq!(
            step.as_completed().unwrap().as_error().unwrap().code,
            codes::CARD_VERIFICATION_FAILED
        );
    }
}
