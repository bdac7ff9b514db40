use http::{
    HeaderMap, HeaderName, HeaderValue, StatusCode,
    header::{ACCEPT, AUTHORIZATION},
};
use judokit_core::{
    api_error::ApiError,
    card_verification::CardVerificationResult,
    result::{JudoError, codes},
};
use serde::{Serialize, de::DeserializeOwned};
use url::Url;

use super::{
    BankApi, PaymentApi,
    requests::{
        CollectionRequest, GooglePayRequest, IdealSaleRequest, PaymentRequest, RefundRequest,
        TokenPaymentRequest,
    },
    responses::{BankSaleStatusResponse, IdealSaleResponse, Receipt},
};
use crate::config::{ConfigError, JudoConfig};

pub const API_VERSION_HEADER: &str = "api-version";

/// HTTP client for the judo gateway.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    pub base_url: Url,
    pub client: reqwest::Client,
    pub headers: HeaderMap,
}

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),

    #[error("HTTP request error: {0}")]
    HttpRequestError(#[from] reqwest::Error),

    #[error("Serialization/Deserialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] http::header::InvalidHeaderValue),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Gateway error: {0}")]
    Api(ApiError),

    #[error("Unexpected HTTP status {status}: {body}")]
    UnexpectedStatus { status: StatusCode, body: String },
}

impl From<GatewayError> for JudoError {
    fn from(error: GatewayError) -> Self {
        match error {
            GatewayError::Api(api_error) => JudoError::from(api_error),
            GatewayError::SerdeError(err) => {
                JudoError::new(codes::RESPONSE_PARSING, err.to_string())
            }
            other => JudoError::request_failed(other.to_string()),
        }
    }
}

impl GatewayClient {
    /// Client for `base_url` with the authorization and API version headers set.
    pub fn new(
        base_url: Url,
        authorization: &str,
        api_version: &str,
    ) -> Result<Self, GatewayError> {
        let mut headers = HeaderMap::new();
        let mut authorization = HeaderValue::from_str(authorization)?;
        authorization.set_sensitive(true);
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(
            HeaderName::from_static(API_VERSION_HEADER),
            HeaderValue::from_str(api_version)?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        Ok(GatewayClient {
            base_url,
            client: reqwest::Client::new(),
            headers,
        })
    }

    pub fn from_config(config: &JudoConfig) -> Result<Self, GatewayError> {
        config.validate()?;
        let authorization = config.credentials.authorization()?;
        GatewayClient::new(config.base_url()?, &authorization, &config.api_version)
    }

    pub fn header(mut self, key: &HeaderName, value: &HeaderValue) -> Self {
        self.headers.insert(key, value.to_owned());
        self
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, GatewayError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let url = self.base_url.join(path)?;

        #[cfg(feature = "tracing")]
        tracing::debug!("POST {url}");

        let request = self
            .client
            .post(url)
            .headers(self.headers.clone())
            .json(body);
        self.send(request).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, GatewayError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if status.is_success() {
            return Ok(serde_json::from_slice(&body)?);
        }

        #[cfg(feature = "tracing")]
        tracing::warn!("Gateway request failed: status={status}");

        match serde_json::from_slice::<ApiError>(&body) {
            Ok(api_error) => Err(GatewayError::Api(api_error)),
            Err(_) => Err(GatewayError::UnexpectedStatus {
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            }),
        }
    }
}

impl PaymentApi for GatewayClient {
    type Error = GatewayError;

    async fn payment(&self, request: &PaymentRequest) -> Result<Receipt, Self::Error> {
        self.post("transactions/payments", request).await
    }

    async fn token_payment(
        &self,
        request: &TokenPaymentRequest,
    ) -> Result<Receipt, Self::Error> {
        self.post("transactions/payments", request).await
    }

    async fn pre_auth(&self, request: &PaymentRequest) -> Result<Receipt, Self::Error> {
        self.post("transactions/preauths", request).await
    }

    async fn register_card(&self, request: &PaymentRequest) -> Result<Receipt, Self::Error> {
        self.post("transactions/registercard", request).await
    }

    async fn collection(&self, request: &CollectionRequest) -> Result<Receipt, Self::Error> {
        request.validate()?;
        self.post("transactions/collections", request).await
    }

    async fn refund(&self, request: &RefundRequest) -> Result<Receipt, Self::Error> {
        request.validate()?;
        self.post("transactions/refunds", request).await
    }

    async fn complete_3ds(
        &self,
        receipt_id: &str,
        result: &CardVerificationResult,
    ) -> Result<Receipt, Self::Error> {
        let url = self.base_url.join(&format!("transactions/{receipt_id}"))?;

        #[cfg(feature = "tracing")]
        tracing::debug!("PUT {url}");

        let request = self
            .client
            .put(url)
            .headers(self.headers.clone())
            .json(result);
        self.send(request).await
    }

    async fn google_pay_payment(
        &self,
        request: &GooglePayRequest,
    ) -> Result<Receipt, Self::Error> {
        request.validate()?;
        self.post("transactions/payments", request).await
    }
}

impl BankApi for GatewayClient {
    type Error = GatewayError;

    async fn sale(&self, request: &IdealSaleRequest) -> Result<IdealSaleResponse, Self::Error> {
        request.validate()?;
        self.post("order/bank/sale", request).await
    }

    async fn status(&self, order_id: &str) -> Result<BankSaleStatusResponse, Self::Error> {
        let url = self
            .base_url
            .join(&format!("order/bank/statusrequest/{order_id}"))?;

        #[cfg(feature = "tracing")]
        tracing::debug!("GET {url}");

        let request = self.client.get(url).headers(self.headers.clone());
        self.send(request).await
    }
}
