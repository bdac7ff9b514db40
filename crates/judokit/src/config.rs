use base64::{Engine, prelude::BASE64_STANDARD};
use bon::Builder;
use judokit_core::{
    card_network::CardNetwork,
    types::{AmountValue, Currency, PaymentMethod, Record},
};
use url::Url;

pub const SANDBOX_URL: &str = "https://gw1.judopay-sandbox.com/";
pub const LIVE_URL: &str = "https://gw1.judopay.com/";

/// Gateway API version sent with every request.
pub const DEFAULT_API_VERSION: &str = "5.2.0";

/// Page the ACS is told to redirect to once the challenge completes.
pub const DEFAULT_REDIRECT_URL: &str = "https://pay.judopay.com/Android/Parse3DS";

/// Name under which the JSON bridge is exposed to page scripts.
pub const DEFAULT_JS_NAMESPACE: &str = "JudoPay";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Sandbox,
    Live,
    Custom(Url),
}

impl Environment {
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        match self {
            Environment::Sandbox => Ok(Url::parse(SANDBOX_URL)?),
            Environment::Live => Ok(Url::parse(LIVE_URL)?),
            Environment::Custom(url) => Ok(url.clone()),
        }
    }
}

/// API token and secret pair.
#[derive(Builder, Clone, PartialEq, Eq)]
pub struct Credentials {
    #[builder(into)]
    pub token: String,
    #[builder(into)]
    pub secret: String,
}

impl Credentials {
    /// `Basic base64(token:secret)`.
    pub fn authorization(&self) -> Result<String, ConfigError> {
        if self.token.is_empty() {
            return Err(ConfigError::MissingApiToken);
        }
        if self.secret.is_empty() {
            return Err(ConfigError::MissingApiSecret);
        }
        let encoded = BASE64_STANDARD.encode(format!("{}:{}", self.token, self.secret));
        Ok(format!("Basic {encoded}"))
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &self.token)
            .field("secret", &"[redacted]")
            .finish()
    }
}

#[derive(Builder, Debug, Clone, PartialEq, Eq)]
pub struct Amount {
    #[builder(into)]
    pub amount: AmountValue,
    pub currency: Currency,
}

#[derive(Builder, Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    #[builder(into)]
    pub consumer_reference: String,
    #[builder(into)]
    pub payment_reference: String,
    pub metadata: Option<Record<String>>,
}

/// Configuration of a single payment attempt.
#[derive(Builder, Debug, Clone)]
pub struct JudoConfig {
    /// Merchant or sub-account identifier.
    #[builder(into)]
    pub judo_id: String,
    pub credentials: Credentials,
    #[builder(default)]
    pub environment: Environment,
    pub amount: Amount,
    pub reference: Reference,
    /// Card networks accepted by the card-entry form. Empty accepts all.
    #[builder(default)]
    pub supported_networks: Vec<CardNetwork>,
    #[builder(default = PaymentMethod::ALL.to_vec())]
    pub payment_methods: Vec<PaymentMethod>,
    #[builder(into, default = DEFAULT_API_VERSION.to_string())]
    pub api_version: String,
    #[builder(into, default = DEFAULT_REDIRECT_URL.to_string())]
    pub redirect_url: String,
    #[builder(into, default = DEFAULT_JS_NAMESPACE.to_string())]
    pub js_namespace: String,
    /// Identifier of the host app registered for 3-D Secure 2.
    #[builder(into)]
    pub sdk_app_id: Option<String>,
}

impl JudoConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.judo_id.trim().is_empty() {
            return Err(ConfigError::MissingJudoId);
        }
        self.credentials.authorization()?;
        if self.reference.consumer_reference.trim().is_empty() {
            return Err(ConfigError::MissingConsumerReference);
        }
        if self.reference.payment_reference.trim().is_empty() {
            return Err(ConfigError::MissingPaymentReference);
        }
        if self.payment_methods.is_empty() {
            return Err(ConfigError::NoPaymentMethods);
        }
        Url::parse(&self.redirect_url)?;
        self.environment.base_url()?;
        Ok(())
    }

    pub fn base_url(&self) -> Result<Url, ConfigError> {
        self.environment.base_url()
    }

    pub fn is_supported(&self, network: CardNetwork) -> bool {
        self.supported_networks.is_empty() || self.supported_networks.contains(&network)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Judo ID not specified")]
    MissingJudoId,

    #[error("Judo Payments API Token not specified")]
    MissingApiToken,

    #[error("Judo Payments API Secret not specified")]
    MissingApiSecret,

    #[error("Consumer reference not specified")]
    MissingConsumerReference,

    #[error("Payment reference not specified")]
    MissingPaymentReference,

    #[error("No payment methods enabled")]
    NoPaymentMethods,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),
}
