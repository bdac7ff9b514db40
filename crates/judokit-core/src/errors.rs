#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Serde JSON error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),

    #[error("Invalid amount: '{0}'")]
    InvalidAmount(String),

    #[error("Invalid currency code: '{0}'")]
    InvalidCurrency(String),

    #[error("No JSON object found in the card verification page")]
    MissingVerificationJson,
}

pub type Result<T> = std::result::Result<T, Error>;
