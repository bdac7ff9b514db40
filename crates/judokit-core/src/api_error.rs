//! Structured error body returned by the judo gateway.
//!
//! ```json
//! {
//!   "code": 1,
//!   "category": 2,
//!   "message": "Sorry, we're unable to process your request. Please check your details and try again.",
//!   "details": [
//!     { "code": 30, "message": "Sorry, but the card number you've entered isn't valid.", "fieldName": "cardNumber" }
//!   ]
//! }
//! ```

use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    pub code: i32,
    pub category: i32,
    pub message: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub details: Vec<ApiErrorDetail>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorDetail {
    pub code: i32,
    pub message: String,
    pub field_name: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<ApiErrorDetail>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<ApiErrorDetail>>::deserialize(deserializer)?.unwrap_or_default())
}

impl ApiError {
    pub fn detail_for(&self, field_name: &str) -> Option<&ApiErrorDetail> {
        self.details.iter().find(|d| d.field_name == field_name)
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ApiError(code={}, category={}, message='{}')",
            self.code, self.category, self.message
        )
    }
}

impl std::error::Error for ApiError {}
