use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::Error;

/// A decimal amount in major currency units, kept as its exact textual form.
///
/// The gateway accepts amounts as strings and returns them as JSON numbers;
/// both shapes deserialize into the same value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AmountValue(String);

impl AmountValue {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.chars().all(|c| c == '0' || c == '.')
    }
}

impl FromStr for AmountValue {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (whole, fraction) = match s.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (s, None),
        };

        let digits = |part: &str| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit());

        if digits(whole) && fraction.is_none_or(digits) {
            Ok(AmountValue(s.to_string()))
        } else {
            Err(Error::InvalidAmount(s.to_string()))
        }
    }
}

impl From<u32> for AmountValue {
    fn from(value: u32) -> Self {
        AmountValue(value.to_string())
    }
}

impl From<u64> for AmountValue {
    fn from(value: u64) -> Self {
        AmountValue(value.to_string())
    }
}

impl Display for AmountValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for AmountValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for AmountValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(s) => s,
            serde_json::Value::Number(n) => n.to_string(),
            other => {
                return Err(serde::de::Error::custom(format!(
                    "expected an amount, found {other}"
                )));
            }
        };
        AmountValue::from_str(&raw).map_err(serde::de::Error::custom)
    }
}
