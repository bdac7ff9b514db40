//! Card-entry field validators.
//!
//! These run locally on every form change and never reach the network. The
//! date validators take `today` explicitly; the `*_now` variants use the
//! current UTC date.

use std::sync::LazyLock;

use regex::Regex;
use time::{Date, OffsetDateTime};

use crate::card_network::CardNetwork;

/// How far ahead an expiry date may be, in years.
pub const MAX_EXPIRY_YEARS_AHEAD: i32 = 10;

static MONTH_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(0[1-9]|1[0-2])/([0-9]{2})$").expect("MONTH_YEAR: invalid regex pattern")
});

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Card number must contain digits only")]
    CardNumberNotNumeric,

    #[error("Card number is invalid")]
    CardNumberInvalid,

    #[error("{0} is not supported")]
    NetworkNotSupported(CardNetwork),

    #[error("Cardholder name is too short")]
    HolderNameTooShort,

    #[error("Date must be in MM/YY format: '{0}'")]
    DateFormat(String),

    #[error("Expiry date is in the past")]
    ExpiryDateInPast,

    #[error("Expiry date is too far in the future")]
    ExpiryDateTooFarInFuture,

    #[error("Start date must be in the past")]
    StartDateNotInPast,

    #[error("{name} must be {expected} digits")]
    SecurityCodeInvalid { name: &'static str, expected: usize },

    #[error("Issue number is invalid")]
    IssueNumberInvalid,
}

/// Validate a card number and return its network.
///
/// Spaces are ignored. An empty `supported` list accepts every network.
pub fn validate_card_number(
    number: &str,
    supported: &[CardNetwork],
) -> Result<CardNetwork, ValidationError> {
    let digits: String = number.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::CardNumberNotNumeric);
    }

    let network = CardNetwork::of_number(&digits);
    if !supported.is_empty() && !supported.contains(&network) {
        return Err(ValidationError::NetworkNotSupported(network));
    }

    let length_ok = match network {
        CardNetwork::Other => (12..=19).contains(&digits.len()),
        _ => digits.len() == network.card_number_max_length(),
    };
    if !length_ok || !luhn::valid(&digits) {
        return Err(ValidationError::CardNumberInvalid);
    }

    Ok(network)
}

pub fn validate_holder_name(name: &str) -> Result<(), ValidationError> {
    if name.chars().count() > 3 {
        Ok(())
    } else {
        Err(ValidationError::HolderNameTooShort)
    }
}

pub fn validate_security_code(code: &str, network: CardNetwork) -> Result<(), ValidationError> {
    let expected = network.security_code_length();
    if code.len() == expected && code.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::SecurityCodeInvalid {
            name: network.security_code_name(),
            expected,
        })
    }
}

pub fn validate_issue_number(issue_number: &str) -> Result<(), ValidationError> {
    match issue_number.parse::<i32>() {
        Ok(n) if n > 0 => Ok(()),
        _ => Err(ValidationError::IssueNumberInvalid),
    }
}

/// Parse `MM/YY` into `(year, month)`, with years in the 2000s.
pub fn parse_month_year(value: &str) -> Result<(i32, u8), ValidationError> {
    let format_error = || ValidationError::DateFormat(value.to_string());
    let captures = MONTH_YEAR.captures(value).ok_or_else(format_error)?;

    let month = captures[1].parse::<u8>().map_err(|_| format_error())?;
    let year = captures[2].parse::<i32>().map_err(|_| format_error())?;
    Ok((2000 + year, month))
}

/// A card expires at the end of its expiry month.
pub fn validate_expiry_date(value: &str, today: Date) -> Result<(), ValidationError> {
    let (year, month) = parse_month_year(value)?;
    let current = (today.year(), u8::from(today.month()));

    if (year, month) < current {
        return Err(ValidationError::ExpiryDateInPast);
    }
    if year > today.year() + MAX_EXPIRY_YEARS_AHEAD {
        return Err(ValidationError::ExpiryDateTooFarInFuture);
    }
    Ok(())
}

/// A start date is valid once the first day of its month is before today.
pub fn validate_start_date(value: &str, today: Date) -> Result<(), ValidationError> {
    let (year, month) = parse_month_year(value)?;
    let current = (today.year(), u8::from(today.month()), today.day());

    if (year, month, 1) < current {
        Ok(())
    } else {
        Err(ValidationError::StartDateNotInPast)
    }
}

pub fn validate_expiry_date_now(value: &str) -> Result<(), ValidationError> {
    validate_expiry_date(value, OffsetDateTime::now_utc().date())
}

pub fn validate_start_date_now(value: &str) -> Result<(), ValidationError> {
    validate_start_date(value, OffsetDateTime::now_utc().date())
}
