//! Card brand classification.
//!
//! [`CardNetwork::of_number`] runs on every keystroke of the card-number
//! field, so it is a pure function over precompiled tables. Candidates are
//! tried in a fixed order, prefix lists before patterns, and the first match
//! wins. The order matters where ranges overlap: a `50xx` number is claimed by
//! Mastercard before the Maestro table is consulted.

use std::{fmt::Display, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CARD_NUMBER_MASK: &str = "#### #### #### ####";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardNetwork {
    Visa,
    Mastercard,
    Maestro,
    Amex,
    ChinaUnionPay,
    Jcb,
    Discover,
    DinersClub,
    Other,
}

struct Matcher {
    network: CardNetwork,
    prefixes: &'static [&'static str],
    pattern: Option<&'static str>,
}

/// Classification order.
const MATCHERS: &[Matcher] = &[
    Matcher {
        network: CardNetwork::Visa,
        prefixes: &["4"],
        pattern: Some("^4[0-9]{3}.*?"),
    },
    Matcher {
        network: CardNetwork::Mastercard,
        prefixes: &["50", "51", "52", "53", "54", "55"],
        pattern: Some("^5[1-5][0-9]{2}.*?"),
    },
    Matcher {
        network: CardNetwork::Maestro,
        prefixes: &[],
        pattern: Some(
            "^(5018|5020|5038|6304|6759|6761|6763|6334|6767|4903|4905|4911|4936|5641 82|6331 10|6333|5600|5602|5603|5610|5611|5656|6700|6706|6775|6709|6771|6773).*?",
        ),
    },
    Matcher {
        network: CardNetwork::Amex,
        prefixes: &["34", "37"],
        pattern: Some("^3[47][0-9]{2}.*?"),
    },
    Matcher {
        network: CardNetwork::Discover,
        prefixes: &[],
        pattern: Some(
            "^65.*?|64[4-9].*?|6011.*?|(622(1 2[6-9].*?|1 [3-9][0-9].*?|[2-8] [0-9][0-9].*?|9 [01][0-9].*?|9 2[0-5].*?).*?)",
        ),
    },
    Matcher {
        network: CardNetwork::DinersClub,
        prefixes: &[],
        pattern: Some("^(30[0-5]|309|36|38|39).*?"),
    },
    Matcher {
        network: CardNetwork::Jcb,
        prefixes: &[],
        pattern: Some("^(35[2-8][0-9]).*?"),
    },
    Matcher {
        network: CardNetwork::ChinaUnionPay,
        prefixes: &["62"],
        pattern: None,
    },
];

/// Patterns compiled once, anchored so that they must match the whole input.
static COMPILED: LazyLock<Vec<Option<Regex>>> = LazyLock::new(|| {
    MATCHERS
        .iter()
        .map(|m| {
            m.pattern.map(|p| {
                Regex::new(&format!("^(?:{p})$")).expect("MATCHERS: invalid regex pattern")
            })
        })
        .collect()
});

impl CardNetwork {
    pub const ALL: [CardNetwork; 9] = [
        CardNetwork::Visa,
        CardNetwork::Mastercard,
        CardNetwork::Maestro,
        CardNetwork::Amex,
        CardNetwork::ChinaUnionPay,
        CardNetwork::Jcb,
        CardNetwork::Discover,
        CardNetwork::DinersClub,
        CardNetwork::Other,
    ];

    /// Classify a (possibly partial) card number.
    pub fn of_number(number: &str) -> CardNetwork {
        MATCHERS
            .iter()
            .zip(COMPILED.iter())
            .find(|(matcher, regex)| {
                matcher.prefixes.iter().any(|p| number.starts_with(p))
                    || regex.as_ref().is_some_and(|r| r.is_match(number))
            })
            .map(|(matcher, _)| matcher.network)
            .unwrap_or(CardNetwork::Other)
    }

    /// Map a gateway card type identifier to a network.
    pub fn with_identifier(id: i32) -> CardNetwork {
        match id {
            // Visa, Visa Electron, Visa Debit
            1 | 3 | 11 => CardNetwork::Visa,
            2 => CardNetwork::Mastercard,
            10 => CardNetwork::Maestro,
            8 => CardNetwork::Amex,
            7 => CardNetwork::ChinaUnionPay,
            9 => CardNetwork::Jcb,
            12 => CardNetwork::Discover,
            13 => CardNetwork::DinersClub,
            _ => CardNetwork::Other,
        }
    }

    pub fn type_id(&self) -> i32 {
        match self {
            CardNetwork::Visa => 1,
            CardNetwork::Mastercard => 2,
            CardNetwork::Maestro => 10,
            CardNetwork::Amex => 8,
            CardNetwork::ChinaUnionPay => 7,
            CardNetwork::Jcb => 9,
            CardNetwork::Discover => 12,
            CardNetwork::DinersClub => 13,
            CardNetwork::Other => -1,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CardNetwork::Visa => "Visa",
            CardNetwork::Mastercard => "Master Card",
            CardNetwork::Maestro => "Maestro",
            CardNetwork::Amex => "AmEx",
            CardNetwork::ChinaUnionPay => "China UnionPay",
            CardNetwork::Jcb => "JCB",
            CardNetwork::Discover => "Discover",
            CardNetwork::DinersClub => "Diners Club",
            CardNetwork::Other => "Unknown Card Network",
        }
    }

    pub fn card_number_mask(&self) -> &'static str {
        match self {
            CardNetwork::Amex => "#### ###### #####",
            CardNetwork::DinersClub => "#### ###### ####",
            _ => DEFAULT_CARD_NUMBER_MASK,
        }
    }

    pub fn card_number_max_length(&self) -> usize {
        match self {
            CardNetwork::Amex => 15,
            CardNetwork::DinersClub => 14,
            _ => 16,
        }
    }

    pub fn security_code_length(&self) -> usize {
        match self {
            CardNetwork::Amex => 4,
            _ => 3,
        }
    }

    pub fn security_code_mask(&self) -> &'static str {
        match self {
            CardNetwork::Amex => "####",
            _ => "###",
        }
    }

    pub fn security_code_name(&self) -> &'static str {
        match self {
            CardNetwork::Amex => "CID",
            CardNetwork::Visa => "CVV2",
            CardNetwork::Mastercard => "CVC2",
            CardNetwork::ChinaUnionPay => "CVN2",
            CardNetwork::Jcb => "CAV2",
            _ => "CVV",
        }
    }

    pub fn is_supported_by_google_pay(&self) -> bool {
        matches!(
            self,
            CardNetwork::Visa
                | CardNetwork::Mastercard
                | CardNetwork::Amex
                | CardNetwork::Discover
                | CardNetwork::Maestro
                | CardNetwork::Jcb
        )
    }

    /// Format the digits of `number` according to this network's mask.
    ///
    /// Non-digit characters are dropped and digits beyond the mask are ignored.
    pub fn format_number(&self, number: &str) -> String {
        let mut digits = number.chars().filter(char::is_ascii_digit);
        let mut formatted = String::new();
        for slot in self.card_number_mask().chars() {
            if slot == '#' {
                match digits.next() {
                    Some(d) => formatted.push(d),
                    None => break,
                }
            } else {
                formatted.push(slot);
            }
        }
        formatted.trim_end().to_string()
    }
}

impl Display for CardNetwork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_compile() {
        for (matcher, regex) in MATCHERS.iter().zip(COMPILED.iter()) {
            assert_eq!(matcher.pattern.is_some(), regex.is_some());
        }
    }

    #[test]
    fn test_identifier_round_trip() {
        for network in CardNetwork::ALL {
            assert_eq!(CardNetwork::with_identifier(network.type_id()), network);
        }
        assert_eq!(CardNetwork::with_identifier(3), CardNetwork::Visa);
        assert_eq!(CardNetwork::with_identifier(11), CardNetwork::Visa);
        assert_eq!(CardNetwork::with_identifier(42), CardNetwork::Other);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(
            CardNetwork::Visa.format_number("4111111111111111"),
            "4111 1111 1111 1111"
        );
        assert_eq!(
            CardNetwork::Amex.format_number("340000000000009"),
            "3400 000000 00009"
        );
        assert_eq!(CardNetwork::Visa.format_number("41111"), "4111 1");
        assert_eq!(CardNetwork::Visa.format_number("4111"), "4111");
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(
            serde_json::to_string(&CardNetwork::ChinaUnionPay).unwrap(),
            "\"CHINA_UNION_PAY\""
        );
        assert_eq!(
            serde_json::to_string(&CardNetwork::DinersClub).unwrap(),
            "\"DINERS_CLUB\""
        );
    }
}
