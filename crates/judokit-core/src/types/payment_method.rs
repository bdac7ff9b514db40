use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Card,
    GooglePay,
    Ideal,
    PayByBank,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Card,
        PaymentMethod::GooglePay,
        PaymentMethod::Ideal,
        PaymentMethod::PayByBank,
    ];

    /// Whether the method settles through a bank redirect and needs status polling.
    pub fn is_bank_redirect(&self) -> bool {
        matches!(self, PaymentMethod::Ideal | PaymentMethod::PayByBank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_method_wire_names() {
        assert_eq!(
            serde_json::to_string(&PaymentMethod::GooglePay).unwrap(),
            "\"GOOGLE_PAY\""
        );
        let method: PaymentMethod = serde_json::from_str("\"PAY_BY_BANK\"").unwrap();
        assert_eq!(method, PaymentMethod::PayByBank);
        assert!(method.is_bank_redirect());
        assert!(!PaymentMethod::Card.is_bank_redirect());
    }
}
