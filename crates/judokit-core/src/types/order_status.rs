use serde::{Deserialize, Serialize};

/// Status of a bank-redirect order as reported by the gateway.
///
/// Any value the SDK does not recognise deserializes into
/// [`OrderStatus::Other`], which is terminal and never successful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Succeeded,
    Pending,
    Failed,
    Timeout,
    NetworkError,
    #[serde(other)]
    Other,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Succeeded => "SUCCEEDED",
            OrderStatus::Pending => "PENDING",
            OrderStatus::Failed => "FAILED",
            OrderStatus::Timeout => "TIMEOUT",
            OrderStatus::NetworkError => "NETWORK_ERROR",
            OrderStatus::Other => "OTHER",
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, OrderStatus::Pending)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, OrderStatus::Succeeded)
    }

    pub fn is_terminal(&self) -> bool {
        !self.is_pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_wire_names() {
        let status: OrderStatus = serde_json::from_str("\"SUCCEEDED\"").unwrap();
        assert_eq!(status, OrderStatus::Succeeded);

        let status: OrderStatus = serde_json::from_str("\"NETWORK_ERROR\"").unwrap();
        assert_eq!(status, OrderStatus::NetworkError);

        assert_eq!(
            serde_json::to_string(&OrderStatus::Pending).unwrap(),
            "\"PENDING\""
        );
    }

    #[test]
    fn test_unknown_status_is_terminal_failure() {
        let status: OrderStatus = serde_json::from_str("\"EXPIRED\"").unwrap();
        assert_eq!(status, OrderStatus::Other);
        assert!(status.is_terminal());
        assert!(!status.is_success());
    }
}
