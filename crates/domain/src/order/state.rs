//! Order status state machine.

use serde::{Deserialize, Serialize};

use super::OrderError;

/// The processing status of an order.
///
/// Status transitions:
/// ```text
/// Pending ──┬──► Completed
///           └──► PaymentFailed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order is persisted and awaiting the payment outcome.
    #[default]
    Pending,

    /// Payment succeeded (terminal state).
    Completed,

    /// Payment was rejected or the processor could not be reached (terminal state).
    PaymentFailed,
}

impl OrderStatus {
    /// Returns the terminal status that follows a payment attempt.
    pub fn after_payment(succeeded: bool) -> Self {
        if succeeded {
            OrderStatus::Completed
        } else {
            OrderStatus::PaymentFailed
        }
    }

    /// Returns true if an order in this status may move to `next`.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Pending, OrderStatus::Completed)
                | (OrderStatus::Pending, OrderStatus::PaymentFailed)
        )
    }

    /// Returns true if this is a terminal status (no further transitions possible).
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::PaymentFailed)
    }

    /// Returns the status name as stored and serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Completed => "completed",
            OrderStatus::PaymentFailed => "payment_failed",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "completed" => Ok(OrderStatus::Completed),
            "payment_failed" => Ok(OrderStatus::PaymentFailed),
            other => Err(OrderError::UnknownStatus {
                value: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_status_is_pending() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }

    #[test]
    fn test_pending_transitions() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Completed));
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::PaymentFailed));
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Pending));
    }

    #[test]
    fn test_no_transition_out_of_terminal_statuses() {
        for terminal in [OrderStatus::Completed, OrderStatus::PaymentFailed] {
            assert!(!terminal.can_transition_to(OrderStatus::Pending));
            assert!(!terminal.can_transition_to(OrderStatus::Completed));
            assert!(!terminal.can_transition_to(OrderStatus::PaymentFailed));
        }
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(OrderStatus::Completed.is_terminal());
        assert!(OrderStatus::PaymentFailed.is_terminal());
    }

    #[test]
    fn test_after_payment() {
        assert_eq!(OrderStatus::after_payment(true), OrderStatus::Completed);
        assert_eq!(OrderStatus::after_payment(false), OrderStatus::PaymentFailed);
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::PaymentFailed).unwrap(),
            "\"payment_failed\""
        );
        assert_eq!(OrderStatus::Completed.to_string(), "completed");
        assert_eq!(
            "payment_failed".parse::<OrderStatus>().unwrap(),
            OrderStatus::PaymentFailed
        );
        assert!(matches!(
            "shipped".parse::<OrderStatus>(),
            Err(OrderError::UnknownStatus { .. })
        ));
    }
}
