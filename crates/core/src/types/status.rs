//! Order status lifecycle.

use serde::{Deserialize, Serialize};

/// Lifecycle stage of a customer order.
///
/// Statuses form a strictly linear chain:
/// `Inquiry -> OnTrack -> PaymentDone -> Completed`. There are no
/// back-transitions and no branching; `Completed` is terminal. Every
/// status-changing operation must route through [`OrderStatus::next`] rather
/// than accept an arbitrary target, so stages cannot be skipped or regressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// A new customer inquiry, not yet picked up by an operator.
    #[default]
    Inquiry,
    /// The order is being processed.
    OnTrack,
    /// Payment has been received.
    PaymentDone,
    /// The order is finished; no further transitions.
    Completed,
}

/// Display metadata for a status, consumed by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusInfo {
    /// Heading shown for the status bucket.
    pub title: &'static str,
    /// Label of the action that advances an order to the next status.
    /// `None` for the terminal status.
    pub action_label: Option<&'static str>,
}

impl OrderStatus {
    /// All statuses in lifecycle order. Bucket presentation follows this
    /// ordering.
    pub const ALL: [Self; 4] = [
        Self::Inquiry,
        Self::OnTrack,
        Self::PaymentDone,
        Self::Completed,
    ];

    /// The next status in the chain, or `None` once `Completed`.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Inquiry => Some(Self::OnTrack),
            Self::OnTrack => Some(Self::PaymentDone),
            Self::PaymentDone => Some(Self::Completed),
            Self::Completed => None,
        }
    }

    /// Whether no further transition is possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Display metadata for this status.
    #[must_use]
    pub const fn info(self) -> StatusInfo {
        match self {
            Self::Inquiry => StatusInfo {
                title: "Inquiry Received",
                action_label: Some("Start Processing"),
            },
            Self::OnTrack => StatusInfo {
                title: "On Track",
                action_label: Some("Mark Payment Done"),
            },
            Self::PaymentDone => StatusInfo {
                title: "Payment Done",
                action_label: Some("Complete Order"),
            },
            Self::Completed => StatusInfo {
                title: "Complete Order",
                action_label: None,
            },
        }
    }

    /// Coerce a raw document value into the fixed status set.
    ///
    /// Missing and unrecognized values map to `Inquiry`. This is the single
    /// lenient entry point, used at the store boundary; no consumer past
    /// normalization ever observes an out-of-set status.
    #[must_use]
    pub fn normalize(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.parse().ok()).unwrap_or_default()
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inquiry => write!(f, "inquiry"),
            Self::OnTrack => write!(f, "on_track"),
            Self::PaymentDone => write!(f, "payment_done"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inquiry" => Ok(Self::Inquiry),
            "on_track" => Ok(Self::OnTrack),
            "payment_done" => Ok(Self::PaymentDone),
            "completed" => Ok(Self::Completed),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_from_inquiry_visits_each_stage_once() {
        let mut visited = Vec::new();
        let mut current = OrderStatus::Inquiry;
        while let Some(next) = current.next() {
            visited.push(next);
            current = next;
        }

        assert_eq!(
            visited,
            vec![
                OrderStatus::OnTrack,
                OrderStatus::PaymentDone,
                OrderStatus::Completed
            ]
        );
    }

    #[test]
    fn test_completed_is_terminal() {
        assert_eq!(OrderStatus::Completed.next(), None);
        assert!(OrderStatus::Completed.is_terminal());
        assert!(!OrderStatus::Inquiry.is_terminal());
        assert!(!OrderStatus::OnTrack.is_terminal());
        assert!(!OrderStatus::PaymentDone.is_terminal());
    }

    #[test]
    fn test_normalize_falls_back_to_inquiry() {
        assert_eq!(OrderStatus::normalize(None), OrderStatus::Inquiry);
        assert_eq!(OrderStatus::normalize(Some("shipped")), OrderStatus::Inquiry);
        assert_eq!(OrderStatus::normalize(Some("")), OrderStatus::Inquiry);
        assert_eq!(
            OrderStatus::normalize(Some("payment_done")),
            OrderStatus::PaymentDone
        );
    }

    #[test]
    fn test_display_from_str_round_trip() {
        for status in OrderStatus::ALL {
            let parsed: OrderStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
        assert!("SHIPPED".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_only_terminal_status_lacks_an_action() {
        for status in OrderStatus::ALL {
            assert_eq!(status.info().action_label.is_none(), status.is_terminal());
        }
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&OrderStatus::OnTrack).unwrap();
        assert_eq!(json, "\"on_track\"");
        let status: OrderStatus = serde_json::from_str("\"completed\"").unwrap();
        assert_eq!(status, OrderStatus::Completed);
    }
}
