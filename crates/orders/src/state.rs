use serde::{Deserialize, Serialize};

/// Order lifecycle.
///
/// Variants are declared in the sequence an order normally progresses, so the
/// derived `Ord` follows the lifecycle. Labels written by the legacy store are
/// accepted on input and never produced on output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderState {
    #[serde(alias = "Pendiente")]
    Pending,
    #[serde(alias = "En preparación")]
    InPreparation,
    #[serde(alias = "Listo")]
    Ready,
    #[serde(alias = "En camino")]
    OutForDelivery,
    #[serde(alias = "Entregado")]
    Delivered,
}

impl OrderState {
    pub const ALL: [OrderState; 5] = [
        OrderState::Pending,
        OrderState::InPreparation,
        OrderState::Ready,
        OrderState::OutForDelivery,
        OrderState::Delivered,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderState::Pending => "pending",
            OrderState::InPreparation => "in_preparation",
            OrderState::Ready => "ready",
            OrderState::OutForDelivery => "out_for_delivery",
            OrderState::Delivered => "delivered",
        }
    }
}

impl core::fmt::Display for OrderState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_follows_lifecycle() {
        let mut sorted = OrderState::ALL;
        sorted.reverse();
        sorted.sort();
        assert_eq!(sorted, OrderState::ALL);
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&OrderState::OutForDelivery).unwrap();
        assert_eq!(json, "\"out_for_delivery\"");
    }

    #[test]
    fn accepts_legacy_labels() {
        let state: OrderState = serde_json::from_str("\"En preparación\"").unwrap();
        assert_eq!(state, OrderState::InPreparation);
        let state: OrderState = serde_json::from_str("\"Entregado\"").unwrap();
        assert_eq!(state, OrderState::Delivered);
    }

    #[test]
    fn rejects_unknown_values() {
        assert!(serde_json::from_str::<OrderState>("\"cancelled\"").is_err());
        assert!(serde_json::from_str::<OrderState>("\"Pending\"").is_err());
    }

    #[test]
    fn display_matches_wire_form() {
        for state in OrderState::ALL {
            let json = serde_json::to_string(&state).unwrap();
            assert_eq!(json, format!("\"{state}\""));
        }
    }
}
