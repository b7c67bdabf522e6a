//! Order status lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lastmile_core::{Entity, OrderId};

/// Order fulfillment status.
///
/// RECEIVED is terminal and doubles as the "POD submitted" marker; there is
/// no separate POD status field anywhere in the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Released,
    ReadyToPack,
    Packed,
    InRoute,
    TransferFailed,
    Received,
}

impl OrderStatus {
    /// Whether `self -> next` is an allowed fulfillment transition.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        match (self, next) {
            // Any live order can be receipted.
            (Released | ReadyToPack | Packed | InRoute | TransferFailed, Received) => true,
            (Released, ReadyToPack) => true,
            (ReadyToPack, Packed) => true,
            (Packed, InRoute) => true,
            (InRoute, TransferFailed) => true,
            // Failed transfers are re-dispatched.
            (TransferFailed, InRoute) => true,
            _ => false,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Received)
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            OrderStatus::Released => "released",
            OrderStatus::ReadyToPack => "ready_to_pack",
            OrderStatus::Packed => "packed",
            OrderStatus::InRoute => "in_route",
            OrderStatus::TransferFailed => "transfer_failed",
            OrderStatus::Received => "received",
        };
        f.write_str(name)
    }
}

/// Point-in-time snapshot of an order, as seen by the fulfillment side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub status: OrderStatus,
    pub status_changed_at: DateTime<Utc>,
}

impl Order {
    pub fn new(id: OrderId, status: OrderStatus) -> Self {
        Self {
            id,
            status,
            status_changed_at: Utc::now(),
        }
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> Option<&OrderId> {
        Some(&self.id)
    }
}
