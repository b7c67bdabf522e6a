//! Shipment line model and source boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lastmile_core::{DomainResult, OrderId, ProductCode};

/// One shipped product row of a packed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentLineItem {
    pub order_id: OrderId,
    pub product_code: ProductCode,
    pub product_name: Option<String>,
    pub quantity_shipped: i64,
    pub packed_at: Option<DateTime<Utc>>,
}

/// Read-only boundary into the shipment subsystem.
pub trait ShipmentLineSource: Send + Sync {
    /// Shipped lines for an order, in packing order.
    fn line_items(&self, order_id: OrderId) -> DomainResult<Vec<ShipmentLineItem>>;
}

impl<S: ShipmentLineSource + ?Sized> ShipmentLineSource for std::sync::Arc<S> {
    fn line_items(&self, order_id: OrderId) -> DomainResult<Vec<ShipmentLineItem>> {
        (**self).line_items(order_id)
    }
}
