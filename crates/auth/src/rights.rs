//! Fulfillment rights catalogue.

use serde::{Deserialize, Serialize};

/// A named capability checked per user per facility/order.
///
/// Rights are granted out-of-band (role administration is not part of this
/// core); the domain only ever asks "does this user hold this right here".
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Right {
    /// Create, edit and submit proofs of delivery.
    ManagePod,
    /// Pack and ship released orders.
    ManageShipment,
    /// Read access to orders of the facility.
    ViewOrder,
}

impl Right {
    /// Stable name used in grants and audit records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Right::ManagePod => "fulfillment.pod.manage",
            Right::ManageShipment => "fulfillment.shipment.manage",
            Right::ViewOrder => "fulfillment.order.view",
        }
    }
}

impl core::fmt::Display for Right {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
