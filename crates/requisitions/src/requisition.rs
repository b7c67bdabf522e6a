//! Requisition model and source boundary.

use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use lastmile_core::{
    DomainError, DomainResult, FacilityId, OrderId, PeriodId, ProductCode, ProgramId,
};

/// Requisition identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequisitionId(Uuid);

impl RequisitionId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for RequisitionId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for RequisitionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for RequisitionId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid = Uuid::from_str(s).map_err(|_| DomainError::MalformedId)?;
        Ok(Self(uuid))
    }
}

/// One product row of a requisition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequisitionLineItem {
    pub product_code: ProductCode,
    pub product_name: Option<String>,
    /// Quantity approved for shipment, in packs.
    pub packs_to_ship: i64,
}

/// The approved request record: header + ordered line items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requisition {
    pub id: RequisitionId,
    pub facility_id: FacilityId,
    pub program_id: ProgramId,
    pub period_id: PeriodId,
    pub approved_at: Option<DateTime<Utc>>,
    pub line_items: Vec<RequisitionLineItem>,
}

impl Requisition {
    /// All line items, in requisition order.
    pub fn all_line_items(&self) -> &[RequisitionLineItem] {
        &self.line_items
    }
}

/// Read-only boundary into the requisition subsystem.
///
/// Returns the full requisition (header plus every line item) for the
/// requisition an order was converted from. Orders and their source
/// requisitions share identity in this system, so lookup is by order id.
pub trait RequisitionSource: Send + Sync {
    fn full_requisition_by_order(&self, order_id: OrderId) -> DomainResult<Requisition>;
}

impl<S: RequisitionSource + ?Sized> RequisitionSource for std::sync::Arc<S> {
    fn full_requisition_by_order(&self, order_id: OrderId) -> DomainResult<Requisition> {
        (**self).full_requisition_by_order(order_id)
    }
}
