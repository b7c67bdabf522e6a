//! The `OrderPod` aggregate and its population strategy.

use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use lastmile_core::{
    DomainError, DomainResult, Entity, FacilityId, OrderId, PeriodId, ProductCode, ProgramId,
    UserId,
};
use lastmile_orders::OrderStatus;
use lastmile_requisitions::Requisition;
use lastmile_shipment::ShipmentLineItem;

/// POD identifier, assigned by the store on insert.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PodId(Uuid);

impl PodId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for PodId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for PodId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for PodId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid = Uuid::from_str(s).map_err(|_| DomainError::MalformedId)?;
        Ok(Self(uuid))
    }
}

/// Where a POD's line items come from, decided once at creation time from the
/// owning order's status.
///
/// Modeled as an explicit tagged variant so the decision is exhaustively
/// checkable, rather than hidden behind polymorphic dispatch.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PodSource {
    /// Order is PACKED: seed from what actually shipped.
    Shipment,
    /// Order is RELEASED / READY_TO_PACK / TRANSFER_FAILED: seed from the
    /// approved requisition.
    Requisition,
}

impl PodSource {
    /// Classify an order status into a population strategy.
    ///
    /// Orders in any other status (in transit, already received) cannot have
    /// a POD created for them.
    pub fn for_status(status: OrderStatus) -> DomainResult<Self> {
        match status {
            OrderStatus::Packed => Ok(PodSource::Shipment),
            OrderStatus::Released | OrderStatus::ReadyToPack | OrderStatus::TransferFailed => {
                Ok(PodSource::Requisition)
            }
            OrderStatus::InRoute | OrderStatus::Received => {
                Err(DomainError::UnsupportedOrderStatus)
            }
        }
    }
}

/// One product row of a POD: what shipped against what was received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodLineItem {
    pub product_code: ProductCode,
    pub product_name: Option<String>,
    pub quantity_shipped: i64,
    /// Filled in by the recipient; absent until then.
    pub quantity_received: Option<i64>,
    pub notes: Option<String>,
}

impl PodLineItem {
    pub fn new(product_code: ProductCode, product_name: Option<String>, quantity_shipped: i64) -> Self {
        Self {
            product_code,
            product_name,
            quantity_shipped,
            quantity_received: None,
            notes: None,
        }
    }

    /// A line is submittable once a non-negative received quantity is recorded.
    pub fn validate(&self) -> DomainResult<()> {
        match self.quantity_received {
            Some(quantity) if quantity >= 0 => Ok(()),
            _ => Err(DomainError::invalid_received_quantity()),
        }
    }

    /// Copy the recipient-editable fields from another line.
    pub fn copy_receipt_from(&mut self, other: &PodLineItem) {
        self.quantity_received = other.quantity_received;
        self.notes = other.notes.clone();
    }
}

impl From<&ShipmentLineItem> for PodLineItem {
    fn from(line: &ShipmentLineItem) -> Self {
        Self::new(
            line.product_code.clone(),
            line.product_name.clone(),
            line.quantity_shipped,
        )
    }
}

/// Proof of delivery for one order.
///
/// Constructed empty via [`OrderPod::new`] and populated exactly once by the
/// lifecycle service; callers can never inject line items directly. `id` and
/// `order_id` are immutable after creation, and the line-item *set* is fixed
/// once populated — saves only merge receipt fields into matching lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPod {
    id: Option<PodId>,
    order_id: OrderId,
    facility_id: Option<FacilityId>,
    program_id: Option<ProgramId>,
    period_id: Option<PeriodId>,
    delivered_by: Option<String>,
    received_by: Option<String>,
    received_date: Option<DateTime<Utc>>,
    created_by: UserId,
    modified_by: UserId,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
    line_items: Vec<PodLineItem>,
}

impl OrderPod {
    /// Create an empty, not-yet-persisted POD shell for an order.
    ///
    /// The creator is also the initial modifier, which is what the permission
    /// gate checks on create.
    pub fn new(order_id: OrderId, created_by: UserId) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            order_id,
            facility_id: None,
            program_id: None,
            period_id: None,
            delivered_by: None,
            received_by: None,
            received_date: None,
            created_by,
            modified_by: created_by,
            created_at: now,
            modified_at: now,
            line_items: Vec::new(),
        }
    }

    pub fn id(&self) -> Option<PodId> {
        self.id
    }

    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    pub fn facility_id(&self) -> Option<FacilityId> {
        self.facility_id
    }

    pub fn program_id(&self) -> Option<ProgramId> {
        self.program_id
    }

    pub fn period_id(&self) -> Option<PeriodId> {
        self.period_id
    }

    pub fn created_by(&self) -> UserId {
        self.created_by
    }

    pub fn modified_by(&self) -> UserId {
        self.modified_by
    }

    pub fn delivered_by(&self) -> Option<&str> {
        self.delivered_by.as_deref()
    }

    pub fn received_by(&self) -> Option<&str> {
        self.received_by.as_deref()
    }

    pub fn received_date(&self) -> Option<DateTime<Utc>> {
        self.received_date
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn modified_at(&self) -> DateTime<Utc> {
        self.modified_at
    }

    pub fn line_items(&self) -> &[PodLineItem] {
        &self.line_items
    }

    /// Recipient edits (received quantities, notes) ahead of a save.
    pub fn line_items_mut(&mut self) -> &mut [PodLineItem] {
        &mut self.line_items
    }

    /// Assign the persisted identity. Called by the store on insert.
    pub fn assign_id(&mut self, id: PodId) {
        self.id = Some(id);
    }

    pub fn set_modified_by(&mut self, user_id: UserId) {
        self.modified_by = user_id;
        self.modified_at = Utc::now();
    }

    pub fn set_receipt_info(
        &mut self,
        delivered_by: Option<String>,
        received_by: Option<String>,
        received_date: Option<DateTime<Utc>>,
    ) {
        self.delivered_by = delivered_by;
        self.received_by = received_by;
        self.received_date = received_date;
    }

    /// Populate line items from what actually shipped (PACKED orders).
    pub fn fill_from_shipment(&mut self, lines: &[ShipmentLineItem]) {
        self.line_items = lines.iter().map(PodLineItem::from).collect();
    }

    /// Populate header and line items from the approved requisition
    /// (RELEASED / READY_TO_PACK / TRANSFER_FAILED orders).
    pub fn fill_from_requisition(&mut self, requisition: &Requisition) {
        self.facility_id = Some(requisition.facility_id);
        self.program_id = Some(requisition.program_id);
        self.period_id = Some(requisition.period_id);
        self.line_items = requisition
            .all_line_items()
            .iter()
            .map(|line| {
                PodLineItem::new(
                    line.product_code.clone(),
                    line.product_name.clone(),
                    line.packs_to_ship,
                )
            })
            .collect();
    }

    /// Merge caller-supplied mutable fields onto this (stored) record.
    ///
    /// Identity, `order_id` and the line-item set are preserved; incoming
    /// lines are matched by product code and only their receipt fields are
    /// copied. Unmatched incoming lines are ignored.
    pub fn merge_from(&mut self, incoming: &OrderPod) {
        self.delivered_by = incoming.delivered_by.clone();
        self.received_by = incoming.received_by.clone();
        self.received_date = incoming.received_date;
        for line in &mut self.line_items {
            if let Some(edited) = incoming
                .line_items
                .iter()
                .find(|l| l.product_code == line.product_code)
            {
                line.copy_receipt_from(edited);
            }
        }
        self.set_modified_by(incoming.modified_by);
    }

    /// Validate every line in order; fails on the first violation.
    pub fn validate(&self) -> DomainResult<()> {
        for line in &self.line_items {
            line.validate()?;
        }
        Ok(())
    }
}

impl Entity for OrderPod {
    type Id = PodId;

    fn id(&self) -> Option<&PodId> {
        self.id.as_ref()
    }
}
