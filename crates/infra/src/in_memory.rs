//! In-memory boundary implementations.
//!
//! Intended for tests/dev. Not optimized for performance. Each store guards
//! its map with an `RwLock`; the order store's guarded status update holds
//! the write lock across the compare-and-set, which is what makes it atomic.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use lastmile_auth::{FulfillmentPermissionSource, Right};
use lastmile_core::{DomainError, DomainResult, OrderId, UserId};
use lastmile_orders::{Order, OrderStatus, OrderStatusOracle};
use lastmile_pod::{OrderPod, PodId, PodStore};
use lastmile_requisitions::{Requisition, RequisitionSource};
use lastmile_shipment::{ShipmentLineItem, ShipmentLineSource};

// Poisoned locks only happen after a panic elsewhere; surface them as the
// generic invariant failure rather than panicking again.
fn poisoned<T>(_: T) -> DomainError {
    DomainError::InvariantViolation
}

/// In-memory order subsystem: holds order snapshots and implements the
/// status oracle over them.
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    orders: RwLock<HashMap<OrderId, Order>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert(&self, order: Order) {
        if let Ok(mut orders) = self.orders.write() {
            orders.insert(order.id, order);
        }
    }
}

impl OrderStatusOracle for InMemoryOrderStore {
    fn status(&self, order_id: OrderId) -> DomainResult<OrderStatus> {
        let orders = self.orders.read().map_err(poisoned)?;
        orders
            .get(&order_id)
            .map(|o| o.status)
            .ok_or_else(DomainError::order_not_found)
    }

    fn update_status(
        &self,
        order_id: OrderId,
        expected: OrderStatus,
        new: OrderStatus,
    ) -> DomainResult<()> {
        let mut orders = self.orders.write().map_err(poisoned)?;
        let order = orders
            .get_mut(&order_id)
            .ok_or_else(DomainError::order_not_found)?;
        if order.status != expected {
            tracing::debug!(%order_id, ?expected, current = ?order.status, "stale status on guarded update");
            return Err(DomainError::ConcurrentModification);
        }
        if !order.status.can_transition_to(new) {
            return Err(DomainError::InvariantViolation);
        }
        order.status = new;
        order.status_changed_at = chrono::Utc::now();
        Ok(())
    }
}

/// In-memory shipment subsystem.
#[derive(Debug, Default)]
pub struct InMemoryShipmentSource {
    lines: RwLock<HashMap<OrderId, Vec<ShipmentLineItem>>>,
}

impl InMemoryShipmentSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_lines(&self, order_id: OrderId, lines: Vec<ShipmentLineItem>) {
        if let Ok(mut map) = self.lines.write() {
            map.insert(order_id, lines);
        }
    }
}

impl ShipmentLineSource for InMemoryShipmentSource {
    fn line_items(&self, order_id: OrderId) -> DomainResult<Vec<ShipmentLineItem>> {
        let lines = self.lines.read().map_err(poisoned)?;
        lines
            .get(&order_id)
            .cloned()
            .ok_or_else(DomainError::shipment_not_found)
    }
}

/// In-memory requisition subsystem, keyed by the order converted from each
/// requisition.
#[derive(Debug, Default)]
pub struct InMemoryRequisitionSource {
    requisitions: RwLock<HashMap<OrderId, Requisition>>,
}

impl InMemoryRequisitionSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&self, order_id: OrderId, requisition: Requisition) {
        if let Ok(mut map) = self.requisitions.write() {
            map.insert(order_id, requisition);
        }
    }
}

impl RequisitionSource for InMemoryRequisitionSource {
    fn full_requisition_by_order(&self, order_id: OrderId) -> DomainResult<Requisition> {
        let requisitions = self.requisitions.read().map_err(poisoned)?;
        requisitions
            .get(&order_id)
            .cloned()
            .ok_or_else(DomainError::requisition_not_found)
    }
}

/// In-memory grant table: `(user, order, right)` triples.
#[derive(Debug, Default)]
pub struct InMemoryPermissionSource {
    grants: RwLock<HashSet<(UserId, OrderId, Right)>>,
}

impl InMemoryPermissionSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grant(&self, user_id: UserId, order_id: OrderId, right: Right) {
        if let Ok(mut grants) = self.grants.write() {
            grants.insert((user_id, order_id, right));
        }
    }

    pub fn revoke(&self, user_id: UserId, order_id: OrderId, right: Right) {
        if let Ok(mut grants) = self.grants.write() {
            grants.remove(&(user_id, order_id, right));
        }
    }
}

impl FulfillmentPermissionSource for InMemoryPermissionSource {
    fn has_right(&self, user_id: UserId, order_id: OrderId, right: Right) -> DomainResult<bool> {
        let grants = self.grants.read().map_err(poisoned)?;
        Ok(grants.contains(&(user_id, order_id, right)))
    }
}

/// In-memory POD store. Assigns ids on insert; line items are always stored
/// (and therefore read back) eagerly.
#[derive(Debug, Default)]
pub struct InMemoryPodStore {
    pods: RwLock<HashMap<PodId, OrderPod>>,
}

impl InMemoryPodStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PodStore for InMemoryPodStore {
    fn insert(&self, mut pod: OrderPod) -> DomainResult<OrderPod> {
        let mut pods = self.pods.write().map_err(poisoned)?;
        pod.assign_id(PodId::new());
        let id = pod.id().ok_or(DomainError::InvariantViolation)?;
        pods.insert(id, pod.clone());
        Ok(pod)
    }

    fn update(&self, pod: OrderPod) -> DomainResult<OrderPod> {
        let mut pods = self.pods.write().map_err(poisoned)?;
        let id = pod.id().ok_or_else(DomainError::pod_not_found)?;
        if !pods.contains_key(&id) {
            return Err(DomainError::pod_not_found());
        }
        pods.insert(id, pod.clone());
        Ok(pod)
    }

    fn pod_by_id(&self, id: PodId) -> DomainResult<Option<OrderPod>> {
        let pods = self.pods.read().map_err(poisoned)?;
        Ok(pods.get(&id).cloned())
    }

    fn pod_by_order_id(&self, order_id: OrderId) -> DomainResult<Option<OrderPod>> {
        let pods = self.pods.read().map_err(poisoned)?;
        Ok(pods
            .values()
            .find(|p| p.order_id() == order_id)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_store_cas_rejects_stale_expectations() {
        let store = InMemoryOrderStore::new();
        let order_id = OrderId::new();
        store.upsert(Order::new(order_id, OrderStatus::Packed));

        let err = store
            .update_status(order_id, OrderStatus::Released, OrderStatus::Received)
            .unwrap_err();
        assert_eq!(err, DomainError::ConcurrentModification);
        assert_eq!(store.status(order_id).unwrap(), OrderStatus::Packed);
    }

    #[test]
    fn order_store_cas_rejects_invalid_transitions() {
        let store = InMemoryOrderStore::new();
        let order_id = OrderId::new();
        store.upsert(Order::new(order_id, OrderStatus::Received));

        let err = store
            .update_status(order_id, OrderStatus::Received, OrderStatus::Packed)
            .unwrap_err();
        assert_eq!(err, DomainError::InvariantViolation);
    }

    #[test]
    fn order_store_reports_unknown_orders() {
        let store = InMemoryOrderStore::new();
        assert_eq!(
            store.status(OrderId::new()).unwrap_err().to_string(),
            "error.order.not.found"
        );
    }

    #[test]
    fn pod_store_assigns_identity_on_insert_and_checks_it_on_update() {
        let store = InMemoryPodStore::new();
        let order_id = OrderId::new();

        let pod = store
            .insert(OrderPod::new(order_id, UserId::new()))
            .unwrap();
        let id = pod.id().expect("insert assigns an id");

        assert!(store.pod_by_id(id).unwrap().is_some());
        assert!(store.pod_by_order_id(order_id).unwrap().is_some());

        let mut stray = OrderPod::new(OrderId::new(), UserId::new());
        stray.assign_id(PodId::new());
        assert_eq!(store.update(stray).unwrap_err(), DomainError::pod_not_found());
    }

    #[test]
    fn permission_grants_are_scoped_to_user_order_and_right() {
        let source = InMemoryPermissionSource::new();
        let user = UserId::new();
        let order = OrderId::new();
        source.grant(user, order, Right::ManagePod);

        assert!(source.has_right(user, order, Right::ManagePod).unwrap());
        assert!(!source.has_right(user, order, Right::ManageShipment).unwrap());
        assert!(!source.has_right(UserId::new(), order, Right::ManagePod).unwrap());
        assert!(!source.has_right(user, OrderId::new(), Right::ManagePod).unwrap());

        source.revoke(user, order, Right::ManagePod);
        assert!(!source.has_right(user, order, Right::ManagePod).unwrap());
    }
}
