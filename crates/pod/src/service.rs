//! POD lifecycle orchestration.

use lastmile_auth::{FulfillmentPermissionSource, Right};
use lastmile_core::{DomainError, DomainResult, OrderId, UserId};
use lastmile_orders::{OrderStatus, OrderStatusOracle};
use lastmile_requisitions::RequisitionSource;
use lastmile_shipment::ShipmentLineSource;

use crate::pod::{OrderPod, PodId, PodSource};
use crate::store::PodStore;

/// Stateless lifecycle service for proofs of delivery.
///
/// Holds only references to its boundary collaborators and owns all ordering
/// and invariant-checking logic: the boundaries themselves are dumb. Within
/// each operation the checks run permission → already-submitted → validation
/// → status transition, and callers rely on that order to distinguish
/// failure causes.
pub struct PodService<S, O, L, R, P> {
    store: S,
    orders: O,
    shipments: L,
    requisitions: R,
    permissions: P,
}

impl<S, O, L, R, P> PodService<S, O, L, R, P>
where
    S: PodStore,
    O: OrderStatusOracle,
    L: ShipmentLineSource,
    R: RequisitionSource,
    P: FulfillmentPermissionSource,
{
    pub fn new(store: S, orders: O, shipments: L, requisitions: R, permissions: P) -> Self {
        Self {
            store,
            orders,
            shipments,
            requisitions,
            permissions,
        }
    }

    /// Ensure the POD's current modifier may manage PODs for its order.
    ///
    /// Uses the record's own `modified_by`, never a caller-supplied override:
    /// for create that is the creator, for save/submit the stored modifier.
    pub fn check_permissions(&self, pod: &OrderPod) -> DomainResult<()> {
        let allowed =
            self.permissions
                .has_right(pod.modified_by(), pod.order_id(), Right::ManagePod)?;
        if allowed {
            Ok(())
        } else {
            Err(DomainError::PermissionDenied)
        }
    }

    /// Create a POD from an order, seeding line items from exactly one source
    /// chosen by the order's status at the instant of the status read.
    pub fn create_pod(&self, mut pod: OrderPod) -> DomainResult<OrderPod> {
        self.check_permissions(&pod)?;

        let status = self.orders.status(pod.order_id())?;
        let source = PodSource::for_status(status)?;
        match source {
            PodSource::Shipment => {
                let lines = self.shipments.line_items(pod.order_id())?;
                pod.fill_from_shipment(&lines);
            }
            PodSource::Requisition => {
                let requisition = self
                    .requisitions
                    .full_requisition_by_order(pod.order_id())?;
                pod.fill_from_requisition(&requisition);
            }
        }

        tracing::debug!(
            order_id = %pod.order_id(),
            ?source,
            lines = pod.line_items().len(),
            "creating pod"
        );
        self.store.insert(pod)
    }

    /// Merge caller edits into a stored, not-yet-submitted POD.
    pub fn save(&self, pod: OrderPod) -> DomainResult<OrderPod> {
        let id = pod.id().ok_or_else(DomainError::pod_not_found)?;
        let mut existing = self
            .store
            .pod_by_id(id)?
            .ok_or_else(DomainError::pod_not_found)?;

        self.check_permissions(&existing)?;
        if self
            .orders
            .has_status(existing.order_id(), &[OrderStatus::Received])?
        {
            return Err(DomainError::AlreadySubmitted);
        }

        existing.merge_from(&pod);
        self.store.update(existing)
    }

    /// Submit a POD: validate receipts, transition the order to RECEIVED.
    ///
    /// The transition is a compare-and-set on the status observed by the
    /// already-submitted check, so at most one submit can succeed per order.
    /// A lost race against another submit surfaces as `AlreadySubmitted`;
    /// any other concurrent status change surfaces as
    /// `ConcurrentModification`, which the caller may retry.
    pub fn submit(&self, pod_id: PodId, user_id: UserId) -> DomainResult<OrderPod> {
        let mut pod = self
            .store
            .pod_by_id(pod_id)?
            .ok_or_else(DomainError::pod_not_found)?;

        self.check_permissions(&pod)?;

        let observed = self.orders.status(pod.order_id())?;
        if observed == OrderStatus::Received {
            return Err(DomainError::AlreadySubmitted);
        }

        pod.validate()?;

        match self
            .orders
            .update_status(pod.order_id(), observed, OrderStatus::Received)
        {
            Ok(()) => {}
            Err(DomainError::ConcurrentModification) => {
                // Lost the race. A concurrent submit won iff the order is now
                // RECEIVED; anything else is retryable by the caller.
                if self
                    .orders
                    .has_status(pod.order_id(), &[OrderStatus::Received])?
                {
                    return Err(DomainError::AlreadySubmitted);
                }
                return Err(DomainError::ConcurrentModification);
            }
            Err(other) => return Err(other),
        }

        pod.set_modified_by(user_id);
        tracing::info!(pod_id = %pod_id, order_id = %pod.order_id(), "pod submitted");
        self.store.update(pod)
    }

    /// Pass-through read; no permission check on reads in this core.
    pub fn pod_by_id(&self, id: PodId) -> DomainResult<Option<OrderPod>> {
        self.store.pod_by_id(id)
    }

    /// Pass-through read; no permission check on reads in this core.
    pub fn pod_by_order_id(&self, order_id: OrderId) -> DomainResult<Option<OrderPod>> {
        self.store.pod_by_order_id(order_id)
    }
}
