//! Order status oracle boundary.

use lastmile_core::{DomainResult, OrderId};

use crate::order::OrderStatus;

/// Read and conditionally advance an order's status.
///
/// The oracle is the only write path into the order subsystem this core uses.
/// `update_status` is a compare-and-set: it must fail with
/// `DomainError::ConcurrentModification` when the order's current status is
/// no longer `expected`, and with `DomainError::InvariantViolation` when the
/// requested transition is not allowed by [`OrderStatus::can_transition_to`].
/// This is what lets the lifecycle service guarantee at most one successful
/// submit per order without holding locks across boundaries.
pub trait OrderStatusOracle: Send + Sync {
    fn status(&self, order_id: OrderId) -> DomainResult<OrderStatus>;

    fn has_status(&self, order_id: OrderId, statuses: &[OrderStatus]) -> DomainResult<bool> {
        let current = self.status(order_id)?;
        Ok(statuses.contains(&current))
    }

    fn update_status(
        &self,
        order_id: OrderId,
        expected: OrderStatus,
        new: OrderStatus,
    ) -> DomainResult<()>;
}

impl<S: OrderStatusOracle + ?Sized> OrderStatusOracle for std::sync::Arc<S> {
    fn status(&self, order_id: OrderId) -> DomainResult<OrderStatus> {
        (**self).status(order_id)
    }

    fn update_status(
        &self,
        order_id: OrderId,
        expected: OrderStatus,
        new: OrderStatus,
    ) -> DomainResult<()> {
        (**self).update_status(order_id, expected, new)
    }
}
