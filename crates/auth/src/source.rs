//! Permission source boundary.

use lastmile_core::{DomainResult, OrderId, UserId};

use crate::Right;

/// Answers whether a user holds a fulfillment right on the facility
/// associated with an order.
///
/// Implementations are expected to be side-effect-free and stable within a
/// single lifecycle operation: identical `(user, order, right)` inputs must
/// yield the same decision for the duration of one call.
pub trait FulfillmentPermissionSource: Send + Sync {
    fn has_right(&self, user_id: UserId, order_id: OrderId, right: Right) -> DomainResult<bool>;
}

impl<S: FulfillmentPermissionSource + ?Sized> FulfillmentPermissionSource for std::sync::Arc<S> {
    fn has_right(&self, user_id: UserId, order_id: OrderId, right: Right) -> DomainResult<bool> {
        (**self).has_right(user_id, order_id, right)
    }
}
