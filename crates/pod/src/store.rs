//! POD store boundary.

use lastmile_core::{DomainResult, OrderId};

use crate::pod::{OrderPod, PodId};

/// Persistence boundary for POD aggregates.
///
/// Reads must eagerly include line items. `insert` assigns the identity and
/// returns the persisted record; `update` fails with
/// `DomainError::NotFound("error.pod.not.found")` for unknown ids.
pub trait PodStore: Send + Sync {
    fn insert(&self, pod: OrderPod) -> DomainResult<OrderPod>;

    fn update(&self, pod: OrderPod) -> DomainResult<OrderPod>;

    fn pod_by_id(&self, id: PodId) -> DomainResult<Option<OrderPod>>;

    fn pod_by_order_id(&self, order_id: OrderId) -> DomainResult<Option<OrderPod>>;
}

impl<S: PodStore + ?Sized> PodStore for std::sync::Arc<S> {
    fn insert(&self, pod: OrderPod) -> DomainResult<OrderPod> {
        (**self).insert(pod)
    }

    fn update(&self, pod: OrderPod) -> DomainResult<OrderPod> {
        (**self).update(pod)
    }

    fn pod_by_id(&self, id: PodId) -> DomainResult<Option<OrderPod>> {
        (**self).pod_by_id(id)
    }

    fn pod_by_order_id(&self, order_id: OrderId) -> DomainResult<Option<OrderPod>> {
        (**self).pod_by_order_id(order_id)
    }
}
