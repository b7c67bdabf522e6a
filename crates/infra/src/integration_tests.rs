//! Integration tests for the full POD lifecycle over in-memory boundaries.
//!
//! Tests: PodService → OrderStatusOracle / line-item sources / permission
//! source / PodStore, all real implementations from this crate.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use lastmile_auth::Right;
    use lastmile_core::{
        DomainError, FacilityId, OrderId, PeriodId, ProductCode, ProgramId, UserId,
    };
    use lastmile_orders::{Order, OrderStatus, OrderStatusOracle};
    use lastmile_pod::{OrderPod, PodService};
    use lastmile_requisitions::{Requisition, RequisitionId, RequisitionLineItem};
    use lastmile_shipment::ShipmentLineItem;

    use crate::in_memory::{
        InMemoryOrderStore, InMemoryPermissionSource, InMemoryPodStore,
        InMemoryRequisitionSource, InMemoryShipmentSource,
    };

    type Service = PodService<
        Arc<InMemoryPodStore>,
        Arc<InMemoryOrderStore>,
        Arc<InMemoryShipmentSource>,
        Arc<InMemoryRequisitionSource>,
        Arc<InMemoryPermissionSource>,
    >;

    struct World {
        orders: Arc<InMemoryOrderStore>,
        shipments: Arc<InMemoryShipmentSource>,
        requisitions: Arc<InMemoryRequisitionSource>,
        permissions: Arc<InMemoryPermissionSource>,
        service: Arc<Service>,
    }

    fn world() -> World {
        lastmile_observability::init();
        let pods = Arc::new(InMemoryPodStore::new());
        let orders = Arc::new(InMemoryOrderStore::new());
        let shipments = Arc::new(InMemoryShipmentSource::new());
        let requisitions = Arc::new(InMemoryRequisitionSource::new());
        let permissions = Arc::new(InMemoryPermissionSource::new());
        let service = Arc::new(PodService::new(
            pods,
            orders.clone(),
            shipments.clone(),
            requisitions.clone(),
            permissions.clone(),
        ));
        World {
            orders,
            shipments,
            requisitions,
            permissions,
            service,
        }
    }

    fn shipment_line(order_id: OrderId, code: &str, shipped: i64) -> ShipmentLineItem {
        ShipmentLineItem {
            order_id,
            product_code: ProductCode::from(code),
            product_name: Some(format!("Product {code}")),
            quantity_shipped: shipped,
            packed_at: None,
        }
    }

    fn requisition_with(lines: Vec<(&str, i64)>) -> Requisition {
        Requisition {
            id: RequisitionId::new(),
            facility_id: FacilityId::new(),
            program_id: ProgramId::new(),
            period_id: PeriodId::new(),
            approved_at: None,
            line_items: lines
                .into_iter()
                .map(|(code, qty)| RequisitionLineItem {
                    product_code: ProductCode::from(code),
                    product_name: None,
                    packs_to_ship: qty,
                })
                .collect(),
        }
    }

    /// Scenario: packed order, one shipped line.
    #[test]
    fn pod_for_a_packed_order_is_seeded_from_the_shipment() {
        let w = world();
        let order_id = OrderId::new();
        let user_id = UserId::new();
        w.orders.upsert(Order::new(order_id, OrderStatus::Packed));
        w.shipments
            .put_lines(order_id, vec![shipment_line(order_id, "P1", 12)]);
        w.permissions.grant(user_id, order_id, Right::ManagePod);

        let pod = w
            .service
            .create_pod(OrderPod::new(order_id, user_id))
            .unwrap();

        assert_eq!(pod.line_items().len(), 1);
        assert_eq!(pod.line_items()[0].quantity_shipped, 12);
        // Round-trips through the store with line items included.
        let read = w.service.pod_by_order_id(order_id).unwrap().unwrap();
        assert_eq!(read, pod);
    }

    /// Scenario: released order, POD seeded from the requisition.
    #[test]
    fn pod_for_a_released_order_is_seeded_from_the_requisition() {
        let w = world();
        let order_id = OrderId::new();
        let user_id = UserId::new();
        w.orders.upsert(Order::new(order_id, OrderStatus::Released));
        let requisition = requisition_with(vec![("P1", 6), ("P2", 3), ("P3", 9)]);
        w.requisitions.put(order_id, requisition.clone());
        w.permissions.grant(user_id, order_id, Right::ManagePod);

        let pod = w
            .service
            .create_pod(OrderPod::new(order_id, user_id))
            .unwrap();

        assert_eq!(pod.line_items().len(), requisition.all_line_items().len());
        assert_eq!(pod.facility_id(), Some(requisition.facility_id));
    }

    /// Scenario: user without the manage-POD right is rejected before any
    /// other check.
    #[test]
    fn every_operation_is_gated_on_the_manage_pod_right() {
        let w = world();
        let order_id = OrderId::new();
        let user_id = UserId::new();
        w.orders.upsert(Order::new(order_id, OrderStatus::Packed));
        w.shipments
            .put_lines(order_id, vec![shipment_line(order_id, "P1", 1)]);

        let err = w
            .service
            .create_pod(OrderPod::new(order_id, user_id))
            .unwrap_err();
        assert_eq!(err.to_string(), "error.permission.denied");

        // Grant, create, then revoke: save and submit fail the same way.
        w.permissions.grant(user_id, order_id, Right::ManagePod);
        let pod = w
            .service
            .create_pod(OrderPod::new(order_id, user_id))
            .unwrap();
        w.permissions.revoke(user_id, order_id, Right::ManagePod);

        assert_eq!(
            w.service.save(pod.clone()).unwrap_err(),
            DomainError::PermissionDenied
        );
        assert_eq!(
            w.service.submit(pod.id().unwrap(), user_id).unwrap_err(),
            DomainError::PermissionDenied
        );
    }

    /// Full lifecycle: create → edit/save → submit → order received.
    #[test]
    fn full_lifecycle_create_save_submit() {
        let w = world();
        let order_id = OrderId::new();
        let creator = UserId::new();
        let receiver = UserId::new();
        w.orders.upsert(Order::new(order_id, OrderStatus::Packed));
        w.shipments.put_lines(
            order_id,
            vec![
                shipment_line(order_id, "P1", 10),
                shipment_line(order_id, "P2", 5),
            ],
        );
        w.permissions.grant(creator, order_id, Right::ManagePod);
        w.permissions.grant(receiver, order_id, Right::ManagePod);

        let created = w
            .service
            .create_pod(OrderPod::new(order_id, creator))
            .unwrap();

        // Receiving clerk fills in what actually arrived.
        let mut edit = created.clone();
        edit.set_modified_by(receiver);
        edit.line_items_mut()[0].quantity_received = Some(10);
        edit.line_items_mut()[1].quantity_received = Some(4);
        edit.line_items_mut()[1].notes = Some("one pack missing".to_string());
        edit.set_receipt_info(
            Some("driver".to_string()),
            Some("clerk".to_string()),
            Some(chrono::Utc::now()),
        );
        let saved = w.service.save(edit).unwrap();
        assert_eq!(saved.modified_by(), receiver);
        assert_eq!(saved.line_items()[1].quantity_received, Some(4));

        let submitted = w.service.submit(saved.id().unwrap(), receiver).unwrap();
        assert_eq!(submitted.modified_by(), receiver);
        assert_eq!(w.orders.status(order_id).unwrap(), OrderStatus::Received);

        // Scenario: submitting again is rejected and nothing changes.
        let err = w
            .service
            .submit(submitted.id().unwrap(), receiver)
            .unwrap_err();
        assert_eq!(err.to_string(), "error.pod.already.submitted");
        assert_eq!(w.orders.status(order_id).unwrap(), OrderStatus::Received);

        // Edits after submission are rejected too.
        let err = w.service.save(submitted).unwrap_err();
        assert_eq!(err, DomainError::AlreadySubmitted);
    }

    #[test]
    fn submit_with_an_unreceipted_line_changes_nothing() {
        let w = world();
        let order_id = OrderId::new();
        let user_id = UserId::new();
        w.orders.upsert(Order::new(order_id, OrderStatus::Packed));
        w.shipments
            .put_lines(order_id, vec![shipment_line(order_id, "P1", 10)]);
        w.permissions.grant(user_id, order_id, Right::ManagePod);

        let pod = w
            .service
            .create_pod(OrderPod::new(order_id, user_id))
            .unwrap();

        let err = w.service.submit(pod.id().unwrap(), user_id).unwrap_err();
        assert_eq!(err.to_string(), "error.invalid.received.quantity");
        assert_eq!(w.orders.status(order_id).unwrap(), OrderStatus::Packed);
        assert_eq!(w.service.pod_by_id(pod.id().unwrap()).unwrap().unwrap(), pod);
    }

    /// At most one of two racing submits may succeed; the loser observes the
    /// RECEIVED status, never a double transition.
    #[test]
    fn concurrent_submits_yield_exactly_one_success() {
        let w = world();
        let order_id = OrderId::new();
        let user_id = UserId::new();
        w.orders.upsert(Order::new(order_id, OrderStatus::Packed));
        w.shipments
            .put_lines(order_id, vec![shipment_line(order_id, "P1", 10)]);
        w.permissions.grant(user_id, order_id, Right::ManagePod);

        let mut edit = w
            .service
            .create_pod(OrderPod::new(order_id, user_id))
            .unwrap();
        edit.line_items_mut()[0].quantity_received = Some(10);
        let saved = w.service.save(edit).unwrap();
        let pod_id = saved.id().unwrap();

        let handles: Vec<_> = (0..2)
            .map(|_| {
                let service = w.service.clone();
                thread::spawn(move || service.submit(pod_id, user_id))
            })
            .collect();
        let results: Vec<_> = handles
            .into_iter()
            .map(|h| h.join().expect("submit thread panicked"))
            .collect();

        let successes = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(successes, 1, "exactly one submit may win: {results:?}");
        for result in &results {
            if let Err(err) = result {
                assert_eq!(*err, DomainError::AlreadySubmitted);
            }
        }
        assert_eq!(w.orders.status(order_id).unwrap(), OrderStatus::Received);
    }

    #[test]
    fn missing_collaterals_surface_their_own_message_keys() {
        let w = world();
        let order_id = OrderId::new();
        let user_id = UserId::new();
        w.permissions.grant(user_id, order_id, Right::ManagePod);

        // Unknown order.
        let err = w
            .service
            .create_pod(OrderPod::new(order_id, user_id))
            .unwrap_err();
        assert_eq!(err.to_string(), "error.order.not.found");

        // Packed order without shipment lines recorded.
        w.orders.upsert(Order::new(order_id, OrderStatus::Packed));
        let err = w
            .service
            .create_pod(OrderPod::new(order_id, user_id))
            .unwrap_err();
        assert_eq!(err.to_string(), "error.shipment.not.found");

        // Released order without a requisition recorded.
        w.orders.upsert(Order::new(order_id, OrderStatus::Released));
        let err = w
            .service
            .create_pod(OrderPod::new(order_id, user_id))
            .unwrap_err();
        assert_eq!(err.to_string(), "error.requisition.not.found");
    }
}
