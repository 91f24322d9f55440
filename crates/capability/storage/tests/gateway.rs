use chrono::Utc;
use domain::{Status, sample_work_orders};
use record_contract::{decode_work_order, fields};
use std::sync::Arc;
use techassist_storage::{GatewayError, InMemoryDocumentStore, WorkOrderGateway};

#[tokio::test]
async fn disconnected_gateway_short_circuits() {
    let gateway = WorkOrderGateway::disconnected("workOrders");
    let order = sample_work_orders(Utc::now()).remove(0);

    assert!(!gateway.is_connected());
    assert_eq!(
        gateway.create(&order).await.expect_err("create"),
        GatewayError::NotInitialized
    );
    assert_eq!(
        gateway.delete(&order).await.expect_err("delete"),
        GatewayError::NotInitialized
    );
    let err = gateway.subscribe(None).await.expect_err("subscribe");
    assert_eq!(err.to_string(), "document store not initialized");
}

#[tokio::test]
async fn create_update_delete_round_trip() {
    let store = Arc::new(InMemoryDocumentStore::new());
    let gateway = WorkOrderGateway::new(store.clone(), "workOrders");
    let now = Utc::now();
    let mut order = sample_work_orders(now).remove(1);
    let doc_id = order.id().to_string();

    let err = gateway.update(&order).await.expect_err("update before create");
    assert!(matches!(err, GatewayError::Storage(_)));

    gateway.create(&order).await.expect("create");
    order.status = Status::Completed;
    gateway.update(&order).await.expect("update");

    let stored = store.get("workOrders", &doc_id).expect("stored");
    assert_eq!(stored.get_str(fields::STATUS), Some("Completed"));
    let decoded = decode_work_order(&stored, now).expect("decode");
    assert_eq!(decoded, order);

    gateway.delete(&order).await.expect("delete");
    assert!(store.get("workOrders", &doc_id).is_none());
}

#[tokio::test]
async fn subscription_filters_by_technician() {
    let store = Arc::new(InMemoryDocumentStore::new());
    let gateway = WorkOrderGateway::new(store.clone(), "workOrders");
    let mut orders = sample_work_orders(Utc::now());
    orders[0].assigned_technician_id = Some("tech-1".to_string());
    orders[1].assigned_technician_id = Some("tech-2".to_string());
    for order in &orders[..2] {
        gateway.create(order).await.expect("create");
    }

    let mut stream = gateway.subscribe(Some("tech-1")).await.expect("subscribe");
    let records = stream.recv().await.expect("snapshot").expect("ok");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].get_str(fields::TASK_ID), Some("WO-8472"));

    let query = gateway.query(None);
    assert!(query.filter.is_none());
    assert_eq!(
        query.order_by.map(|order| (order.field, order.descending)),
        Some(("createdAt".to_string(), true))
    );
}
