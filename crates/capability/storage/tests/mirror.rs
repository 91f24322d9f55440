use chrono::Utc;
use domain::sample_work_orders;
use record_contract::{DocumentRecord, FieldValue, encode_work_order, fields};
use std::sync::Arc;
use techassist_storage::{
    DocumentStore, GatewayError, InMemoryDocumentStore, WorkOrderGateway, WorkOrderMirror,
};

#[tokio::test]
async fn mirror_replaces_collection_on_each_snapshot() {
    let store = Arc::new(InMemoryDocumentStore::new());
    let gateway = WorkOrderGateway::new(store.clone(), "workOrders");
    let mirror = WorkOrderMirror::new(true);
    let mut watch = mirror.watch();

    mirror.start(&gateway, None).await.expect("start");
    let state = watch
        .wait_for(|state| state.revision >= 1)
        .await
        .expect("initial")
        .clone();
    assert!(state.work_orders.is_empty());
    assert!(!state.is_loading);

    let orders = sample_work_orders(Utc::now());
    gateway.create(&orders[0]).await.expect("create");
    let state = watch
        .wait_for(|state| state.work_orders.len() == 1)
        .await
        .expect("after create")
        .clone();
    assert_eq!(state.work_orders[0].task_code, "WO-8472");
    assert!(state.error_message.is_none());

    gateway.delete(&orders[0]).await.expect("delete");
    watch
        .wait_for(|state| state.work_orders.is_empty() && state.revision >= 3)
        .await
        .expect("after delete");
}

#[tokio::test]
async fn undecodable_records_are_dropped() {
    let store = Arc::new(InMemoryDocumentStore::new());
    let gateway = WorkOrderGateway::new(store.clone(), "workOrders");
    let orders = sample_work_orders(Utc::now());
    gateway.create(&orders[2]).await.expect("create");

    let mut broken = encode_work_order(&orders[3]);
    broken.set(
        fields::PRIORITY,
        FieldValue::StringValue("BLOCKER".to_string()),
    );
    store
        .set_document("workOrders", broken)
        .await
        .expect("set broken");
    store
        .set_document("workOrders", DocumentRecord::new("empty"))
        .await
        .expect("set empty");

    let mirror = WorkOrderMirror::new(false);
    let mut watch = mirror.watch();
    mirror.start(&gateway, None).await.expect("start");
    let state = watch
        .wait_for(|state| state.revision >= 1)
        .await
        .expect("snapshot")
        .clone();
    assert_eq!(state.work_orders.len(), 1);
    assert_eq!(state.work_orders[0].task_code, "WO-7891");
}

#[tokio::test]
async fn subscription_errors_surface_as_message() {
    let store = Arc::new(InMemoryDocumentStore::new());
    let gateway = WorkOrderGateway::new(store.clone(), "workOrders");
    let mirror = WorkOrderMirror::new(true);
    let mut watch = mirror.watch();
    mirror.start(&gateway, None).await.expect("start");
    watch
        .wait_for(|state| state.revision >= 1)
        .await
        .expect("initial");

    store.broadcast_error("quota exceeded").expect("broadcast");
    let state = watch
        .wait_for(|state| state.error_message.is_some())
        .await
        .expect("error")
        .clone();
    assert_eq!(state.error_message.as_deref(), Some("quota exceeded"));
    assert!(!state.is_loading);
}

#[tokio::test]
async fn disconnected_gateway_sets_error() {
    let mirror = WorkOrderMirror::new(true);
    let gateway = WorkOrderGateway::disconnected("workOrders");
    let err = mirror.start(&gateway, None).await.expect_err("start");
    assert_eq!(err, GatewayError::NotInitialized);
    let state = mirror.snapshot();
    assert_eq!(
        state.error_message.as_deref(),
        Some("document store not initialized")
    );
    assert!(!state.is_loading);
}

#[tokio::test]
async fn empty_collection_falls_back_to_samples() {
    let now = Utc::now();
    let with_fallback = WorkOrderMirror::new(true);
    assert_eq!(with_fallback.visible_work_orders(now), sample_work_orders(now));
    assert_eq!(with_fallback.visible_work_orders(now).len(), 7);

    let without_fallback = WorkOrderMirror::new(false);
    assert!(without_fallback.visible_work_orders(now).is_empty());
}

#[tokio::test]
async fn concurrent_starts_leave_one_subscription() {
    let store = Arc::new(InMemoryDocumentStore::new());
    let gateway = WorkOrderGateway::new(store.clone(), "workOrders");
    let mirror = WorkOrderMirror::new(false);

    let (first, second) = tokio::join!(mirror.start(&gateway, None), mirror.start(&gateway, None));
    first.expect("first start");
    second.expect("second start");

    for _ in 0..100 {
        if store.subscriber_count() == 1 {
            break;
        }
        tokio::task::yield_now().await;
    }
    assert_eq!(store.subscriber_count(), 1);

    mirror.stop();
    for _ in 0..100 {
        if store.subscriber_count() == 0 {
            break;
        }
        tokio::task::yield_now().await;
    }
    assert_eq!(store.subscriber_count(), 0);
}

#[tokio::test]
async fn visible_orders_follow_the_given_snapshot() {
    let store = Arc::new(InMemoryDocumentStore::new());
    let gateway = WorkOrderGateway::new(store.clone(), "workOrders");
    let mirror = WorkOrderMirror::new(true);
    let mut watch = mirror.watch();
    let now = Utc::now();

    mirror.start(&gateway, None).await.expect("start");
    let empty = watch
        .wait_for(|state| state.revision >= 1)
        .await
        .expect("initial")
        .clone();

    let orders = sample_work_orders(now);
    gateway.create(&orders[2]).await.expect("create");
    watch
        .wait_for(|state| state.work_orders.len() == 1)
        .await
        .expect("after create");

    assert_eq!(mirror.visible_in(&empty, now), orders);
    assert_eq!(mirror.visible_work_orders(now), vec![orders[2].clone()]);
}
