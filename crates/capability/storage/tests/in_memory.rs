use chrono::{TimeZone, Utc};
use record_contract::{DocumentRecord, FieldValue};
use std::sync::Arc;
use techassist_storage::{DocumentQuery, DocumentStore, InMemoryDocumentStore, StorageError};

fn record(id: &str, owner: &str, created_secs: i64) -> DocumentRecord {
    let mut record = DocumentRecord::new(id);
    record.set("owner", FieldValue::StringValue(owner.to_string()));
    record.set(
        "createdAt",
        FieldValue::TimestampValue(
            Utc.timestamp_opt(created_secs, 0)
                .single()
                .expect("timestamp"),
        ),
    );
    record
}

fn ids(records: &[DocumentRecord]) -> Vec<&str> {
    records
        .iter()
        .map(|record| record.document_id.as_str())
        .collect()
}

#[tokio::test]
async fn subscribe_pushes_initial_and_updates() {
    let store = InMemoryDocumentStore::new();
    store
        .set_document("orders", record("a", "tech-1", 100))
        .await
        .expect("set");

    let query = DocumentQuery::collection("orders").order_by_desc("createdAt");
    let mut stream = store.subscribe(query).await.expect("subscribe");
    let initial = stream.recv().await.expect("initial").expect("ok");
    assert_eq!(ids(&initial), ["a"]);

    store
        .set_document("orders", record("b", "tech-2", 200))
        .await
        .expect("set");
    let next = stream.recv().await.expect("next").expect("ok");
    assert_eq!(ids(&next), ["b", "a"]);
}

#[tokio::test]
async fn filter_and_other_collections() {
    let store = InMemoryDocumentStore::new();
    let query = DocumentQuery::collection("orders")
        .where_equals("owner", FieldValue::StringValue("tech-1".to_string()));
    let mut stream = store.subscribe(query).await.expect("subscribe");
    assert!(stream.recv().await.expect("initial").expect("ok").is_empty());

    store
        .set_document("archive", record("x", "tech-1", 1))
        .await
        .expect("set");
    store
        .set_document("orders", record("y", "tech-2", 2))
        .await
        .expect("set");
    store
        .set_document("orders", record("z", "tech-1", 3))
        .await
        .expect("set");

    // archive 的写入不推送；orders 的两次写入各推送一次
    let first = stream.recv().await.expect("first").expect("ok");
    assert!(first.is_empty());
    let second = stream.recv().await.expect("second").expect("ok");
    assert_eq!(ids(&second), ["z"]);
}

#[tokio::test]
async fn update_merges_and_requires_existing() {
    let store = InMemoryDocumentStore::new();
    let err = store
        .update_document("orders", record("missing", "tech-1", 1))
        .await
        .expect_err("missing");
    assert_eq!(err.to_string(), "document not found: missing");

    let mut original = record("a", "tech-1", 1);
    original.set("note", FieldValue::StringValue("keep".to_string()));
    store.set_document("orders", original).await.expect("set");
    store
        .update_document("orders", record("a", "tech-9", 1))
        .await
        .expect("update");

    let stored = store.get("orders", "a").expect("stored");
    assert_eq!(stored.get_str("owner"), Some("tech-9"));
    assert_eq!(stored.get_str("note"), Some("keep"));
}

#[tokio::test]
async fn delete_and_dropped_subscribers() {
    let store = InMemoryDocumentStore::new();
    store
        .set_document("orders", record("a", "tech-1", 1))
        .await
        .expect("set");
    let stream = store
        .subscribe(DocumentQuery::collection("orders"))
        .await
        .expect("subscribe");
    assert_eq!(store.subscriber_count(), 1);
    drop(stream);
    assert_eq!(store.subscriber_count(), 0);

    store.delete_document("orders", "a").await.expect("delete");
    store
        .delete_document("orders", "a")
        .await
        .expect("delete again");
    assert_eq!(store.len("orders"), 0);
}

#[tokio::test]
async fn broadcast_error_reaches_subscribers() {
    let store = InMemoryDocumentStore::new();
    let mut stream = store
        .subscribe(DocumentQuery::collection("orders"))
        .await
        .expect("subscribe");
    let _ = stream.recv().await;
    store.broadcast_error("permission denied").expect("broadcast");
    let err = stream.recv().await.expect("event").expect_err("error");
    assert_eq!(err.message(), "permission denied");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn subscriber_sees_writes_racing_its_registration() {
    let store = Arc::new(InMemoryDocumentStore::new());
    let writers: Vec<_> = (0..4)
        .map(|writer| {
            let store = store.clone();
            tokio::spawn(async move {
                for index in 0..25 {
                    let id = format!("w{writer}-{index}");
                    store
                        .set_document("orders", record(&id, "tech-1", index))
                        .await
                        .expect("set");
                }
            })
        })
        .collect();

    let mut stream = store
        .subscribe(DocumentQuery::collection("orders"))
        .await
        .expect("subscribe");
    for writer in writers {
        writer.await.expect("writer");
    }

    let mut latest = None;
    while let Ok(snapshot) = stream.try_recv() {
        latest = Some(snapshot.expect("ok"));
    }
    assert_eq!(latest.expect("snapshot").len(), 100);
}

#[test]
fn storage_error_displays_message() {
    let err = StorageError::new("lock failed");
    let dynamic: &dyn std::error::Error = &err;
    assert_eq!(dynamic.to_string(), "lock failed");
    assert_eq!(err.message(), "lock failed");
}
