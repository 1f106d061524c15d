use chrono::{Duration, Utc};
use domain::{ChildFieldUpdate, FieldValue, PageRequest};
use guard_storage::{ChildRecord, ChildStore, InMemoryChildStore};

fn child(child_id: &str, parent_id: &str, name: &str, minutes_ago: i64) -> ChildRecord {
    let created_at = Utc::now() - Duration::minutes(minutes_ago);
    ChildRecord {
        child_id: child_id.to_string(),
        parent_id: parent_id.to_string(),
        name: name.to_string(),
        email: format!("{name}@shop.com"),
        phone: "9876543210".to_string(),
        domain: format!("{name}.example.com"),
        total_amt: 100.0,
        password_hash: "hash".to_string(),
        status: true,
        join_date: created_at,
        database_url: format!("postgres://u:p@{name}.db/app"),
        created_at,
        updated_at: created_at,
    }
}

#[tokio::test]
async fn list_children_pages_newest_first() {
    let store = InMemoryChildStore::new();
    for (index, name) in ["alpha", "beta", "gamma"].iter().enumerate() {
        let minutes_ago = 10 - index as i64;
        store
            .create_child(child(&format!("c-{index}"), "parent-1", name, minutes_ago))
            .await
            .expect("create");
    }
    store
        .create_child(child("other", "parent-2", "delta", 0))
        .await
        .expect("create");

    let page = store
        .list_children("parent-1", PageRequest::new(Some(1), Some(2)))
        .await
        .expect("list");
    assert_eq!(page.total_count, 3);
    let names: Vec<_> = page.children.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["gamma", "beta"]);

    let page = store
        .list_children("parent-1", PageRequest::new(Some(2), Some(2)))
        .await
        .expect("list");
    assert_eq!(page.children.len(), 1);
    assert_eq!(page.children[0].name, "alpha");
}

#[tokio::test]
async fn search_is_case_insensitive_and_scoped() {
    let store = InMemoryChildStore::new();
    store
        .create_child(child("c-1", "parent-1", "acme", 2))
        .await
        .expect("create");
    store
        .create_child(child("c-2", "parent-1", "globex", 1))
        .await
        .expect("create");
    store
        .create_child(child("c-3", "parent-2", "acme", 0))
        .await
        .expect("create");

    let found = store
        .search_children("parent-1", "ACME")
        .await
        .expect("search");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].child_id, "c-1");

    let by_phone = store
        .search_children("parent-1", "98765")
        .await
        .expect("search");
    assert_eq!(by_phone.len(), 2);
}

#[tokio::test]
async fn find_child_respects_parent() {
    let store = InMemoryChildStore::new();
    store
        .create_child(child("c-1", "parent-1", "acme", 0))
        .await
        .expect("create");

    assert!(store.find_child("parent-1", "c-1").await.expect("find").is_some());
    assert!(store.find_child("parent-2", "c-1").await.expect("find").is_none());
    assert!(store.find_child_by_id("c-1").await.expect("find").is_some());

    let err = store.find_child("", "c-1").await.expect_err("parent required");
    assert_eq!(err.to_string(), "parent_id required");
}

#[tokio::test]
async fn field_update_and_summary() {
    let store = InMemoryChildStore::new();
    store
        .create_child(child("c-1", "parent-1", "acme", 1))
        .await
        .expect("create");
    store
        .create_child(child("c-2", "parent-1", "globex", 0))
        .await
        .expect("create");

    let update =
        ChildFieldUpdate::parse("status", FieldValue::Text("false".to_string())).expect("parse");
    let updated = store
        .update_child_field("c-2", update)
        .await
        .expect("update")
        .expect("exists");
    assert!(!updated.status);

    let update =
        ChildFieldUpdate::parse("totalAmt", FieldValue::Text("250.5".to_string())).expect("parse");
    store
        .update_child_field("c-1", update)
        .await
        .expect("update")
        .expect("exists");

    let summary = store.summarize_children("parent-1").await.expect("summary");
    assert_eq!(summary.total, 2);
    assert_eq!(summary.active, 1);
    assert_eq!(summary.inactive(), 1);
    assert!((summary.total_amount - 350.5).abs() < f64::EPSILON);

    let missing = store
        .update_child_field("nope", ChildFieldUpdate::Status(true))
        .await
        .expect("update");
    assert!(missing.is_none());
}

#[tokio::test]
async fn delete_returns_removed_child() {
    let store = InMemoryChildStore::new();
    store
        .create_child(child("c-1", "parent-1", "acme", 0))
        .await
        .expect("create");

    let removed = store.delete_child("c-1").await.expect("delete");
    assert_eq!(removed.map(|c| c.child_id), Some("c-1".to_string()));
    assert!(store.delete_child("c-1").await.expect("delete").is_none());
    let summary = store.summarize_children("parent-1").await.expect("summary");
    assert_eq!(summary.total, 0);
}
