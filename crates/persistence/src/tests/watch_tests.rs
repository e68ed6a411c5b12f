// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::sync::Arc;
use std::time::Duration;

use m5_max_domain::EventStatus;
use serde_json::json;

use super::{create_test_event, create_test_store};
use crate::{
    ChangeEvent, ChangeKind, MemoryStore, Query, RemoteStore, Subscription, TableWatcher, tables,
};

fn watcher(store: &MemoryStore) -> TableWatcher {
    let remote: Arc<dyn RemoteStore> = Arc::new(store.clone());
    TableWatcher::new(remote, tables::QUOTES)
}

#[tokio::test]
async fn test_first_poll_only_records_baseline() {
    let store: MemoryStore = create_test_store();
    let mut watcher: TableWatcher = watcher(&store);

    assert!(watcher.poll_once().await.unwrap().is_empty());
    assert!(watcher.poll_once().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_outside_insert_is_published() {
    let store: MemoryStore = create_test_store();
    let mut subscription: Subscription = store.changes().subscribe(tables::QUOTES, None);
    let mut watcher: TableWatcher = watcher(&store);
    watcher.poll_once().await.unwrap();

    // Seeding bypasses the store's own publishing, like a write from the
    // public site would.
    store
        .seed(
            tables::QUOTES,
            &[create_test_event("e9", "Show novo", "2026-10-10", EventStatus::Pending)],
        )
        .unwrap();
    let changes: Vec<ChangeEvent> = watcher.poll_once().await.unwrap();

    let expected: ChangeEvent = ChangeEvent {
        table: tables::QUOTES.to_string(),
        kind: ChangeKind::Insert,
        ids: vec![String::from("e9")],
    };
    assert_eq!(changes, vec![expected.clone()]);
    assert_eq!(subscription.recv().await, Some(expected));
}

#[tokio::test]
async fn test_updates_and_deletes_are_detected() {
    let store: MemoryStore = create_test_store();
    let mut watcher: TableWatcher = watcher(&store);
    watcher.poll_once().await.unwrap();

    store
        .update(
            &Query::table(tables::QUOTES).eq("id", "e1"),
            json!({"status": "confirmado"}),
        )
        .await
        .unwrap();
    store
        .delete(&Query::table(tables::QUOTES).eq("id", "e2"))
        .await
        .unwrap();
    let changes: Vec<ChangeEvent> = watcher.poll_once().await.unwrap();

    let kinds: Vec<(ChangeKind, Vec<String>)> = changes
        .into_iter()
        .map(|change| (change.kind, change.ids))
        .collect();
    assert_eq!(
        kinds,
        vec![
            (ChangeKind::Update, vec![String::from("e1")]),
            (ChangeKind::Delete, vec![String::from("e2")]),
        ]
    );
}

#[tokio::test]
async fn test_failed_poll_keeps_previous_snapshot() {
    let store: MemoryStore = create_test_store();
    let mut watcher: TableWatcher = watcher(&store);
    watcher.poll_once().await.unwrap();

    store.fail_table(tables::QUOTES);
    assert!(watcher.poll_once().await.is_err());
    store.recover(tables::QUOTES);

    assert!(watcher.poll_once().await.unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_spawned_watcher_publishes_on_interval() {
    let store: MemoryStore = create_test_store();
    let mut subscription: Subscription = store
        .changes()
        .subscribe(tables::QUOTES, Some(ChangeKind::Insert));
    let handle = watcher(&store)
        .with_interval(Duration::from_secs(1))
        .spawn();
    tokio::time::sleep(Duration::from_millis(10)).await;

    store
        .seed(
            tables::QUOTES,
            &[create_test_event("e7", "Formatura", "2026-11-01", EventStatus::Pending)],
        )
        .unwrap();
    tokio::time::sleep(Duration::from_secs(2)).await;

    let change: ChangeEvent = subscription.recv().await.unwrap();
    assert_eq!(change.ids, vec![String::from("e7")]);
    handle.abort();
}
