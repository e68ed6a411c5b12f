// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Polling watcher for writes made by other clients.
//!
//! Hosted tables are also written outside this service (the public quote
//! form inserts straight into the quotes table). Those writes never pass
//! through a [`RemoteStore`] mutation, so nothing publishes them. A
//! [`TableWatcher`] snapshots a table on an interval and publishes the
//! difference between snapshots on the store's [`ChangeFeed`](crate::ChangeFeed).
//!
//! Writes made through the store are published twice: once by the store,
//! once by the next poll. Live consumers debounce, so the duplicate costs at
//! most one extra refetch.

use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::backend::{Page, RemoteStore, row_id};
use crate::error::PersistenceError;
use crate::feed::{ChangeEvent, ChangeKind};
use crate::query::Query;

/// Default time between two polls.
pub const DEFAULT_WATCH_INTERVAL: Duration = Duration::from_secs(5);

/// Row fingerprints keyed by id.
type Snapshot = BTreeMap<String, String>;

/// Publishes changes to one table by comparing periodic snapshots.
pub struct TableWatcher {
    store: Arc<dyn RemoteStore>,
    table: String,
    interval: Duration,
    snapshot: Option<Snapshot>,
}

impl TableWatcher {
    /// Creates a watcher polling every [`DEFAULT_WATCH_INTERVAL`].
    #[must_use]
    pub fn new(store: Arc<dyn RemoteStore>, table: &str) -> Self {
        Self {
            store,
            table: table.to_string(),
            interval: DEFAULT_WATCH_INTERVAL,
            snapshot: None,
        }
    }

    #[must_use]
    pub const fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Takes one snapshot and publishes what changed since the previous one.
    ///
    /// The first successful poll only records the baseline. A failed poll
    /// keeps the previous snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the table cannot be read.
    pub async fn poll_once(&mut self) -> Result<Vec<ChangeEvent>, PersistenceError> {
        let page: Page = self.store.select(&Query::table(&self.table)).await?;
        let current: Snapshot = fingerprint(&page.rows);

        let changes: Vec<ChangeEvent> = match &self.snapshot {
            Some(previous) => diff(&self.table, previous, &current),
            None => {
                debug!(table = %self.table, rows = current.len(), "Watcher baseline recorded");
                Vec::new()
            }
        };
        self.snapshot = Some(current);

        for change in &changes {
            self.store.changes().publish(change.clone());
        }
        Ok(changes)
    }

    /// Polls in the background until the returned handle is aborted.
    pub fn spawn(mut self) -> JoinHandle<()> {
        tokio::spawn(async move {
            info!(table = %self.table, interval = ?self.interval, "Watching table for outside writes");
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                match self.poll_once().await {
                    Ok(changes) if !changes.is_empty() => {
                        debug!(table = %self.table, events = changes.len(), "Watcher published changes");
                    }
                    Ok(_) => {}
                    Err(e) => warn!(table = %self.table, error = %e, "Table poll failed"),
                }
            }
        })
    }
}

fn fingerprint(rows: &[Value]) -> Snapshot {
    rows.iter()
        .filter_map(|row| row_id(row).map(|id| (id, row.to_string())))
        .collect()
}

fn diff(table: &str, previous: &Snapshot, current: &Snapshot) -> Vec<ChangeEvent> {
    let inserted: Vec<String> = current
        .keys()
        .filter(|id| !previous.contains_key(*id))
        .cloned()
        .collect();
    let updated: Vec<String> = current
        .iter()
        .filter(|(id, row)| previous.get(*id).is_some_and(|old| old != *row))
        .map(|(id, _)| id.clone())
        .collect();
    let deleted: Vec<String> = previous
        .keys()
        .filter(|id| !current.contains_key(*id))
        .cloned()
        .collect();

    [
        (ChangeKind::Insert, inserted),
        (ChangeKind::Update, updated),
        (ChangeKind::Delete, deleted),
    ]
    .into_iter()
    .filter(|(_, ids)| !ids.is_empty())
    .map(|(kind, ids)| ChangeEvent {
        table: table.to_string(),
        kind,
        ids,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_diff_reports_each_kind_once() {
        let previous: Snapshot = fingerprint(&[
            json!({"id": "a", "status": "pendente"}),
            json!({"id": "b", "status": "pendente"}),
        ]);
        let current: Snapshot = fingerprint(&[
            json!({"id": "a", "status": "confirmado"}),
            json!({"id": "c", "status": "pendente"}),
        ]);

        let changes: Vec<ChangeEvent> = diff("orcamentos", &previous, &current);

        let kinds: Vec<(ChangeKind, Vec<String>)> = changes
            .into_iter()
            .map(|change| (change.kind, change.ids))
            .collect();
        assert_eq!(
            kinds,
            vec![
                (ChangeKind::Insert, vec![String::from("c")]),
                (ChangeKind::Update, vec![String::from("a")]),
                (ChangeKind::Delete, vec![String::from("b")]),
            ]
        );
    }

    #[test]
    fn test_identical_snapshots_have_no_changes() {
        let rows: Vec<Value> = vec![json!({"id": 7, "nome": "x"})];

        assert!(diff("leads", &fingerprint(&rows), &fingerprint(&rows)).is_empty());
    }
}
