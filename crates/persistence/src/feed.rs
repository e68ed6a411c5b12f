// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row-level change notifications.
//!
//! Stores publish one [`ChangeEvent`] per successful mutation. Consumers
//! hold a [`Subscription`] filtered by table and kind; the payload only
//! names what changed, so subscribers refetch what they display.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::error::PersistenceError;

/// Buffered events per subscriber before the slowest one starts lagging.
const FEED_CAPACITY: usize = 256;

/// Kind of row change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

impl ChangeKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        }
    }

    /// Parses a kind filter; `*` means every kind.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::InvalidQuery` for an unknown kind.
    pub fn parse_filter(s: &str) -> Result<Option<Self>, PersistenceError> {
        if s.trim() == "*" {
            return Ok(None);
        }
        s.parse().map(Some)
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ChangeKind {
    type Err = PersistenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "INSERT" => Ok(Self::Insert),
            "UPDATE" => Ok(Self::Update),
            "DELETE" => Ok(Self::Delete),
            _ => Err(PersistenceError::InvalidQuery(format!(
                "unknown change kind: {s}"
            ))),
        }
    }
}

/// A change applied to one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub table: String,
    pub kind: ChangeKind,
    /// Identifiers of the affected rows, when known.
    pub ids: Vec<String>,
}

/// Broadcast hub for change events.
///
/// Cloning shares the underlying channel.
#[derive(Debug, Clone)]
pub struct ChangeFeed {
    tx: broadcast::Sender<ChangeEvent>,
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeFeed {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(FEED_CAPACITY);
        Self { tx }
    }

    /// Publishes an event to every live subscription.
    ///
    /// Returns the number of subscriptions that received it.
    pub fn publish(&self, event: ChangeEvent) -> usize {
        debug!(
            table = %event.table,
            kind = %event.kind,
            rows = event.ids.len(),
            "Publishing change event"
        );
        self.tx.send(event).unwrap_or(0)
    }

    /// Subscribes to changes on `table`, optionally of one kind only.
    #[must_use]
    pub fn subscribe(&self, table: &str, kind: Option<ChangeKind>) -> Subscription {
        Subscription {
            rx: self.tx.subscribe(),
            table: table.to_string(),
            kind,
        }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// A live subscription; dropping it unsubscribes.
#[derive(Debug)]
pub struct Subscription {
    rx: broadcast::Receiver<ChangeEvent>,
    table: String,
    kind: Option<ChangeKind>,
}

impl Subscription {
    fn accepts(&self, event: &ChangeEvent) -> bool {
        event.table == self.table && self.kind.is_none_or(|kind| kind == event.kind)
    }

    /// Waits for the next matching event.
    ///
    /// Events missed while lagging are skipped. Returns `None` once the
    /// feed has been dropped.
    pub async fn recv(&mut self) -> Option<ChangeEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) if self.accepts(&event) => return Some(event),
                Ok(_) => {}
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(
                        table = %self.table,
                        skipped,
                        "Change subscription lagged; skipping missed events"
                    );
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// The table this subscription watches.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Cancels the subscription.
    pub fn unsubscribe(self) {
        debug!(table = %self.table, "Unsubscribing from change feed");
    }
}
