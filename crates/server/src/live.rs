// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Live change notices for the events page.
//!
//! Each WebSocket connection owns one subscription to the quotes table.
//! Bursts of changes are coalesced into a single `refetch` notice once the
//! table has been quiet for [`LIVE_QUIET_PERIOD`]. Notices carry no row
//! data; clients reload through the HTTP API. Nothing sent by the client is
//! acted on.

use axum::{
    extract::{
        State as AxumState, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};
use futures::{SinkExt, stream::StreamExt};
use m5_max::Debouncer;
use m5_max_api::EventService;
use m5_max_persistence::{ChangeEvent, ChangeKind, Subscription};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, error, info, warn};

use crate::AppState;
use crate::session::AdminSession;

/// Quiet period before a burst of changes becomes one notice.
pub const LIVE_QUIET_PERIOD: Duration = Duration::from_millis(250);

/// Messages sent to live clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LiveNotice {
    /// Sent once after the upgrade.
    Connected {
        /// Server time (RFC 3339).
        timestamp: String,
    },
    /// The table changed; reload it.
    Refetch {
        table: String,
        /// Kind of the last change in the burst.
        kind: ChangeKind,
        ids: Vec<String>,
    },
}

impl From<ChangeEvent> for LiveNotice {
    fn from(change: ChangeEvent) -> Self {
        Self::Refetch {
            table: change.table,
            kind: change.kind,
            ids: change.ids,
        }
    }
}

/// Turns a change subscription into a stream of debounced notices.
///
/// The returned task owns the subscription and the debouncer; aborting it
/// cancels both.
pub fn spawn_notice_pump(
    mut subscription: Subscription,
    quiet: Duration,
) -> (mpsc::UnboundedReceiver<LiveNotice>, JoinHandle<()>) {
    let (tx, rx) = mpsc::unbounded_channel::<LiveNotice>();

    let pump: JoinHandle<()> = tokio::spawn(async move {
        let debouncer: Debouncer<ChangeEvent> = Debouncer::spawn(quiet, move |change| {
            if tx.send(LiveNotice::from(change)).is_err() {
                debug!("Live client gone; dropping notice");
            }
        });
        while let Some(change) = subscription.recv().await {
            debug!(table = %change.table, kind = %change.kind, "Change queued for live clients");
            if !debouncer.push(change) {
                warn!("Live debouncer stopped; closing notice pump");
                break;
            }
        }
        debug!(stats = ?debouncer.stats(), "Change feed closed");
    });

    (rx, pump)
}

/// Upgrades to a WebSocket streaming change notices for the events page.
pub async fn live_events_handler(
    _session: AdminSession,
    ws: WebSocketUpgrade,
    AxumState(state): AxumState<AppState>,
) -> Response {
    let subscription: Subscription = EventService::new(Arc::clone(&state.store)).subscribe_updates();
    ws.on_upgrade(move |socket| handle_socket(socket, subscription))
}

async fn handle_socket(socket: WebSocket, subscription: Subscription) {
    info!("Client connected to live event stream");

    let (mut sender, mut receiver) = socket.split();
    let (mut notices, pump) = spawn_notice_pump(subscription, LIVE_QUIET_PERIOD);

    let connected: LiveNotice = LiveNotice::Connected {
        timestamp: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_default(),
    };
    if let Ok(json) = serde_json::to_string(&connected)
        && sender.send(Message::Text(json.into())).await.is_err()
    {
        warn!("Failed to send connection confirmation");
        pump.abort();
        return;
    }

    let mut send_task: JoinHandle<()> = tokio::spawn(async move {
        while let Some(notice) = notices.recv().await {
            match serde_json::to_string(&notice) {
                Ok(json) => {
                    if sender.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(e) => error!(?e, "Failed to serialize live notice"),
            }
        }
    });

    let mut recv_task: JoinHandle<()> = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Text(_) | Message::Binary(_)) => {
                    warn!("Ignoring message from live client");
                }
                Ok(Message::Close(_)) => break,
                Ok(Message::Ping(_) | Message::Pong(_)) => {}
                Err(e) => {
                    error!(?e, "WebSocket receive error");
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }
    pump.abort();

    info!("Client disconnected from live event stream");
}
