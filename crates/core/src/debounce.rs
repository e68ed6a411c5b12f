// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Quiet-period coalescing of rapid inputs.
//!
//! A [`Debouncer`] schedules one evaluation after its input has been stable
//! for a quiet period. Every new input cancels the pending evaluation and
//! reschedules it, so only the last value of a burst is ever evaluated.
//! Dropping the debouncer discards any evaluation still pending.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::debug;

/// Default quiet period for free-text search input.
pub const DEFAULT_SEARCH_QUIET_PERIOD: Duration = Duration::from_millis(300);

/// Counters describing what a debouncer has done.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DebounceStats {
    /// Inputs pushed.
    pub received: u64,
    /// Inputs replaced by a newer one before their quiet period elapsed.
    pub superseded: u64,
    /// Evaluations run.
    pub evaluations: u64,
}

#[derive(Debug, Default)]
struct Counters {
    received: AtomicU64,
    superseded: AtomicU64,
    evaluations: AtomicU64,
}

impl Counters {
    fn snapshot(&self) -> DebounceStats {
        DebounceStats {
            received: self.received.load(Ordering::Relaxed),
            superseded: self.superseded.load(Ordering::Relaxed),
            evaluations: self.evaluations.load(Ordering::Relaxed),
        }
    }
}

/// Handle feeding inputs to a debounce task.
#[derive(Debug)]
pub struct Debouncer<T> {
    tx: mpsc::UnboundedSender<T>,
    counters: Arc<Counters>,
    quiet: Duration,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Spawns the debounce task on the current Tokio runtime.
    ///
    /// `on_settle` runs with the latest input once no new input has arrived
    /// for `quiet`.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn spawn<F>(quiet: Duration, on_settle: F) -> Self
    where
        F: FnMut(T) + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel::<T>();
        let counters: Arc<Counters> = Arc::new(Counters::default());
        tokio::spawn(run(quiet, rx, Arc::clone(&counters), on_settle));
        Self {
            tx,
            counters,
            quiet,
        }
    }

    /// Pushes a new input, cancelling and rescheduling any pending evaluation.
    ///
    /// Returns false if the debounce task is no longer running.
    #[must_use]
    pub fn push(&self, value: T) -> bool {
        self.counters.received.fetch_add(1, Ordering::Relaxed);
        self.tx.send(value).is_ok()
    }
}

impl<T> Debouncer<T> {
    /// Returns the configured quiet period.
    #[must_use]
    pub const fn quiet_period(&self) -> Duration {
        self.quiet
    }

    /// Returns a snapshot of the debouncer's counters.
    #[must_use]
    pub fn stats(&self) -> DebounceStats {
        self.counters.snapshot()
    }
}

async fn run<T, F>(
    quiet: Duration,
    mut rx: mpsc::UnboundedReceiver<T>,
    counters: Arc<Counters>,
    mut on_settle: F,
) where
    F: FnMut(T),
{
    while let Some(mut latest) = rx.recv().await {
        loop {
            tokio::select! {
                biased;
                next = rx.recv() => {
                    let Some(next) = next else {
                        debug!("Debouncer closed with a pending evaluation; discarding it");
                        return;
                    };
                    counters.superseded.fetch_add(1, Ordering::Relaxed);
                    latest = next;
                }
                () = tokio::time::sleep(quiet) => {
                    counters.evaluations.fetch_add(1, Ordering::Relaxed);
                    on_settle(latest);
                    break;
                }
            }
        }
    }
}
