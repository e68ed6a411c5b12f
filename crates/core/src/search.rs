// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Debounced free-text search over an in-memory event list.

use crate::debounce::{DebounceStats, Debouncer};
use crate::events::{EventCriteria, filter_events};
use m5_max_domain::Event;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tracing::warn;

#[derive(Debug)]
struct SearchState {
    events: Vec<Event>,
    criteria: EventCriteria,
}

impl SearchState {
    fn evaluate(&self) -> Vec<Event> {
        filter_events(&self.events, &self.criteria)
            .into_iter()
            .cloned()
            .collect()
    }
}

/// A search session over one event list.
///
/// Status and type changes re-evaluate immediately. Search term changes go
/// through a [`Debouncer`], so a burst of keystrokes yields exactly one
/// evaluation using the final term. Results are published on a watch
/// channel.
#[derive(Debug)]
pub struct DebouncedSearch {
    state: Arc<Mutex<SearchState>>,
    results: Arc<watch::Sender<Vec<Event>>>,
    debouncer: Debouncer<String>,
}

fn lock(state: &Mutex<SearchState>) -> std::sync::MutexGuard<'_, SearchState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl DebouncedSearch {
    /// Starts a session and publishes the initial evaluation.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    #[must_use]
    pub fn spawn(events: Vec<Event>, criteria: EventCriteria, quiet: Duration) -> Self {
        let state: SearchState = SearchState { events, criteria };
        let (results, _rx) = watch::channel(state.evaluate());
        let results: Arc<watch::Sender<Vec<Event>>> = Arc::new(results);
        let state: Arc<Mutex<SearchState>> = Arc::new(Mutex::new(state));

        let settled_state: Arc<Mutex<SearchState>> = Arc::clone(&state);
        let settled_results: Arc<watch::Sender<Vec<Event>>> = Arc::clone(&results);
        let debouncer: Debouncer<String> = Debouncer::spawn(quiet, move |term: String| {
            let filtered: Vec<Event> = {
                let mut guard = lock(&settled_state);
                guard.criteria.search = term;
                guard.evaluate()
            };
            settled_results.send_replace(filtered);
        });

        Self {
            state,
            results,
            debouncer,
        }
    }

    /// Subscribes to evaluated results.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<Event>> {
        self.results.subscribe()
    }

    /// Returns the most recent evaluation.
    #[must_use]
    pub fn current(&self) -> Vec<Event> {
        self.results.borrow().clone()
    }

    /// Feeds a new search term; evaluation happens after the quiet period.
    ///
    /// Returns false if the debounce task has stopped and the term was
    /// dropped.
    pub fn set_term(&self, term: impl Into<String>) -> bool {
        let accepted: bool = self.debouncer.push(term.into());
        if !accepted {
            warn!("Search debouncer stopped; term dropped");
        }
        accepted
    }

    /// Replaces status/type criteria, keeping the current term, and
    /// re-evaluates immediately.
    pub fn set_filters(&self, criteria: EventCriteria) {
        let filtered: Vec<Event> = {
            let mut guard = lock(&self.state);
            let term: String = std::mem::take(&mut guard.criteria.search);
            guard.criteria = EventCriteria {
                search: term,
                ..criteria
            };
            guard.evaluate()
        };
        self.results.send_replace(filtered);
    }

    /// Replaces the event list after a refetch and re-evaluates immediately.
    pub fn set_events(&self, events: Vec<Event>) {
        let filtered: Vec<Event> = {
            let mut guard = lock(&self.state);
            guard.events = events;
            guard.evaluate()
        };
        self.results.send_replace(filtered);
    }

    /// Returns the debouncer's counters.
    #[must_use]
    pub fn stats(&self) -> DebounceStats {
        self.debouncer.stats()
    }
}
