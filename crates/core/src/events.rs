// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event list filtering, free-text search and aggregate counters.

use crate::selection::Selection;
use m5_max_domain::{EngagementType, Event, EventStatus};
use serde::{Deserialize, Serialize};

/// Criteria selected on the events page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventCriteria {
    /// Status filter.
    pub status: Selection<EventStatus>,
    /// Engagement type filter.
    pub engagement: Selection<EngagementType>,
    /// Free-text search term.
    pub search: String,
}

impl EventCriteria {
    /// Returns true if no criterion restricts the list.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.status.is_all() && self.engagement.is_all() && self.search.trim().is_empty()
    }
}

/// Returns true if the event passes the status and type filters.
#[must_use]
pub fn matches_filters(event: &Event, criteria: &EventCriteria) -> bool {
    criteria.status.matches(&event.status) && criteria.engagement.matches(&event.engagement)
}

/// Normalises a search term: trimmed and lowercased.
#[must_use]
pub fn normalize_term(term: &str) -> String {
    term.trim().to_lowercase()
}

/// Returns true if the event matches a normalised search term.
///
/// Matches on event name, client name, location and status. A blank term
/// matches every event.
#[must_use]
pub fn matches_search(event: &Event, normalized_term: &str) -> bool {
    if normalized_term.is_empty() {
        return true;
    }

    [
        event.name.as_str(),
        event.client_name.as_str(),
        event.location.as_str(),
        event.status.as_str(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(normalized_term))
}

/// Narrows an event list by status, type and free text.
///
/// Order is preserved. With every criterion at its default the result is
/// the whole list.
#[must_use]
pub fn filter_events<'a>(events: &'a [Event], criteria: &EventCriteria) -> Vec<&'a Event> {
    let term: String = normalize_term(&criteria.search);
    events
        .iter()
        .filter(|event| matches_filters(event, criteria))
        .filter(|event| matches_search(event, &term))
        .collect()
}

/// Aggregate counters over the full event list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventStatistics {
    pub total: usize,
    pub pendentes: usize,
    pub confirmados: usize,
    pub cancelados: usize,
    pub realizados: usize,
}

impl EventStatistics {
    /// Counts events per status.
    ///
    /// Always computed from the full list, never from a filtered view.
    #[must_use]
    pub fn from_events(events: &[Event]) -> Self {
        events.iter().fold(
            Self {
                total: events.len(),
                ..Self::default()
            },
            |mut stats, event| {
                match event.status {
                    EventStatus::Pending => stats.pendentes += 1,
                    EventStatus::Confirmed => stats.confirmados += 1,
                    EventStatus::Cancelled => stats.cancelados += 1,
                    EventStatus::Performed => stats.realizados += 1,
                }
                stats
            },
        )
    }
}
