// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{create_test_events, ids};
use crate::{EventCriteria, EventStatistics, Selection, filter_events};
use m5_max_domain::{EngagementType, Event, EventStatus};

#[test]
fn test_default_criteria_is_identity() {
    let events: Vec<Event> = create_test_events();
    let criteria: EventCriteria = EventCriteria::default();

    let filtered: Vec<&Event> = filter_events(&events, &criteria);

    assert!(criteria.is_identity());
    assert_eq!(ids(&filtered), vec!["1", "2", "3", "4"]);
}

#[test]
fn test_status_filter_is_exact() {
    let events: Vec<Event> = create_test_events();
    let criteria: EventCriteria = EventCriteria {
        status: Selection::Only(EventStatus::Confirmed),
        ..EventCriteria::default()
    };

    assert_eq!(ids(&filter_events(&events, &criteria)), vec!["2"]);
}

#[test]
fn test_type_filter_is_exact() {
    let events: Vec<Event> = create_test_events();
    let criteria: EventCriteria = EventCriteria {
        engagement: Selection::Only(EngagementType::MerchandiseSale),
        ..EventCriteria::default()
    };

    assert_eq!(ids(&filter_events(&events, &criteria)), vec!["3", "4"]);
}

#[test]
fn test_filter_is_idempotent() {
    let events: Vec<Event> = create_test_events();
    let criteria: EventCriteria = EventCriteria {
        engagement: Selection::Only(EngagementType::PyrotechnicShow),
        search: String::from("a"),
        ..EventCriteria::default()
    };

    let once: Vec<Event> = filter_events(&events, &criteria)
        .into_iter()
        .cloned()
        .collect();
    let twice: Vec<&Event> = filter_events(&once, &criteria);

    assert_eq!(ids(&twice), once.iter().map(|e| e.id.clone()).collect::<Vec<String>>());
}

#[test]
fn test_search_matches_each_field_case_insensitively() {
    let events: Vec<Event> = create_test_events();
    let cases: [(&str, &str); 4] = [
        ("CASAMENTO", "1"),    // event name
        ("clube do", "2"),     // client name
        ("taguatinga", "3"),   // location
        ("Realizado", "4"),    // status
    ];

    for (term, expected) in cases {
        let criteria: EventCriteria = EventCriteria {
            search: term.to_string(),
            ..EventCriteria::default()
        };
        assert_eq!(
            ids(&filter_events(&events, &criteria)),
            vec![expected],
            "term {term}"
        );
    }
}

#[test]
fn test_search_without_match_is_empty() {
    let events: Vec<Event> = create_test_events();
    let criteria: EventCriteria = EventCriteria {
        search: String::from("formatura"),
        ..EventCriteria::default()
    };

    assert!(filter_events(&events, &criteria).is_empty());
}

#[test]
fn test_search_applies_after_status_filter() {
    let events: Vec<Event> = create_test_events();
    let criteria: EventCriteria = EventCriteria {
        status: Selection::Only(EventStatus::Pending),
        search: String::from("lago"),
        ..EventCriteria::default()
    };

    assert!(filter_events(&events, &criteria).is_empty());
}

#[test]
fn test_statistics_count_full_list() {
    let events: Vec<Event> = create_test_events();

    let stats: EventStatistics = EventStatistics::from_events(&events);

    assert_eq!(
        stats,
        EventStatistics {
            total: 4,
            pendentes: 1,
            confirmados: 1,
            cancelados: 1,
            realizados: 1,
        }
    );
}

#[test]
fn test_statistics_ignore_active_filters() {
    let events: Vec<Event> = create_test_events();
    let criteria: EventCriteria = EventCriteria {
        status: Selection::Only(EventStatus::Pending),
        ..EventCriteria::default()
    };

    let visible: Vec<&Event> = filter_events(&events, &criteria);
    let stats: EventStatistics = EventStatistics::from_events(&events);

    assert_eq!(visible.len(), 1);
    assert_eq!(stats.total, 4);
    assert_eq!(stats.confirmados, 1);
}
