// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Display helpers for values shown to staff.

use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::types::Event;

/// Placeholder rendered for missing or unparseable values.
pub const PLACEHOLDER: &str = "—";

/// Parses a stored event date.
///
/// Accepts a plain ISO 8601 date (`2026-12-31`), an RFC 3339 timestamp, or a
/// timestamp whose first ten characters are an ISO date (as Postgres emits
/// for `timestamp without time zone`).
#[must_use]
pub fn parse_event_date(raw: &str) -> Option<Date> {
    let raw: &str = raw.trim();
    let iso_date = format_description!("[year]-[month]-[day]");

    if let Ok(date) = Date::parse(raw, iso_date) {
        return Some(date);
    }
    if let Ok(timestamp) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(timestamp.date());
    }
    raw.get(..10)
        .and_then(|prefix| Date::parse(prefix, iso_date).ok())
}

/// Formats a stored event date as `dd/mm/yyyy`.
///
/// Missing or malformed dates render as [`PLACEHOLDER`] instead of failing.
#[must_use]
pub fn format_event_date(raw: Option<&str>) -> String {
    let display = format_description!("[day]/[month]/[year]");
    raw.and_then(parse_event_date)
        .and_then(|date| date.format(display).ok())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Returns the value, or [`PLACEHOLDER`] when it is missing or blank.
#[must_use]
pub fn or_placeholder(value: Option<&str>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .map_or_else(|| PLACEHOLDER.to_string(), ToString::to_string)
}

/// An event as shown to staff: labels, a formatted date and placeholders
/// for anything missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDisplay {
    pub evento: String,
    pub data: String,
    pub local: String,
    pub contratante: String,
    pub telefone: String,
    pub tipo: String,
    pub status: String,
}

impl From<&Event> for EventDisplay {
    fn from(event: &Event) -> Self {
        Self {
            evento: or_placeholder(Some(&event.name)),
            data: format_event_date(Some(&event.date)),
            local: or_placeholder(Some(&event.location)),
            contratante: or_placeholder(Some(&event.client_name)),
            telefone: or_placeholder(event.client_phone.as_deref()),
            tipo: event.engagement.label().to_string(),
            status: event.status.label().to_string(),
        }
    }
}
