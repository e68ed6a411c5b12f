// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response types.

use m5_max::EventStatistics;
use m5_max_domain::{Event, EventDisplay, LineItemDetail, Margin, Product};
use serde::{Deserialize, Serialize};

/// Default number of events per page.
pub const DEFAULT_PAGE_SIZE: u64 = 50;

/// Parameters of the paginated event listing.
///
/// Every field is optional; string filters accept the `all` sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventListParams {
    pub status: Option<String>,
    pub tipo: Option<String>,
    /// Earliest event date (inclusive).
    pub data_inicio: Option<String>,
    /// Latest event date (inclusive).
    pub data_fim: Option<String>,
    pub cliente_nome: Option<String>,
    pub search: Option<String>,
    pub order_by: Option<String>,
    /// `asc` or `desc`.
    pub direction: Option<String>,
    /// One-based page number.
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

/// One page of events plus the total number of matches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventPage {
    pub events: Vec<Event>,
    pub count: u64,
    pub page: u64,
    pub limit: u64,
}

/// An event row plus its rendering for the events page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventCard {
    #[serde(flatten)]
    pub event: Event,
    pub display: EventDisplay,
}

impl From<Event> for EventCard {
    fn from(event: Event) -> Self {
        let display: EventDisplay = EventDisplay::from(&event);
        Self { event, display }
    }
}

/// An event with its product lines and margin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDetail {
    pub event: Event,
    pub display: EventDisplay,
    pub items: Vec<LineItemDetail>,
    pub margin: Margin,
}

/// Filters for the in-memory events page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventsQuery {
    pub status: Option<String>,
    pub tipo: Option<String>,
    pub search: Option<String>,
}

/// The events page: visible events plus counters over the full list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventsResponse {
    pub events: Vec<EventCard>,
    pub statistics: EventStatistics,
}

/// Filters and orderings for the stock page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub effect: Option<String>,
    pub price_order: Option<String>,
    pub duration_order: Option<String>,
}

/// The stock page: selected products plus the category menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockResponse {
    pub products: Vec<Product>,
    pub categories: Vec<String>,
    pub total_active: usize,
}

/// Summary shown on the dashboard landing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub statistics: EventStatistics,
    pub active_products: usize,
    pub leads: usize,
    pub contact_phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user_id: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotesRequest {
    pub observacoes: String,
}

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
