// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain hooks for the M5 Max admin area.
//!
//! Every hook talks to a [`RemoteStore`](m5_max_persistence::RemoteStore),
//! catches remote failures, and reports them as destructive
//! [`Notification`]s alongside an empty value. Authentication and
//! configuration live here too, so the server crate only wires routes.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod config;
mod error;
mod events;
mod leads;
mod notification;
mod products;
mod quotes;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthenticationService, AuthorizationService, Role};
pub use config::{ConfigError, DEFAULT_WHATSAPP_NUMBER, RemoteSettings, Settings, validate_url};
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use events::{
    DEFAULT_ORDER_COLUMN, EventService, SORTABLE_COLUMNS, build_list_query, event_criteria,
    page_bounds,
};
pub use leads::LeadService;
pub use notification::{Notification, Outcome, Variant};
pub use products::{ProductService, product_criteria};
pub use quotes::QuoteService;
pub use request_response::{
    DEFAULT_PAGE_SIZE, DashboardResponse, ErrorResponse, EventCard, EventDetail, EventListParams,
    EventPage, EventsQuery, EventsResponse, LoginRequest, LoginResponse, NotesRequest,
    StatusUpdateRequest, StockQuery, StockResponse,
};
