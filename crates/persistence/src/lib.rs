// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Remote data boundary for the M5 Max admin service.
//!
//! Persistence and authentication are delegated to a hosted
//! backend-as-a-service. This crate provides:
//!
//! - a [`Query`] builder rendering PostgREST filters, ordering, ranges and
//!   exact counts
//! - the [`RemoteStore`] trait, with an HTTP implementation for the hosted
//!   API and an in-memory one for development and tests
//! - the [`ChangeFeed`] every store publishes its writes on, and a
//!   [`TableWatcher`] publishing writes made by other clients
//! - the [`AuthGateway`] trait over the hosted auth service
//!
//! ## Testing Philosophy
//!
//! - Standard tests run against [`MemoryStore`] and [`MemoryAuth`] only
//! - The HTTP backends are tested by inspecting built requests, never by
//!   reaching the network

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
mod backend;
mod data_models;
mod error;
mod feed;
mod query;
mod watch;

#[cfg(test)]
mod tests;

pub use auth::{AuthGateway, AuthSession, AuthUser, HostedAuth, MemoryAuth};
pub use backend::http::{APPLICATION_NAME, HttpStore};
pub use backend::memory::MemoryStore;
pub use backend::{Page, RemoteStore, decode_rows, row_id};
pub use data_models::{
    EVENT_COLUMNS, NewLineItem, NotesPatch, ProfileRow, QuotePatch, StatusPatch, tables,
};
pub use error::PersistenceError;
pub use feed::{ChangeEvent, ChangeFeed, ChangeKind, Subscription};
pub use query::{Filter, Order, Query, parse_content_range};
pub use watch::{DEFAULT_WATCH_INTERVAL, TableWatcher};
