// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-memory filter, search and sort pipeline for the admin dashboard.
//!
//! Everything here is a pure function of (list, criteria) except the
//! debounce machinery, which only decides *when* the pure functions run.

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

mod debounce;
mod error;
mod events;
mod products;
mod search;
mod selection;

#[cfg(test)]
mod tests;

pub use debounce::{DEFAULT_SEARCH_QUIET_PERIOD, DebounceStats, Debouncer};
pub use error::CoreError;
pub use events::{
    EventCriteria, EventStatistics, filter_events, matches_filters, matches_search,
    normalize_term,
};
pub use products::{
    ProductCriteria, categories, filter_products, matches_product, select_products,
    sort_products,
};
pub use search::DebouncedSearch;
pub use selection::{ALL, Selection, SortOrder};
