// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod display;
mod effect;
mod error;
mod event_status;
mod lead;
mod margin;
mod quote_edit;
mod types;

#[cfg(test)]
mod tests;

pub use display::{
    EventDisplay, PLACEHOLDER, format_event_date, or_placeholder, parse_event_date,
};
pub use effect::{EFFECT_FAMILIES, EffectFamily, effect_matches};
pub use error::DomainError;
pub use event_status::EventStatus;
pub use lead::{LeadSubmission, Solicitation};
pub use margin::{Margin, compute_margin};
pub use quote_edit::{DraftLineItem, QuoteEdit};
pub use types::{EngagementType, Event, LineItem, LineItemDetail, Product, line_total};
