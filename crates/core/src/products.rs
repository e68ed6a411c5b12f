// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Product catalog filtering and ranking.
//!
//! Choosing any sort order hides products without a positive duration:
//! duration and cost-per-second ranking are meaningless for them.

use crate::selection::{SortOrder, Selection};
use m5_max_domain::{Product, effect_matches};
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Criteria selected in the product picker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductCriteria {
    /// Free text matched against product name and code.
    pub search: String,
    /// Category filter.
    pub category: Selection<String>,
    /// Effect filter: a family name or any substring of the effect tag.
    pub effect: Selection<String>,
    /// Sale price ordering.
    pub price_order: SortOrder,
    /// Duration ordering.
    pub duration_order: SortOrder,
}

impl ProductCriteria {
    /// Returns true if either ordering is selected.
    #[must_use]
    pub const fn has_ordering(&self) -> bool {
        self.price_order.is_active() || self.duration_order.is_active()
    }
}

/// Returns true if the product passes every filter in the criteria.
#[must_use]
pub fn matches_product(product: &Product, criteria: &ProductCriteria) -> bool {
    if criteria.has_ordering() && product.positive_duration().is_none() {
        return false;
    }

    let term: String = criteria.search.trim().to_lowercase();
    let matches_search: bool = term.is_empty()
        || product.name.to_lowercase().contains(&term)
        || product.code.to_lowercase().contains(&term);

    let matches_category: bool = criteria.category.matches(&product.category);

    let matches_effect: bool = match &criteria.effect {
        Selection::All => true,
        Selection::Only(filter) => effect_matches(product.effect.as_deref(), filter),
    };

    matches_search && matches_category && matches_effect
}

/// Filters the catalog, preserving its order.
#[must_use]
pub fn filter_products<'a>(products: &'a [Product], criteria: &ProductCriteria) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|product| matches_product(product, criteria))
        .collect()
}

fn duration_key(product: &Product) -> i64 {
    product.duration_seconds.unwrap_or(0)
}

fn ratio_key(product: &Product) -> f64 {
    product.cost_per_second().unwrap_or(f64::INFINITY)
}

/// Sorts products by the selected orderings (stable).
///
/// - Price only: by sale price.
/// - Duration only: by duration.
/// - Price ascending with duration descending: cost per second ascending
///   (best value first).
/// - Price descending with duration ascending: cost per second descending.
/// - Any other pair: duration first, ties broken by price.
pub fn sort_products(products: &mut [&Product], price: SortOrder, duration: SortOrder) {
    match (price, duration) {
        (SortOrder::None, SortOrder::None) => {}
        (SortOrder::None, _) => {
            products.sort_by(|a, b| duration.apply(duration_key(a).cmp(&duration_key(b))));
        }
        (_, SortOrder::None) => {
            products.sort_by(|a, b| price.apply(a.sale_price.total_cmp(&b.sale_price)));
        }
        (SortOrder::Asc, SortOrder::Desc) => {
            products.sort_by(|a, b| ratio_key(a).total_cmp(&ratio_key(b)));
        }
        (SortOrder::Desc, SortOrder::Asc) => {
            products.sort_by(|a, b| ratio_key(b).total_cmp(&ratio_key(a)));
        }
        _ => {
            products.sort_by(|a, b| {
                let by_duration: Ordering =
                    duration.apply(duration_key(a).cmp(&duration_key(b)));
                by_duration.then_with(|| price.apply(a.sale_price.total_cmp(&b.sale_price)))
            });
        }
    }
}

/// Filters then sorts the catalog.
#[must_use]
pub fn select_products<'a>(
    products: &'a [Product],
    criteria: &ProductCriteria,
) -> Vec<&'a Product> {
    let mut selected: Vec<&Product> = filter_products(products, criteria);
    sort_products(&mut selected, criteria.price_order, criteria.duration_order);
    selected
}

/// Returns the distinct categories of the catalog, sorted.
#[must_use]
pub fn categories(products: &[Product]) -> Vec<String> {
    products
        .iter()
        .map(|product| product.category.clone())
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}
