// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Profit margin of a quote.

use crate::types::LineItemDetail;
use serde::{Deserialize, Serialize};

/// Margin of a quote over the purchase cost of its products.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    /// Sum of purchase cost × quantity over distinct lines.
    pub custo: f64,
    /// Quote total minus purchase cost.
    pub margem: f64,
    /// Margin as a percentage of purchase cost; zero when cost is zero.
    pub percentual: f64,
}

/// Computes the margin of a quote.
///
/// Duplicate lines (same product, quantity and unit price) are counted once.
/// Lines whose product is gone or has no purchase cost contribute nothing.
#[must_use]
pub fn compute_margin(total_value: f64, items: &[LineItemDetail]) -> Margin {
    let mut seen: Vec<(Option<&str>, u32, u64)> = Vec::with_capacity(items.len());
    let mut cost: f64 = 0.0;

    for detail in items {
        let key: (Option<&str>, u32, u64) = (
            detail.product.as_ref().map(|p| p.id.as_str()),
            detail.item.quantity,
            detail.item.unit_price.to_bits(),
        );
        if seen.contains(&key) {
            continue;
        }
        seen.push(key);

        if let Some(purchase_cost) = detail.product.as_ref().and_then(|p| p.purchase_cost) {
            cost += purchase_cost * f64::from(detail.item.quantity);
        }
    }

    let margin: f64 = total_value - cost;
    let percent: f64 = if cost > 0.0 {
        margin / cost * 100.0
    } else {
        0.0
    };

    Margin {
        custo: cost,
        margem: margin,
        percentual: percent,
    }
}
