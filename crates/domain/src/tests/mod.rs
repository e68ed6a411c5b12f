// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::float_cmp)]

mod types;

use crate::{LineItem, LineItemDetail, Product};

pub fn create_test_product(id: &str, sale_price: f64, duration: Option<i64>) -> Product {
    Product {
        id: id.to_string(),
        code: format!("P-{id}"),
        name: format!("Produto {id}"),
        category: String::from("Tortas"),
        manufacturer: Some(String::from("Fogos Brasil")),
        effect: Some(String::from("Leque W")),
        duration_seconds: duration,
        sale_price,
        purchase_cost: Some(sale_price / 2.0),
        available_quantity: 10,
        active: true,
    }
}

pub fn create_test_line(product: Option<Product>, quantity: u32, unit_price: f64) -> LineItemDetail {
    LineItemDetail {
        item: LineItem {
            id: format!("li-{quantity}-{unit_price}"),
            quote_id: String::from("q-1"),
            product_id: product
                .as_ref()
                .map_or_else(|| String::from("gone"), |p| p.id.clone()),
            quantity,
            unit_price,
            line_total: crate::line_total(quantity, unit_price),
        },
        product,
    }
}
