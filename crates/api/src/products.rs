// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use m5_max::{ProductCriteria, Selection, SortOrder, categories, select_products};
use m5_max_domain::Product;
use m5_max_persistence::{Page, Query, RemoteStore, tables};
use std::sync::Arc;
use tracing::debug;

use crate::error::{ApiError, translate_core_error, translate_persistence_error};
use crate::events::fail;
use crate::notification::Outcome;
use crate::request_response::{StockQuery, StockResponse};

/// Builds product pipeline criteria from stock page parameters.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if an ordering is not `none`, `asc` or
/// `desc`.
pub fn product_criteria(query: &StockQuery) -> Result<ProductCriteria, ApiError> {
    let selection = |value: Option<&String>| -> Selection<String> {
        value.map_or(Selection::All, |v| v.parse().unwrap_or_default())
    };
    let order = |value: Option<&String>| -> Result<SortOrder, ApiError> {
        value.map_or(Ok(SortOrder::None), |v| v.parse().map_err(translate_core_error))
    };

    Ok(ProductCriteria {
        search: query.search.clone().unwrap_or_default(),
        category: selection(query.category.as_ref()),
        effect: selection(query.effect.as_ref()),
        price_order: order(query.price_order.as_ref())?,
        duration_order: order(query.duration_order.as_ref())?,
    })
}

/// Read access to the product catalog.
#[derive(Clone)]
pub struct ProductService {
    store: Arc<dyn RemoteStore>,
}

impl ProductService {
    #[must_use]
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self { store }
    }

    /// Lists active products ordered by name.
    pub async fn list_active(&self) -> Outcome<Vec<Product>> {
        let query: Query = Query::table(tables::PRODUCTS)
            .eq("ativo", "true")
            .order("nome_produto", true);

        match self.store.select(&query).await.and_then(Page::decode) {
            Ok(products) => {
                debug!(count = products.len(), "Loaded active products");
                Outcome::quiet(products)
            }
            Err(e) => fail(
                Vec::new(),
                "Erro ao carregar produtos",
                translate_persistence_error(e),
            ),
        }
    }

    /// The stock page: active products run through the product pipeline.
    ///
    /// Categories and the active count always cover the full catalog.
    pub async fn stock(&self, query: &StockQuery) -> Outcome<StockResponse> {
        let criteria: ProductCriteria = match product_criteria(query) {
            Ok(criteria) => criteria,
            Err(e) => {
                return fail(
                    StockResponse {
                        products: Vec::new(),
                        categories: Vec::new(),
                        total_active: 0,
                    },
                    "Erro ao carregar produtos",
                    e,
                );
            }
        };

        self.list_active().await.map(|catalog| StockResponse {
            products: select_products(&catalog, &criteria)
                .into_iter()
                .cloned()
                .collect(),
            categories: categories(&catalog),
            total_active: catalog.len(),
        })
    }
}
