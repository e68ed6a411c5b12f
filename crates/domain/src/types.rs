// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::event_status::EventStatus;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// Reads a nullable column, mapping `null` to the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Classification of a quote: a pyrotechnic show or a merchandise sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EngagementType {
    /// A produced fireworks show.
    #[serde(rename = "show_pirotecnico")]
    PyrotechnicShow,
    /// A sale of fireworks merchandise.
    #[serde(rename = "venda_artigos")]
    MerchandiseSale,
}

impl EngagementType {
    /// Returns the wire representation stored in the `tipo` column.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PyrotechnicShow => "show_pirotecnico",
            Self::MerchandiseSale => "venda_artigos",
        }
    }

    /// Returns the label shown to staff.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::PyrotechnicShow => "Show Pirotécnico",
            Self::MerchandiseSale => "Venda de Artigos",
        }
    }
}

impl FromStr for EngagementType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "show_pirotecnico" => Ok(Self::PyrotechnicShow),
            "venda_artigos" => Ok(Self::MerchandiseSale),
            _ => Err(DomainError::InvalidEngagementType {
                engagement: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for EngagementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A quote record viewed as a scheduled event.
///
/// There is no separate event entity: every row of the quotes table is an
/// event, whatever its status. Field names on the wire follow the table's
/// column names. Descriptive columns may be null on the table; they load
/// as empty strings (or zero) and render as placeholders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// The record identifier.
    pub id: String,
    /// The event name.
    #[serde(rename = "evento_nome", default, deserialize_with = "null_as_default")]
    pub name: String,
    /// The raw event date as stored (ISO 8601 date or timestamp).
    #[serde(rename = "evento_data", default, deserialize_with = "null_as_default")]
    pub date: String,
    /// Where the event takes place.
    #[serde(rename = "evento_local", default, deserialize_with = "null_as_default")]
    pub location: String,
    /// The contracting client's name.
    #[serde(rename = "nome_contratante", default, deserialize_with = "null_as_default")]
    pub client_name: String,
    /// The client's phone number.
    #[serde(rename = "telefone")]
    pub client_phone: Option<String>,
    /// Show or merchandise sale.
    #[serde(rename = "tipo")]
    pub engagement: EngagementType,
    /// Lifecycle status.
    pub status: EventStatus,
    /// Quote total value.
    #[serde(rename = "valor_total", default, deserialize_with = "null_as_default")]
    pub total_value: f64,
    /// Staff notes.
    #[serde(rename = "observacoes")]
    pub notes: Option<String>,
    /// Reference to the generated quote document.
    pub pdf_url: Option<String>,
    /// When the quote was created.
    pub created_at: Option<String>,
    /// When the quote was last updated.
    pub updated_at: Option<String>,
    /// When the event was confirmed.
    #[serde(rename = "confirmado_em")]
    pub confirmed_at: Option<String>,
    /// When the event was performed.
    #[serde(rename = "realizado_em")]
    pub performed_at: Option<String>,
    /// When the event was cancelled.
    #[serde(rename = "cancelado_em")]
    pub cancelled_at: Option<String>,
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// The product identifier.
    pub id: String,
    /// Catalog code.
    #[serde(rename = "codigo")]
    pub code: String,
    /// Product name.
    #[serde(rename = "nome_produto")]
    pub name: String,
    /// Catalog category.
    #[serde(rename = "categoria")]
    pub category: String,
    /// Manufacturer name.
    #[serde(rename = "fabricante")]
    pub manufacturer: Option<String>,
    /// Free-form effect tag (e.g. "Leque W colorido").
    #[serde(rename = "efeito")]
    pub effect: Option<String>,
    /// Effect duration in seconds.
    #[serde(rename = "duracao_segundos")]
    pub duration_seconds: Option<i64>,
    /// Sale price.
    #[serde(rename = "valor_venda")]
    pub sale_price: f64,
    /// Purchase cost.
    #[serde(rename = "valor_compra")]
    pub purchase_cost: Option<f64>,
    /// Units in stock.
    #[serde(rename = "quantidade_disponivel")]
    pub available_quantity: i64,
    /// Whether the product is offered.
    #[serde(rename = "ativo")]
    pub active: bool,
}

impl Product {
    /// Returns the duration when it is strictly positive.
    ///
    /// Only such products take part in duration or cost-per-second ranking.
    #[must_use]
    pub fn positive_duration(&self) -> Option<i64> {
        self.duration_seconds.filter(|d| *d > 0)
    }

    /// Returns sale price per second of effect, if the duration is positive.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn cost_per_second(&self) -> Option<f64> {
        self.positive_duration()
            .map(|duration| self.sale_price / duration as f64)
    }
}

/// A product line on a quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// The line item identifier.
    pub id: String,
    /// The owning quote.
    #[serde(rename = "orcamento_id")]
    pub quote_id: String,
    /// The referenced product.
    #[serde(rename = "produto_id")]
    pub product_id: String,
    /// Units quoted.
    #[serde(rename = "quantidade")]
    pub quantity: u32,
    /// Price per unit.
    #[serde(rename = "valor_unitario")]
    pub unit_price: f64,
    /// Quantity × unit price.
    #[serde(rename = "valor_total")]
    pub line_total: f64,
}

/// A line item together with the product it references, when still present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItemDetail {
    /// The line item.
    #[serde(flatten)]
    pub item: LineItem,
    /// The catalog product.
    #[serde(rename = "produtos")]
    pub product: Option<Product>,
}

/// Computes the total of a line as quantity × unit price.
#[must_use]
pub fn line_total(quantity: u32, unit_price: f64) -> f64 {
    f64::from(quantity) * unit_price
}
