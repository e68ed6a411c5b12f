// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Quote edit draft.
//!
//! The edit form replaces a quote's header fields and its whole product
//! list. The total written back to the quote is always recomputed from the
//! draft's lines.

use crate::error::DomainError;
use crate::types::{EngagementType, Product, line_total};
use serde::{Deserialize, Serialize};

/// A product line being edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftLineItem {
    /// The referenced product.
    pub produto_id: String,
    /// Product name, for display.
    pub nome: String,
    /// Units quoted.
    pub quantidade: u32,
    /// Price per unit.
    pub valor_unitario: f64,
}

impl DraftLineItem {
    /// Returns quantity × unit price.
    #[must_use]
    pub fn total(&self) -> f64 {
        line_total(self.quantidade, self.valor_unitario)
    }
}

/// The full edit form of a quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteEdit {
    pub tipo: EngagementType,
    pub nome_contratante: String,
    pub telefone: Option<String>,
    pub cpf: Option<String>,
    pub evento_nome: String,
    pub evento_data: String,
    pub evento_local: String,
    pub modo_pagamento: String,
    #[serde(default)]
    pub produtos: Vec<DraftLineItem>,
}

impl QuoteEdit {
    /// Adds one unit of a product.
    ///
    /// A product already on the draft has its quantity incremented; otherwise
    /// a new line is appended at the product's sale price.
    pub fn add_product(&mut self, product: &Product) {
        if let Some(existing) = self
            .produtos
            .iter_mut()
            .find(|line| line.produto_id == product.id)
        {
            existing.quantidade = existing.quantidade.saturating_add(1);
            return;
        }

        self.produtos.push(DraftLineItem {
            produto_id: product.id.clone(),
            nome: product.name.clone(),
            quantidade: 1,
            valor_unitario: product.sale_price,
        });
    }

    /// Removes the line at `index`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::LineItemNotFound` if the index is out of range.
    pub fn remove_line(&mut self, index: usize) -> Result<DraftLineItem, DomainError> {
        if index >= self.produtos.len() {
            return Err(DomainError::LineItemNotFound {
                index,
                len: self.produtos.len(),
            });
        }
        Ok(self.produtos.remove(index))
    }

    /// Sets the quantity of the line at `index`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::LineItemNotFound` if the index is out of range.
    pub fn set_quantity(&mut self, index: usize, quantity: u32) -> Result<(), DomainError> {
        let len: usize = self.produtos.len();
        let line: &mut DraftLineItem = self
            .produtos
            .get_mut(index)
            .ok_or(DomainError::LineItemNotFound { index, len })?;
        line.quantidade = quantity;
        Ok(())
    }

    /// Sets the unit price of the line at `index`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::LineItemNotFound` if the index is out of range.
    pub fn set_unit_price(&mut self, index: usize, price: f64) -> Result<(), DomainError> {
        let len: usize = self.produtos.len();
        let line: &mut DraftLineItem = self
            .produtos
            .get_mut(index)
            .ok_or(DomainError::LineItemNotFound { index, len })?;
        line.valor_unitario = price;
        Ok(())
    }

    /// Returns the sum of all line totals.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.produtos.iter().map(DraftLineItem::total).sum()
    }

    /// Validates the draft before it is written back.
    ///
    /// # Errors
    ///
    /// Returns an error if a required header field is blank, a quantity is
    /// zero, or a unit price is negative or not finite.
    pub fn validate(&self) -> Result<(), DomainError> {
        let required: [(&'static str, &str); 4] = [
            ("nome_contratante", self.nome_contratante.as_str()),
            ("evento_nome", self.evento_nome.as_str()),
            ("evento_data", self.evento_data.as_str()),
            ("evento_local", self.evento_local.as_str()),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(DomainError::MissingField { field });
            }
        }

        for (index, line) in self.produtos.iter().enumerate() {
            if line.quantidade == 0 {
                return Err(DomainError::InvalidQuantity {
                    index,
                    quantity: line.quantidade,
                });
            }
            if !line.valor_unitario.is_finite() || line.valor_unitario < 0.0 {
                return Err(DomainError::InvalidUnitPrice {
                    index,
                    price: line.valor_unitario,
                });
            }
        }

        Ok(())
    }
}
