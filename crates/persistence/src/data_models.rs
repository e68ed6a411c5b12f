// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Wire shapes of rows written to or read from the remote store.

use m5_max_domain::{DraftLineItem, EngagementType, EventStatus, QuoteEdit};
use serde::{Deserialize, Serialize};

/// Table names.
pub mod tables {
    pub const QUOTES: &str = "orcamentos";
    pub const LINE_ITEMS: &str = "orcamentos_produtos";
    pub const PRODUCTS: &str = "produtos";
    pub const PROFILES: &str = "usuarios";
    pub const LEADS: &str = "lead_submissions";
}

/// Columns selected when listing events.
pub const EVENT_COLUMNS: &str = "id,evento_nome,evento_data,evento_local,nome_contratante,\
telefone,tipo,status,valor_total,observacoes,pdf_url,created_at,updated_at,confirmado_em,\
realizado_em,cancelado_em";

/// A staff profile row (`usuarios`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRow {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub nome: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Patch written by a status change: the status plus its timestamp column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusPatch {
    pub status: EventStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmado_em: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub realizado_em: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelado_em: Option<String>,
}

impl StatusPatch {
    /// Builds the patch for `status`, stamping only its own timestamp.
    #[must_use]
    pub fn new(status: EventStatus, now: &str) -> Self {
        let stamp = |column: &str| -> Option<String> {
            (status.timestamp_column() == Some(column)).then(|| now.to_string())
        };
        Self {
            status,
            confirmado_em: stamp("confirmado_em"),
            realizado_em: stamp("realizado_em"),
            cancelado_em: stamp("cancelado_em"),
        }
    }
}

/// Patch written when notes are saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotesPatch {
    pub observacoes: String,
}

/// Header patch written by a quote edit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuotePatch {
    pub tipo: EngagementType,
    pub nome_contratante: String,
    pub telefone: Option<String>,
    pub cpf: Option<String>,
    pub evento_nome: String,
    pub evento_data: String,
    pub evento_local: String,
    pub modo_pagamento: String,
    pub valor_total: f64,
}

impl From<&QuoteEdit> for QuotePatch {
    fn from(edit: &QuoteEdit) -> Self {
        Self {
            tipo: edit.tipo,
            nome_contratante: edit.nome_contratante.clone(),
            telefone: edit.telefone.clone(),
            cpf: edit.cpf.clone(),
            evento_nome: edit.evento_nome.clone(),
            evento_data: edit.evento_data.clone(),
            evento_local: edit.evento_local.clone(),
            modo_pagamento: edit.modo_pagamento.clone(),
            valor_total: edit.total(),
        }
    }
}

/// A line item row to insert (`orcamentos_produtos`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewLineItem {
    pub orcamento_id: String,
    pub produto_id: String,
    pub quantidade: u32,
    pub valor_unitario: f64,
    pub valor_total: f64,
}

impl NewLineItem {
    #[must_use]
    pub fn from_draft(quote_id: &str, draft: &DraftLineItem) -> Self {
        Self {
            orcamento_id: quote_id.to_string(),
            produto_id: draft.produto_id.clone(),
            quantidade: draft.quantidade,
            valor_unitario: draft.valor_unitario,
            valor_total: draft.total(),
        }
    }
}
