// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use m5_max_domain::{DraftLineItem, EngagementType, Event, QuoteEdit};
use m5_max_persistence::{MemoryStore, tables};
use serde_json::{Value, json};

use super::helpers::{as_remote, create_test_store, quote_row};
use crate::{ApiError, Outcome, QuoteService};

fn draft(product_id: &str, quantity: u32, price: f64) -> DraftLineItem {
    DraftLineItem {
        produto_id: product_id.to_string(),
        nome: format!("Produto {product_id}"),
        quantidade: quantity,
        valor_unitario: price,
    }
}

fn edit(lines: Vec<DraftLineItem>) -> QuoteEdit {
    QuoteEdit {
        tipo: EngagementType::PyrotechnicShow,
        nome_contratante: String::from("Ana Souza"),
        telefone: Some(String::from("61988887777")),
        cpf: None,
        evento_nome: String::from("Casamento Ana e João"),
        evento_data: String::from("2026-02-14"),
        evento_local: String::from("Chácara Bela Vista"),
        modo_pagamento: String::from("pix"),
        produtos: lines,
    }
}

fn lines_of(store: &MemoryStore, quote_id: &str) -> Vec<Value> {
    store
        .rows(tables::LINE_ITEMS)
        .into_iter()
        .filter(|row| row["orcamento_id"] == json!(quote_id))
        .collect()
}

#[tokio::test]
async fn test_edit_replaces_lines_and_recomputes_total() {
    let store: MemoryStore = create_test_store();
    let quotes: QuoteService = QuoteService::new(as_remote(&store));

    let outcome: Outcome<Option<Event>> = quotes
        .update_quote("e1", &edit(vec![draft("p2", 3, 55.0)]))
        .await;

    let event: Event = outcome.value.unwrap();
    assert_eq!(event.name, "Casamento Ana e João");
    assert!((event.total_value - 165.0).abs() < 1e-9);
    assert_eq!(
        outcome.notification.unwrap().title,
        "Orçamento atualizado!"
    );

    let lines: Vec<Value> = lines_of(&store, "e1");
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["produto_id"], "p2");
    assert_eq!(lines[0]["quantidade"], 3);
    assert_eq!(quote_row(&store, "e1")["modo_pagamento"], "pix");
}

#[tokio::test]
async fn test_edit_without_lines_clears_them() {
    let store: MemoryStore = create_test_store();
    let quotes: QuoteService = QuoteService::new(as_remote(&store));

    let outcome: Outcome<Option<Event>> = quotes.update_quote("e1", &edit(Vec::new())).await;

    assert!(!outcome.is_failure());
    assert!(outcome.value.unwrap().total_value.abs() < f64::EPSILON);
    assert!(lines_of(&store, "e1").is_empty());
}

#[tokio::test]
async fn test_invalid_draft_writes_nothing() {
    let store: MemoryStore = create_test_store();
    let quotes: QuoteService = QuoteService::new(as_remote(&store));
    let mut invalid: QuoteEdit = edit(vec![draft("p1", 0, 10.0)]);
    invalid.evento_nome = String::from("Outro nome");

    let outcome: Outcome<Option<Event>> = quotes.update_quote("e1", &invalid).await;

    assert!(outcome.value.is_none());
    assert!(matches!(outcome.error, Some(ApiError::InvalidInput { .. })));
    let notification = outcome.notification.unwrap();
    assert_eq!(notification.title, "Erro");
    assert_eq!(
        notification.description,
        "Não foi possível atualizar o orçamento"
    );
    assert_eq!(quote_row(&store, "e1")["evento_nome"], "Casamento Ana");
    assert_eq!(lines_of(&store, "e1").len(), 2);
}

#[tokio::test]
async fn test_line_failure_keeps_saved_header() {
    let store: MemoryStore = create_test_store();
    store.fail_table(tables::LINE_ITEMS);
    let quotes: QuoteService = QuoteService::new(as_remote(&store));

    let outcome: Outcome<Option<Event>> = quotes
        .update_quote("e1", &edit(vec![draft("p1", 1, 300.0)]))
        .await;

    assert!(outcome.is_failure());
    assert!(outcome.value.is_none());
    assert_eq!(quote_row(&store, "e1")["evento_nome"], "Casamento Ana e João");

    store.recover(tables::LINE_ITEMS);
    assert_eq!(lines_of(&store, "e1").len(), 2);
}

#[tokio::test]
async fn test_edit_of_missing_quote() {
    let store: MemoryStore = create_test_store();
    let quotes: QuoteService = QuoteService::new(as_remote(&store));

    let outcome: Outcome<Option<Event>> = quotes.update_quote("nope", &edit(Vec::new())).await;

    assert!(matches!(
        outcome.error,
        Some(ApiError::ResourceNotFound { .. })
    ));
}
