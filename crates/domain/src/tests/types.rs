// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::create_test_product;
use crate::{EngagementType, Event, EventDisplay, EventStatus, PLACEHOLDER, Product};

#[test]
fn test_engagement_type_parse_and_labels() {
    assert_eq!(
        "show_pirotecnico".parse::<EngagementType>(),
        Ok(EngagementType::PyrotechnicShow)
    );
    assert_eq!(
        "venda_artigos".parse::<EngagementType>(),
        Ok(EngagementType::MerchandiseSale)
    );
    assert!("casamento".parse::<EngagementType>().is_err());
    assert_eq!(EngagementType::PyrotechnicShow.label(), "Show Pirotécnico");
}

#[test]
fn test_event_deserializes_from_quote_columns() {
    let json: &str = r#"{
        "id": "q-1",
        "evento_nome": "Casamento Silva",
        "evento_data": "2026-05-10",
        "evento_local": "Chácara Bela Vista",
        "nome_contratante": "Maria Silva",
        "telefone": null,
        "tipo": "show_pirotecnico",
        "status": "confirmado",
        "valor_total": 4500.5,
        "observacoes": null,
        "pdf_url": null,
        "created_at": "2026-01-02T10:00:00Z",
        "updated_at": null,
        "confirmado_em": "2026-01-05T12:00:00Z",
        "realizado_em": null,
        "cancelado_em": null
    }"#;

    let event: Event = serde_json::from_str(json).unwrap();

    assert_eq!(event.name, "Casamento Silva");
    assert_eq!(event.status, EventStatus::Confirmed);
    assert_eq!(event.engagement, EngagementType::PyrotechnicShow);
    assert_eq!(event.total_value, 4500.5);
}

#[test]
fn test_event_with_null_columns_still_loads() {
    let json: &str = r#"{
        "id": "q-2",
        "evento_nome": "Venda balcão",
        "evento_data": null,
        "evento_local": null,
        "nome_contratante": null,
        "telefone": null,
        "tipo": "venda_artigos",
        "status": "pendente",
        "valor_total": null
    }"#;

    let event: Event = serde_json::from_str(json).unwrap();

    assert_eq!(event.location, "");
    assert_eq!(event.client_name, "");
    assert!(event.total_value.abs() < f64::EPSILON);
    assert_eq!(event.pdf_url, None);

    let display: EventDisplay = EventDisplay::from(&event);
    assert_eq!(display.evento, "Venda balcão");
    assert_eq!(display.data, PLACEHOLDER);
    assert_eq!(display.local, PLACEHOLDER);
    assert_eq!(display.contratante, PLACEHOLDER);
    assert_eq!(display.telefone, PLACEHOLDER);
    assert_eq!(display.tipo, "Venda de Artigos");
    assert_eq!(display.status, "Pendente");
}

#[test]
fn test_event_display_formats_date() {
    let json: &str = r#"{
        "id": "q-3",
        "evento_nome": "Réveillon",
        "evento_data": "2026-12-31",
        "evento_local": "Esplanada",
        "nome_contratante": "Administração",
        "telefone": "61999990000",
        "tipo": "show_pirotecnico",
        "status": "confirmado",
        "valor_total": 42000
    }"#;
    let event: Event = serde_json::from_str(json).unwrap();

    let display: EventDisplay = EventDisplay::from(&event);

    assert_eq!(display.data, "31/12/2026");
    assert_eq!(display.local, "Esplanada");
    assert_eq!(display.telefone, "61999990000");
    assert_eq!(display.tipo, "Show Pirotécnico");
    assert_eq!(display.status, "Confirmado");
}

#[test]
fn test_positive_duration_and_cost_per_second() {
    let product: Product = create_test_product("a", 10.0, Some(5));
    assert_eq!(product.positive_duration(), Some(5));
    assert_eq!(product.cost_per_second(), Some(2.0));

    let zero: Product = create_test_product("b", 10.0, Some(0));
    assert_eq!(zero.positive_duration(), None);
    assert_eq!(zero.cost_per_second(), None);

    let negative: Product = create_test_product("c", 10.0, Some(-3));
    assert_eq!(negative.cost_per_second(), None);
}
