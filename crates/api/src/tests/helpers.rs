// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use m5_max_domain::{EngagementType, Event, EventStatus, LineItem, Product};
use m5_max_persistence::{MemoryStore, ProfileRow, RemoteStore, tables};
use serde_json::{Value, json};
use std::sync::Arc;

pub fn create_test_event(
    id: &str,
    name: &str,
    date: &str,
    client: &str,
    status: EventStatus,
) -> Event {
    Event {
        id: id.to_string(),
        name: name.to_string(),
        date: date.to_string(),
        location: String::from("Brasília"),
        client_name: client.to_string(),
        client_phone: None,
        engagement: EngagementType::PyrotechnicShow,
        status,
        total_value: 1000.0,
        notes: None,
        pdf_url: None,
        created_at: Some(String::from("2026-01-05T09:00:00Z")),
        updated_at: None,
        confirmed_at: None,
        performed_at: None,
        cancelled_at: None,
    }
}

pub fn create_test_product(id: &str, name: &str, category: &str, price: f64, cost: f64) -> Product {
    Product {
        id: id.to_string(),
        code: format!("COD-{id}"),
        name: name.to_string(),
        category: category.to_string(),
        manufacturer: None,
        effect: Some(String::from("leque w")),
        duration_seconds: Some(20),
        sale_price: price,
        purchase_cost: Some(cost),
        available_quantity: 5,
        active: true,
    }
}

fn line(id: &str, quote_id: &str, product_id: &str, quantity: u32, unit_price: f64) -> LineItem {
    LineItem {
        id: id.to_string(),
        quote_id: quote_id.to_string(),
        product_id: product_id.to_string(),
        quantity,
        unit_price,
        line_total: f64::from(quantity) * unit_price,
    }
}

/// Five events, two products, two line items on `e1` and two profiles.
pub fn create_test_store() -> MemoryStore {
    let store: MemoryStore = MemoryStore::new();

    let mut sale: Event = create_test_event(
        "e5",
        "Venda Loja",
        "2026-05-20",
        "Loja Centro",
        EventStatus::Cancelled,
    );
    sale.engagement = EngagementType::MerchandiseSale;

    store
        .seed(
            tables::QUOTES,
            &[
                create_test_event("e1", "Casamento Ana", "2026-02-14", "Ana Souza", EventStatus::Pending),
                create_test_event("e2", "Formatura", "2026-07-01", "Clube do Choro", EventStatus::Confirmed),
                create_test_event("e3", "Réveillon", "2026-12-31", "Clube do Rock", EventStatus::Performed),
                create_test_event("e4", "Aniversário", "2026-03-10", "Bruno Lima", EventStatus::Pending),
                sale,
            ],
        )
        .unwrap();

    let mut inactive: Product = create_test_product("p3", "Vulcão", "Vulcões", 40.0, 20.0);
    inactive.active = false;
    store
        .seed(
            tables::PRODUCTS,
            &[
                create_test_product("p1", "Torta 100 tiros", "Tortas", 300.0, 180.0),
                create_test_product("p2", "Bomba 12 tiros", "Bombas", 50.0, 30.0),
                inactive,
            ],
        )
        .unwrap();

    store
        .seed(
            tables::LINE_ITEMS,
            &[line("l1", "e1", "p1", 2, 300.0), line("l2", "e1", "p2", 4, 100.0)],
        )
        .unwrap();

    store
        .seed(
            tables::PROFILES,
            &[
                ProfileRow {
                    id: String::from("u-admin"),
                    email: Some(String::from("admin@m5.com")),
                    nome: Some(String::from("Administradora")),
                    role: Some(String::from("admin")),
                },
                ProfileRow {
                    id: String::from("u-staff"),
                    email: Some(String::from("staff@m5.com")),
                    nome: Some(String::from("Equipe")),
                    role: Some(String::from("vendedor")),
                },
            ],
        )
        .unwrap();

    store
}

pub fn as_remote(store: &MemoryStore) -> Arc<dyn RemoteStore> {
    Arc::new(store.clone())
}

/// Reads one row of the quotes table as raw JSON.
pub fn quote_row(store: &MemoryStore, id: &str) -> Value {
    store
        .rows(tables::QUOTES)
        .into_iter()
        .find(|row| row["id"] == json!(id))
        .expect("quote row")
}
