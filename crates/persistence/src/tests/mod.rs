// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod watch_tests;

use m5_max_domain::{EngagementType, Event, EventStatus, Product};

use crate::{MemoryStore, tables};

pub fn create_test_event(id: &str, name: &str, date: &str, status: EventStatus) -> Event {
    Event {
        id: id.to_string(),
        name: name.to_string(),
        date: date.to_string(),
        location: String::from("Brasília"),
        client_name: String::from("Cliente Teste"),
        client_phone: Some(String::from("61999990000")),
        engagement: EngagementType::PyrotechnicShow,
        status,
        total_value: 2500.0,
        notes: None,
        pdf_url: None,
        created_at: Some(String::from("2026-01-10T10:00:00Z")),
        updated_at: None,
        confirmed_at: None,
        performed_at: None,
        cancelled_at: None,
    }
}

pub fn create_test_product(id: &str, name: &str, active: bool) -> Product {
    Product {
        id: id.to_string(),
        code: format!("P-{id}"),
        name: name.to_string(),
        category: String::from("Tortas"),
        manufacturer: None,
        effect: None,
        duration_seconds: Some(30),
        sale_price: 120.0,
        purchase_cost: Some(80.0),
        available_quantity: 10,
        active,
    }
}

pub fn create_test_store() -> MemoryStore {
    let store: MemoryStore = MemoryStore::new();
    store
        .seed(
            tables::QUOTES,
            &[
                create_test_event("e1", "Casamento", "2026-03-01", EventStatus::Pending),
                create_test_event("e2", "Réveillon", "2026-12-31", EventStatus::Confirmed),
            ],
        )
        .expect("seed events");
    store
        .seed(
            tables::PRODUCTS,
            &[
                create_test_product("p1", "Torta 100 tiros", true),
                create_test_product("p2", "Vulcão", false),
            ],
        )
        .expect("seed products");
    store
}
