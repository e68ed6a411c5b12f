// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test fixtures.

use m5_max_domain::{EngagementType, Event, EventStatus, Product};

pub fn create_test_event(
    id: &str,
    name: &str,
    client: &str,
    location: &str,
    status: EventStatus,
    engagement: EngagementType,
) -> Event {
    Event {
        id: id.to_string(),
        name: name.to_string(),
        date: String::from("2026-06-20"),
        location: location.to_string(),
        client_name: client.to_string(),
        client_phone: None,
        engagement,
        status,
        total_value: 1000.0,
        notes: None,
        pdf_url: None,
        created_at: None,
        updated_at: None,
        confirmed_at: None,
        performed_at: None,
        cancelled_at: None,
    }
}

/// Four events, one per status.
pub fn create_test_events() -> Vec<Event> {
    vec![
        create_test_event(
            "1",
            "Casamento Silva",
            "Maria Silva",
            "Chácara Bela Vista",
            EventStatus::Pending,
            EngagementType::PyrotechnicShow,
        ),
        create_test_event(
            "2",
            "Réveillon Lago Sul",
            "Clube do Lago",
            "Lago Sul",
            EventStatus::Confirmed,
            EngagementType::PyrotechnicShow,
        ),
        create_test_event(
            "3",
            "Festa Junina",
            "Escola Aurora",
            "Taguatinga",
            EventStatus::Cancelled,
            EngagementType::MerchandiseSale,
        ),
        create_test_event(
            "4",
            "Aniversário Costa",
            "Pedro Costa",
            "Asa Norte",
            EventStatus::Performed,
            EngagementType::MerchandiseSale,
        ),
    ]
}

pub fn create_test_product(
    id: &str,
    category: &str,
    effect: Option<&str>,
    sale_price: f64,
    duration: Option<i64>,
) -> Product {
    Product {
        id: id.to_string(),
        code: format!("COD-{id}"),
        name: format!("Torta {id}"),
        category: category.to_string(),
        manufacturer: None,
        effect: effect.map(ToString::to_string),
        duration_seconds: duration,
        sale_price,
        purchase_cost: None,
        available_quantity: 5,
        active: true,
    }
}

pub fn ids<T: HasId>(items: &[&T]) -> Vec<String> {
    items.iter().map(|item| item.id().to_string()).collect()
}

pub fn owned_ids<T: HasId>(items: &[T]) -> Vec<String> {
    items.iter().map(|item| item.id().to_string()).collect()
}

pub trait HasId {
    fn id(&self) -> &str;
}

impl HasId for Event {
    fn id(&self) -> &str {
        &self.id
    }
}

impl HasId for Product {
    fn id(&self) -> &str {
        &self.id
    }
}
