// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Sample data for running the server without a hosted project.

use m5_max_domain::{EngagementType, Event, EventStatus, LineItem, Product, line_total};
use m5_max_persistence::{MemoryAuth, MemoryStore, PersistenceError, ProfileRow, tables};
use tracing::warn;

pub const DEMO_ADMIN_EMAIL: &str = "admin@m5max.local";
pub const DEMO_ADMIN_PASSWORD: &str = "fogos-demo";
pub const DEMO_STAFF_EMAIL: &str = "equipe@m5max.local";

#[allow(clippy::too_many_arguments)]
fn event(
    id: &str,
    name: &str,
    date: &str,
    location: &str,
    client: &str,
    engagement: EngagementType,
    status: EventStatus,
    total_value: f64,
) -> Event {
    Event {
        id: id.to_string(),
        name: name.to_string(),
        date: date.to_string(),
        location: location.to_string(),
        client_name: client.to_string(),
        client_phone: Some(String::from("61999990000")),
        engagement,
        status,
        total_value,
        notes: None,
        pdf_url: None,
        created_at: Some(String::from("2026-01-02T12:00:00Z")),
        updated_at: None,
        confirmed_at: None,
        performed_at: None,
        cancelled_at: None,
    }
}

fn product(
    id: &str,
    name: &str,
    category: &str,
    effect: &str,
    duration: i64,
    price: f64,
    cost: f64,
) -> Product {
    Product {
        id: id.to_string(),
        code: format!("M5-{id}"),
        name: name.to_string(),
        category: category.to_string(),
        manufacturer: Some(String::from("M5 Max")),
        effect: Some(effect.to_string()),
        duration_seconds: Some(duration),
        sale_price: price,
        purchase_cost: Some(cost),
        available_quantity: 20,
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
        line_total: line_total(quantity, unit_price),
    }
}

/// Fills the store with sample events, products and staff profiles.
///
/// # Errors
///
/// Returns an error if a sample row cannot be encoded.
pub fn seed_store(store: &MemoryStore) -> Result<(), PersistenceError> {
    use EngagementType::{MerchandiseSale, PyrotechnicShow};
    use EventStatus::{Cancelled, Confirmed, Pending, Performed};

    store.seed(
        tables::QUOTES,
        &[
            event("demo-1", "Casamento Júlia e Pedro", "2026-11-21", "Lago Sul", "Júlia Martins", PyrotechnicShow, Pending, 8500.0),
            event("demo-2", "Formatura Medicina", "2026-12-12", "Clube do Congresso", "Comissão de Formatura", PyrotechnicShow, Confirmed, 15000.0),
            event("demo-3", "Réveillon Taguatinga", "2026-12-31", "Taguatinga", "Administração Regional", PyrotechnicShow, Confirmed, 42000.0),
            event("demo-4", "Festa Junina", "2026-06-20", "Sobradinho", "Escola Caminho", MerchandiseSale, Performed, 1200.0),
            event("demo-5", "Aniversário 15 anos", "2026-09-05", "Águas Claras", "Marina Costa", PyrotechnicShow, Cancelled, 3200.0),
        ],
    )?;

    store.seed(
        tables::PRODUCTS,
        &[
            product("p-100", "Torta 100 tiros", "Tortas", "leque w", 40, 380.0, 210.0),
            product("p-200", "Torta 200 tiros", "Tortas", "reto", 80, 690.0, 400.0),
            product("p-300", "Cortina de Fumaça", "Efeitos", "fumaça colorida", 60, 95.0, 40.0),
            product("p-400", "Leque Z 49 tiros", "Leques", "leque z", 25, 260.0, 150.0),
        ],
    )?;

    store.seed(
        tables::LINE_ITEMS,
        &[
            line("li-1", "demo-1", "p-100", 10, 380.0),
            line("li-2", "demo-1", "p-300", 10, 95.0),
            line("li-3", "demo-2", "p-200", 20, 690.0),
        ],
    )?;

    store.seed(
        tables::PROFILES,
        &[
            ProfileRow {
                id: String::from("demo-admin"),
                email: Some(DEMO_ADMIN_EMAIL.to_string()),
                nome: Some(String::from("Administração M5")),
                role: Some(String::from("admin")),
            },
            ProfileRow {
                id: String::from("demo-staff"),
                email: Some(DEMO_STAFF_EMAIL.to_string()),
                nome: Some(String::from("Equipe de Montagem")),
                role: Some(String::from("equipe")),
            },
        ],
    )
}

/// Registers the sample staff accounts.
///
/// # Errors
///
/// Returns an error if a password cannot be hashed.
pub fn seed_accounts(auth: &MemoryAuth) -> Result<(), PersistenceError> {
    auth.add_user("demo-admin", DEMO_ADMIN_EMAIL, DEMO_ADMIN_PASSWORD)?;
    auth.add_user("demo-staff", DEMO_STAFF_EMAIL, DEMO_ADMIN_PASSWORD)?;
    warn!(
        admin = DEMO_ADMIN_EMAIL,
        staff = DEMO_STAFF_EMAIL,
        "In-memory mode: sample accounts share the demo password"
    );
    Ok(())
}
