// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event hooks: listing, status changes, notes, detail and change feed.

use m5_max::{EventCriteria, EventStatistics, Selection, filter_events};
use m5_max_domain::{
    EngagementType, Event, EventDisplay, EventStatus, LineItem, LineItemDetail, Margin, Product,
    compute_margin,
};
use m5_max_persistence::{
    ChangeKind, EVENT_COLUMNS, Filter, NotesPatch, Page, PersistenceError, Query, RemoteStore,
    StatusPatch, Subscription, decode_rows, tables,
};
use serde_json::Value;
use std::sync::Arc;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{debug, error, info};

use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::notification::{Notification, Outcome};
use crate::request_response::{
    DEFAULT_PAGE_SIZE, EventCard, EventDetail, EventListParams, EventPage, EventsQuery,
    EventsResponse,
};

/// Columns the event listing may be ordered by.
pub const SORTABLE_COLUMNS: [&str; 8] = [
    "evento_data",
    "evento_nome",
    "nome_contratante",
    "evento_local",
    "valor_total",
    "status",
    "tipo",
    "created_at",
];

/// Default ordering column of the event listing.
pub const DEFAULT_ORDER_COLUMN: &str = "evento_data";

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn invalid(field: &str, message: String) -> ApiError {
    ApiError::InvalidInput {
        field: field.to_string(),
        message,
    }
}

/// Resolves `(page, limit)` to one-based page and page size.
#[must_use]
pub fn page_bounds(params: &EventListParams) -> (u64, u64) {
    let page: u64 = params.page.filter(|p| *p > 0).unwrap_or(1);
    let limit: u64 = params.limit.filter(|l| *l > 0).unwrap_or(DEFAULT_PAGE_SIZE);
    (page, limit)
}

/// Builds the remote query behind the event listing.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for an unknown status, type, ordering
/// column or direction.
pub fn build_list_query(params: &EventListParams) -> Result<Query, ApiError> {
    let mut query: Query = Query::table(tables::QUOTES)
        .select(EVENT_COLUMNS)
        .exact_count();

    if let Some(raw) = non_blank(params.status.as_ref()) {
        let status: Selection<EventStatus> = raw.parse().map_err(translate_domain_error)?;
        if let Selection::Only(status) = status {
            query = query.eq("status", status.as_str());
        }
    }
    if let Some(raw) = non_blank(params.tipo.as_ref()) {
        let engagement: Selection<EngagementType> = raw.parse().map_err(translate_domain_error)?;
        if let Selection::Only(engagement) = engagement {
            query = query.eq("tipo", engagement.as_str());
        }
    }
    if let Some(from) = non_blank(params.data_inicio.as_ref()) {
        query = query.gte("evento_data", from);
    }
    if let Some(to) = non_blank(params.data_fim.as_ref()) {
        query = query.lte("evento_data", to);
    }
    if let Some(client) = non_blank(params.cliente_nome.as_ref()) {
        query = query.filter(Filter::contains("nome_contratante", client));
    }
    if let Some(term) = non_blank(params.search.as_ref()) {
        query = query.or(vec![
            Filter::contains("evento_nome", term),
            Filter::contains("nome_contratante", term),
            Filter::contains("evento_local", term),
        ]);
    }

    let column: &str = non_blank(params.order_by.as_ref()).unwrap_or(DEFAULT_ORDER_COLUMN);
    if !SORTABLE_COLUMNS.contains(&column) {
        return Err(invalid(
            "order_by",
            format!("Cannot order events by '{column}'"),
        ));
    }
    let ascending: bool = match non_blank(params.direction.as_ref()).map(str::to_lowercase) {
        None => false,
        Some(direction) if direction == "asc" => true,
        Some(direction) if direction == "desc" => false,
        Some(direction) => {
            return Err(invalid(
                "direction",
                format!("Unknown direction '{direction}'"),
            ));
        }
    };
    query = query.order(column, ascending);

    let (page, limit) = page_bounds(params);
    let from: u64 = (page - 1).saturating_mul(limit);
    let to: u64 = page.saturating_mul(limit).saturating_sub(1);
    Ok(query.range(from, to))
}

/// Builds event pipeline criteria from events page parameters.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for an unknown status or type.
pub fn event_criteria(query: &EventsQuery) -> Result<EventCriteria, ApiError> {
    let status: Selection<EventStatus> = match query.status.as_deref() {
        Some(raw) => raw.parse().map_err(translate_domain_error)?,
        None => Selection::All,
    };
    let engagement: Selection<EngagementType> = match query.tipo.as_deref() {
        Some(raw) => raw.parse().map_err(translate_domain_error)?,
        None => Selection::All,
    };
    Ok(EventCriteria {
        status,
        engagement,
        search: query.search.clone().unwrap_or_default(),
    })
}

/// Current time as an RFC 3339 UTC timestamp.
fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default()
}

fn first_event(rows: Vec<Value>) -> Result<Option<Event>, PersistenceError> {
    Ok(decode_rows::<Event>(rows)?.into_iter().next())
}

/// Hooks over the quotes table viewed as events.
#[derive(Clone)]
pub struct EventService {
    store: Arc<dyn RemoteStore>,
}

impl EventService {
    #[must_use]
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self { store }
    }

    /// Lists one page of events with the exact match count.
    ///
    /// On failure the page is empty with a zero count.
    pub async fn list_events(&self, params: &EventListParams) -> Outcome<EventPage> {
        const TITLE: &str = "Erro ao buscar eventos";
        let (page, limit) = page_bounds(params);
        let empty: EventPage = EventPage {
            events: Vec::new(),
            count: 0,
            page,
            limit,
        };

        let query: Query = match build_list_query(params) {
            Ok(query) => query,
            Err(e) => return fail(empty, TITLE, e),
        };
        debug!(params = ?query.to_params(), range = ?query.range, "Listing events");

        let result: Result<(Vec<Event>, u64), PersistenceError> = async {
            let page: Page = self.store.select(&query).await?;
            let count: Option<u64> = page.count;
            let events: Vec<Event> = page.decode()?;
            let count: u64 = count.unwrap_or_else(|| u64::try_from(events.len()).unwrap_or(u64::MAX));
            Ok((events, count))
        }
        .await;

        match result {
            Ok((events, count)) => Outcome::quiet(EventPage {
                events,
                count,
                page,
                limit,
            }),
            Err(e) => fail(empty, TITLE, translate_persistence_error(e)),
        }
    }

    /// Loads every event, newest event date first, without pagination.
    pub async fn load_all_events(&self) -> Outcome<Vec<Event>> {
        let query: Query = Query::table(tables::QUOTES)
            .select(EVENT_COLUMNS)
            .order(DEFAULT_ORDER_COLUMN, false);

        match self.store.select(&query).await.and_then(Page::decode) {
            Ok(events) => Outcome::quiet(events),
            Err(e) => fail(
                Vec::new(),
                "Erro ao buscar eventos",
                translate_persistence_error(e),
            ),
        }
    }

    /// The events page: the full list through the event pipeline.
    ///
    /// Statistics always count the full list, not the filtered view.
    pub async fn events_page(&self, query: &EventsQuery) -> Outcome<EventsResponse> {
        let empty = || EventsResponse {
            events: Vec::new(),
            statistics: EventStatistics::default(),
        };
        let criteria: EventCriteria = match event_criteria(query) {
            Ok(criteria) => criteria,
            Err(e) => return fail(empty(), "Erro ao buscar eventos", e),
        };

        let all: Outcome<Vec<Event>> = self.load_all_events().await;
        if all.is_failure() {
            return all.map(|_| empty());
        }
        all.map(|events| EventsResponse {
            statistics: EventStatistics::from_events(&events),
            events: filter_events(&events, &criteria)
                .into_iter()
                .cloned()
                .map(EventCard::from)
                .collect(),
        })
    }

    /// Reads a single event.
    async fn fetch_event(&self, id: &str) -> Result<Event, ApiError> {
        let query: Query = Query::table(tables::QUOTES)
            .select(EVENT_COLUMNS)
            .eq("id", id)
            .range(0, 0);
        let page: Page = self
            .store
            .select(&query)
            .await
            .map_err(translate_persistence_error)?;
        first_event(page.rows)
            .map_err(translate_persistence_error)?
            .ok_or_else(|| ApiError::ResourceNotFound {
                resource_type: String::from("Event"),
                message: format!("No event with id {id}"),
            })
    }

    /// Moves an event to a new status.
    ///
    /// The transition is checked against the current row, then a single
    /// update writes the status and its own timestamp column only.
    pub async fn update_status(&self, id: &str, status: EventStatus) -> Outcome<Option<Event>> {
        const TITLE: &str = "Erro ao atualizar status";
        info!(event_id = id, status = %status, "Updating event status");

        let current: Event = match self.fetch_event(id).await {
            Ok(event) => event,
            Err(e) => return fail(None, TITLE, e),
        };
        if let Err(e) = current.status.validate_transition(status) {
            return fail(None, TITLE, translate_domain_error(e));
        }

        let patch: StatusPatch = StatusPatch::new(status, &now_rfc3339());
        match self.update_one(id, &patch).await {
            Ok(event) => Outcome::notified(
                Some(event),
                Notification::success("Status atualizado", "Evento atualizado com sucesso."),
            ),
            Err(e) => fail(None, TITLE, e),
        }
    }

    /// Saves staff notes on an event.
    pub async fn add_notes(&self, id: &str, notes: &str) -> Outcome<Option<Event>> {
        info!(event_id = id, "Saving event notes");
        let patch: NotesPatch = NotesPatch {
            observacoes: notes.to_string(),
        };
        match self.update_one(id, &patch).await {
            Ok(event) => Outcome::notified(
                Some(event),
                Notification::success("Observações salvas", "As observações foram salvas."),
            ),
            Err(e) => fail(None, "Erro ao salvar observações", e),
        }
    }

    /// Applies `patch` to exactly one event and returns it.
    async fn update_one<P: serde::Serialize + Sync>(
        &self,
        id: &str,
        patch: &P,
    ) -> Result<Event, ApiError> {
        let patch: Value = serde_json::to_value(patch).map_err(|e| ApiError::Internal {
            message: format!("Failed to encode patch: {e}"),
        })?;
        let rows: Vec<Value> = self
            .store
            .update(&Query::table(tables::QUOTES).eq("id", id), patch)
            .await
            .map_err(translate_persistence_error)?;
        first_event(rows)
            .map_err(translate_persistence_error)?
            .ok_or_else(|| ApiError::ResourceNotFound {
                resource_type: String::from("Event"),
                message: format!("No event with id {id}"),
            })
    }

    /// Loads an event with its product lines and margin.
    pub async fn event_detail(&self, id: &str) -> Outcome<Option<EventDetail>> {
        match self.fetch_detail(id).await {
            Ok(detail) => Outcome::quiet(Some(detail)),
            Err(e) => fail(None, "Erro ao carregar evento", e),
        }
    }

    async fn fetch_detail(&self, id: &str) -> Result<EventDetail, ApiError> {
        let event: Event = self.fetch_event(id).await?;

        let items: Vec<LineItem> = self
            .store
            .select(&Query::table(tables::LINE_ITEMS).eq("orcamento_id", id))
            .await
            .and_then(Page::decode)
            .map_err(translate_persistence_error)?;

        let mut product_ids: Vec<&str> = items.iter().map(|item| item.product_id.as_str()).collect();
        product_ids.sort_unstable();
        product_ids.dedup();

        let products: Vec<Product> = if product_ids.is_empty() {
            Vec::new()
        } else {
            self.store
                .select(&Query::table(tables::PRODUCTS).in_list("id", product_ids))
                .await
                .and_then(Page::decode)
                .map_err(translate_persistence_error)?
        };

        let items: Vec<LineItemDetail> = items
            .into_iter()
            .map(|item| {
                let product: Option<Product> =
                    products.iter().find(|p| p.id == item.product_id).cloned();
                LineItemDetail { item, product }
            })
            .collect();
        let margin: Margin = compute_margin(event.total_value, &items);

        Ok(EventDetail {
            display: EventDisplay::from(&event),
            event,
            items,
            margin,
        })
    }

    /// Report generation is not available yet; says so.
    #[must_use]
    pub fn generate_report() -> Outcome<()> {
        Outcome::notified(
            (),
            Notification::success("Relatório", "Funcionalidade de relatórios em desenvolvimento"),
        )
    }

    /// Subscribes to every change on the quotes table.
    #[must_use]
    pub fn subscribe_updates(&self) -> Subscription {
        self.store.changes().subscribe(tables::QUOTES, None::<ChangeKind>)
    }
}

/// Logs a hook failure and turns it into a destructive notification.
pub(crate) fn fail<T>(empty: T, title: &str, err: ApiError) -> Outcome<T> {
    error!(title, error = %err, "Hook failed");
    let description: String = err.to_string();
    Outcome::failed(empty, Notification::failure(title, &description), err)
}
