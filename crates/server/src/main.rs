// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod demo;
mod live;
mod session;

#[cfg(test)]
mod tests;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post, put},
};
use axum_extra::extract::cookie::CookieJar;
use clap::Parser;
use m5_max::EventStatistics;
use m5_max_api::{
    ApiError, AuthenticatedActor, AuthenticationService, ConfigError, DashboardResponse,
    ErrorResponse, EventListParams, EventService, EventsQuery, LeadService, LoginRequest,
    LoginResponse, NotesRequest, Outcome, ProductService, QuoteService, Settings,
    StatusUpdateRequest, StockQuery, translate_domain_error,
};
use m5_max_domain::{EventStatus, QuoteEdit};
use m5_max_persistence::{
    AuthGateway, AuthSession, HostedAuth, HttpStore, MemoryAuth, MemoryStore, RemoteStore,
    TableWatcher, tables,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::session::{
    ACCESS_DENIED_PATH, AdminSession, LOGIN_PATH, access_token, cleared_session_cookie,
    session_cookie,
};

/// M5 Max admin server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Serve sample data from memory instead of the hosted project.
    #[arg(long)]
    in_memory: bool,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// Primary store; handlers scope it to the caller's session.
    store: Arc<dyn RemoteStore>,
    auth: AuthenticationService,
    leads: LeadService,
    settings: Arc<Settings>,
}

impl AppState {
    /// The primary store acting as the signed-in admin.
    fn store_for(&self, session: &AdminSession) -> Arc<dyn RemoteStore> {
        self.store.with_session(&session.token)
    }

    fn events(&self, session: &AdminSession) -> EventService {
        EventService::new(self.store_for(session))
    }
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        Self {
            status: status_for(&err),
            message: err.to_string(),
        }
    }
}

const fn status_for(err: &ApiError) -> StatusCode {
    match err {
        ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
        ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
        ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
        ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
        ApiError::Upstream { .. } => StatusCode::BAD_GATEWAY,
        ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Serializes a hook outcome; a failed hook keeps its notification in the
/// body and takes its status from the underlying error.
fn respond<T: Serialize>(outcome: Outcome<T>) -> Response {
    let status: StatusCode = outcome.error.as_ref().map_or(StatusCode::OK, status_for);
    (status, Json(outcome)).into_response()
}

#[allow(clippy::unused_async)]
async fn handle_root() -> Redirect {
    Redirect::to(LOGIN_PATH)
}

#[allow(clippy::unused_async)]
async fn handle_admin_index() -> Redirect {
    Redirect::to("/admin/dashboard")
}

#[derive(Serialize)]
struct LoginPage {
    message: &'static str,
}

#[allow(clippy::unused_async)]
async fn handle_login_page() -> Json<LoginPage> {
    Json(LoginPage {
        message: "POST email and password to /admin/login",
    })
}

async fn handle_login(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Response, HttpError> {
    let (session, actor): (AuthSession, AuthenticatedActor) = state
        .auth
        .login(&req.email, &req.password)
        .await
        .map_err(ApiError::from)?;

    let jar: CookieJar = CookieJar::new().add(session_cookie(&session.access_token));
    let body: LoginResponse = LoginResponse {
        access_token: session.access_token,
        user_id: actor.id,
        email: actor.email,
        name: actor.name,
        role: actor.role.map(|role| role.to_string()),
    };
    Ok((jar, Json(body)).into_response())
}

async fn handle_logout(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<Response, HttpError> {
    if let Some(token) = access_token(&headers) {
        state.auth.logout(&token).await.map_err(ApiError::from)?;
    } else {
        debug!("Logout without a session");
    }
    Ok((
        StatusCode::NO_CONTENT,
        CookieJar::new().add(cleared_session_cookie()),
    )
        .into_response())
}

#[allow(clippy::unused_async)]
async fn handle_access_denied() -> HttpError {
    HttpError {
        status: StatusCode::FORBIDDEN,
        message: String::from("Acesso negado: esta área é restrita a administradores"),
    }
}

async fn handle_dashboard(
    AxumState(state): AxumState<AppState>,
    session: AdminSession,
) -> Response {
    let events = state.events(&session).load_all_events().await;
    let products = ProductService::new(state.store_for(&session))
        .list_active()
        .await;
    let leads = state.leads.list_leads().await;

    let value: DashboardResponse = DashboardResponse {
        statistics: EventStatistics::from_events(&events.value),
        active_products: products.value.len(),
        leads: leads.value.len(),
        contact_phone: state.settings.whatsapp_number.clone(),
    };
    respond(Outcome {
        value,
        notification: events
            .notification
            .or(products.notification)
            .or(leads.notification),
        error: events.error.or(products.error).or(leads.error),
    })
}

async fn handle_stock(
    AxumState(state): AxumState<AppState>,
    session: AdminSession,
    Query(query): Query<StockQuery>,
) -> Response {
    respond(
        ProductService::new(state.store_for(&session))
            .stock(&query)
            .await,
    )
}

async fn handle_list_quotes(
    AxumState(state): AxumState<AppState>,
    session: AdminSession,
    Query(params): Query<EventListParams>,
) -> Response {
    respond(state.events(&session).list_events(&params).await)
}

async fn handle_update_quote(
    AxumState(state): AxumState<AppState>,
    session: AdminSession,
    Path(id): Path<String>,
    Json(edit): Json<QuoteEdit>,
) -> Response {
    info!(actor_id = %session.actor.id, quote_id = %id, "Quote edit requested");
    respond(
        QuoteService::new(state.store_for(&session))
            .update_quote(&id, &edit)
            .await,
    )
}

async fn handle_list_leads(
    AxumState(state): AxumState<AppState>,
    _session: AdminSession,
) -> Response {
    respond(state.leads.list_leads().await)
}

async fn handle_events_page(
    AxumState(state): AxumState<AppState>,
    session: AdminSession,
    Query(query): Query<EventsQuery>,
) -> Response {
    respond(state.events(&session).events_page(&query).await)
}

async fn handle_event_detail(
    AxumState(state): AxumState<AppState>,
    session: AdminSession,
    Path(id): Path<String>,
) -> Response {
    respond(state.events(&session).event_detail(&id).await)
}

async fn handle_update_status(
    AxumState(state): AxumState<AppState>,
    session: AdminSession,
    Path(id): Path<String>,
    Json(req): Json<StatusUpdateRequest>,
) -> Result<Response, HttpError> {
    let status: EventStatus = req.status.parse().map_err(translate_domain_error)?;
    info!(actor_id = %session.actor.id, event_id = %id, status = %status, "Status change requested");
    Ok(respond(
        state.events(&session).update_status(&id, status).await,
    ))
}

async fn handle_add_notes(
    AxumState(state): AxumState<AppState>,
    session: AdminSession,
    Path(id): Path<String>,
    Json(req): Json<NotesRequest>,
) -> Response {
    respond(
        state
            .events(&session)
            .add_notes(&id, &req.observacoes)
            .await,
    )
}

#[allow(clippy::unused_async)]
async fn handle_report(_session: AdminSession) -> Response {
    respond(EventService::generate_report())
}

#[allow(clippy::unused_async)]
async fn handle_not_found() -> HttpError {
    HttpError {
        status: StatusCode::NOT_FOUND,
        message: String::from("not found"),
    }
}

fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(handle_root))
        .route("/admin", get(handle_admin_index))
        .route("/admin/login", get(handle_login_page).post(handle_login))
        .route("/admin/logout", post(handle_logout))
        .route(ACCESS_DENIED_PATH, get(handle_access_denied))
        .route("/admin/dashboard", get(handle_dashboard))
        .route("/admin/estoque", get(handle_stock))
        .route("/admin/orcamentos", get(handle_list_quotes))
        .route("/admin/orcamentos/leads", get(handle_list_leads))
        .route("/admin/orcamentos/{id}", put(handle_update_quote))
        .route("/admin/eventos", get(handle_events_page))
        .route("/admin/eventos/live", get(live::live_events_handler))
        .route("/admin/eventos/relatorio", post(handle_report))
        .route("/admin/eventos/{id}", get(handle_event_detail))
        .route("/admin/eventos/{id}/status", post(handle_update_status))
        .route("/admin/eventos/{id}/observacoes", post(handle_add_notes))
        .fallback(handle_not_found)
        .with_state(app_state)
}

/// Builds the application state for the selected backend.
fn build_state(settings: Settings, in_memory: bool) -> Result<AppState, Box<dyn std::error::Error>> {
    let store: Arc<dyn RemoteStore>;
    let gateway: Arc<dyn AuthGateway>;
    if in_memory {
        info!("Using in-memory store with sample data");
        let memory: MemoryStore = MemoryStore::new();
        demo::seed_store(&memory)?;
        let auth: MemoryAuth = MemoryAuth::new();
        demo::seed_accounts(&auth)?;
        store = Arc::new(memory);
        gateway = Arc::new(auth);
    } else {
        let remote = settings
            .remote
            .as_ref()
            .ok_or(ConfigError::MissingVariable("SUPABASE_URL"))?;
        info!(url = %remote.url, "Using hosted project");
        store = Arc::new(HttpStore::new(&remote.url, &remote.anon_key)?);
        gateway = Arc::new(HostedAuth::new(&remote.url, &remote.anon_key)?);
        // Quotes arrive from the public site, outside this service.
        TableWatcher::new(Arc::clone(&store), tables::QUOTES).spawn();
    }

    let leads: Option<Arc<dyn RemoteStore>> = match &settings.leads {
        Some(source) => {
            info!(url = %source.url, "Reading leads from secondary project");
            let store: Arc<dyn RemoteStore> =
                Arc::new(HttpStore::new(&source.url, &source.anon_key)?);
            Some(store)
        }
        None => {
            warn!("No lead source configured; lead lists will be empty");
            None
        }
    };

    Ok(AppState {
        auth: AuthenticationService::new(gateway, Arc::clone(&store)),
        store,
        leads: LeadService::new(leads),
        settings: Arc::new(settings),
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    let dotenv: Option<std::path::PathBuf> = dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!(env_file = ?dotenv, "Initializing M5 Max admin server");

    let settings: Settings = Settings::from_env(args.in_memory)?;
    let app_state: AppState = build_state(settings, args.in_memory)?;
    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
