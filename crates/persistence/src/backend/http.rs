// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Hosted PostgREST-style backend.
//!
//! Filters and ordering travel as query parameters, the row range as
//! `Range`/`Range-Unit` headers, and exact counts come back in
//! `Content-Range`. Every request carries the project key, a bearer token
//! (the signed-in user's, or the project key when anonymous) and the
//! application name.

use async_trait::async_trait;
use reqwest::header::{CONTENT_RANGE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

use super::{RemoteStore, row_id};
use crate::error::PersistenceError;
use crate::feed::{ChangeEvent, ChangeFeed, ChangeKind};
use crate::query::{Query, parse_content_range};

/// Value of the `x-application-name` header.
pub const APPLICATION_NAME: &str = "m5-max-producoes";

/// Request timeout for every call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the hosted relational API.
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: Client,
    rest_url: String,
    api_key: String,
    bearer: String,
    feed: ChangeFeed,
}

impl HttpStore {
    /// Creates a client for the project at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Transport` if the HTTP client cannot be
    /// built.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, PersistenceError> {
        let client: Client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(PersistenceError::from)?;

        Ok(Self {
            client,
            rest_url: format!("{}/rest/v1", base_url.trim_end_matches('/')),
            api_key: api_key.to_string(),
            bearer: api_key.to_string(),
            feed: ChangeFeed::new(),
        })
    }

    /// Uses an existing change feed instead of a private one.
    #[must_use]
    pub fn with_feed(mut self, feed: ChangeFeed) -> Self {
        self.feed = feed;
        self
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{table}", self.rest_url)
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        self.client
            .request(method, self.table_url(table))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.bearer)
            .header("x-application-name", APPLICATION_NAME)
    }

    /// Builds a request for `query`, including range and count headers.
    fn query_request(&self, method: Method, query: &Query, representation: bool) -> RequestBuilder {
        let mut prefer: Vec<&str> = Vec::new();
        if representation {
            prefer.push("return=representation");
        }
        if query.count {
            prefer.push("count=exact");
        }

        let mut request: RequestBuilder = self
            .request(method, &query.table)
            .query(&query.to_params());
        if !prefer.is_empty() {
            request = request.header("Prefer", prefer.join(","));
        }
        if let Some(range) = query.range_header() {
            request = request.header("Range-Unit", "items").header("Range", range);
        }
        request
    }

    /// Fails on a non-success status, keeping an excerpt of the body.
    async fn check(table: &str, response: Response) -> Result<Response, PersistenceError> {
        let status: StatusCode = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body: String = response.text().await.unwrap_or_default();
        error!(
            table,
            status = %status,
            body = %body,
            "Remote store request failed"
        );
        Err(PersistenceError::unexpected_status(status.as_u16(), &body))
    }

    async fn rows(table: &str, response: Response) -> Result<Vec<Value>, PersistenceError> {
        let response: Response = Self::check(table, response).await?;
        match response.json::<Value>().await? {
            Value::Array(rows) => Ok(rows),
            Value::Null => Ok(Vec::new()),
            row @ Value::Object(_) => Ok(vec![row]),
            other => Err(PersistenceError::Decode(format!(
                "expected rows from {table}, got {other}"
            ))),
        }
    }

    fn publish(&self, table: &str, kind: ChangeKind, rows: &[Value]) {
        self.feed.publish(ChangeEvent {
            table: table.to_string(),
            kind,
            ids: rows.iter().filter_map(row_id).collect(),
        });
    }
}

/// Reads the total from a response's `Content-Range` header.
fn content_range_total(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(CONTENT_RANGE)
        .and_then(|value: &HeaderValue| value.to_str().ok())
        .and_then(parse_content_range)
}

#[async_trait]
impl RemoteStore for HttpStore {
    async fn select(&self, query: &Query) -> Result<super::Page, PersistenceError> {
        debug!(table = %query.table, params = ?query.to_params(), "Selecting rows");

        let response: Response = self
            .query_request(Method::GET, query, false)
            .send()
            .await?;
        let count: Option<u64> = if query.count {
            content_range_total(response.headers())
        } else {
            None
        };
        let rows: Vec<Value> = Self::rows(&query.table, response).await?;

        Ok(super::Page { rows, count })
    }

    async fn update(&self, query: &Query, patch: Value) -> Result<Vec<Value>, PersistenceError> {
        debug!(table = %query.table, params = ?query.to_params(), "Updating rows");

        let response: Response = self
            .query_request(Method::PATCH, query, true)
            .json(&patch)
            .send()
            .await?;
        let rows: Vec<Value> = Self::rows(&query.table, response).await?;
        self.publish(&query.table, ChangeKind::Update, &rows);
        Ok(rows)
    }

    async fn insert(&self, table: &str, rows: Vec<Value>) -> Result<Vec<Value>, PersistenceError> {
        debug!(table, rows = rows.len(), "Inserting rows");

        let response: Response = self
            .request(Method::POST, table)
            .header("Prefer", "return=representation")
            .json(&rows)
            .send()
            .await?;
        let inserted: Vec<Value> = Self::rows(table, response).await?;
        self.publish(table, ChangeKind::Insert, &inserted);
        Ok(inserted)
    }

    async fn delete(&self, query: &Query) -> Result<Vec<Value>, PersistenceError> {
        if query.filters.is_empty() {
            return Err(PersistenceError::InvalidQuery(format!(
                "refusing unfiltered delete on {}",
                query.table
            )));
        }
        debug!(table = %query.table, params = ?query.to_params(), "Deleting rows");

        let response: Response = self
            .query_request(Method::DELETE, query, true)
            .send()
            .await?;
        let rows: Vec<Value> = Self::rows(&query.table, response).await?;
        self.publish(&query.table, ChangeKind::Delete, &rows);
        Ok(rows)
    }

    fn changes(&self) -> &ChangeFeed {
        &self.feed
    }

    fn with_session(&self, access_token: &str) -> Arc<dyn RemoteStore> {
        let mut store: Self = self.clone();
        store.bearer = access_token.to_string();
        Arc::new(store)
    }
}
