// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Remote store backends.
//!
//! ## Backend Support
//!
//! - `http` — the hosted PostgREST-style API (production)
//! - `memory` — in-process tables for local development and tests
//!
//! Both evaluate the same [`Query`] and publish the same change events, so
//! hooks above this layer never know which one they talk to.

pub mod http;
pub mod memory;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

use crate::error::PersistenceError;
use crate::feed::ChangeFeed;
use crate::query::Query;

/// One page of rows plus the exact match count when it was requested.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub rows: Vec<Value>,
    pub count: Option<u64>,
}

impl Page {
    /// Decodes every row into `T`.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Decode` if any row does not match `T`.
    pub fn decode<T: DeserializeOwned>(self) -> Result<Vec<T>, PersistenceError> {
        decode_rows(self.rows)
    }
}

/// Decodes JSON rows into `T`.
///
/// # Errors
///
/// Returns `PersistenceError::Decode` if any row does not match `T`.
pub fn decode_rows<T: DeserializeOwned>(rows: Vec<Value>) -> Result<Vec<T>, PersistenceError> {
    rows.into_iter()
        .map(|row| serde_json::from_value(row).map_err(PersistenceError::from))
        .collect()
}

/// Reads the `id` of a row as text.
#[must_use]
pub fn row_id(row: &Value) -> Option<String> {
    match row.get("id")? {
        Value::String(id) => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

/// The relational API every hook talks to.
///
/// Writes publish a change event on [`RemoteStore::changes`] once they
/// succeed.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Reads rows matching the query, honouring range and count.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or rows cannot be decoded.
    async fn select(&self, query: &Query) -> Result<Page, PersistenceError>;

    /// Merges `patch` into every row matching the query's filters.
    ///
    /// Returns the updated rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn update(&self, query: &Query, patch: Value) -> Result<Vec<Value>, PersistenceError>;

    /// Inserts rows into `table`, returning them as stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn insert(&self, table: &str, rows: Vec<Value>) -> Result<Vec<Value>, PersistenceError>;

    /// Deletes every row matching the query's filters, returning them.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn delete(&self, query: &Query) -> Result<Vec<Value>, PersistenceError>;

    /// The feed this store publishes its writes on.
    fn changes(&self) -> &ChangeFeed;

    /// Returns a handle that issues requests on behalf of a signed-in user.
    fn with_session(&self, access_token: &str) -> Arc<dyn RemoteStore>;
}
