// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-process backend.
//!
//! Tables are vectors of JSON objects behind a `RwLock` that is never held
//! across an `.await`. Filters, ordering (nulls last ascending, first
//! descending), ranges and counts follow the hosted API's semantics closely
//! enough for the hooks above to behave identically.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

use super::{Page, RemoteStore, row_id};
use crate::error::PersistenceError;
use crate::feed::{ChangeEvent, ChangeFeed, ChangeKind};
use crate::query::{Filter, Order, Query};

type Tables = HashMap<String, Vec<Value>>;

#[derive(Debug, Default)]
struct Inner {
    tables: RwLock<Tables>,
    failing: RwLock<HashSet<String>>,
    next_id: AtomicU64,
}

/// In-memory implementation of [`RemoteStore`].
///
/// Cloning shares tables and change feed.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Inner>,
    feed: ChangeFeed,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends rows to a table without publishing change events.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Decode` if a row does not serialize to a
    /// JSON object.
    pub fn seed<T: Serialize>(&self, table: &str, rows: &[T]) -> Result<(), PersistenceError> {
        let mut values: Vec<Value> = Vec::with_capacity(rows.len());
        for row in rows {
            let value: Value = serde_json::to_value(row)?;
            if !value.is_object() {
                return Err(PersistenceError::Decode(format!(
                    "seed row for {table} is not an object"
                )));
            }
            values.push(value);
        }

        self.inner
            .tables
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(table.to_string())
            .or_default()
            .extend(values);
        Ok(())
    }

    /// Makes every operation on `table` fail until [`MemoryStore::recover`].
    pub fn fail_table(&self, table: &str) {
        self.inner
            .failing
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(table.to_string());
    }

    /// Clears a failure set with [`MemoryStore::fail_table`].
    pub fn recover(&self, table: &str) {
        self.inner
            .failing
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(table);
    }

    /// Returns a copy of every row of a table.
    #[must_use]
    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.inner
            .tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    fn ensure_available(&self, table: &str) -> Result<(), PersistenceError> {
        let failing: bool = self
            .inner
            .failing
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(table);
        if failing {
            return Err(PersistenceError::unexpected_status(
                503,
                &format!("table {table} is unavailable"),
            ));
        }
        Ok(())
    }

    fn generate_id(&self, table: &str) -> String {
        let next: u64 = self.inner.next_id.fetch_add(1, AtomicOrdering::Relaxed) + 1;
        format!("{table}-{next}")
    }

    fn publish(&self, table: &str, kind: ChangeKind, rows: &[Value]) {
        if rows.is_empty() {
            return;
        }
        self.feed.publish(ChangeEvent {
            table: table.to_string(),
            kind,
            ids: rows.iter().filter_map(row_id).collect(),
        });
    }
}

/// Renders a scalar the way it appears in a filter value.
fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => Some(number.to_string()),
        other => Some(other.to_string()),
    }
}

/// Compares a column value against a filter operand.
///
/// Numbers compare numerically when both sides parse; everything else
/// compares as text, which orders ISO dates correctly.
fn compare_operand(value: &Value, operand: &str) -> Option<Ordering> {
    if let (Some(number), Ok(other)) = (value.as_f64(), operand.parse::<f64>()) {
        return number.partial_cmp(&other);
    }
    as_text(value).map(|text| text.as_str().cmp(operand))
}

fn equals(value: &Value, operand: &str) -> bool {
    compare_operand(value, operand) == Some(Ordering::Equal)
}

/// Case-insensitive match where `%` matches any run of characters.
fn like(text: &str, pattern: &str) -> bool {
    let text: Vec<char> = text.to_lowercase().chars().collect();
    let pattern: Vec<char> = pattern.to_lowercase().chars().collect();

    // matched[j]: pattern[..j] matches the text consumed so far
    let mut matched: Vec<bool> = vec![false; pattern.len() + 1];
    matched[0] = true;
    for j in 1..=pattern.len() {
        matched[j] = matched[j - 1] && pattern[j - 1] == '%';
    }

    for ch in &text {
        let mut next: Vec<bool> = vec![false; pattern.len() + 1];
        for j in 1..=pattern.len() {
            next[j] = if pattern[j - 1] == '%' {
                next[j - 1] || matched[j]
            } else {
                matched[j - 1] && pattern[j - 1] == *ch
            };
        }
        matched = next;
    }

    matched[pattern.len()]
}

fn cell<'a>(row: &'a Value, name: &str) -> &'a Value {
    row.get(name).unwrap_or(&Value::Null)
}

fn evaluate(filter: &Filter, row: &Value) -> bool {
    let column = |name: &str| cell(row, name);
    match filter {
        Filter::Eq(name, operand) => equals(column(name), operand),
        Filter::Neq(name, operand) => {
            let value: &Value = column(name);
            !value.is_null() && !equals(value, operand)
        }
        Filter::Gte(name, operand) => matches!(
            compare_operand(column(name), operand),
            Some(Ordering::Greater | Ordering::Equal)
        ),
        Filter::Lte(name, operand) => matches!(
            compare_operand(column(name), operand),
            Some(Ordering::Less | Ordering::Equal)
        ),
        Filter::Ilike(name, pattern) => {
            as_text(column(name)).is_some_and(|text| like(&text, pattern))
        }
        Filter::In(name, operands) => {
            let value: &Value = column(name);
            operands.iter().any(|operand| equals(value, operand))
        }
        Filter::Or(filters) => filters.iter().any(|nested| evaluate(nested, row)),
    }
}

fn matches_all(filters: &[Filter], row: &Value) -> bool {
    filters.iter().all(|filter| evaluate(filter, row))
}

/// Ascending comparison with nulls sorting last.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Greater,
        (_, Value::Null) => Ordering::Less,
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .unwrap_or_default()
            .total_cmp(&y.as_f64().unwrap_or_default()),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => as_text(a).cmp(&as_text(b)),
    }
}

fn sort_rows(rows: &mut [Value], order: &[Order]) {
    rows.sort_by(|a, b| {
        order.iter().fold(Ordering::Equal, |acc, key| {
            acc.then_with(|| {
                let ordering: Ordering =
                    compare_values(cell(a, &key.column), cell(b, &key.column));
                if key.ascending {
                    ordering
                } else {
                    ordering.reverse()
                }
            })
        })
    });
}

/// Keeps only the selected columns; `*` keeps everything.
fn project(row: Value, select: &str) -> Value {
    let select: &str = select.trim();
    if select == "*" || select.is_empty() {
        return row;
    }
    let Value::Object(mut object) = row else {
        return row;
    };

    let mut projected: Map<String, Value> = Map::new();
    for column in select.split(',').map(str::trim) {
        if let Some(value) = object.remove(column) {
            projected.insert(column.to_string(), value);
        }
    }
    Value::Object(projected)
}

fn usize_from(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

#[async_trait]
impl RemoteStore for MemoryStore {
    async fn select(&self, query: &Query) -> Result<Page, PersistenceError> {
        self.ensure_available(&query.table)?;

        let mut rows: Vec<Value> = {
            let tables = self
                .inner
                .tables
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            tables
                .get(&query.table)
                .map(|table| {
                    table
                        .iter()
                        .filter(|row| matches_all(&query.filters, row))
                        .cloned()
                        .collect()
                })
                .unwrap_or_default()
        };

        sort_rows(&mut rows, &query.order);
        let total: u64 = u64::try_from(rows.len()).unwrap_or(u64::MAX);

        if let Some((from, to)) = query.range {
            let take: usize = usize_from(to.saturating_sub(from).saturating_add(1));
            rows = rows.into_iter().skip(usize_from(from)).take(take).collect();
        }

        debug!(
            table = %query.table,
            matched = total,
            returned = rows.len(),
            "Selected rows from memory store"
        );

        Ok(Page {
            rows: rows
                .into_iter()
                .map(|row| project(row, &query.select))
                .collect(),
            count: query.count.then_some(total),
        })
    }

    async fn update(&self, query: &Query, patch: Value) -> Result<Vec<Value>, PersistenceError> {
        self.ensure_available(&query.table)?;
        let Value::Object(patch) = patch else {
            return Err(PersistenceError::InvalidQuery(String::from(
                "update patch must be an object",
            )));
        };

        let updated: Vec<Value> = {
            let mut tables = self
                .inner
                .tables
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            let mut updated: Vec<Value> = Vec::new();
            if let Some(table) = tables.get_mut(&query.table) {
                for row in &mut *table {
                    if !matches_all(&query.filters, row) {
                        continue;
                    }
                    if let Value::Object(object) = row {
                        for (key, value) in &patch {
                            object.insert(key.clone(), value.clone());
                        }
                    }
                    updated.push(row.clone());
                }
            }
            updated
        };

        self.publish(&query.table, ChangeKind::Update, &updated);
        Ok(updated)
    }

    async fn insert(&self, table: &str, rows: Vec<Value>) -> Result<Vec<Value>, PersistenceError> {
        self.ensure_available(table)?;

        let mut inserted: Vec<Value> = Vec::with_capacity(rows.len());
        for row in rows {
            let Value::Object(mut object) = row else {
                return Err(PersistenceError::InvalidQuery(format!(
                    "inserted row for {table} is not an object"
                )));
            };
            if object.get("id").is_none_or(Value::is_null) {
                object.insert(String::from("id"), Value::String(self.generate_id(table)));
            }
            inserted.push(Value::Object(object));
        }

        self.inner
            .tables
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(table.to_string())
            .or_default()
            .extend(inserted.iter().cloned());

        self.publish(table, ChangeKind::Insert, &inserted);
        Ok(inserted)
    }

    async fn delete(&self, query: &Query) -> Result<Vec<Value>, PersistenceError> {
        self.ensure_available(&query.table)?;
        if query.filters.is_empty() {
            return Err(PersistenceError::InvalidQuery(format!(
                "refusing unfiltered delete on {}",
                query.table
            )));
        }

        let removed: Vec<Value> = {
            let mut tables = self
                .inner
                .tables
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            tables
                .get_mut(&query.table)
                .map(|table| {
                    let (removed, kept): (Vec<Value>, Vec<Value>) = std::mem::take(table)
                        .into_iter()
                        .partition(|row| matches_all(&query.filters, row));
                    *table = kept;
                    removed
                })
                .unwrap_or_default()
        };

        self.publish(&query.table, ChangeKind::Delete, &removed);
        Ok(removed)
    }

    fn changes(&self) -> &ChangeFeed {
        &self.feed
    }

    fn with_session(&self, _access_token: &str) -> Arc<dyn RemoteStore> {
        Arc::new(self.clone())
    }
}
