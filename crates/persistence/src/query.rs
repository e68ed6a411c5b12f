// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Query builder for the hosted relational API.
//!
//! A [`Query`] names a table and carries filters, ordering, an inclusive
//! row range and an exact-count flag. [`Query::to_params`] renders the
//! filter and ordering part as PostgREST query parameters; range and count
//! travel as headers and are applied by the store.

use std::fmt::Write as _;

/// Characters PostgREST treats as syntax inside `in.(...)` and `or=(...)`.
const RESERVED: [char; 6] = [',', '.', ':', '(', ')', '"'];

/// A single row predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Column equals value.
    Eq(String, String),
    /// Column is present and differs from value.
    Neq(String, String),
    /// Column is greater than or equal to value.
    Gte(String, String),
    /// Column is less than or equal to value.
    Lte(String, String),
    /// Case-insensitive pattern match; `%` is the wildcard.
    Ilike(String, String),
    /// Column equals one of the values.
    In(String, Vec<String>),
    /// Any of the nested filters holds.
    Or(Vec<Self>),
}

impl Filter {
    /// Case-insensitive "contains" match on a column.
    #[must_use]
    pub fn contains(column: &str, term: &str) -> Self {
        Self::Ilike(column.to_string(), format!("%{term}%"))
    }

    /// Returns the column this filter constrains, if it has exactly one.
    #[must_use]
    pub fn column(&self) -> Option<&str> {
        match self {
            Self::Eq(column, _)
            | Self::Neq(column, _)
            | Self::Gte(column, _)
            | Self::Lte(column, _)
            | Self::Ilike(column, _)
            | Self::In(column, _) => Some(column),
            Self::Or(_) => None,
        }
    }

    /// Renders the operator part (`eq.value`) without the column.
    fn operator(&self, nested: bool) -> String {
        let render = |value: &str| -> String {
            if nested {
                quote(value)
            } else {
                value.to_string()
            }
        };
        match self {
            Self::Eq(_, value) => format!("eq.{}", render(value)),
            Self::Neq(_, value) => format!("neq.{}", render(value)),
            Self::Gte(_, value) => format!("gte.{}", render(value)),
            Self::Lte(_, value) => format!("lte.{}", render(value)),
            Self::Ilike(_, pattern) => format!("ilike.{}", render(&pattern.replace('%', "*"))),
            Self::In(_, values) => {
                let joined: Vec<String> = values.iter().map(|value| quote(value)).collect();
                format!("in.({})", joined.join(","))
            }
            Self::Or(filters) => format!("({})", render_nested(filters)),
        }
    }

    /// Renders the filter as a single query parameter.
    fn to_param(&self) -> (String, String) {
        match self {
            Self::Or(_) => (String::from("or"), self.operator(true)),
            _ => (
                self.column().unwrap_or_default().to_string(),
                self.operator(false),
            ),
        }
    }
}

/// Renders filters nested inside `or=(...)` as `col.op.value,...`.
fn render_nested(filters: &[Filter]) -> String {
    let mut out: String = String::new();
    for (index, filter) in filters.iter().enumerate() {
        if index > 0 {
            out.push(',');
        }
        match filter {
            Filter::Or(_) => {
                let _ = write!(out, "or{}", filter.operator(true));
            }
            _ => {
                let _ = write!(
                    out,
                    "{}.{}",
                    filter.column().unwrap_or_default(),
                    filter.operator(true)
                );
            }
        }
    }
    out
}

/// Double-quotes a value containing reserved characters.
fn quote(value: &str) -> String {
    if value.contains(RESERVED) {
        format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        value.to_string()
    }
}

/// One ordering key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub ascending: bool,
}

/// A read or write target on one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub table: String,
    pub select: String,
    pub filters: Vec<Filter>,
    pub order: Vec<Order>,
    /// Inclusive `(from, to)` row range.
    pub range: Option<(u64, u64)>,
    /// Request the exact number of matching rows.
    pub count: bool,
}

impl Query {
    /// Starts a query on `table` selecting every column.
    #[must_use]
    pub fn table(table: &str) -> Self {
        Self {
            table: table.to_string(),
            select: String::from("*"),
            filters: Vec::new(),
            order: Vec::new(),
            range: None,
            count: false,
        }
    }

    #[must_use]
    pub fn select(mut self, columns: &str) -> Self {
        self.select = columns.to_string();
        self
    }

    #[must_use]
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    #[must_use]
    pub fn eq(self, column: &str, value: impl ToString) -> Self {
        self.filter(Filter::Eq(column.to_string(), value.to_string()))
    }

    #[must_use]
    pub fn neq(self, column: &str, value: impl ToString) -> Self {
        self.filter(Filter::Neq(column.to_string(), value.to_string()))
    }

    #[must_use]
    pub fn gte(self, column: &str, value: impl ToString) -> Self {
        self.filter(Filter::Gte(column.to_string(), value.to_string()))
    }

    #[must_use]
    pub fn lte(self, column: &str, value: impl ToString) -> Self {
        self.filter(Filter::Lte(column.to_string(), value.to_string()))
    }

    #[must_use]
    pub fn ilike(self, column: &str, pattern: &str) -> Self {
        self.filter(Filter::Ilike(column.to_string(), pattern.to_string()))
    }

    #[must_use]
    pub fn in_list<I, V>(self, column: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: ToString,
    {
        let values: Vec<String> = values.into_iter().map(|value| value.to_string()).collect();
        self.filter(Filter::In(column.to_string(), values))
    }

    #[must_use]
    pub fn or(self, filters: Vec<Filter>) -> Self {
        self.filter(Filter::Or(filters))
    }

    /// Appends an ordering key.
    #[must_use]
    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        self.order.push(Order {
            column: column.to_string(),
            ascending,
        });
        self
    }

    /// Restricts the result to rows `from..=to` of the ordered match set.
    #[must_use]
    pub const fn range(mut self, from: u64, to: u64) -> Self {
        self.range = Some((from, to));
        self
    }

    #[must_use]
    pub const fn exact_count(mut self) -> Self {
        self.count = true;
        self
    }

    /// Renders selection, filters and ordering as query parameters.
    ///
    /// The `select` parameter is omitted for `*` so the same rendering
    /// serves reads and writes.
    #[must_use]
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params: Vec<(String, String)> = Vec::new();
        if self.select != "*" {
            params.push((String::from("select"), self.select.clone()));
        }
        params.extend(self.filters.iter().map(Filter::to_param));
        if !self.order.is_empty() {
            let order: Vec<String> = self
                .order
                .iter()
                .map(|key| {
                    format!(
                        "{}.{}",
                        key.column,
                        if key.ascending { "asc" } else { "desc" }
                    )
                })
                .collect();
            params.push((String::from("order"), order.join(",")));
        }
        params
    }

    /// Value of the `Range` header, if a range is set.
    #[must_use]
    pub fn range_header(&self) -> Option<String> {
        self.range.map(|(from, to)| format!("{from}-{to}"))
    }
}

/// Parses the total out of a `Content-Range` header (`0-49/123`, `*/0`).
///
/// Returns `None` when the total is unknown (`*`) or the header is malformed.
#[must_use]
pub fn parse_content_range(header: &str) -> Option<u64> {
    let (_, total) = header.trim().split_once('/')?;
    total.parse().ok()
}
