//! Declarative PostgREST queries.
//!
//! A [`RemoteQuery`] describes one read (filters, sort, row window, count)
//! without performing it; [`RemoteQuery::to_params`] renders it to the
//! PostgREST query-string grammar. Two queries built from the same inputs
//! compare equal, which is what the listing tests rely on.

use serde_json::Value;

/// Characters that force a value to be double-quoted inside `or=(...)`
/// and array literals.
const RESERVED: &[char] = &[',', '.', ':', '(', ')', '"', '\\', '{', '}', ' '];

/// A single row predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// `column = value`
    Eq { column: String, value: String },
    /// Case-insensitive substring match
    ILike { column: String, term: String },
    /// Array column contains every value
    Contains { column: String, values: Vec<String> },
    /// Any of the nested predicates
    Or(Vec<Filter>),
}

impl Filter {
    pub fn eq(column: impl Into<String>, value: impl ToString) -> Self {
        Self::Eq { column: column.into(), value: value.to_string() }
    }

    pub fn ilike(column: impl Into<String>, term: impl Into<String>) -> Self {
        Self::ILike { column: column.into(), term: term.into() }
    }

    pub fn contains(column: impl Into<String>, values: Vec<String>) -> Self {
        Self::Contains { column: column.into(), values }
    }

    /// Top-level `(key, value)` query parameter.
    pub fn to_param(&self) -> (String, String) {
        match self {
            Self::Eq { column, value } => (column.clone(), format!("eq.{}", value)),
            Self::ILike { column, term } => (column.clone(), format!("ilike.*{}*", term)),
            Self::Contains { column, values } => {
                (column.clone(), format!("cs.{}", array_literal(values)))
            },
            Self::Or(filters) => ("or".to_string(), format!("({})", render_list(filters))),
        }
    }

    /// Nested form used inside logical operators (`column.op.value`).
    fn render_nested(&self) -> String {
        match self {
            Self::Eq { column, value } => format!("{}.eq.{}", column, quote(value)),
            Self::ILike { column, term } => {
                format!("{}.ilike.{}", column, quote(&format!("*{}*", term)))
            },
            Self::Contains { column, values } => {
                format!("{}.cs.{}", column, array_literal(values))
            },
            Self::Or(filters) => format!("or({})", render_list(filters)),
        }
    }
}

fn render_list(filters: &[Filter]) -> String {
    filters.iter().map(Filter::render_nested).collect::<Vec<_>>().join(",")
}

fn quote(value: &str) -> String {
    if value.contains(RESERVED) {
        format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        value.to_string()
    }
}

fn array_literal(values: &[String]) -> String {
    format!("{{{}}}", values.iter().map(|v| quote(v)).collect::<Vec<_>>().join(","))
}

/// Sort clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub ascending: bool,
}

impl Order {
    fn render(&self) -> String {
        format!("{}.{}", self.column, if self.ascending { "asc" } else { "desc" })
    }
}

/// Inclusive zero-based row window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRange {
    pub from: u64,
    pub to: u64,
}

impl RowRange {
    pub fn new(from: u64, to: u64) -> Self {
        Self { from, to: to.max(from) }
    }

    /// Number of rows in the window.
    pub fn row_count(&self) -> u64 {
        self.to - self.from + 1
    }
}

/// Row counting strategy requested through the `Prefer` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountMode {
    Exact,
}

/// A declarative read against one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteQuery {
    pub table: String,
    pub columns: String,
    pub filters: Vec<Filter>,
    pub order: Vec<Order>,
    pub range: Option<RowRange>,
    pub limit: Option<u64>,
    pub count: Option<CountMode>,
    /// Count only; no rows are returned
    pub head: bool,
}

impl RemoteQuery {
    pub fn from(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: "*".to_string(),
            filters: Vec::new(),
            order: Vec::new(),
            range: None,
            limit: None,
            count: None,
            head: false,
        }
    }

    pub fn select(mut self, columns: impl Into<String>) -> Self {
        self.columns = columns.into();
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn eq(self, column: impl Into<String>, value: impl ToString) -> Self {
        self.filter(Filter::eq(column, value))
    }

    pub fn contains(self, column: impl Into<String>, values: Vec<String>) -> Self {
        self.filter(Filter::contains(column, values))
    }

    pub fn or(self, filters: Vec<Filter>) -> Self {
        self.filter(Filter::Or(filters))
    }

    pub fn order(mut self, column: impl Into<String>, ascending: bool) -> Self {
        self.order.push(Order { column: column.into(), ascending });
        self
    }

    pub fn range(mut self, from: u64, to: u64) -> Self {
        self.range = Some(RowRange::new(from, to));
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn count_exact(mut self) -> Self {
        self.count = Some(CountMode::Exact);
        self
    }

    /// Count rows without fetching them.
    pub fn head(mut self) -> Self {
        self.head = true;
        self.count = Some(CountMode::Exact);
        self
    }

    /// Render to PostgREST query parameters, in a stable order.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), self.columns.clone())];
        params.extend(self.filters.iter().map(Filter::to_param));
        if !self.order.is_empty() {
            let order = self.order.iter().map(Order::render).collect::<Vec<_>>().join(",");
            params.push(("order".to_string(), order));
        }
        match (self.range, self.limit) {
            (Some(range), _) => {
                params.push(("offset".to_string(), range.from.to_string()));
                params.push(("limit".to_string(), range.row_count().to_string()));
            },
            (None, Some(limit)) => params.push(("limit".to_string(), limit.to_string())),
            (None, None) => {},
        }
        params
    }

    /// Value of the `Prefer` header, if any.
    pub fn prefer_header(&self) -> Option<&'static str> {
        self.count.map(|CountMode::Exact| "count=exact")
    }
}

/// A declarative write against one table.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Insert { table: String, row: Value },
    Update { table: String, filters: Vec<Filter>, patch: Value },
    Delete { table: String, filters: Vec<Filter> },
}

impl Mutation {
    pub fn insert(table: impl Into<String>, row: Value) -> Self {
        Self::Insert { table: table.into(), row }
    }

    /// Update rows whose `id` equals `id`.
    pub fn update_by_id(table: impl Into<String>, id: &str, patch: Value) -> Self {
        Self::Update { table: table.into(), filters: vec![Filter::eq("id", id)], patch }
    }

    /// Delete the row whose `id` equals `id`.
    pub fn delete_by_id(table: impl Into<String>, id: &str) -> Self {
        Self::Delete { table: table.into(), filters: vec![Filter::eq("id", id)] }
    }

    pub fn table(&self) -> &str {
        match self {
            Self::Insert { table, .. }
            | Self::Update { table, .. }
            | Self::Delete { table, .. } => table,
        }
    }

    pub fn filters(&self) -> &[Filter] {
        match self {
            Self::Insert { .. } => &[],
            Self::Update { filters, .. } | Self::Delete { filters, .. } => filters,
        }
    }
}

/// Rows and (when requested) the total count of one read.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Selection {
    pub rows: Vec<Value>,
    pub total: Option<u64>,
}

impl Selection {
    pub fn new(rows: Vec<Value>, total: Option<u64>) -> Self {
        Self { rows, total }
    }

    /// Deserialize every row into `T`.
    pub fn rows_as<T: serde::de::DeserializeOwned>(&self) -> Result<Vec<T>, crate::ClientError> {
        self.rows
            .iter()
            .cloned()
            .map(|row| {
                serde_json::from_value(row)
                    .map_err(|e| crate::ClientError::InvalidResponse(e.to_string()))
            })
            .collect()
    }

    /// Total count, falling back to the number of returned rows.
    pub fn total_or_len(&self) -> u64 {
        self.total.unwrap_or(self.rows.len() as u64)
    }
}

/// Parse the total out of a `Content-Range` header (`0-11/42`, `*/0`).
pub fn parse_content_range(value: &str) -> Option<u64> {
    let (_, total) = value.split_once('/')?;
    total.trim().parse().ok()
}
