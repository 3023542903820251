//! In-memory stand-ins for the hosted backend, the YouTube directory,
//! and the wall clock.
//!
//! `FakeBackend` evaluates [`RemoteQuery`] filters, ordering, and row
//! windows against JSON rows held in memory, records every call, and can
//! be told to fail per table or per function.

use std::cmp::Ordering;
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use curator_client::{ClientError, Filter, Mutation, RemoteQuery, Selection};
use curator_types::YouTubeChannel;
use serde_json::{json, Value};

use crate::modules::backend::{Backend, ChannelDirectory};
use crate::scheduler::Clock;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Canned reply of a fake serverless function.
#[derive(Debug, Clone)]
pub enum FakeReply {
    /// 2xx with this JSON body
    Json(Value),
    /// Non-2xx with this message
    Status(u16, String),
}

impl FakeReply {
    fn into_result(self) -> Result<Value, ClientError> {
        match self {
            Self::Json(body) => Ok(body),
            Self::Status(status, message) => Err(ClientError::Status { status, message }),
        }
    }
}

#[derive(Default)]
struct State {
    tables: HashMap<String, Vec<Value>>,
    next_id: u64,
    selects: Vec<RemoteQuery>,
    mutations: Vec<Mutation>,
    invocations: Vec<(String, Option<Value>)>,
    select_failures: HashMap<String, (u16, String)>,
    mutation_failures: HashMap<String, (u16, String)>,
    replies: HashMap<String, VecDeque<FakeReply>>,
    default_replies: HashMap<String, FakeReply>,
    invoke_delay: Option<Duration>,
}

/// In-memory [`Backend`].
#[derive(Default)]
pub struct FakeBackend {
    state: Mutex<State>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append rows to a table.
    pub fn seed(&self, table: &str, rows: Vec<Value>) {
        lock(&self.state).tables.entry(table.to_string()).or_default().extend(rows);
    }

    /// Current rows of a table.
    pub fn rows(&self, table: &str) -> Vec<Value> {
        lock(&self.state).tables.get(table).cloned().unwrap_or_default()
    }

    /// Every read issued so far.
    pub fn selects(&self) -> Vec<RemoteQuery> {
        lock(&self.state).selects.clone()
    }

    /// Number of reads issued against `table`.
    pub fn select_count(&self, table: &str) -> usize {
        lock(&self.state).selects.iter().filter(|q| q.table == table).count()
    }

    /// Every write issued so far.
    pub fn mutations(&self) -> Vec<Mutation> {
        lock(&self.state).mutations.clone()
    }

    /// Bodies of every call to `function`.
    pub fn invocations(&self, function: &str) -> Vec<Option<Value>> {
        lock(&self.state)
            .invocations
            .iter()
            .filter(|(name, _)| name == function)
            .map(|(_, body)| body.clone())
            .collect()
    }

    /// Make reads of `table` fail with the given status.
    pub fn fail_selects_on(&self, table: &str, status: u16, message: &str) {
        lock(&self.state).select_failures.insert(table.to_string(), (status, message.to_string()));
    }

    /// Make writes to `table` fail with the given status.
    pub fn fail_mutations_on(&self, table: &str, status: u16, message: &str) {
        lock(&self.state)
            .mutation_failures
            .insert(table.to_string(), (status, message.to_string()));
    }

    pub fn clear_failures(&self) {
        let mut state = lock(&self.state);
        state.select_failures.clear();
        state.mutation_failures.clear();
    }

    /// Queue a one-shot reply for `function`.
    pub fn push_reply(&self, function: &str, reply: FakeReply) {
        lock(&self.state).replies.entry(function.to_string()).or_default().push_back(reply);
    }

    /// Reply used for `function` once its queue is empty.
    pub fn set_default_reply(&self, function: &str, reply: FakeReply) {
        lock(&self.state).default_replies.insert(function.to_string(), reply);
    }

    /// Hold every function call for `delay` before answering.
    pub fn set_invoke_delay(&self, delay: Duration) {
        lock(&self.state).invoke_delay = Some(delay);
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn select(&self, query: &RemoteQuery) -> Result<Selection, ClientError> {
        let mut state = lock(&self.state);
        state.selects.push(query.clone());
        if let Some((status, message)) = state.select_failures.get(&query.table) {
            return Err(ClientError::Status { status: *status, message: message.clone() });
        }

        let mut matched: Vec<Value> = state
            .tables
            .get(&query.table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| query.filters.iter().all(|f| matches(row, f)))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        // Stable sorts applied last-key-first give multi-column ordering.
        for order in query.order.iter().rev() {
            matched.sort_by(|a, b| {
                let ord = compare(a.get(&order.column), b.get(&order.column));
                if order.ascending { ord } else { ord.reverse() }
            });
        }

        let total = query.count.map(|_| matched.len() as u64);
        if query.head {
            return Ok(Selection::new(Vec::new(), total));
        }

        let (offset, limit) = match (query.range, query.limit) {
            (Some(range), _) => (range.from, Some(range.row_count())),
            (None, limit) => (0, limit),
        };
        let rows = matched
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(limit.and_then(|l| usize::try_from(l).ok()).unwrap_or(usize::MAX))
            .collect();
        Ok(Selection::new(rows, total))
    }

    async fn execute(&self, mutation: &Mutation) -> Result<(), ClientError> {
        let mut state = lock(&self.state);
        state.mutations.push(mutation.clone());
        if let Some((status, message)) = state.mutation_failures.get(mutation.table()) {
            return Err(ClientError::Status { status: *status, message: message.clone() });
        }

        match mutation {
            Mutation::Insert { table, row } => {
                let mut row = row.clone();
                if row.get("id").is_none() {
                    state.next_id += 1;
                    let id = format!("row-{}", state.next_id);
                    if let Some(obj) = row.as_object_mut() {
                        obj.insert("id".to_string(), Value::String(id));
                    }
                }
                state.tables.entry(table.clone()).or_default().push(row);
            },
            Mutation::Update { table, filters, patch } => {
                if filters.is_empty() {
                    let message = format!("unfiltered update of {table}");
                    return Err(ClientError::InvalidRequest(message));
                }
                let rows = state.tables.entry(table.clone()).or_default();
                for row in rows.iter_mut().filter(|row| filters.iter().all(|f| matches(row, f))) {
                    if let (Some(target), Some(patch)) = (row.as_object_mut(), patch.as_object()) {
                        for (key, value) in patch {
                            target.insert(key.clone(), value.clone());
                        }
                    }
                }
            },
            Mutation::Delete { table, filters } => {
                if filters.is_empty() {
                    let message = format!("unfiltered delete of {table}");
                    return Err(ClientError::InvalidRequest(message));
                }
                let rows = state.tables.entry(table.clone()).or_default();
                rows.retain(|row| !filters.iter().all(|f| matches(row, f)));
            },
        }
        Ok(())
    }

    async fn invoke(&self, function: &str, body: Option<&Value>) -> Result<Value, ClientError> {
        let (reply, delay) = {
            let mut state = lock(&self.state);
            state.invocations.push((function.to_string(), body.cloned()));
            let queued = state.replies.get_mut(function).and_then(VecDeque::pop_front);
            let reply = queued
                .or_else(|| state.default_replies.get(function).cloned())
                .unwrap_or_else(|| FakeReply::Json(json!({ "success": true })));
            (reply, state.invoke_delay)
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        reply.into_result()
    }
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn matches(row: &Value, filter: &Filter) -> bool {
    match filter {
        Filter::Eq { column, value } => {
            row.get(column).and_then(value_text).as_deref() == Some(value.as_str())
        },
        Filter::ILike { column, term } => row
            .get(column)
            .and_then(Value::as_str)
            .is_some_and(|text| text.to_lowercase().contains(&term.to_lowercase())),
        Filter::Contains { column, values } => {
            row.get(column).and_then(Value::as_array).is_some_and(|items| {
                values.iter().all(|v| items.iter().any(|item| item.as_str() == Some(v.as_str())))
            })
        },
        Filter::Or(filters) => filters.iter().any(|f| matches(row, f)),
    }
}

/// Missing and null values sort after everything else.
fn compare(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            x.as_f64().partial_cmp(&y.as_f64()).unwrap_or(Ordering::Equal)
        },
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(x), Some(y)) => value_text(x).cmp(&value_text(y)),
    }
}

/// Settable wall clock.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now: Mutex::new(now) }
    }

    /// 2025-01-01T00:00:00Z.
    pub fn fixed() -> Self {
        Self::new(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).single().unwrap_or_default())
    }

    pub fn advance(&self, by: chrono::Duration) {
        let mut now = lock(&self.now);
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *lock(&self.now)
    }
}

/// [`ChannelDirectory`] backed by a fixed list of channels, keyed by id
/// and by name.
#[derive(Default)]
pub struct FakeDirectory {
    channels: Vec<YouTubeChannel>,
}

impl FakeDirectory {
    pub fn with_channel(mut self, channel: YouTubeChannel) -> Self {
        self.channels.push(channel);
        self
    }
}

#[async_trait]
impl ChannelDirectory for FakeDirectory {
    async fn resolve_channel(&self, input: &str) -> Result<YouTubeChannel, ClientError> {
        let key = input.trim().trim_start_matches('@');
        self.channels
            .iter()
            .find(|c| c.channel_id == key || c.channel_name.eq_ignore_ascii_case(key))
            .cloned()
            .ok_or_else(|| ClientError::NotFound(format!("channel {key}")))
    }
}
