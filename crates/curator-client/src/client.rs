use crate::error::ClientError;
use crate::query::{parse_content_range, Filter, Mutation, RemoteQuery, Selection};
use crate::types::BackendConfig;
use reqwest::header::{AUTHORIZATION, CONTENT_RANGE};
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;

/// Client for the hosted backend: PostgREST tables under `/rest/v1` and
/// serverless functions under `/functions/v1`.
pub struct SupabaseClient {
    client: Client,
    config: BackendConfig,
}

impl SupabaseClient {
    pub fn new(config: BackendConfig) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.config.api_key)
            .header(AUTHORIZATION, format!("Bearer {}", self.config.api_key))
    }

    /// Run a read. `total` is filled when the query asked for a count.
    pub async fn select(&self, query: &RemoteQuery) -> Result<Selection, ClientError> {
        let url = self.config.rest_url(&query.table);
        let request = if query.head { self.client.head(&url) } else { self.client.get(&url) };
        let mut request = self.authorized(request).query(&query.to_params());
        if let Some(prefer) = query.prefer_header() {
            request = request.header("Prefer", prefer);
        }

        tracing::debug!("[Backend] select {} ({} filters)", query.table, query.filters.len());
        let resp = check_status(request.send().await?).await?;

        let total = resp
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range);

        if query.head {
            return Ok(Selection::new(Vec::new(), total));
        }

        let rows: Vec<Value> =
            resp.json().await.map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
        Ok(Selection::new(rows, total))
    }

    /// Run a write. Updates and deletes must carry at least one filter.
    pub async fn execute(&self, mutation: &Mutation) -> Result<(), ClientError> {
        let url = self.config.rest_url(mutation.table());
        let params: Vec<(String, String)> =
            mutation.filters().iter().map(Filter::to_param).collect();

        let request = match mutation {
            Mutation::Insert { row, .. } => self.client.post(&url).json(row),
            Mutation::Update { patch, .. } => {
                reject_unfiltered(mutation)?;
                self.client.patch(&url).query(&params).json(patch)
            },
            Mutation::Delete { .. } => {
                reject_unfiltered(mutation)?;
                self.client.delete(&url).query(&params)
            },
        };

        tracing::debug!("[Backend] write {}", mutation.table());
        let request = self.authorized(request).header("Prefer", "return=minimal");
        check_status(request.send().await?).await?;
        Ok(())
    }

    /// Invoke a serverless function and return its JSON body
    /// (`Value::Null` for an empty body).
    pub async fn invoke(&self, function: &str, body: Option<&Value>) -> Result<Value, ClientError> {
        let empty = Value::Object(serde_json::Map::new());
        let request = self
            .authorized(self.client.post(self.config.function_url(function)))
            .json(body.unwrap_or(&empty));

        tracing::debug!("[Backend] invoke {}", function);
        let resp = check_status(request.send().await?).await?;
        let text = resp.text().await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }
}

fn reject_unfiltered(mutation: &Mutation) -> Result<(), ClientError> {
    if mutation.filters().is_empty() {
        return Err(ClientError::InvalidRequest(format!(
            "refusing unfiltered write to {}",
            mutation.table()
        )));
    }
    Ok(())
}

async fn check_status(resp: Response) -> Result<Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ClientError::Status { status: status.as_u16(), message: error_message(&body, status) })
}

/// Pull a human-readable message out of an error body
/// (`{"error": ".."}`, `{"error": {"message": ".."}}`, `{"message": ".."}`).
pub(crate) fn error_message(body: &str, status: reqwest::StatusCode) -> String {
    let parsed = serde_json::from_str::<Value>(body).ok().and_then(|v| {
        let error = v.get("error");
        error
            .and_then(Value::as_str)
            .or_else(|| error.and_then(|e| e.get("message")).and_then(Value::as_str))
            .or_else(|| v.get("message").and_then(Value::as_str))
            .or_else(|| v.get("msg").and_then(Value::as_str))
            .map(str::to_string)
    });
    match parsed {
        Some(message) => message,
        None if !body.trim().is_empty() => body.trim().to_string(),
        None => status.canonical_reason().unwrap_or("unknown error").to_string(),
    }
}
