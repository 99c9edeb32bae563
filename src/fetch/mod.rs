//! Paginated fetch
//!
//! The core loop: issue the endpoint call page by page, extract the record
//! array at the configured path, and concatenate pages in server order
//! until the termination rule fires. Strictly sequential; page N+1 is only
//! requested after page N's response decides the cursor. The first error
//! aborts the whole fetch with no partial result.

use crate::error::{Error, Result};
use crate::http::{ApiClient, RequestConfig};
use crate::pagination::{NextPage, PaginationConfig, PaginationState};
use crate::search;
use crate::types::{JsonValue, StringMap, Verb};
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// Describes one paginated query against an endpoint.
///
/// The path must already have its placeholders substituted (see
/// [`crate::template`]). Static parameters travel in the query string for
/// GET and in the JSON body for POST; pagination cursor parameters follow
/// the same rule.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    /// Rendered request path
    pub path: String,
    /// HTTP verb (per-endpoint contract, POST is still a read-only query)
    pub verb: Verb,
    /// Static query parameters
    pub query: StringMap,
    /// Static JSON body fields (POST queries)
    pub body: serde_json::Map<String, Value>,
    /// Dot path of the record array within each response
    pub records_path: String,
    /// Pagination style and termination rule
    pub pagination: PaginationConfig,
}

impl FetchRequest {
    /// Create a request for a rendered path
    pub fn new(path: impl Into<String>, records_path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            verb: Verb::Get,
            query: StringMap::new(),
            body: serde_json::Map::new(),
            records_path: records_path.into(),
            pagination: PaginationConfig::None,
        }
    }

    /// Set the verb
    #[must_use]
    pub fn verb(mut self, verb: Verb) -> Self {
        self.verb = verb;
        self
    }

    /// Add a static query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Add a static body field
    #[must_use]
    pub fn body_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.body.insert(key.into(), value.into());
        self
    }

    /// Set the pagination configuration
    #[must_use]
    pub fn pagination(mut self, pagination: PaginationConfig) -> Self {
        self.pagination = pagination;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.path.is_empty() {
            return Err(Error::config("fetch request path is empty"));
        }
        if let Some(0) = self.pagination.page_size() {
            return Err(Error::config("page size must be >= 1"));
        }
        Ok(())
    }
}

/// Retrieves complete result sets from page-bounded endpoints
#[derive(Debug)]
pub struct Fetcher {
    client: ApiClient,
}

impl Fetcher {
    /// Create a fetcher over the given client
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Get the underlying client
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Fetch every page of the request and return the concatenated records
    /// in server order.
    pub async fn fetch_all(&self, request: &FetchRequest) -> Result<Vec<JsonValue>> {
        let (records, _) = self.fetch_all_with_meta(request).await?;
        Ok(records)
    }

    /// Like [`fetch_all`](Self::fetch_all), additionally returning the last
    /// response body so callers can read scalar metadata reported alongside
    /// the array (total counts, cursor tokens).
    pub async fn fetch_all_with_meta(
        &self,
        request: &FetchRequest,
    ) -> Result<(Vec<JsonValue>, JsonValue)> {
        request.validate()?;

        let paginator = request.pagination.build();
        let mut state = PaginationState::new();
        let mut cursor = paginator.params(&state);
        let mut all_records = Vec::new();
        let mut page_count = 0u32;

        loop {
            let config = build_request_config(request, &cursor);
            let body = self.client.send_json(request.verb, &request.path, &config).await?;

            let records = extract_records(&request.records_path, &body)?;
            page_count += 1;
            debug!(
                "page {}: {} records from {}",
                page_count,
                records.len(),
                request.path
            );

            let next = paginator.process_page(&body, &records, &mut state);
            all_records.extend(records);

            match next {
                NextPage::Continue { params } => {
                    cursor = params;
                }
                NextPage::Done => {
                    debug!(
                        "fetch complete: {} records in {} pages from {}",
                        all_records.len(),
                        page_count,
                        request.path
                    );
                    return Ok((all_records, body));
                }
            }
        }
    }
}

/// Merge static and cursor parameters into one request config.
///
/// For body-carrying verbs the cursor lands in the JSON body next to the
/// static fields, with each value kept exactly as the paginator produced
/// it; otherwise everything goes into the query string.
fn build_request_config(request: &FetchRequest, cursor: &HashMap<String, Value>) -> RequestConfig {
    let mut config = RequestConfig::new();

    for (key, value) in &request.query {
        config = config.query(key, value);
    }

    if request.verb.uses_body() {
        let mut body = request.body.clone();
        for (key, value) in cursor {
            body.insert(key.clone(), value.clone());
        }
        config = config.json(Value::Object(body));
    } else {
        for (key, value) in cursor {
            config = config.query(key, query_value(value));
        }
    }

    config
}

/// Render a cursor value for the query string: string markers go in
/// verbatim, numbers in their canonical form.
fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Extract the record array at the configured path.
///
/// An absent path is an empty page (endpoints omit the array rather than
/// sending `[]`); a present non-array value is a schema error.
fn extract_records(path: &str, body: &Value) -> Result<Vec<Value>> {
    match search::search(path, body) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(arr)) => Ok(arr.clone()),
        Some(other) => Err(Error::schema(path, format!("found {}", type_name(other)))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
