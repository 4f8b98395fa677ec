//! Query-fetch layer: turns an (expression, limit) pair into one GET against
//! the export endpoint and a normalized result.
//!
//! The contract towards the UI is "never throw": any failure (URL
//! construction, network, bad status, non-JSON or non-object body) is
//! caught here, logged once as a diagnostic, and surfaced as an absent
//! result. Callers treat `None` as a no-op, not a crash. There is no retry
//! and no timeout; the call resolves exactly once.
//!
//! Rapid repeated invocation (interactive query typing) can make an older
//! response arrive after a newer one. Each call therefore takes a
//! monotonically increasing ticket, and a response whose ticket has been
//! superseded by a later call is discarded instead of delivered.

use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::Value;
use tracing::{debug, error, info};

use crate::config::ApiConfig;
use crate::contract::{HttpClient, ReqwestHttp};

/// Default result cap when the caller does not pass one.
pub const DEFAULT_LIMIT: u64 = 100;

/// Decoded export response: a plain mapping from field name to value. The
/// shape is not schema-constrained here; downstream renderers interpret it.
pub type QueryResult = serde_json::Map<String, Value>;

/// A single query as entered in a query block.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// Free-form filter expression passed to the export endpoint.
    pub expression: String,
    /// Result cap; must be positive.
    pub limit: u64,
}

impl Query {
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            limit: DEFAULT_LIMIT,
        }
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }
}

/// Client for the export endpoint.
pub struct QueryClient<H: HttpClient> {
    http: H,
    config: ApiConfig,
    ticket: AtomicU64,
}

impl QueryClient<ReqwestHttp> {
    /// Client with the real reqwest transport and the API base resolved from
    /// the environment.
    pub fn new_from_env() -> Self {
        Self::with_http(ReqwestHttp::new(), ApiConfig::from_env())
    }
}

impl<H: HttpClient> QueryClient<H> {
    /// Client over an explicit transport and API location. This is also the
    /// seam tests use to inject a mock transport.
    pub fn with_http(http: H, config: ApiConfig) -> Self {
        Self {
            http,
            config,
            ticket: AtomicU64::new(0),
        }
    }

    /// Runs a prepared [`Query`].
    pub async fn run(&self, query: &Query) -> Option<QueryResult> {
        self.run_query(&query.expression, Some(query.limit)).await
    }

    /// Runs one export query. Resolves exactly once, to the decoded response
    /// mapping or to `None` on any failure or when a later call superseded
    /// this one before its response arrived.
    pub async fn run_query(&self, expression: &str, limit: Option<u64>) -> Option<QueryResult> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT);
        if limit == 0 {
            error!(expression, "Rejecting query with zero limit");
            return None;
        }
        let url = match self.config.export_url(expression, limit) {
            Ok(url) => url,
            Err(e) => {
                error!(error = ?e, expression, "Failed to construct export URL");
                return None;
            }
        };
        let ticket = self.ticket.fetch_add(1, Ordering::SeqCst) + 1;
        info!(url = %url, ticket, "Fetching query results");
        let value = match self.http.get_json(&url).await {
            Ok(value) => value,
            Err(e) => {
                error!(error = ?e, url = %url, "Query request failed");
                return None;
            }
        };
        if self.ticket.load(Ordering::SeqCst) != ticket {
            debug!(ticket, "Discarding superseded query response");
            return None;
        }
        match value {
            // Rebuild into a fresh mapping so callers never alias transport
            // internals.
            Value::Object(map) => Some(map.into_iter().collect()),
            other => {
                error!(url = %url, body_kind = json_kind(&other), "Export response was not a JSON object");
                None
            }
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
