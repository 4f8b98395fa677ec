//! # contract: transport seam for the query-fetch layer
//!
//! This module defines the single trait (`HttpClient`) the query layer talks
//! through, so the real reqwest-backed transport and deterministic test mocks
//! are interchangeable.
//!
//! ## Interface & Extensibility
//! - Implement [`HttpClient`] to plug in a new transport (browser bridge,
//!   recorded fixtures, etc.).
//! - The method is async and returns a boxed error type; implementors convert
//!   all meaningful upstream failures (connect, status, decode) into it.
//!
//! ## Mocking & Testing
//! - The trait is annotated for `mockall` so consumers can generate
//!   deterministic mocks for unit/integration tests.

use async_trait::async_trait;
use reqwest::Url;

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

/// Error type for the transport seam (simple boxed error for now).
pub type FetchError = Box<dyn std::error::Error + Send + Sync>;

/// Trait for issuing a single GET request and decoding the body as JSON.
///
/// Implemented by the real reqwest transport and by test mocks. A non-2xx
/// status is an error; the caller never sees a partial response.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Perform a GET against `url` and return the decoded JSON body.
    async fn get_json(&self, url: &Url) -> Result<serde_json::Value, FetchError>;
}

/// Production transport backed by a shared [`reqwest::Client`].
pub struct ReqwestHttp {
    client: reqwest::Client,
}

impl ReqwestHttp {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for ReqwestHttp {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for ReqwestHttp {
    async fn get_json(&self, url: &Url) -> Result<serde_json::Value, FetchError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(format!("export API returned {status} for {url}").into());
        }
        let value = response.json::<serde_json::Value>().await?;
        Ok(value)
    }
}
