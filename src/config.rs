use reqwest::Url;
use tracing::{debug, info};

use crate::contract::FetchError;

/// Environment override for the full API base, e.g. `https://example.org/api/v0`.
pub const ENV_API_BASE: &str = "REPORT_API_BASE";
/// Environment override for the deployment base the API suffix is appended to.
pub const ENV_SITE_BASE: &str = "REPORT_SITE_BASE";

/// Deployment base used when neither environment variable is set.
const DEFAULT_SITE_BASE: &str = "http://localhost:42001/";
/// Versioned API suffix appended to the deployment base.
const API_SUFFIX: &str = "api/v0";

/// Resolved location of the export API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub api_base: String,
}

impl ApiConfig {
    /// Resolves the API base: explicit `REPORT_API_BASE` wins outright,
    /// otherwise the deployment base (`REPORT_SITE_BASE`, default localhost)
    /// plus the fixed versioned suffix. Never fails; everything has a default.
    pub fn from_env() -> Self {
        if let Ok(base) = std::env::var(ENV_API_BASE) {
            info!(api_base = %base, "Using explicit API base from environment");
            return Self { api_base: base };
        }
        let site_base =
            std::env::var(ENV_SITE_BASE).unwrap_or_else(|_| DEFAULT_SITE_BASE.to_string());
        let api_base = format!("{}/{}", site_base.trim_end_matches('/'), API_SUFFIX);
        info!(api_base = %api_base, "Derived API base from deployment base");
        Self { api_base }
    }

    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
        }
    }

    /// Builds the export request URL, form-encoding the expression so that
    /// URL-unsafe characters round-trip through the query string.
    pub fn export_url(&self, expression: &str, limit: u64) -> Result<Url, FetchError> {
        let mut url = Url::parse(&format!(
            "{}/export",
            self.api_base.trim_end_matches('/')
        ))?;
        url.query_pairs_mut()
            .append_pair("expression", expression)
            .append_pair("limit", &limit.to_string());
        debug!(url = %url, "Constructed export URL");
        Ok(url)
    }
}
