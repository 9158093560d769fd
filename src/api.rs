//! HTTP client for the well backend.
//!
//! `PortalClient` wraps a `ureq::Agent` plus a base URL and speaks the four
//! JSON endpoints the portal consumes: `/spiral`, `/query`, `/docs/search`,
//! and `/well/overview`. Response schemas are trusted as-is; the only
//! shaping done here is explicit serde defaults for optional fields, so the
//! rest of the application never sees "missing".

use std::time::Duration;

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::point::MemoryPoint;

/// Placeholder used when the backend omits `answer` in a `/query` response.
pub const NO_ANSWER: &str = "No answer";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ApiError {
    #[error("request to {endpoint} failed: {message}")]
    #[diagnostic(
        code(wellport::api::request),
        help("Is the well backend reachable at the configured base URL?")
    )]
    Request { endpoint: String, message: String },

    #[error("unexpected response from {endpoint}: {message}")]
    #[diagnostic(
        code(wellport::api::response),
        help("The backend returned a body this portal version cannot parse.")
    )]
    Response { endpoint: String, message: String },
}

pub type ApiResult<T> = Result<T, ApiError>;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct SpiralRequest<'a> {
    target: &'static str,
    value: &'a str,
    stage: &'a str,
}

#[derive(Debug, Deserialize)]
struct SpiralResponse {
    #[serde(default)]
    points: Vec<MemoryPoint>,
}

#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    well_id: &'a str,
    query: &'a str,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    answer: Option<String>,
}

/// Literal vs. semantic document search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    #[default]
    Literal,
    Semantic,
}

impl std::fmt::Display for SearchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Literal => write!(f, "literal"),
            Self::Semantic => write!(f, "semantic"),
        }
    }
}

#[derive(Debug, Serialize)]
struct DocSearchRequest<'a> {
    well_id: &'a str,
    query: &'a str,
    mode: SearchMode,
}

/// One document search hit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocHit {
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub date: String,
}

#[derive(Debug, Deserialize)]
struct DocSearchResponse {
    #[serde(default)]
    results: Vec<DocHit>,
}

/// Summary data for the overview panel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Overview {
    #[serde(default)]
    pub production: Vec<f64>,
    #[serde(default)]
    pub uptime: f64,
    #[serde(default)]
    pub downtime: f64,
    #[serde(default)]
    pub operator: String,
    #[serde(default)]
    pub district: String,
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub reflection: String,
}

// ---------------------------------------------------------------------------
// PortalClient
// ---------------------------------------------------------------------------

/// Synchronous HTTP client for the well backend.
#[derive(Clone)]
pub struct PortalClient {
    base_url: String,
    http: ureq::Agent,
}

impl PortalClient {
    /// Build a client against `base_url` with a per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url = base_url.into();
        let http = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let resp = self
            .http
            .get(&self.url(path))
            .call()
            .map_err(|e| ApiError::Request {
                endpoint: path.to_string(),
                message: e.to_string(),
            })?;
        resp.into_json().map_err(|e| ApiError::Response {
            endpoint: path.to_string(),
            message: format!("failed to parse JSON: {e}"),
        })
    }

    fn post_json<B: Serialize, T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let resp = self
            .http
            .post(&self.url(path))
            .send_json(body)
            .map_err(|e| ApiError::Request {
                endpoint: path.to_string(),
                message: e.to_string(),
            })?;
        resp.into_json().map_err(|e| ApiError::Response {
            endpoint: path.to_string(),
            message: format!("failed to parse JSON: {e}"),
        })
    }

    /// POST `/spiral`: fetch the memory points for a well. A missing
    /// `points` field is an empty batch.
    pub fn fetch_spiral(&self, well_id: &str, stage: &str) -> ApiResult<Vec<MemoryPoint>> {
        tracing::debug!(well_id, stage, "fetching spiral points");
        let resp: SpiralResponse = self.post_json(
            "/spiral",
            &SpiralRequest {
                target: "well_id",
                value: well_id,
                stage,
            },
        )?;
        tracing::debug!(count = resp.points.len(), "spiral points received");
        Ok(resp.points)
    }

    /// POST `/query`: ask the well a question. A missing `answer` becomes
    /// the [`NO_ANSWER`] placeholder.
    pub fn query_well(&self, well_id: &str, query: &str) -> ApiResult<String> {
        tracing::debug!(well_id, "querying well");
        let resp: QueryResponse = self.post_json("/query", &QueryRequest { well_id, query })?;
        Ok(resp.answer.unwrap_or_else(|| NO_ANSWER.to_string()))
    }

    /// POST `/docs/search`: literal or semantic document search.
    pub fn search_docs(
        &self,
        well_id: &str,
        query: &str,
        mode: SearchMode,
    ) -> ApiResult<Vec<DocHit>> {
        tracing::debug!(well_id, %mode, "searching documents");
        let resp: DocSearchResponse = self.post_json(
            "/docs/search",
            &DocSearchRequest {
                well_id,
                query,
                mode,
            },
        )?;
        Ok(resp.results)
    }

    /// GET `/well/overview?well_id=...`: summary panel data.
    pub fn fetch_overview(&self, well_id: &str) -> ApiResult<Overview> {
        tracing::debug!(well_id, "fetching overview");
        let path = "/well/overview";
        let resp = self
            .http
            .get(&self.url(path))
            .query("well_id", well_id)
            .call()
            .map_err(|e| ApiError::Request {
                endpoint: path.to_string(),
                message: e.to_string(),
            })?;
        resp.into_json().map_err(|e| ApiError::Response {
            endpoint: path.to_string(),
            message: format!("failed to parse JSON: {e}"),
        })
    }
}

impl std::fmt::Debug for PortalClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortalClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spiral_request_wire_shape() {
        let req = SpiralRequest {
            target: "well_id",
            value: "WELL-001",
            stage: "reflect",
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["target"], "well_id");
        assert_eq!(json["value"], "WELL-001");
        assert_eq!(json["stage"], "reflect");
    }

    #[test]
    fn missing_points_defaults_to_empty() {
        let resp: SpiralResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.points.is_empty());
    }

    #[test]
    fn missing_answer_becomes_placeholder() {
        let resp: QueryResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(resp.answer.unwrap_or_else(|| NO_ANSWER.to_string()), NO_ANSWER);
    }

    #[test]
    fn search_mode_wire_names() {
        assert_eq!(serde_json::to_string(&SearchMode::Literal).unwrap(), "\"literal\"");
        assert_eq!(serde_json::to_string(&SearchMode::Semantic).unwrap(), "\"semantic\"");
    }

    #[test]
    fn overview_tolerates_sparse_body() {
        let ov: Overview = serde_json::from_str(r#"{"operator": "Acme"}"#).unwrap();
        assert_eq!(ov.operator, "Acme");
        assert!(ov.production.is_empty());
        assert_eq!(ov.uptime, 0.0);
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = PortalClient::new("http://localhost:9000/", Duration::from_secs(1));
        assert_eq!(client.base_url(), "http://localhost:9000");
        assert_eq!(client.url("/spiral"), "http://localhost:9000/spiral");
    }
}
