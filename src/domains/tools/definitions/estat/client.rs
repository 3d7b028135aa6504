//! e-Stat request executor.
//!
//! Every e-Stat tool funnels through [`EStatClient::fetch`]: one GET, bounded
//! by the configured timeout, with transport and status failures classified
//! into a small fixed set of [`FetchError`] kinds. Nothing is retried; the
//! caller decides whether to call again.

use std::time::Duration;

use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::core::config::EStatConfig;

/// Query parameter carrying the application ID.
const APP_ID_PARAM: &str = "appId";

/// A fully-encoded outbound request: endpoint name plus query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EStatRequest {
    endpoint: &'static str,
    query: String,
}

impl EStatRequest {
    /// The endpoint name, e.g. `getStatsList`.
    pub fn endpoint(&self) -> &'static str {
        self.endpoint
    }

    /// The encoded query string, `appId` first.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Decoded query parameters in wire order.
    pub fn params(&self) -> Vec<(String, String)> {
        serde_urlencoded::from_str(&self.query).unwrap_or_default()
    }

    /// Decoded value of a single query parameter.
    pub fn param(&self, name: &str) -> Option<String> {
        self.params()
            .into_iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Query string with the application ID removed, for logging.
    fn redacted_query(&self) -> String {
        let params: Vec<_> = self
            .params()
            .into_iter()
            .filter(|(key, _)| key != APP_ID_PARAM)
            .collect();
        serde_urlencoded::to_string(params).unwrap_or_default()
    }
}

/// Failure of a single e-Stat request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request did not complete within the configured timeout.
    #[error("Request to the e-Stat API timed out. Current timeout setting: {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    /// No connection could be established.
    #[error("Failed to connect to the e-Stat API server. Check your network connection. ({0})")]
    Connection(String),

    /// The server answered with a non-success status.
    #[error("HTTP error (status code: {status_code})")]
    Http { status_code: u16 },

    /// Anything else: malformed URL, broken body, encoding failure.
    #[error("Unexpected error: {0}")]
    Unknown(String),
}

impl FetchError {
    /// The `status` value reported in the error payload.
    pub fn status_kind(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => "timeout",
            Self::Connection(_) => "connection_error",
            Self::Http { .. } => "http_error",
            Self::Unknown(_) => "unknown_error",
        }
    }

    /// The HTTP status code, for `http_error` only.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status_code } => Some(*status_code),
            _ => None,
        }
    }

    /// Serialize as the JSON error payload returned to MCP clients:
    /// `{"ERROR": <message>, "status": <kind>, "status_code"?: <code>}`.
    pub fn to_payload(&self) -> String {
        let mut payload = json!({
            "ERROR": self.to_string(),
            "status": self.status_kind(),
        });
        if let Some(code) = self.status_code() {
            payload["status_code"] = json!(code);
        }
        payload.to_string()
    }

    /// Classify a reqwest failure. Timeout wins over connect, connect over status.
    fn classify(err: reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout { timeout_secs }
        } else if err.is_connect() {
            Self::Connection(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Http {
                status_code: status.as_u16(),
            }
        } else {
            Self::Unknown(err.to_string())
        }
    }
}

/// Client for the e-Stat REST API.
///
/// Cheap to clone: the underlying connection pool is shared, while each
/// request carries its own timeout and can be cancelled by dropping its future.
#[derive(Clone)]
pub struct EStatClient {
    http: reqwest::Client,
    base_url: String,
    app_id: Option<String>,
    timeout_secs: u64,
    forward_ref_dataset_id: bool,
}

impl std::fmt::Debug for EStatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EStatClient")
            .field("base_url", &self.base_url)
            .field("app_id", &self.app_id.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl EStatClient {
    /// Build a client from the e-Stat configuration section.
    pub fn from_config(config: &EStatConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            app_id: config.app_id.clone(),
            timeout_secs: config.timeout_secs,
            forward_ref_dataset_id: config.forward_ref_dataset_id,
        }
    }

    /// The configured per-request timeout in seconds.
    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    /// Whether reference dataset lookups attach the dataset ID.
    pub fn forwards_ref_dataset_id(&self) -> bool {
        self.forward_ref_dataset_id
    }

    /// Encode a request for `endpoint`.
    ///
    /// `appId` always leads the query; an unconfigured ID is sent empty and
    /// left for e-Stat to reject. `params` follow in field order.
    pub fn request<P: Serialize>(
        &self,
        endpoint: &'static str,
        params: &P,
    ) -> Result<EStatRequest, FetchError> {
        let app_id = self.app_id.as_deref().unwrap_or_default();
        let mut query = serde_urlencoded::to_string([(APP_ID_PARAM, app_id)])
            .map_err(|e| FetchError::Unknown(format!("Failed to encode query: {e}")))?;

        let rest = serde_urlencoded::to_string(params)
            .map_err(|e| FetchError::Unknown(format!("Failed to encode query: {e}")))?;
        if !rest.is_empty() {
            query.push('&');
            query.push_str(&rest);
        }

        Ok(EStatRequest { endpoint, query })
    }

    /// The absolute URL a request is sent to.
    pub fn url_for(&self, request: &EStatRequest) -> String {
        format!("{}/{}?{}", self.base_url, request.endpoint, request.query)
    }

    /// Encode and perform a request in one step.
    pub async fn get<P: Serialize>(
        &self,
        endpoint: &'static str,
        params: &P,
    ) -> Result<String, FetchError> {
        let request = self.request(endpoint, params)?;
        self.fetch(&request).await
    }

    /// Perform one GET and return the response body.
    #[instrument(skip_all, fields(endpoint = request.endpoint()))]
    pub async fn fetch(&self, request: &EStatRequest) -> Result<String, FetchError> {
        debug!("GET {}?{}", request.endpoint(), request.redacted_query());

        let result = self.send(&self.url_for(request)).await;
        match &result {
            Ok(body) => info!("e-Stat {} returned {} bytes", request.endpoint(), body.len()),
            Err(e) => warn!(status = e.status_kind(), "e-Stat request failed: {}", e),
        }
        result
    }

    async fn send(&self, url: &str) -> Result<String, FetchError> {
        let timeout_secs = self.timeout_secs;
        let classify = move |e: reqwest::Error| FetchError::classify(e, timeout_secs);

        let response = self
            .http
            .get(url)
            .timeout(Duration::from_secs(timeout_secs))
            .send()
            .await
            .map_err(classify)?
            .error_for_status()
            .map_err(classify)?;

        let bytes = response.bytes().await.map_err(classify)?;
        Ok(match String::from_utf8(bytes.to_vec()) {
            Ok(body) => body,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        })
    }
}
