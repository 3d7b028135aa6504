//! Common utilities shared across the e-Stat tools.
//!
//! Paging defaults, the shared search parameter shape, argument parsing and
//! the mapping from fetch outcomes to MCP tool results.

use rmcp::model::{CallToolResult, Content, JsonObject};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::warn;

use super::client::FetchError;
use crate::domains::tools::ToolError;

/// Default 1-based offset of the first returned row.
pub const DEFAULT_START_POSITION: i64 = 1;

/// Default number of rows per page.
pub const DEFAULT_LIMIT: i64 = 100;

pub fn default_start_position() -> i64 {
    DEFAULT_START_POSITION
}

pub fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

/// Parameters shared by the table search and data catalog tools.
///
/// Values are forwarded verbatim; e-Stat validates them.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct StatsSearchParams {
    /// Search keyword(s).
    #[schemars(
        description = "Search keyword. Combine words with AND, OR or NOT, e.g. \"東京 AND 人口\" or \"東京 OR 大阪\""
    )]
    pub search_word: String,

    /// Survey period: `yyyy`, `yyyymm` or `yyyymm-yyyymm`.
    #[serde(rename = "surveyYears")]
    #[schemars(
        description = "Survey period in one of: yyyy (year), yyyymm (month), yyyymm-yyyymm (month range). Example: \"2023\", \"202301\", \"202301-202312\""
    )]
    pub survey_years: String,

    /// 1-based offset of the first result.
    #[serde(rename = "startPosition", default = "default_start_position")]
    #[schemars(
        description = "1-based position of the first result (default: 1). Use 101 to get results 101-200 with limit 100"
    )]
    pub start_position: i64,

    /// Maximum number of results.
    #[serde(default = "default_limit")]
    #[schemars(description = "Maximum number of results to retrieve (default: 100)")]
    pub limit: i64,
}

impl StatsSearchParams {
    /// Borrow as wire-level query parameters.
    pub fn query(&self) -> SearchQuery<'_> {
        SearchQuery {
            search_word: &self.search_word,
            survey_years: &self.survey_years,
            limit: self.limit,
            start_position: self.start_position,
        }
    }
}

/// Wire form of [`StatsSearchParams`].
#[derive(Debug, Serialize)]
pub struct SearchQuery<'a> {
    #[serde(rename = "searchWord")]
    search_word: &'a str,
    #[serde(rename = "surveyYears")]
    survey_years: &'a str,
    limit: i64,
    #[serde(rename = "startPosition")]
    start_position: i64,
}

/// Deserialize tool arguments into a parameter struct.
pub fn parse_arguments<P: DeserializeOwned>(arguments: JsonObject) -> Result<P, ToolError> {
    serde_json::from_value(serde_json::Value::Object(arguments))
        .map_err(|e| ToolError::invalid_arguments(e.to_string()))
}

/// Convert a fetch outcome into a tool result.
///
/// The body is returned untouched; a failure becomes an error result whose
/// text is the JSON error payload.
pub fn fetch_result(outcome: Result<String, FetchError>) -> CallToolResult {
    match outcome {
        Ok(body) => CallToolResult::success(vec![Content::text(body)]),
        Err(e) => {
            warn!("Returning {} payload to client", e.status_kind());
            CallToolResult::error(vec![Content::text(e.to_payload())])
        }
    }
}

/// Extract the text of the first content item of a tool result.
#[cfg(test)]
pub fn result_text(result: &CallToolResult) -> &str {
    match &result.content[0].raw {
        rmcp::model::RawContent::Text(text) => &text.text,
        _ => panic!("Expected text content"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_params_defaults() {
        let json = serde_json::json!({"search_word": "人口", "surveyYears": "2023"});
        let params: StatsSearchParams =
            parse_arguments(json.as_object().unwrap().clone()).unwrap();
        assert_eq!(params.start_position, 1);
        assert_eq!(params.limit, 100);
    }

    #[test]
    fn test_search_params_missing_survey_years() {
        let json = serde_json::json!({"search_word": "人口"});
        let result: Result<StatsSearchParams, _> =
            parse_arguments(json.as_object().unwrap().clone());
        assert!(matches!(result, Err(ToolError::InvalidArguments(_))));
    }

    #[test]
    fn test_search_params_are_not_validated() {
        let json = serde_json::json!({
            "search_word": "人口",
            "surveyYears": "last year",
            "startPosition": -5,
            "limit": 0
        });
        let params: StatsSearchParams =
            parse_arguments(json.as_object().unwrap().clone()).unwrap();
        assert_eq!(params.survey_years, "last year");
        assert_eq!(params.start_position, -5);
        assert_eq!(params.limit, 0);
    }

    #[test]
    fn test_fetch_result_success_is_verbatim() {
        let result = fetch_result(Ok("  <xml/>\n".to_string()));
        assert!(!result.is_error.unwrap_or(false));
        assert_eq!(result_text(&result), "  <xml/>\n");
    }

    #[test]
    fn test_fetch_result_failure_carries_payload() {
        let result = fetch_result(Err(FetchError::Http { status_code: 500 }));
        assert!(result.is_error.unwrap_or(false));

        let payload: serde_json::Value = serde_json::from_str(result_text(&result)).unwrap();
        assert_eq!(payload["status"], "http_error");
        assert_eq!(payload["status_code"], 500);
    }
}
