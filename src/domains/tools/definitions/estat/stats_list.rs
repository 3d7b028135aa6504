//! Statistics table search tool (統計表情報取得).
//!
//! Searches the statistics tables published on e-Stat via `getStatsList`.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, JsonObject, Tool},
};
use tracing::{info, instrument};

use super::client::EStatClient;
use super::common::{StatsSearchParams, fetch_result, parse_arguments};
use crate::domains::tools::ToolError;

/// Parameters for table search.
pub type SearchTablesParams = StatsSearchParams;

/// e-Stat statistics table search tool.
pub struct SearchTablesTool;

impl SearchTablesTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "search_e_stat_tables";

    /// e-Stat endpoint this tool calls.
    pub const ENDPOINT: &'static str = "getStatsList";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Retrieves a list of statistics tables from the e-Stat API (統計表情報取得). \
        Searches the statistics tables published on the Portal Site of Official Statistics of Japan by keyword and survey period. \
        search_word accepts AND / OR / NOT between words (e.g. \"東京 AND 人口\"). \
        surveyYears must be yyyy, yyyymm or yyyymm-yyyymm (e.g. \"2023\", \"202301-202312\"). \
        Page with startPosition (1-based) and limit. Returns the raw e-Stat response.";

    /// Execute the search.
    #[instrument(skip_all, fields(search_word = %params.search_word, survey_years = %params.survey_years))]
    pub async fn execute(params: &SearchTablesParams, client: &EStatClient) -> CallToolResult {
        info!("Searching statistics tables");

        fetch_result(client.get(Self::ENDPOINT, &params.query()).await)
    }

    /// Parse raw arguments and execute.
    pub async fn call(
        arguments: JsonObject,
        client: &EStatClient,
    ) -> Result<CallToolResult, ToolError> {
        let params: SearchTablesParams = parse_arguments(arguments)?;
        Ok(Self::execute(&params, client).await)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<SearchTablesParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for the rmcp router.
    pub fn create_route<S>(client: EStatClient) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let client = client.clone();
            async move { Self::call(args, &client).await.map_err(McpError::from) }.boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::EStatConfig;
    use crate::domains::tools::definitions::estat::common::result_text;
    use httpmock::prelude::*;

    fn client_for(server: &MockServer) -> EStatClient {
        EStatClient::from_config(&EStatConfig {
            base_url: server.base_url(),
            ..EStatConfig::with_app_id("my-app-id")
        })
    }

    #[tokio::test]
    async fn test_search_forwards_all_parameters() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/getStatsList")
                    .query_param("appId", "my-app-id")
                    .query_param("searchWord", "東京 AND 人口")
                    .query_param("surveyYears", "2023")
                    .query_param("startPosition", "1")
                    .query_param("limit", "100");
                then.status(200).body("<GET_STATS_LIST/>");
            })
            .await;

        let args = serde_json::json!({
            "search_word": "東京 AND 人口",
            "surveyYears": "2023",
            "startPosition": 1,
            "limit": 100
        });
        let client = client_for(&server);
        let result = SearchTablesTool::call(args.as_object().unwrap().clone(), &client)
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(!result.is_error.unwrap_or(false));
        assert_eq!(result_text(&result), "<GET_STATS_LIST/>");
    }

    #[tokio::test]
    async fn test_search_forwards_malformed_values_verbatim() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/getStatsList")
                    .query_param("surveyYears", "2023年")
                    .query_param("startPosition", "0")
                    .query_param("limit", "-1");
                then.status(400);
            })
            .await;

        let params = SearchTablesParams {
            search_word: "人口".to_string(),
            survey_years: "2023年".to_string(),
            start_position: 0,
            limit: -1,
        };
        let result = SearchTablesTool::execute(&params, &client_for(&server)).await;

        mock.assert_async().await;
        assert!(result.is_error.unwrap_or(false));
        assert!(result_text(&result).contains("\"status_code\":400"));
    }

    #[test]
    fn test_tool_metadata() {
        let tool = SearchTablesTool::to_tool();
        assert_eq!(tool.name, "search_e_stat_tables");
        let schema = serde_json::to_string(tool.input_schema.as_ref()).unwrap();
        assert!(schema.contains("surveyYears"));
        assert!(schema.contains("startPosition"));
    }
}
