//! Meta information tool (メタ情報取得).
//!
//! Fetches the table items, classifications and area codes of one
//! statistics table via `getMetaInfo`.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::client::EStatClient;
use super::common::{fetch_result, parse_arguments};
use crate::domains::tools::ToolError;

/// Parameters for meta information retrieval.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct MetaInfoParams {
    /// Statistics table ID (統計表ID).
    #[schemars(description = "The ID of the statistics table (統計表ID). Example: \"0000010201\"")]
    pub stats_data_id: String,
}

#[derive(Serialize)]
struct MetaInfoQuery<'a> {
    #[serde(rename = "statsDataId")]
    stats_data_id: &'a str,
}

/// e-Stat meta information tool.
pub struct MetaInfoTool;

impl MetaInfoTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_e_stat_meta_info";

    /// e-Stat endpoint this tool calls.
    pub const ENDPOINT: &'static str = "getMetaInfo";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Retrieves meta information from the e-Stat API (メタ情報取得). \
        Returns the table items, classification items and area items of the statistics table identified by stats_data_id. \
        Use it after search_e_stat_tables to learn the codes a table uses. Returns the raw e-Stat response.";

    /// Fetch the meta information for one table.
    #[instrument(skip_all, fields(stats_data_id = %params.stats_data_id))]
    pub async fn execute(params: &MetaInfoParams, client: &EStatClient) -> CallToolResult {
        info!("Fetching meta information");

        let query = MetaInfoQuery {
            stats_data_id: &params.stats_data_id,
        };
        fetch_result(client.get(Self::ENDPOINT, &query).await)
    }

    /// Parse raw arguments and execute.
    pub async fn call(
        arguments: JsonObject,
        client: &EStatClient,
    ) -> Result<CallToolResult, ToolError> {
        let params: MetaInfoParams = parse_arguments(arguments)?;
        Ok(Self::execute(&params, client).await)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<MetaInfoParams>(),
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

    #[tokio::test]
    async fn test_meta_info_request() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/getMetaInfo")
                    .query_param("appId", "my-app-id")
                    .query_param("statsDataId", "0000010201");
                then.status(200).body("<GET_META_INFO/>");
            })
            .await;

        let client = EStatClient::from_config(&EStatConfig {
            base_url: server.base_url(),
            ..EStatConfig::with_app_id("my-app-id")
        });
        let params = MetaInfoParams {
            stats_data_id: "0000010201".to_string(),
        };
        let result = MetaInfoTool::execute(&params, &client).await;

        mock.assert_async().await;
        assert_eq!(result_text(&result), "<GET_META_INFO/>");
    }

    #[tokio::test]
    async fn test_meta_info_requires_table_id() {
        let client = EStatClient::from_config(&EStatConfig::default());
        let result = MetaInfoTool::call(JsonObject::new(), &client).await;
        assert!(matches!(result, Err(ToolError::InvalidArguments(_))));
    }
}
