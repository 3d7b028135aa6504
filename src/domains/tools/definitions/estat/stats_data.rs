//! Statistics data tool (統計データ取得).
//!
//! Fetches the numeric data of one statistics table or one registered
//! dataset via `getSimpleStatsData`. Exactly one of the two identifiers must
//! be given; anything else is rejected before a request is built.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use super::client::EStatClient;
use super::common::{default_limit, default_start_position, fetch_result, parse_arguments};
use crate::domains::tools::ToolError;

/// Parameters for statistics data retrieval.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SpecificDataParams {
    /// Dataset ID (データセットID). Mutually exclusive with `stats_data_id`.
    #[serde(default)]
    #[schemars(
        description = "The ID of a registered dataset (データセットID). Provide either this or stats_data_id, not both"
    )]
    pub data_set_id: Option<String>,

    /// Statistics table ID (統計表ID). Mutually exclusive with `data_set_id`.
    #[serde(default)]
    #[schemars(
        description = "The ID of the statistics table (統計表ID). Provide either this or data_set_id, not both"
    )]
    pub stats_data_id: Option<String>,

    /// 1-based offset of the first row.
    #[serde(rename = "startPosition", default = "default_start_position")]
    #[schemars(
        description = "1-based position of the first row (default: 1). Use 101 to get rows 101-200 with limit 100"
    )]
    pub start_position: i64,

    /// Maximum number of rows.
    #[serde(default = "default_limit")]
    #[schemars(description = "Maximum number of rows to retrieve (default: 100)")]
    pub limit: i64,
}

/// The entity a data request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataTarget<'a> {
    /// A registered dataset, sent as `dataSetId`.
    Dataset(&'a str),
    /// A statistics table, sent as `statsDataId`.
    Table(&'a str),
}

impl SpecificDataParams {
    /// Resolve which identifier to send. An empty string counts as absent.
    pub fn target(&self) -> Result<DataTarget<'_>, ToolError> {
        let data_set_id = self.data_set_id.as_deref().filter(|id| !id.is_empty());
        let stats_data_id = self.stats_data_id.as_deref().filter(|id| !id.is_empty());

        match (data_set_id, stats_data_id) {
            (Some(id), None) => Ok(DataTarget::Dataset(id)),
            (None, Some(id)) => Ok(DataTarget::Table(id)),
            (None, None) => Err(ToolError::invalid_arguments(
                "Either 'data_set_id' or 'stats_data_id' must be provided.",
            )),
            (Some(_), Some(_)) => Err(ToolError::invalid_arguments(
                "Only one of 'data_set_id' or 'stats_data_id' should be provided.",
            )),
        }
    }
}

#[derive(Serialize)]
struct SpecificDataQuery<'a> {
    #[serde(rename = "dataSetId", skip_serializing_if = "Option::is_none")]
    data_set_id: Option<&'a str>,
    #[serde(rename = "statsDataId", skip_serializing_if = "Option::is_none")]
    stats_data_id: Option<&'a str>,
    limit: i64,
    #[serde(rename = "startPosition")]
    start_position: i64,
}

impl<'a> SpecificDataQuery<'a> {
    fn new(target: DataTarget<'a>, params: &SpecificDataParams) -> Self {
        let (data_set_id, stats_data_id) = match target {
            DataTarget::Dataset(id) => (Some(id), None),
            DataTarget::Table(id) => (None, Some(id)),
        };
        Self {
            data_set_id,
            stats_data_id,
            limit: params.limit,
            start_position: params.start_position,
        }
    }
}

/// e-Stat statistics data tool.
pub struct SpecificDataTool;

impl SpecificDataTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_specific_e_stat_data";

    /// e-Stat endpoint this tool calls.
    pub const ENDPOINT: &'static str = "getSimpleStatsData";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Retrieves specific statistics data from the e-Stat API (統計データ取得). \
        Returns the numeric data of the statistics table (stats_data_id) or registered dataset (data_set_id) given. \
        Exactly one of data_set_id and stats_data_id must be provided. \
        Page with startPosition (1-based) and limit. Returns the raw e-Stat response.";

    /// Validate the identifiers, then fetch the data.
    ///
    /// Returns `ToolError::InvalidArguments` without touching the network when
    /// neither or both identifiers are supplied.
    #[instrument(skip_all)]
    pub async fn execute(
        params: &SpecificDataParams,
        client: &EStatClient,
    ) -> Result<CallToolResult, ToolError> {
        let target = params.target().inspect_err(|e| {
            warn!("Rejected statistics data request: {}", e);
        })?;
        info!(?target, "Fetching statistics data");

        let query = SpecificDataQuery::new(target, params);
        Ok(fetch_result(client.get(Self::ENDPOINT, &query).await))
    }

    /// Parse raw arguments and execute.
    pub async fn call(
        arguments: JsonObject,
        client: &EStatClient,
    ) -> Result<CallToolResult, ToolError> {
        let params: SpecificDataParams = parse_arguments(arguments)?;
        Self::execute(&params, client).await
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<SpecificDataParams>(),
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

    fn params(data_set_id: Option<&str>, stats_data_id: Option<&str>) -> SpecificDataParams {
        SpecificDataParams {
            data_set_id: data_set_id.map(String::from),
            stats_data_id: stats_data_id.map(String::from),
            start_position: 1,
            limit: 100,
        }
    }

    fn client_for(server: &MockServer) -> EStatClient {
        EStatClient::from_config(&EStatConfig {
            base_url: server.base_url(),
            ..EStatConfig::with_app_id("my-app-id")
        })
    }

    #[test]
    fn test_target_resolution() {
        assert_eq!(
            params(Some("X"), None).target().unwrap(),
            DataTarget::Dataset("X")
        );
        assert_eq!(
            params(None, Some("Y")).target().unwrap(),
            DataTarget::Table("Y")
        );
        assert_eq!(
            params(Some(""), Some("Y")).target().unwrap(),
            DataTarget::Table("Y")
        );
        assert!(params(None, None).target().is_err());
        assert!(params(Some(""), Some("")).target().is_err());
        assert!(params(Some("X"), Some("Y")).target().is_err());
    }

    #[tokio::test]
    async fn test_neither_identifier_makes_no_request() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.any_request();
                then.status(200);
            })
            .await;

        let result = SpecificDataTool::execute(&params(None, None), &client_for(&server)).await;

        assert!(matches!(result, Err(ToolError::InvalidArguments(_))));
        assert_eq!(mock.hits_async().await, 0);
    }

    #[tokio::test]
    async fn test_both_identifiers_make_no_request() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.any_request();
                then.status(200);
            })
            .await;

        let result =
            SpecificDataTool::execute(&params(Some("X"), Some("Y")), &client_for(&server)).await;

        assert!(matches!(result, Err(ToolError::InvalidArguments(_))));
        assert_eq!(mock.hits_async().await, 0);
    }

    #[tokio::test]
    async fn test_table_id_only_is_forwarded() {
        let server = MockServer::start_async().await;
        // Registered first so a stray dataSetId would be caught here.
        let stray = server
            .mock_async(|when, then| {
                when.query_param_exists("dataSetId");
                then.status(500);
            })
            .await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/getSimpleStatsData")
                    .query_param("appId", "my-app-id")
                    .query_param("statsDataId", "0003411595")
                    .query_param("startPosition", "101")
                    .query_param("limit", "50");
                then.status(200).body("<GET_STATS_DATA/>");
            })
            .await;

        let request = SpecificDataParams {
            start_position: 101,
            limit: 50,
            ..params(None, Some("0003411595"))
        };
        let result = SpecificDataTool::execute(&request, &client_for(&server))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(stray.hits_async().await, 0);
        assert_eq!(result_text(&result), "<GET_STATS_DATA/>");
    }

    #[tokio::test]
    async fn test_dataset_id_only_is_forwarded() {
        let server = MockServer::start_async().await;
        let stray = server
            .mock_async(|when, then| {
                when.query_param_exists("statsDataId");
                then.status(500);
            })
            .await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/getSimpleStatsData")
                    .query_param("dataSetId", "X");
                then.status(200).body("<GET_STATS_DATA/>");
            })
            .await;

        let client = client_for(&server);
        let args = serde_json::json!({"data_set_id": "X"});
        let result = SpecificDataTool::call(args.as_object().unwrap().clone(), &client)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(stray.hits_async().await, 0);
        assert!(!result.is_error.unwrap_or(false));
    }
}
