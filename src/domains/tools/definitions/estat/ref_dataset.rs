//! Dataset reference tool (データセット参照).
//!
//! Lists the filter conditions of registered datasets via `refDataset`.
//!
//! The tool accepts a dataset ID but, unless
//! `MCP_ESTAT_FORWARD_REF_DATASET_ID` is enabled, does not send it: every call
//! returns the full listing of datasets available to the application ID.
//! Filtering by ID is awaiting a product decision.

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
use super::common::{fetch_result, parse_arguments};
use crate::domains::tools::ToolError;

/// Parameters for dataset reference.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RefDatasetParams {
    /// Dataset ID (データセットID).
    #[schemars(description = "The ID of the dataset to retrieve (データセットID)")]
    pub data_set_id: String,
}

#[derive(Serialize)]
struct RefDatasetQuery<'a> {
    #[serde(rename = "dataSetId", skip_serializing_if = "Option::is_none")]
    data_set_id: Option<&'a str>,
}

/// e-Stat dataset reference tool.
pub struct RefDatasetTool;

impl RefDatasetTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_e_stat_ref_dataset";

    /// e-Stat endpoint this tool calls.
    pub const ENDPOINT: &'static str = "refDataset";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Retrieves the reference dataset from the e-Stat API (データセット参照). \
        Shows the filter conditions of registered datasets. \
        Without a dataset filter the response lists every dataset available to this application ID. \
        Returns the raw e-Stat response.";

    /// Fetch the dataset reference.
    #[instrument(skip_all, fields(data_set_id = %params.data_set_id))]
    pub async fn execute(params: &RefDatasetParams, client: &EStatClient) -> CallToolResult {
        let query = if client.forwards_ref_dataset_id() {
            info!("Fetching reference dataset");
            RefDatasetQuery {
                data_set_id: Some(&params.data_set_id),
            }
        } else {
            warn!(
                "Dataset ID '{}' is not forwarded to refDataset; returning the unfiltered listing",
                params.data_set_id
            );
            RefDatasetQuery { data_set_id: None }
        };

        fetch_result(client.get(Self::ENDPOINT, &query).await)
    }

    /// Parse raw arguments and execute.
    pub async fn call(
        arguments: JsonObject,
        client: &EStatClient,
    ) -> Result<CallToolResult, ToolError> {
        let params: RefDatasetParams = parse_arguments(arguments)?;
        Ok(Self::execute(&params, client).await)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<RefDatasetParams>(),
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
