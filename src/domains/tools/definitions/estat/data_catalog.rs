//! Data catalog tool (データカタログ情報取得).
//!
//! Searches the statistics table files and statistics databases on e-Stat
//! via `getDataCatalog`. Takes the same parameters as the table search.

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

/// Parameters for data catalog search.
pub type DataCatalogParams = StatsSearchParams;

/// e-Stat data catalog tool.
pub struct DataCatalogTool;

impl DataCatalogTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_e_stat_data_catalog";

    /// e-Stat endpoint this tool calls.
    pub const ENDPOINT: &'static str = "getDataCatalog";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Retrieves the data catalog from the e-Stat API (データカタログ情報取得). \
        Searches the statistics table files (Excel, CSV, PDF) and statistics databases provided on e-Stat. \
        search_word accepts AND / OR / NOT between words (e.g. \"東京 AND 人口\"). \
        surveyYears must be yyyy, yyyymm or yyyymm-yyyymm (e.g. \"2023\", \"202301-202312\"). \
        Page with startPosition (1-based) and limit. Returns the raw e-Stat response.";

    /// Execute the catalog search.
    #[instrument(skip_all, fields(search_word = %params.search_word, survey_years = %params.survey_years))]
    pub async fn execute(params: &DataCatalogParams, client: &EStatClient) -> CallToolResult {
        info!("Searching data catalog");
        fetch_result(client.get(Self::ENDPOINT, &params.query()).await)
    }

    /// Parse raw arguments and execute.
    pub async fn call(
        arguments: JsonObject,
        client: &EStatClient,
    ) -> Result<CallToolResult, ToolError> {
        let params: DataCatalogParams = parse_arguments(arguments)?;
        Ok(Self::execute(&params, client).await)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<DataCatalogParams>(),
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
