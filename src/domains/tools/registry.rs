//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - The list of available tool names and their metadata
//! - Dispatch of a tool call by name, outside the rmcp router

use rmcp::model::{CallToolResult, JsonObject, Tool};
use tracing::warn;

use super::ToolError;
use super::definitions::{
    DataCatalogTool, EStatClient, MetaInfoTool, RefDatasetTool, SearchTablesTool,
    SpecificDataTool,
};

/// Tool registry - manages all available tools.
pub struct ToolRegistry {
    client: EStatClient,
}

impl ToolRegistry {
    /// Create a new tool registry backed by the given e-Stat client.
    pub fn new(client: EStatClient) -> Self {
        Self { client }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![
            SearchTablesTool::NAME,
            MetaInfoTool::NAME,
            SpecificDataTool::NAME,
            RefDatasetTool::NAME,
            DataCatalogTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            SearchTablesTool::to_tool(),
            MetaInfoTool::to_tool(),
            SpecificDataTool::to_tool(),
            RefDatasetTool::to_tool(),
            DataCatalogTool::to_tool(),
        ]
    }

    /// Dispatch a tool call by name.
    ///
    /// `arguments` must be a JSON object or null.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<CallToolResult, ToolError> {
        let arguments: JsonObject = match arguments {
            serde_json::Value::Object(map) => map,
            serde_json::Value::Null => JsonObject::new(),
            other => {
                return Err(ToolError::invalid_arguments(format!(
                    "arguments must be an object, got {}",
                    other
                )));
            }
        };

        match name {
            SearchTablesTool::NAME => SearchTablesTool::call(arguments, &self.client).await,
            MetaInfoTool::NAME => MetaInfoTool::call(arguments, &self.client).await,
            SpecificDataTool::NAME => SpecificDataTool::call(arguments, &self.client).await,
            RefDatasetTool::NAME => RefDatasetTool::call(arguments, &self.client).await,
            DataCatalogTool::NAME => DataCatalogTool::call(arguments, &self.client).await,
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(ToolError::not_found(name))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::EStatConfig;

    fn test_registry() -> ToolRegistry {
        ToolRegistry::new(EStatClient::from_config(&EStatConfig::default()))
    }

    #[test]
    fn test_registry_tool_names() {
        let names = test_registry().tool_names();
        assert_eq!(names.len(), 5);
        assert!(names.contains(&"search_e_stat_tables"));
        assert!(names.contains(&"get_specific_e_stat_data"));
    }

    #[test]
    fn test_all_tools_metadata() {
        let tools = ToolRegistry::get_all_tools();
        assert_eq!(tools.len(), 5);
        assert!(tools.iter().all(|t| t.description.is_some()));
    }

    #[tokio::test]
    async fn test_registry_call_unknown() {
        let result = test_registry()
            .call_tool("unknown", serde_json::json!({}))
            .await;
        assert!(matches!(result, Err(ToolError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_registry_rejects_non_object_arguments() {
        let result = test_registry()
            .call_tool(MetaInfoTool::NAME, serde_json::json!(["0000010201"]))
            .await;
        assert!(matches!(result, Err(ToolError::InvalidArguments(_))));
    }
}
