//! Tool Router - builds the rmcp ToolRouter.
//!
//! Each tool knows how to create its own route; this module only wires them
//! to a shared e-Stat client.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use crate::core::config::Config;

use super::definitions::{
    DataCatalogTool, EStatClient, MetaInfoTool, RefDatasetTool, SearchTablesTool,
    SpecificDataTool,
};

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(config: Arc<Config>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    let client = EStatClient::from_config(&config.estat);

    ToolRouter::new()
        .with_route(SearchTablesTool::create_route(client.clone()))
        .with_route(MetaInfoTool::create_route(client.clone()))
        .with_route(SpecificDataTool::create_route(client.clone()))
        .with_route(RefDatasetTool::create_route(client.clone()))
        .with_route(DataCatalogTool::create_route(client))
}

#[cfg(test)]
mod tests {
    use super::super::registry::ToolRegistry;
    use super::*;

    struct TestServer {}

    fn test_config() -> Arc<Config> {
        Arc::new(Config::default())
    }

    #[test]
    fn test_build_router() {
        let router: ToolRouter<TestServer> = build_tool_router(test_config());
        let tools = router.list_all();
        assert_eq!(tools.len(), 5);

        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert!(names.contains(&"search_e_stat_tables"));
        assert!(names.contains(&"get_e_stat_meta_info"));
        assert!(names.contains(&"get_specific_e_stat_data"));
        assert!(names.contains(&"get_e_stat_ref_dataset"));
        assert!(names.contains(&"get_e_stat_data_catalog"));
    }

    #[test]
    fn test_registry_matches_router() {
        let config = test_config();
        let registry = ToolRegistry::new(EStatClient::from_config(&config.estat));
        let registry_names = registry.tool_names();

        let router: ToolRouter<TestServer> = build_tool_router(config);
        let router_tools = router.list_all();
        let router_names: Vec<_> = router_tools.iter().map(|t| t.name.as_ref()).collect();

        assert_eq!(registry_names.len(), router_names.len());
        for name in registry_names {
            assert!(router_names.contains(&name));
        }
    }
}
