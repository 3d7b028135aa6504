//! Server info resource definition.

use super::{DynamicResourceProvider, ResourceDefinition};
use crate::core::config::Config;
use crate::domains::resources::service::{DynamicResourceType, ResourceContent};
use rmcp::model::ResourceContents;

/// Server information resource (dynamic).
///
/// Reports whether an application ID is configured, never the ID itself.
pub struct ServerInfoResource;

impl ResourceDefinition for ServerInfoResource {
    const URI: &'static str = "estat://server/info";
    const NAME: &'static str = "Server Information";
    const DESCRIPTION: &'static str =
        "Server version and the e-Stat connection settings in effect";
    const MIME_TYPE: &'static str = "application/json";

    fn content() -> ResourceContent {
        ResourceContent::Dynamic(DynamicResourceType::ServerInfo)
    }
}

impl DynamicResourceProvider for ServerInfoResource {
    fn resolve(uri: &str, config: &Config) -> Result<ResourceContents, String> {
        let info = serde_json::json!({
            "server": config.server.name,
            "version": config.server.version,
            "estat": {
                "base_url": config.estat.base_url,
                "timeout_secs": config.estat.timeout_secs,
                "app_id_configured": config.estat.has_app_id(),
                "forward_ref_dataset_id": config.estat.forward_ref_dataset_id,
            },
        });

        Ok(ResourceContents::text(
            serde_json::to_string_pretty(&info).map_err(|e| e.to_string())?,
            uri,
        ))
    }
}
