//! Resource definitions module.
//!
//! Each resource is defined in its own file with:
//! - URI and metadata
//! - Content provider
//!
//! ## Adding a New Resource
//!
//! 1. Create a new file (e.g., `my_resource.rs`)
//! 2. Implement the `ResourceDefinition` trait
//! 3. Export it here
//! 4. Register in `registry.rs`

mod api_reference;
mod server_info;

pub use api_reference::ApiReferenceResource;
pub use server_info::ServerInfoResource;

use rmcp::model::ResourceContents;

use super::service::ResourceContent;
use crate::core::config::Config;

/// Trait for resource definitions.
pub trait ResourceDefinition {
    /// The unique URI of the resource.
    const URI: &'static str;

    /// The display name of the resource.
    const NAME: &'static str;

    /// A description of the resource.
    const DESCRIPTION: &'static str;

    /// The MIME type of the resource content.
    const MIME_TYPE: &'static str;

    /// Get the content for this resource.
    fn content() -> ResourceContent;
}

/// Trait for resources whose content is computed at read time.
pub trait DynamicResourceProvider {
    /// Resolve the dynamic content.
    fn resolve(uri: &str, config: &Config) -> Result<ResourceContents, String>;
}
