//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod estat;

pub use estat::{
    DataCatalogTool, EStatClient, MetaInfoTool, RefDatasetTool, SearchTablesTool,
    SpecificDataTool,
};
