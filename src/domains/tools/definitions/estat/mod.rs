//! e-Stat tools module.
//!
//! Read-only tools over the e-Stat REST API (政府統計の総合窓口):
//! - `stats_list`: search statistics tables
//! - `meta_info`: table metadata
//! - `stats_data`: numeric data of a table or dataset
//! - `ref_dataset`: registered dataset conditions
//! - `data_catalog`: search table files and databases
//!
//! All of them share the request executor in `client`.

pub mod client;
pub mod common;
pub mod data_catalog;
pub mod meta_info;
pub mod ref_dataset;
pub mod stats_data;
pub mod stats_list;

pub use client::{EStatClient, EStatRequest, FetchError};
pub use data_catalog::{DataCatalogParams, DataCatalogTool};
pub use meta_info::{MetaInfoParams, MetaInfoTool};
pub use ref_dataset::{RefDatasetParams, RefDatasetTool};
pub use stats_data::{DataTarget, SpecificDataParams, SpecificDataTool};
pub use stats_list::{SearchTablesParams, SearchTablesTool};
