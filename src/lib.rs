//! e-Stat MCP Server Library
//!
//! A Model Context Protocol (MCP) server exposing read-only tools over the
//! e-Stat REST API, the portal for official Japanese government statistics.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the server handler and transports
//! - **domains**: business logic organized by bounded contexts
//!   - **tools**: the five e-Stat operations and their shared request executor
//!   - **resources**: server information and an API reference card
//!   - **prompts**: a guided statistics lookup
//!
//! # Example
//!
//! ```rust,no_run
//! use estat_mcp_server::{core::McpServer, core::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config);
//!     let result = server
//!         .call_tool(
//!             "search_e_stat_tables",
//!             serde_json::json!({"search_word": "人口", "surveyYears": "2020"}),
//!         )
//!         .await?;
//!     println!("{:?}", result.content);
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

pub use core::{Config, Error, McpServer, Result};
