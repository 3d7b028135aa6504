//! Domain logic of the e-Stat server.
//!
//! - `tools`: the e-Stat operations exposed as MCP tools
//! - `resources`: readable documents about the server and the API
//! - `prompts`: prompt templates that drive the tools

pub mod prompts;
pub mod resources;
pub mod tools;
