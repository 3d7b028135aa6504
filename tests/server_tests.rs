//! End-to-end tests through `McpServer::call_tool` against a mock e-Stat.

use std::collections::HashMap;
use std::sync::Arc;

use estat_mcp_server::core::{Config, EStatConfig, McpServer};
use estat_mcp_server::domains::prompts::PromptService;
use estat_mcp_server::domains::resources::ResourceService;
use estat_mcp_server::domains::tools::ToolError;
use httpmock::prelude::*;
use rmcp::model::{CallToolResult, RawContent, ResourceContents};
use serde_json::json;

fn config_for(base_url: String) -> Config {
    Config::with_estat(EStatConfig {
        base_url,
        ..EStatConfig::with_app_id("integration-app-id")
    })
}

fn text(result: &CallToolResult) -> &str {
    match &result.content[0].raw {
        RawContent::Text(text) => &text.text,
        _ => panic!("Expected text content"),
    }
}

#[tokio::test]
async fn search_returns_body_verbatim() {
    let server = MockServer::start_async().await;
    let body = r#"<?xml version="1.0" encoding="UTF-8"?><GET_STATS_LIST><RESULT><STATUS>0</STATUS></RESULT></GET_STATS_LIST>"#;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/getStatsList")
                .query_param("appId", "integration-app-id")
                .query_param("searchWord", "人口 AND 東京")
                .query_param("surveyYears", "2020")
                .query_param("startPosition", "1")
                .query_param("limit", "10");
            then.status(200).body(body);
        })
        .await;

    let mcp = McpServer::new(config_for(server.base_url()));
    let result = mcp
        .call_tool(
            "search_e_stat_tables",
            json!({"search_word": "人口 AND 東京", "surveyYears": "2020", "limit": 10}),
        )
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(!result.is_error.unwrap_or(false));
    assert_eq!(text(&result), body);
}

#[tokio::test]
async fn data_identifier_rules_are_checked_before_any_request() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.any_request();
            then.status(200);
        })
        .await;
    let mcp = McpServer::new(config_for(server.base_url()));

    for args in [
        json!({}),
        json!({"data_set_id": "", "stats_data_id": ""}),
        json!({"data_set_id": "X", "stats_data_id": "Y"}),
    ] {
        let result = mcp.call_tool("get_specific_e_stat_data", args).await;
        assert!(matches!(result, Err(ToolError::InvalidArguments(_))));
    }

    assert_eq!(mock.hits_async().await, 0);
}

#[tokio::test]
async fn http_failure_is_a_tool_result_not_a_fault() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/getMetaInfo");
            then.status(404);
        })
        .await;

    let mcp = McpServer::new(config_for(server.base_url()));
    let result = mcp
        .call_tool("get_e_stat_meta_info", json!({"stats_data_id": "0000010201"}))
        .await
        .unwrap();

    assert_eq!(mock.hits_async().await, 1);
    assert!(result.is_error.unwrap_or(false));
    let payload: serde_json::Value = serde_json::from_str(text(&result)).unwrap();
    assert_eq!(payload["status"], "http_error");
    assert_eq!(payload["status_code"], 404);
    assert!(payload["ERROR"].is_string());
}

#[tokio::test]
async fn connection_failure_is_reported() {
    let mcp = McpServer::new(config_for("http://127.0.0.1:1".to_string()));
    let result = mcp
        .call_tool("get_e_stat_ref_dataset", json!({"data_set_id": "0003411595"}))
        .await
        .unwrap();

    assert!(result.is_error.unwrap_or(false));
    let payload: serde_json::Value = serde_json::from_str(text(&result)).unwrap();
    assert_eq!(payload["status"], "connection_error");
    assert!(payload.get("status_code").is_none());
}

#[tokio::test]
async fn unknown_tool_is_rejected() {
    let mcp = McpServer::new(Config::default());
    let result = mcp.call_tool("get_weather", json!({})).await;
    assert!(matches!(result, Err(ToolError::NotFound(name)) if name == "get_weather"));
}

#[tokio::test]
async fn server_info_resource_hides_app_id() {
    let service = ResourceService::new(Arc::new(config_for("http://localhost:9".to_string())));
    let result = service.read_resource("estat://server/info").await.unwrap();

    let ResourceContents::TextResourceContents { text, .. } = &result.contents[0] else {
        panic!("Expected text contents");
    };
    assert!(text.contains("\"app_id_configured\": true"));
    assert!(!text.contains("integration-app-id"));
}

#[tokio::test]
async fn find_statistics_prompt_renders() {
    let args = HashMap::from([("topic".to_string(), "労働力".to_string())]);
    let result = PromptService::new()
        .get_prompt("find_statistics", Some(args))
        .await
        .unwrap();

    assert_eq!(result.messages.len(), 1);
}
