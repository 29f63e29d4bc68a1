//! Tool registration and dispatch.

use std::sync::Arc;

use serde_json::Value;

use jobspy_client::ScrapeEngine;

use crate::types::{McpError, McpResult, ToolCallResult, ToolDefinition};

use super::jobspy_scraper;

pub struct ToolRegistry;

impl ToolRegistry {
    pub fn list_tools() -> Vec<ToolDefinition> {
        vec![jobspy_scraper::definition()]
    }

    pub async fn call(
        name: &str,
        arguments: Option<Value>,
        engine: &Arc<dyn ScrapeEngine>,
    ) -> McpResult<ToolCallResult> {
        let args = arguments.unwrap_or(Value::Object(serde_json::Map::new()));

        match name {
            "jobspy_scraper" => jobspy_scraper::execute(args, engine).await,
            _ => Err(McpError::ToolNotFound(name.to_string())),
        }
    }
}
