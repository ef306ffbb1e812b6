//! architect_prompt tool handler: runs the classification and assembly pipeline

use crate::cognitive::{ArchitectRequest, ArchitectResponse, PromptArchitect};
use crate::error::Result;
use crate::server::PromptArchitectServer;
use rmcp::model::{CallToolRequestParam, CallToolResult};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Parse arguments and run the pipeline off the async executor.
pub async fn run_architect(
    architect: Arc<PromptArchitect>,
    arguments: Option<&Map<String, Value>>,
) -> Result<ArchitectResponse> {
    let req = ArchitectRequest::from_arguments(arguments)?;
    tokio::task::spawn_blocking(move || architect.architect(&req)).await?
}

impl PromptArchitectServer {
    /// Handle the architect_prompt tool call
    pub async fn handle_architect_prompt(
        &self,
        request: CallToolRequestParam,
    ) -> Result<CallToolResult> {
        let response =
            run_architect(self.architect.clone(), request.arguments.as_ref()).await?;

        tracing::info!(
            "architect_prompt: task_type={}, complexity={}, domain={:?}, techniques={}, overall={}",
            response.facts.task_type,
            response.facts.complexity,
            response.domain,
            response.techniques.len(),
            response.quality.overall()
        );

        Ok(CallToolResult::structured(serde_json::to_value(&response)?))
    }
}
