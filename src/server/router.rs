use crate::server::PromptArchitectServer;
use rmcp::{
    ErrorData as McpError,
    handler::server::ServerHandler,
    model::{
        CallToolRequestParam, CallToolResult, Implementation, InitializeRequestParam,
        InitializeResult, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo, Tool, ToolsCapability,
    },
    service::{RequestContext, RoleServer},
};
use tracing::info;

/// Tool descriptors advertised by `tools/list`.
pub fn tool_list() -> Vec<Tool> {
    vec![
        Tool {
            name: "architect_prompt".into(),
            title: Some("Architect Prompt".into()),
            description: Some(
                "Classify a request and assemble a structured instruction framework with a quality score"
                    .into(),
            ),
            input_schema: crate::schemas::architect_prompt_schema(),
            icons: None,
            annotations: None,
            output_schema: Some(crate::schemas::architect_prompt_output_schema()),
            meta: None,
        },
        Tool {
            name: "detailed_help".into(),
            title: Some("Detailed Help".into()),
            description: Some("Get detailed help for a specific tool".into()),
            input_schema: crate::schemas::detailed_help_schema(),
            icons: None,
            annotations: None,
            output_schema: Some(crate::schemas::detailed_help_output_schema()),
            meta: None,
        },
    ]
}

impl ServerHandler for PromptArchitectServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
                ..Default::default()
            },
            server_info: Implementation {
                name: "prompt-architect".to_string(),
                title: Some("Prompt Architect".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                website_url: None,
                icons: None,
            },
            ..Default::default()
        }
    }

    async fn initialize(
        &self,
        request: InitializeRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<InitializeResult, McpError> {
        let mut info = self.get_info();
        info.protocol_version = request.protocol_version.clone();
        Ok(info)
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        info!("tools/list requested");
        Ok(ListToolsResult {
            tools: tool_list(),
            ..Default::default()
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        match request.name.as_ref() {
            "architect_prompt" => self
                .handle_architect_prompt(request)
                .await
                .map_err(|e| e.into()),
            "detailed_help" => self
                .handle_detailed_help(request)
                .await
                .map_err(|e| e.into()),
            _ => Err(McpError {
                code: rmcp::model::ErrorCode::METHOD_NOT_FOUND,
                message: format!("Unknown tool: {}", request.name).into(),
                data: None,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_named_tool() {
        let names: Vec<String> = tool_list().iter().map(|t| t.name.to_string()).collect();
        assert_eq!(names, crate::schemas::TOOL_NAMES);
    }
}
