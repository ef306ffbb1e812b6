//! detailed_help tool handler to provide structured help for tools

use crate::error::{PromptArchitectError, Result};
use crate::server::PromptArchitectServer;
use rmcp::model::{CallToolRequestParam, CallToolResult};
use serde_json::{Map, Value, json};

/// Build the help payload; no `tool` lists every tool in compact form.
pub fn help_for(args: Option<&Map<String, Value>>) -> Result<Value> {
    let tool = args.and_then(|a| a.get("tool")).and_then(|v| v.as_str());
    let format = args
        .and_then(|a| a.get("format"))
        .and_then(|v| v.as_str())
        .unwrap_or("full");

    let Some(tool) = tool else {
        let tools: Vec<Value> = crate::schemas::TOOL_NAMES
            .iter()
            .filter_map(|name| tool_help(name))
            .map(|h| compact(&h))
            .collect();
        return Ok(json!({ "tools": tools }));
    };

    let help = tool_help(tool).ok_or_else(|| {
        PromptArchitectError::invalid_input(format!("Unknown tool: {}", tool))
    })?;

    Ok(if format == "compact" { compact(&help) } else { help })
}

fn compact(help: &Value) -> Value {
    json!({
        "tool": help.get("name").cloned().unwrap_or(json!("")),
        "summary": help.get("description").cloned().unwrap_or(json!("")),
        "arguments": help.get("arguments").cloned().unwrap_or(json!({}))
    })
}

fn tool_help(tool: &str) -> Option<Value> {
    let help = match tool {
        "architect_prompt" => json!({
            "name": "architect_prompt",
            "description": "Classify a request (task type, complexity, keywords, audience), match a domain template, select 2-4 prompting techniques and assemble an instruction framework scored for quality.",
            "arguments": {
                "request": "string (required) - the raw request",
                "context": "string|null - optional caller context such as audience or stack"
            },
            "returns": {
                "facts": "object - task_type, complexity, keywords, implicit_context, target_audience, sophistication_score, main_objective",
                "domain": "string|null - matched domain template",
                "techniques": "array - {technique, reason, implementation}",
                "framework": "object - cognitive_analysis, directives, structural_requirements, thinking_steps, original_request, generation_directive",
                "justifications": "array - {technique, name, reason, improvement}",
                "quality": "object - {overall, breakdown, confidence}",
                "validation_issues": "string[] - empty when the framework is well formed"
            },
            "examples": [{
                "request": {"name": "architect_prompt", "arguments": {"request": "Create a REST API for user authentication with JWT"}},
                "response": {"facts": {"task_type": "code", "complexity": "expert"}, "domain": "web api development"}
            }]
        }),
        "detailed_help" => json!({
            "name": "detailed_help",
            "description": "Get detailed help for a specific tool, or a compact list of all tools when 'tool' is omitted.",
            "arguments": {
                "tool": "string - 'architect_prompt'|'detailed_help'",
                "format": "string - 'compact'|'full' (default: 'full')"
            },
            "returns": {"name": "string", "description": "string", "arguments": "object"}
        }),
        _ => return None,
    };
    Some(help)
}

impl PromptArchitectServer {
    /// Handle the detailed_help tool call
    pub async fn handle_detailed_help(
        &self,
        request: CallToolRequestParam,
    ) -> Result<CallToolResult> {
        let output = help_for(request.arguments.as_ref())?;
        Ok(CallToolResult::structured(output))
    }
}
