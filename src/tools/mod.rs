//! Tool handlers for the prompt-architect MCP server

pub mod architect_prompt;
pub mod detailed_help;
