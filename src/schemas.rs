use serde_json::{Map, Value, json};
use std::sync::Arc;

pub const TOOL_NAMES: [&str; 2] = ["architect_prompt", "detailed_help"];

pub fn architect_prompt_schema() -> Arc<Map<String, Value>> {
    let schema = json!({
        "type": "object",
        "properties": {
            "request": {"type": "string", "description": "The raw request to analyze"},
            "context": {"type": ["string", "null"], "description": "Optional caller context (audience, stack, constraints)"}
        },
        "required": ["request"]
    });
    Arc::new(schema.as_object().cloned().unwrap_or_else(Map::new))
}

pub fn architect_prompt_output_schema() -> Arc<Map<String, Value>> {
    let schema = json!({
        "type": "object",
        "properties": {
            "facts": {
                "type": "object",
                "properties": {
                    "task_type": {"type": "string"},
                    "complexity": {"type": "string"},
                    "keywords": {"type": "array", "items": {"type": "string"}},
                    "implicit_context": {"type": "array", "items": {"type": "string"}},
                    "target_audience": {"type": "string"},
                    "sophistication_score": {"type": "integer"},
                    "main_objective": {"type": "string"}
                }
            },
            "domain": {"type": ["string", "null"]},
            "techniques": {"type": "array", "items": {"type": "object"}},
            "framework": {
                "type": "object",
                "properties": {
                    "cognitive_analysis": {"type": "string"},
                    "directives": {"type": "array", "items": {"type": "object"}},
                    "structural_requirements": {"type": "object"},
                    "thinking_steps": {"type": "array", "items": {"type": "string"}},
                    "original_request": {"type": "string"},
                    "generation_directive": {"type": "string"}
                }
            },
            "justifications": {"type": "array", "items": {"type": "object"}},
            "quality": {
                "type": "object",
                "properties": {
                    "overall": {"type": "integer"},
                    "breakdown": {"type": "object"},
                    "confidence": {"type": "string", "enum": ["low", "medium", "high"]}
                }
            },
            "validation_issues": {"type": "array", "items": {"type": "string"}}
        },
        "required": ["facts", "framework", "quality"]
    });
    Arc::new(schema.as_object().cloned().unwrap_or_else(Map::new))
}

pub fn detailed_help_schema() -> Arc<Map<String, Value>> {
    let schema = json!({
        "type": "object",
        "properties": {
            "tool": {"type": "string", "enum": TOOL_NAMES},
            "format": {"type": "string", "enum": ["compact", "full"], "default": "full"}
        }
    });
    Arc::new(schema.as_object().cloned().unwrap_or_else(Map::new))
}

pub fn detailed_help_output_schema() -> Arc<Map<String, Value>> {
    let schema = json!({
        "type": "object",
        "properties": {
            "name": {"type": "string"},
            "tool": {"type": "string"},
            "description": {"type": "string"},
            "summary": {"type": "string"},
            "arguments": {"type": "object"},
            "returns": {"type": "object"},
            "tools": {"type": "array"}
        }
    });
    Arc::new(schema.as_object().cloned().unwrap_or_else(Map::new))
}
