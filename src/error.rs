//! Domain-specific error types for prompt-architect

use serde_json::json;
use thiserror::Error;

/// Main error type for the prompt-architect library and MCP server
#[derive(Error, Debug)]
pub enum PromptArchitectError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("MCP protocol error: {message}")]
    Mcp { message: String },

    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
    },
}

impl PromptArchitectError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        PromptArchitectError::InvalidInput {
            message: message.into(),
        }
    }
}

impl From<anyhow::Error> for PromptArchitectError {
    fn from(err: anyhow::Error) -> Self {
        PromptArchitectError::Internal {
            message: err.to_string(),
            source: Some(err.into()),
        }
    }
}

impl From<serde_json::Error> for PromptArchitectError {
    fn from(err: serde_json::Error) -> Self {
        PromptArchitectError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<tokio::task::JoinError> for PromptArchitectError {
    fn from(err: tokio::task::JoinError) -> Self {
        PromptArchitectError::Internal {
            message: format!("Pipeline task failed: {}", err),
            source: Some(Box::new(err)),
        }
    }
}

impl From<rmcp::ErrorData> for PromptArchitectError {
    fn from(err: rmcp::ErrorData) -> Self {
        PromptArchitectError::Mcp {
            message: err.message.to_string(),
        }
    }
}

/// Convert PromptArchitectError to MCP error
impl From<PromptArchitectError> for rmcp::ErrorData {
    fn from(err: PromptArchitectError) -> Self {
        let (code, label, details) = match err {
            PromptArchitectError::InvalidInput { message } => (
                rmcp::model::ErrorCode::INVALID_PARAMS,
                "Invalid input",
                message,
            ),
            PromptArchitectError::Config { message } => (
                rmcp::model::ErrorCode::INVALID_PARAMS,
                "Configuration error",
                message,
            ),
            PromptArchitectError::Serialization { message } => (
                rmcp::model::ErrorCode::INTERNAL_ERROR,
                "Serialization error",
                message,
            ),
            PromptArchitectError::Mcp { message } => (
                rmcp::model::ErrorCode::INVALID_PARAMS,
                "MCP protocol error",
                message,
            ),
            PromptArchitectError::Internal { message, .. } => (
                rmcp::model::ErrorCode::INTERNAL_ERROR,
                "Internal error",
                message,
            ),
        };
        rmcp::ErrorData {
            code,
            message: format!("{label}: {details}").into(),
            data: Some(json!({ "details": details })),
        }
    }
}

/// Result type alias for prompt-architect operations
pub type Result<T> = std::result::Result<T, PromptArchitectError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn invalid_input_maps_to_invalid_params() {
        let err: rmcp::ErrorData = PromptArchitectError::invalid_input("request is blank").into();
        assert_eq!(err.code, rmcp::model::ErrorCode::INVALID_PARAMS);
        assert_eq!(err.message, "Invalid input: request is blank");
        assert_eq!(err.data, Some(json!({ "details": "request is blank" })));
    }

    #[test]
    fn internal_keeps_its_cause() {
        let err: PromptArchitectError = anyhow::anyhow!("catalog unavailable").into();
        assert!(err.source().is_some());
        let mcp: rmcp::ErrorData = err.into();
        assert_eq!(mcp.code, rmcp::model::ErrorCode::INTERNAL_ERROR);
    }
}
