//! Server module containing the PromptArchitectServer implementation

use crate::cognitive::PromptArchitect;
use crate::config::Config;
use std::sync::Arc;

// Submodules
pub mod router;

/// MCP server wrapping one shared, read-only pipeline
#[derive(Clone)]
pub struct PromptArchitectServer {
    pub architect: Arc<PromptArchitect>,
}

impl PromptArchitectServer {
    pub fn new(config: Config) -> Self {
        Self {
            architect: Arc::new(PromptArchitect::new(config.engine)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;

    #[test]
    fn engine_settings_reach_the_shared_pipeline() {
        let config = Config {
            engine: EngineConfig {
                max_request_bytes: 2048,
                domain_hints: false,
                ..EngineConfig::default()
            },
            ..Config::default()
        };
        let server = PromptArchitectServer::new(config);
        assert_eq!(server.architect.config().max_request_bytes, 2048);
        assert!(!server.architect.config().domain_hints);
        assert!(server.architect.config().domain_matching);
    }
}
