use serde::{Deserialize, Serialize};

/// Main configuration structure loaded from prompt_architect.toml and environment variables
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,
    /// Runtime configuration loaded from environment variables
    #[serde(skip)]
    pub runtime: RuntimeConfig,
}

/// Pipeline knobs. None of them change classification rules.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Requests larger than this are rejected as invalid input
    pub max_request_bytes: usize,
    /// When false the domain matcher is skipped entirely
    pub domain_matching: bool,
    /// When true a matched template contributes hints, pitfalls and guidelines
    pub domain_hints: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_request_bytes: 100 * 1024,
            domain_matching: true,
            domain_hints: true,
        }
    }
}

impl EngineConfig {
    /// Apply PROMPT_ARCHITECT_* overrides from the given lookup (env-first).
    pub fn apply_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(max) = var("PROMPT_ARCHITECT_MAX_REQUEST_BYTES")
            .and_then(|v| v.parse::<usize>().ok())
        {
            self.max_request_bytes = max;
            tracing::debug!("PROMPT_ARCHITECT_MAX_REQUEST_BYTES env override applied");
        }
        if let Some(v) = var("PROMPT_ARCHITECT_DOMAIN_MATCHING") {
            self.domain_matching = parse_flag(&v, self.domain_matching);
        }
        if let Some(v) = var("PROMPT_ARCHITECT_DOMAIN_HINTS") {
            self.domain_hints = parse_flag(&v, self.domain_hints);
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.max_request_bytes == 0 {
            anyhow::bail!("engine.max_request_bytes must be > 0");
        }
        Ok(())
    }
}

fn parse_flag(value: &str, fallback: bool) -> bool {
    match value.trim() {
        v if v == "1" || v.eq_ignore_ascii_case("true") => true,
        v if v == "0" || v.eq_ignore_ascii_case("false") => false,
        other => {
            tracing::warn!("Ignoring unrecognized boolean flag value '{}'", other);
            fallback
        }
    }
}

/// Runtime configuration from environment variables
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub log_level: String,
    pub mcp_no_log: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            log_level: "prompt_architect=info,rmcp=info".to_string(),
            mcp_no_log: false,
        }
    }
}

impl RuntimeConfig {
    /// Load runtime configuration from environment variables
    pub fn load_from_env() -> Self {
        Self {
            log_level: std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "prompt_architect=info,rmcp=info".to_string()),
            mcp_no_log: std::env::var("MCP_NO_LOG")
                .ok()
                .is_some_and(|v| v == "true" || v == "1"),
        }
    }
}

impl Config {
    /// Load configuration from TOML file and environment variables
    /// Uses PROMPT_ARCHITECT_CONFIG environment variable or defaults to "prompt_architect.toml"
    pub fn load() -> anyhow::Result<Self> {
        // PROMPT_ARCHITECT_ENV_FILE if set, otherwise ./.env
        if let Ok(env_path) = std::env::var("PROMPT_ARCHITECT_ENV_FILE") {
            let _ = dotenvy::from_path(env_path);
        } else {
            let _ = dotenvy::from_path(".env");
        }

        let config_path = std::env::var("PROMPT_ARCHITECT_CONFIG")
            .unwrap_or_else(|_| "prompt_architect.toml".to_string());

        let mut config: Config = if let Ok(content) = std::fs::read_to_string(&config_path) {
            Self::from_toml(&content)?
        } else {
            tracing::warn!("Config file {} not found, using defaults", config_path);
            Self::default()
        };

        config.engine.apply_overrides(|key| std::env::var(key).ok());
        config.runtime = RuntimeConfig::load_from_env();
        config.engine.validate()?;

        Ok(config)
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
