//! Cognitive module: request classification and instruction-framework assembly.
//! Deterministic, rule-based heuristics over static catalogs.

pub mod assembler;
pub mod catalog;
pub mod classifier;
pub mod domains;
pub mod quality;
pub mod selector;
pub mod types;

use crate::config::EngineConfig;
use crate::error::{PromptArchitectError, Result};
use assembler::AssemblyOptions;
use catalog::{CATALOG, Catalog};
use serde::Serialize;
use serde_json::{Map, Value};
use types::{
    InstructionFramework, QualityScore, RequestFacts, TechniqueApplication,
    TechniqueJustification,
};

/// Validated input to the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchitectRequest {
    pub request: String,
    pub context: Option<String>,
}

impl ArchitectRequest {
    pub fn new(request: impl Into<String>, context: Option<String>) -> Self {
        Self {
            request: request.into(),
            context,
        }
    }

    /// Parse tool arguments: `{request: string, context?: string|null}`.
    pub fn from_arguments(args: Option<&Map<String, Value>>) -> Result<Self> {
        let args =
            args.ok_or_else(|| PromptArchitectError::invalid_input("Missing parameters"))?;
        let request = match args.get("request") {
            None | Some(Value::Null) => {
                return Err(PromptArchitectError::invalid_input(
                    "Missing required field 'request'",
                ));
            }
            Some(Value::String(s)) => s.clone(),
            Some(_) => {
                return Err(PromptArchitectError::invalid_input(
                    "Field 'request' must be a string",
                ));
            }
        };
        let context = match args.get("context") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                return Err(PromptArchitectError::invalid_input(
                    "Field 'context' must be a string",
                ));
            }
        };
        Ok(Self { request, context })
    }
}

/// Structured result of one pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct ArchitectResponse {
    pub facts: RequestFacts,
    pub domain: Option<String>,
    pub techniques: Vec<TechniqueApplication>,
    pub framework: InstructionFramework,
    pub justifications: Vec<TechniqueJustification>,
    pub quality: QualityScore,
    /// Framework postcondition failures; empty when the framework is well formed.
    pub validation_issues: Vec<String>,
}

/// Runs classify -> match domain -> select -> assemble -> evaluate.
/// Holds only read-only state, so one instance serves every request.
pub struct PromptArchitect {
    catalog: &'static Catalog,
    config: EngineConfig,
}

impl PromptArchitect {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_catalog(&CATALOG, config)
    }

    pub fn with_catalog(catalog: &'static Catalog, config: EngineConfig) -> Self {
        Self { catalog, config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn check_request(&self, req: &ArchitectRequest) -> Result<()> {
        if req.request.trim().is_empty() {
            return Err(PromptArchitectError::invalid_input(
                "Field 'request' must not be blank",
            ));
        }
        if req.request.len() > self.config.max_request_bytes {
            return Err(PromptArchitectError::invalid_input(format!(
                "Request is {} bytes; the limit is {}",
                req.request.len(),
                self.config.max_request_bytes
            )));
        }
        Ok(())
    }

    pub fn architect(&self, req: &ArchitectRequest) -> Result<ArchitectResponse> {
        self.check_request(req)?;
        let request = req.request.as_str();

        let facts = classifier::classify(self.catalog, request, req.context.as_deref());
        let domain = if self.config.domain_matching {
            domains::match_domain(
                &self.catalog.domains,
                request,
                &facts.keywords,
                facts.task_type,
            )
        } else {
            None
        };
        let techniques = selector::select_techniques(&facts, request);
        let framework = assembler::assemble(
            &facts,
            &techniques,
            domain,
            request,
            AssemblyOptions {
                domain_hints: self.config.domain_hints,
            },
        );
        let quality = quality::evaluate(&framework, &facts, &techniques);

        let validation_issues = assembler::validate_framework(&framework);
        if !validation_issues.is_empty() {
            tracing::warn!("Framework failed validation: {:?}", validation_issues);
        }

        let justifications = techniques.iter().map(justify).collect();

        Ok(ArchitectResponse {
            facts,
            domain: domain.map(|d| d.domain.to_string()),
            techniques,
            framework,
            justifications,
            quality,
            validation_issues,
        })
    }
}

impl Default for PromptArchitect {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

fn justify(app: &TechniqueApplication) -> TechniqueJustification {
    let def = catalog::definition(app.technique);
    TechniqueJustification {
        technique: app.technique,
        name: def.name,
        reason: app.reason.clone(),
        improvement: def.improvement,
    }
}
