//! Types shared by the classification and assembly pipeline.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// Closed set of task categories a request can be classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    Code,
    Technical,
    Creative,
    Analytical,
    Educational,
    Debate,
    Documentation,
    Mixed,
}

impl TaskType {
    /// Declaration order of the non-mixed types; ties in task detection resolve to the earliest.
    pub const DETECTABLE: [TaskType; 7] = [
        TaskType::Code,
        TaskType::Technical,
        TaskType::Creative,
        TaskType::Analytical,
        TaskType::Educational,
        TaskType::Debate,
        TaskType::Documentation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Technical => "technical",
            Self::Creative => "creative",
            Self::Analytical => "analytical",
            Self::Educational => "educational",
            Self::Debate => "debate",
            Self::Documentation => "documentation",
            Self::Mixed => "mixed",
        }
    }

    /// Human-readable label used inside generated directives.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Code => "software development",
            Self::Technical => "technical engineering",
            Self::Creative => "creative writing",
            Self::Analytical => "analytical",
            Self::Educational => "educational",
            Self::Debate => "argumentative",
            Self::Documentation => "technical documentation",
            Self::Mixed => "multi-disciplinary",
        }
    }
}

impl std::fmt::Display for TaskType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request complexity, totally ordered from basic to expert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Basic,
    Intermediate,
    Advanced,
    Expert,
}

impl Complexity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::Expert => "expert",
        }
    }

    /// Fixed sophistication table, strictly increasing with complexity.
    pub fn sophistication_score(&self) -> u8 {
        match self {
            Self::Basic => 3,
            Self::Intermediate => 5,
            Self::Advanced => 7,
            Self::Expert => 9,
        }
    }
}

impl std::fmt::Display for Complexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured facts derived from a raw request. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestFacts {
    pub task_type: TaskType,
    pub complexity: Complexity,
    pub keywords: Vec<String>,
    pub implicit_context: Vec<String>,
    pub target_audience: String,
    pub sophistication_score: u8,
    pub main_objective: String,
    /// True when the objective fell back to a generic template.
    #[serde(skip)]
    pub generic_objective: bool,
}

impl RequestFacts {
    pub fn has_context(&self, label: &str) -> bool {
        self.implicit_context.iter().any(|c| c == label)
    }
}

/// Whether a technique is always eligible or gated by the request facts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TechniqueCategory {
    Mandatory,
    Situational,
}

/// The closed catalog of augmentation techniques.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Technique {
    RoleAssignment,
    SophisticationAttribution,
    Emphasis,
    Clarification,
    AudienceAdaptation,
    CreativeConstraint,
    OpposingViewpoints,
    ChainOfThought,
    ProblemDecomposition,
    SelfVerification,
    FewShotExamples,
}

impl Technique {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RoleAssignment => "role_assignment",
            Self::SophisticationAttribution => "sophistication_attribution",
            Self::Emphasis => "emphasis",
            Self::Clarification => "clarification",
            Self::AudienceAdaptation => "audience_adaptation",
            Self::CreativeConstraint => "creative_constraint",
            Self::OpposingViewpoints => "opposing_viewpoints",
            Self::ChainOfThought => "chain_of_thought",
            Self::ProblemDecomposition => "problem_decomposition",
            Self::SelfVerification => "self_verification",
            Self::FewShotExamples => "few_shot_examples",
        }
    }

    /// Partition of the catalog; fixed at compile time.
    pub fn category(&self) -> TechniqueCategory {
        match self {
            Self::RoleAssignment | Self::SophisticationAttribution | Self::Emphasis => {
                TechniqueCategory::Mandatory
            }
            _ => TechniqueCategory::Situational,
        }
    }

    pub fn is_mandatory(&self) -> bool {
        self.category() == TechniqueCategory::Mandatory
    }
}

impl std::fmt::Display for Technique {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TechniqueApplication {
    pub technique: Technique,
    pub reason: String,
    pub implementation: String,
}

/// Pre-authored bundle of domain-specific hints. Read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainTemplate {
    pub domain: &'static str,
    pub task_type: TaskType,
    pub role_template: &'static str,
    pub contextual_hints: &'static [&'static str],
    pub structural_guidelines: &'static [&'static str],
    pub common_pitfalls: &'static [&'static str],
    pub example_patterns: &'static [&'static str],
}

/// One numbered line of the assembled instruction protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Directive {
    pub step: u32,
    pub directive: String,
    /// Technique that produced the line; `None` for the closing output-structure step.
    pub technique: Option<Technique>,
    pub reasoning: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StructuralRequirements {
    pub context_requirements: Vec<String>,
    pub constraints: Vec<String>,
    pub output_format_guidelines: Vec<String>,
}

/// The assembled output handed back to callers instead of a finished answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstructionFramework {
    pub cognitive_analysis: String,
    pub directives: Vec<Directive>,
    pub structural_requirements: StructuralRequirements,
    pub thinking_steps: Vec<String>,
    pub original_request: String,
    pub generation_directive: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QualityBreakdown {
    pub clarity: u8,
    pub completeness: u8,
    pub specificity: u8,
    pub technique_balance: u8,
    pub actionability: u8,
}

impl QualityBreakdown {
    pub const CLARITY_WEIGHT: f64 = 0.25;
    pub const COMPLETENESS_WEIGHT: f64 = 0.25;
    pub const SPECIFICITY_WEIGHT: f64 = 0.20;
    pub const TECHNIQUE_BALANCE_WEIGHT: f64 = 0.15;
    pub const ACTIONABILITY_WEIGHT: f64 = 0.15;

    /// Weighted sum of the five axes, rounded to the nearest integer.
    pub fn weighted_overall(&self) -> u8 {
        let sum = f64::from(self.clarity) * Self::CLARITY_WEIGHT
            + f64::from(self.completeness) * Self::COMPLETENESS_WEIGHT
            + f64::from(self.specificity) * Self::SPECIFICITY_WEIGHT
            + f64::from(self.technique_balance) * Self::TECHNIQUE_BALANCE_WEIGHT
            + f64::from(self.actionability) * Self::ACTIONABILITY_WEIGHT;
        sum.round().clamp(0.0, 100.0) as u8
    }
}

/// Heuristic score of an assembled framework. `overall` is always derived from the breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualityScore {
    pub breakdown: QualityBreakdown,
    pub confidence: Confidence,
}

impl QualityScore {
    pub fn overall(&self) -> u8 {
        self.breakdown.weighted_overall()
    }
}

impl Serialize for QualityScore {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut s = serializer.serialize_struct("QualityScore", 3)?;
        s.serialize_field("overall", &self.overall())?;
        s.serialize_field("breakdown", &self.breakdown)?;
        s.serialize_field("confidence", &self.confidence)?;
        s.end()
    }
}

/// Human-readable explanation of why a technique was applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TechniqueJustification {
    pub technique: Technique,
    pub name: &'static str,
    pub reason: String,
    pub improvement: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complexity_is_totally_ordered() {
        assert!(Complexity::Basic < Complexity::Intermediate);
        assert!(Complexity::Intermediate < Complexity::Advanced);
        assert!(Complexity::Advanced < Complexity::Expert);
    }

    #[test]
    fn sophistication_strictly_increases() {
        let scores: Vec<u8> = [
            Complexity::Basic,
            Complexity::Intermediate,
            Complexity::Advanced,
            Complexity::Expert,
        ]
        .iter()
        .map(Complexity::sophistication_score)
        .collect();
        assert!(scores.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn weights_sum_to_one() {
        let total = QualityBreakdown::CLARITY_WEIGHT
            + QualityBreakdown::COMPLETENESS_WEIGHT
            + QualityBreakdown::SPECIFICITY_WEIGHT
            + QualityBreakdown::TECHNIQUE_BALANCE_WEIGHT
            + QualityBreakdown::ACTIONABILITY_WEIGHT;
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn serialized_overall_matches_breakdown() {
        let score = QualityScore {
            breakdown: QualityBreakdown {
                clarity: 90,
                completeness: 80,
                specificity: 75,
                technique_balance: 100,
                actionability: 95,
            },
            confidence: Confidence::High,
        };
        let v = serde_json::to_value(score).unwrap();
        // 22.5 + 20 + 15 + 15 + 14.25 = 86.75
        assert_eq!(v["overall"], 87);
        assert_eq!(v["confidence"], "high");
    }

    #[test]
    fn partition_is_fixed() {
        assert!(Technique::RoleAssignment.is_mandatory());
        assert!(Technique::Emphasis.is_mandatory());
        assert!(!Technique::Clarification.is_mandatory());
    }
}
