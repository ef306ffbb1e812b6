//! Domain template catalog and matcher.
//!
//! Scoring and selection are split: `score_templates` is a pure scorer and
//! `select_best` applies the threshold and first-wins tie policy.

use super::types::{DomainTemplate, TaskType};

/// Minimum score a template needs before it can be returned.
pub const MIN_DOMAIN_SCORE: u32 = 5;

const TASK_MATCH_POINTS: u32 = 5;
const DOMAIN_WORD_POINTS: u32 = 3;
const KEYWORD_POINTS: u32 = 2;

/// Built-in templates in canonical iteration order.
pub fn builtin_templates() -> Vec<DomainTemplate> {
    vec![
        DomainTemplate {
            domain: "web api development",
            task_type: TaskType::Code,
            role_template: "senior backend engineer specialized in API design",
            contextual_hints: &[
                "Consider authentication, authorization and rate limiting",
                "Define request and response contracts explicitly",
            ],
            structural_guidelines: &[
                "Document each endpoint with method, path, payload and status codes",
            ],
            common_pitfalls: &[
                "Leaking internal error details in responses",
                "Storing secrets or tokens in source code",
            ],
            example_patterns: &["POST /auth/login -> 200 { token }"],
        },
        DomainTemplate {
            domain: "frontend interface development",
            task_type: TaskType::Code,
            role_template: "senior frontend engineer focused on accessible interfaces",
            contextual_hints: &["Account for loading, empty and error states"],
            structural_guidelines: &["Separate presentational components from state handling"],
            common_pitfalls: &["Ignoring keyboard navigation and screen readers"],
            example_patterns: &["<Form onSubmit={handleSubmit} />"],
        },
        DomainTemplate {
            domain: "data analysis",
            task_type: TaskType::Analytical,
            role_template: "data analyst experienced in statistical reasoning",
            contextual_hints: &["State the data sources and their limitations"],
            structural_guidelines: &["Lead with the key finding, then the supporting evidence"],
            common_pitfalls: &["Confusing correlation with causation"],
            example_patterns: &["Finding -> Evidence -> Implication"],
        },
        DomainTemplate {
            domain: "cloud infrastructure operations",
            task_type: TaskType::Technical,
            role_template: "site reliability engineer",
            contextual_hints: &["Consider failure domains, observability and rollback"],
            structural_guidelines: &["Describe the topology before the configuration"],
            common_pitfalls: &["Single points of failure hidden behind managed services"],
            example_patterns: &["deploy -> verify health -> shift traffic"],
        },
        DomainTemplate {
            domain: "creative storytelling",
            task_type: TaskType::Creative,
            role_template: "award-winning author",
            contextual_hints: &["Keep point of view and tense consistent"],
            structural_guidelines: &["Open with a hook and close with a resonant image"],
            common_pitfalls: &["Telling emotions instead of showing them"],
            example_patterns: &["Setup -> Conflict -> Turn -> Resolution"],
        },
        DomainTemplate {
            domain: "technical education",
            task_type: TaskType::Educational,
            role_template: "experienced instructor who teaches complex topics simply",
            contextual_hints: &["Connect new concepts to something the learner already knows"],
            structural_guidelines: &["Move from concept to example to practice"],
            common_pitfalls: &["Introducing jargon before defining it"],
            example_patterns: &["Concept -> Analogy -> Example -> Exercise"],
        },
        DomainTemplate {
            domain: "api reference documentation",
            task_type: TaskType::Documentation,
            role_template: "technical writer specialized in developer documentation",
            contextual_hints: &["Assume the reader arrives from search with one question"],
            structural_guidelines: &["Provide a runnable example for every documented operation"],
            common_pitfalls: &["Documenting behavior the code does not have"],
            example_patterns: &["Summary -> Parameters -> Returns -> Example"],
        },
        DomainTemplate {
            domain: "policy debate",
            task_type: TaskType::Debate,
            role_template: "impartial debate moderator",
            contextual_hints: &["Identify the values each side prioritizes"],
            structural_guidelines: &["Give each position equal space and structure"],
            common_pitfalls: &["Strawmanning the weaker side"],
            example_patterns: &["Claim -> Warrant -> Evidence -> Rebuttal"],
        },
    ]
}

/// Score every template against the request. Output order equals catalog order.
pub fn score_templates<'a>(
    templates: &'a [DomainTemplate],
    request: &str,
    keywords: &[String],
    task_type: TaskType,
) -> Vec<(&'a DomainTemplate, u32)> {
    let lower = request.to_lowercase();
    templates
        .iter()
        .map(|template| {
            let mut score = 0;
            if template.task_type == task_type {
                score += TASK_MATCH_POINTS;
            }
            score += template
                .domain
                .split_whitespace()
                .filter(|word| lower.contains(word))
                .count() as u32
                * DOMAIN_WORD_POINTS;
            score += keywords
                .iter()
                .filter(|k| template.domain.contains(k.as_str()))
                .count() as u32
                * KEYWORD_POINTS;
            (template, score)
        })
        .collect()
}

/// Pick the first template holding the maximum score, if that maximum clears the threshold.
pub fn select_best<'a>(scored: &[(&'a DomainTemplate, u32)]) -> Option<&'a DomainTemplate> {
    let max = scored.iter().map(|(_, s)| *s).max()?;
    if max < MIN_DOMAIN_SCORE {
        return None;
    }
    scored.iter().find(|(_, s)| *s == max).map(|(t, _)| *t)
}

pub fn match_domain<'a>(
    templates: &'a [DomainTemplate],
    request: &str,
    keywords: &[String],
    task_type: TaskType,
) -> Option<&'a DomainTemplate> {
    let scored = score_templates(templates, request, keywords, task_type);
    let best = select_best(&scored);
    tracing::debug!(
        "domain_match: task_type={}, best={:?}",
        task_type,
        best.map(|t| t.domain)
    );
    best
}
