//! Instruction assembly: facts + techniques + optional domain template into a framework.

use super::catalog::REQUIRED_GENERATION_VERBS;
use super::types::{
    Complexity, Directive, DomainTemplate, InstructionFramework, RequestFacts,
    StructuralRequirements, TaskType, Technique, TechniqueApplication,
};

/// Options that shape assembly without changing its invariants.
#[derive(Debug, Clone, Copy)]
pub struct AssemblyOptions {
    /// Fold a matched template's hints, pitfalls and guidelines into the requirements.
    pub domain_hints: bool,
}

impl Default for AssemblyOptions {
    fn default() -> Self {
        Self { domain_hints: true }
    }
}

pub const MIN_THINKING_STEPS: usize = 3;

pub fn assemble(
    facts: &RequestFacts,
    techniques: &[TechniqueApplication],
    domain: Option<&DomainTemplate>,
    request: &str,
    options: AssemblyOptions,
) -> InstructionFramework {
    let hints = if options.domain_hints { domain } else { None };
    InstructionFramework {
        cognitive_analysis: cognitive_analysis(facts),
        directives: build_directives(facts, techniques, domain),
        structural_requirements: structural_requirements(facts, techniques, domain, hints),
        thinking_steps: thinking_steps(facts),
        original_request: request.to_string(),
        generation_directive: generation_directive(facts),
    }
}

fn cognitive_analysis(facts: &RequestFacts) -> String {
    format!(
        "The request is classified as {} work at {} complexity. \
         The response should target sophistication level {}/10. \
         Primary objective: {}.",
        facts.task_type.label(),
        facts.complexity,
        facts.sophistication_score,
        facts.main_objective
    )
}

/// Directive text for the techniques that contribute a protocol step.
/// Constraint-producing techniques return `None` and surface in the constraints instead.
fn directive_for(app: &TechniqueApplication, facts: &RequestFacts) -> Option<(String, String)> {
    let pair = match app.technique {
        Technique::Emphasis => (
            format!(
                "{} so critical points stand out from supporting detail",
                app.implementation
            ),
            app.reason.clone(),
        ),
        Technique::Clarification => (
            format!(
                "Before answering, {}",
                lowercase_first(&app.implementation)
            ),
            app.reason.clone(),
        ),
        Technique::AudienceAdaptation => (app.implementation.clone(), app.reason.clone()),
        Technique::OpposingViewpoints => (
            format!("{} before drawing a conclusion", app.implementation),
            app.reason.clone(),
        ),
        Technique::ChainOfThought => (
            format!(
                "{} while working toward: {}",
                app.implementation,
                lowercase_first(&facts.main_objective)
            ),
            app.reason.clone(),
        ),
        Technique::ProblemDecomposition => (
            format!("{} and resolve each one before combining them", app.implementation),
            app.reason.clone(),
        ),
        Technique::SelfVerification => (
            format!("{} and list any gap that remains", app.implementation),
            app.reason.clone(),
        ),
        Technique::FewShotExamples => (
            format!("{} before generalizing to the full answer", app.implementation),
            app.reason.clone(),
        ),
        Technique::RoleAssignment
        | Technique::SophisticationAttribution
        | Technique::CreativeConstraint => return None,
    };
    Some(pair)
}

fn build_directives(
    facts: &RequestFacts,
    techniques: &[TechniqueApplication],
    domain: Option<&DomainTemplate>,
) -> Vec<Directive> {
    let mut directives = Vec::new();
    let mut push = |directive: String, technique: Option<Technique>, reasoning: String| {
        let step = directives.len() as u32 + 1;
        directives.push(Directive {
            step,
            directive,
            technique,
            reasoning,
        });
    };

    let role = domain
        .map(|d| format!("Act as a {}", d.role_template))
        .or_else(|| {
            techniques
                .iter()
                .find(|a| a.technique == Technique::RoleAssignment)
                .map(|a| a.implementation.clone())
        })
        .unwrap_or_else(|| "Act as a domain expert".to_string());
    push(
        format!("{}, focused on this objective: {}", role, facts.main_objective),
        Some(Technique::RoleAssignment),
        format!(
            "A concrete expert role anchors the depth and vocabulary of {} work",
            facts.task_type.label()
        ),
    );

    push(
        format!(
            "Pitch the response to the target audience ({}) at sophistication level {}/10",
            facts.target_audience, facts.sophistication_score
        ),
        Some(Technique::SophisticationAttribution),
        format!(
            "{} complexity sets the expected level of detail and assumed knowledge",
            facts.complexity
        ),
    );

    for app in techniques.iter().filter(|a| {
        !matches!(
            a.technique,
            Technique::RoleAssignment | Technique::SophisticationAttribution
        )
    }) {
        if let Some((directive, reasoning)) = directive_for(app, facts) {
            push(directive, Some(app.technique), reasoning);
        }
    }

    let (structure, reasoning) = structure_directive(facts.task_type);
    push(structure.to_string(), None, reasoning.to_string());

    directives
}

fn structure_directive(task_type: TaskType) -> (&'static str, &'static str) {
    match task_type {
        TaskType::Code => (
            "Structure the answer as design overview, implementation and usage notes, with every code block fenced and labeled",
            "A predictable layout lets the reader review design and code independently",
        ),
        TaskType::Educational => (
            "Structure the explanation from fundamentals to application and close with a short recap",
            "Learners retain more when concepts build on each other in order",
        ),
        _ => (
            "Organize the response in clearly headed sections that follow the logical order of the request",
            "Clear sections make the response easy to scan and verify",
        ),
    }
}

fn structural_requirements(
    facts: &RequestFacts,
    techniques: &[TechniqueApplication],
    domain: Option<&DomainTemplate>,
    hints: Option<&DomainTemplate>,
) -> StructuralRequirements {
    let mut context_requirements = vec![
        format!(
            "Domain: {}",
            domain.map(|d| d.domain).unwrap_or(facts.task_type.label())
        ),
        format!("Complexity: {}", facts.complexity),
        format!("Audience: {}", facts.target_audience),
    ];
    context_requirements.extend(
        facts
            .implicit_context
            .iter()
            .map(|c| format!("Implicit context: {c}")),
    );

    let mut constraints: Vec<String> = task_constraints(facts.task_type)
        .iter()
        .map(|c| c.to_string())
        .collect();
    if let Some(c) = complexity_constraint(facts.complexity) {
        constraints.push(c.to_string());
    }
    constraints.extend(
        techniques
            .iter()
            .filter(|a| a.technique == Technique::CreativeConstraint)
            .map(|a| a.implementation.clone()),
    );

    let mut output_format_guidelines: Vec<String> = output_format(facts.task_type)
        .iter()
        .map(|g| g.to_string())
        .collect();

    if let Some(t) = hints {
        context_requirements.extend(t.contextual_hints.iter().map(|h| h.to_string()));
        constraints.extend(t.common_pitfalls.iter().map(|p| format!("Avoid: {p}")));
        output_format_guidelines.extend(t.structural_guidelines.iter().map(|g| g.to_string()));
        output_format_guidelines.extend(
            t.example_patterns
                .iter()
                .map(|p| format!("Reference pattern: {p}")),
        );
    }

    StructuralRequirements {
        context_requirements,
        constraints,
        output_format_guidelines,
    }
}

fn task_constraints(task_type: TaskType) -> &'static [&'static str] {
    match task_type {
        TaskType::Code => &[
            "Follow the conventions of the detected stack",
            "Handle every failure path explicitly",
        ],
        TaskType::Technical => &["State assumptions about the environment explicitly"],
        TaskType::Creative => &["Keep tone and voice consistent throughout"],
        TaskType::Analytical => &["Support every claim with evidence or explicit reasoning"],
        TaskType::Educational => &["Define each concept before using it"],
        TaskType::Debate => &["Give each position a fair and equal hearing"],
        TaskType::Documentation => &["Keep terminology consistent with the documented system"],
        TaskType::Mixed => &["Address each facet of the request separately"],
    }
}

fn complexity_constraint(complexity: Complexity) -> Option<&'static str> {
    match complexity {
        Complexity::Basic => Some("Avoid unexplained jargon"),
        Complexity::Intermediate => None,
        Complexity::Advanced => Some("Cover relevant edge cases and trade-offs"),
        Complexity::Expert => Some("Assume deep familiarity and skip introductory material"),
    }
}

fn output_format(task_type: TaskType) -> &'static [&'static str] {
    match task_type {
        TaskType::Code => &[
            "Present code in fenced blocks with language tags",
            "Explain the design before the implementation",
            "Close with usage instructions",
        ],
        TaskType::Educational => &[
            "Open with a one-paragraph overview",
            "Use headings for each concept",
            "End with a short recap of key points",
        ],
        TaskType::Analytical => &[
            "Lead with the main finding",
            "Use tables or bullet lists for comparisons",
            "Finish with conclusions and open questions",
        ],
        TaskType::Documentation => &[
            "Use a consistent heading hierarchy",
            "Provide an example for each documented item",
        ],
        TaskType::Creative => &["Present the piece without meta-commentary"],
        _ => &[
            "Use clear headings and short paragraphs",
            "Summarize the key takeaways at the end",
        ],
    }
}

fn thinking_steps(facts: &RequestFacts) -> Vec<String> {
    let pair: [&str; 2] = match facts.task_type {
        TaskType::Code => [
            "Sketch component boundaries and data flow before writing code",
            "Walk through edge cases and failure paths for each component",
        ],
        TaskType::Creative => [
            "Choose the tone, voice and structure that fit the piece",
            "Draft freely inside the constraints, then keep only the strongest ideas",
        ],
        TaskType::Analytical => [
            "Gather the relevant evidence and separate facts from assumptions",
            "Weigh alternative interpretations before committing to a conclusion",
        ],
        _ => [
            "Break the request into its main parts and order them logically",
            "Decide how much detail each part needs for the audience",
        ],
    };

    let steps = [
        format!(
            "Restate the objective in your own words: {}",
            facts.main_objective
        ),
        format!(
            "Identify explicit requirements and the implicit expectations of a {}",
            facts.target_audience
        ),
        "Check which constraints narrow the solution space before choosing an approach"
            .to_string(),
        pair[0].to_string(),
        pair[1].to_string(),
        "Review the draft against every directive and constraint".to_string(),
        "Refine the wording and remove anything that does not serve the objective".to_string(),
    ];
    steps
        .into_iter()
        .enumerate()
        .map(|(i, s)| format!("{}. {}", i + 1, s))
        .collect()
}

fn generation_directive(facts: &RequestFacts) -> String {
    format!(
        "Based on this framework, generate a complete {} response at {} level that follows every directive in order and honors each constraint.",
        facts.task_type.label(),
        facts.complexity
    )
}

pub fn contains_generation_verb(text: &str) -> bool {
    let lower = text.to_lowercase();
    REQUIRED_GENERATION_VERBS.iter().any(|v| lower.contains(v))
}

/// Check the framework postconditions; returns human-readable issues, empty when valid.
pub fn validate_framework(framework: &InstructionFramework) -> Vec<String> {
    let mut issues = Vec::new();
    if framework.directives.is_empty() {
        issues.push("Framework has no directives".to_string());
    }
    if framework.thinking_steps.len() < MIN_THINKING_STEPS {
        issues.push(format!(
            "Framework has {} thinking steps; at least {} are required",
            framework.thinking_steps.len(),
            MIN_THINKING_STEPS
        ));
    }
    if framework
        .structural_requirements
        .context_requirements
        .is_empty()
    {
        issues.push("Framework has no context requirements".to_string());
    }
    if !contains_generation_verb(&framework.generation_directive) {
        issues.push(format!(
            "Generation directive must contain one of: {}",
            REQUIRED_GENERATION_VERBS.join(", ")
        ));
    }
    issues
}

fn lowercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
