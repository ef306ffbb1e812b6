//! Technique selection: mandatory techniques plus at most two ranked situational ones.

use super::catalog::{
    AUDIENCE_DEFAULT, AUDIENCE_EXPERIENCED, EXPERT_HIGH_VALUE, PRODUCTION_CONTEXT,
    RESTRICTION_TEXTS, task_affinity,
};
use super::types::{Complexity, RequestFacts, TaskType, Technique, TechniqueApplication};

/// Upper bound on techniques per request.
pub const MAX_TECHNIQUES: usize = 4;
pub const MAX_SITUATIONAL: usize = 2;

const EXPERT_BONUS: u32 = 3;
const AFFINITY_BONUS: u32 = 5;
const MIN_SPECIFIC_KEYWORDS: usize = 3;

type Gate = (Technique, fn(&RequestFacts) -> bool);

/// Situational gates in candidate-generation order.
const SITUATIONAL_GATES: &[Gate] = &[
    (Technique::Clarification, |f: &RequestFacts| {
        f.keywords.len() < MIN_SPECIFIC_KEYWORDS || f.generic_objective
    }),
    (Technique::AudienceAdaptation, |f: &RequestFacts| {
        f.target_audience != AUDIENCE_DEFAULT && f.target_audience != AUDIENCE_EXPERIENCED
    }),
    (Technique::CreativeConstraint, |f: &RequestFacts| {
        f.task_type == TaskType::Creative
    }),
    (Technique::OpposingViewpoints, |f: &RequestFacts| {
        matches!(f.task_type, TaskType::Analytical | TaskType::Debate)
    }),
    (Technique::ChainOfThought, |f: &RequestFacts| {
        f.complexity >= Complexity::Advanced || f.task_type == TaskType::Analytical
    }),
    (Technique::ProblemDecomposition, |f: &RequestFacts| {
        f.task_type == TaskType::Mixed || (f.complexity == Complexity::Expert && f.keywords.len() >= 4)
    }),
    (Technique::SelfVerification, |f: &RequestFacts| {
        (is_engineering(f.task_type) && f.complexity >= Complexity::Advanced)
            || f.has_context(PRODUCTION_CONTEXT)
    }),
    (Technique::FewShotExamples, |f: &RequestFacts| {
        matches!(f.task_type, TaskType::Educational | TaskType::Documentation)
    }),
];

fn is_engineering(task_type: TaskType) -> bool {
    matches!(task_type, TaskType::Code | TaskType::Technical)
}

/// Role and sophistication always; emphasis for non-basic engineering or production work.
pub fn mandatory_techniques(facts: &RequestFacts) -> Vec<Technique> {
    let mut out = vec![Technique::RoleAssignment, Technique::SophisticationAttribution];
    if facts.complexity != Complexity::Basic
        && (is_engineering(facts.task_type) || facts.has_context(PRODUCTION_CONTEXT))
    {
        out.push(Technique::Emphasis);
    }
    out
}

pub fn situational_candidates(facts: &RequestFacts) -> Vec<Technique> {
    SITUATIONAL_GATES
        .iter()
        .filter(|(_, gate)| gate(facts))
        .map(|(t, _)| *t)
        .collect()
}

pub fn relevance(technique: Technique, facts: &RequestFacts) -> u32 {
    let mut score = 0;
    if facts.complexity == Complexity::Expert && EXPERT_HIGH_VALUE.contains(&technique) {
        score += EXPERT_BONUS;
    }
    if task_affinity(facts.task_type).contains(&technique) {
        score += AFFINITY_BONUS;
    }
    score
}

/// Score candidates, then stable-sort descending so ties keep generation order.
pub fn rank_candidates(candidates: &[Technique], facts: &RequestFacts) -> Vec<(Technique, u32)> {
    let mut scored: Vec<(Technique, u32)> = candidates
        .iter()
        .map(|t| (*t, relevance(*t, facts)))
        .collect();
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored
}

/// Take the top `budget` ranked candidates, keeping rank order.
///
/// A Clarification candidate always holds one of the slots: an underspecified
/// request must never lose it to higher-scored techniques.
pub fn fill_budget(ranked: &[(Technique, u32)], budget: usize) -> Vec<Technique> {
    let reserved = budget > 0 && ranked.iter().any(|(t, _)| *t == Technique::Clarification);
    let mut open = budget - usize::from(reserved);
    ranked
        .iter()
        .map(|(t, _)| *t)
        .filter(|t| {
            if *t == Technique::Clarification {
                reserved
            } else if open > 0 {
                open -= 1;
                true
            } else {
                false
            }
        })
        .collect()
}

pub fn select_techniques(facts: &RequestFacts, request: &str) -> Vec<TechniqueApplication> {
    let mut chosen = mandatory_techniques(facts);
    let ranked = rank_candidates(&situational_candidates(facts), facts);
    let budget = MAX_SITUATIONAL.min(MAX_TECHNIQUES.saturating_sub(chosen.len()));
    chosen.extend(fill_budget(&ranked, budget));

    tracing::debug!(
        "select_techniques: {:?}",
        chosen.iter().map(Technique::as_str).collect::<Vec<_>>()
    );

    chosen
        .into_iter()
        .map(|t| apply(t, facts, request))
        .collect()
}

pub fn role_for(task_type: TaskType) -> &'static str {
    match task_type {
        TaskType::Code => "senior software engineer",
        TaskType::Technical => "systems architect",
        TaskType::Creative => "accomplished creative writer",
        TaskType::Analytical => "senior analyst",
        TaskType::Educational => "experienced educator",
        TaskType::Debate => "impartial debate moderator",
        TaskType::Documentation => "technical writer",
        TaskType::Mixed => "versatile senior consultant",
    }
}

/// Pick one of the fixed restriction texts, keyed by a hash of the normalized request.
pub fn restriction_for(request: &str) -> &'static str {
    let norm = request
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let hash = blake3::hash(norm.as_bytes());
    let mut seed = [0u8; 8];
    seed.copy_from_slice(&hash.as_bytes()[..8]);
    let idx = (u64::from_le_bytes(seed) % RESTRICTION_TEXTS.len() as u64) as usize;
    RESTRICTION_TEXTS[idx]
}

fn apply(technique: Technique, facts: &RequestFacts, request: &str) -> TechniqueApplication {
    let (reason, implementation) = match technique {
        Technique::RoleAssignment => (
            format!(
                "Anchors the response in the expertise {} work demands",
                facts.task_type.label()
            ),
            format!("Act as a {}", role_for(facts.task_type)),
        ),
        Technique::SophisticationAttribution => (
            format!(
                "{} complexity calls for sophistication level {}/10",
                facts.complexity, facts.sophistication_score
            ),
            format!(
                "Address the target audience ({}) at sophistication level {}/10",
                facts.target_audience, facts.sophistication_score
            ),
        ),
        Technique::Emphasis => (
            format!(
                "Critical requirements of {} work at {} level must not be missed",
                facts.task_type.label(),
                facts.complexity
            ),
            "Mark non-negotiable requirements with explicit IMPORTANT markers".to_string(),
        ),
        Technique::Clarification => (
            format!(
                "Only {} distinctive keyword(s) were found, so the request is underspecified",
                facts.keywords.len()
            ),
            "State the assumptions made about ambiguous points and the questions that would change the result"
                .to_string(),
        ),
        Technique::AudienceAdaptation => (
            format!("The result is aimed at {}", facts.target_audience),
            format!(
                "Adapt vocabulary, depth and examples to {}",
                facts.target_audience
            ),
        ),
        Technique::CreativeConstraint => (
            "A deliberate restriction pushes creative work past the predictable".to_string(),
            restriction_for(request).to_string(),
        ),
        Technique::OpposingViewpoints => (
            "Analytical and argumentative work is stronger when it confronts counterarguments"
                .to_string(),
            "Present the strongest opposing viewpoint and answer it explicitly".to_string(),
        ),
        Technique::ChainOfThought => (
            format!(
                "{} complexity benefits from visible intermediate reasoning",
                facts.complexity
            ),
            "Reason step by step and show intermediate conclusions".to_string(),
        ),
        Technique::ProblemDecomposition => (
            "The request spans several concerns that are easier to solve separately".to_string(),
            "Decompose the request into ordered sub-problems".to_string(),
        ),
        Technique::SelfVerification => (
            "High-stakes engineering output must be checked against its requirements".to_string(),
            "Verify the result against every stated requirement before finalizing".to_string(),
        ),
        Technique::FewShotExamples => (
            "Concrete examples make abstract material easier to apply".to_string(),
            "Include worked examples that show the expected pattern".to_string(),
        ),
    };
    TechniqueApplication {
        technique,
        reason,
        implementation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cognitive::catalog::{AUDIENCE_STUDENT, CATALOG};
    use crate::cognitive::classifier::classify;

    fn techniques(apps: &[TechniqueApplication]) -> Vec<Technique> {
        apps.iter().map(|a| a.technique).collect()
    }

    fn facts(task_type: TaskType, complexity: Complexity, keywords: &[&str]) -> RequestFacts {
        RequestFacts {
            task_type,
            complexity,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            implicit_context: vec![],
            target_audience: AUDIENCE_DEFAULT.to_string(),
            sophistication_score: complexity.sophistication_score(),
            main_objective: "Build a working, maintainable implementation for sorting".to_string(),
            generic_objective: false,
        }
    }

    #[test]
    fn expert_code_request_keeps_golden_rule() {
        let request = "Create a REST API for user authentication with JWT";
        let f = classify(&CATALOG, request, None);
        let selected = techniques(&select_techniques(&f, request));
        assert_eq!(
            selected,
            vec![
                Technique::RoleAssignment,
                Technique::SophisticationAttribution,
                Technique::Emphasis,
                Technique::Clarification,
            ]
        );
    }

    #[test]
    fn clarification_keeps_a_slot_under_a_full_budget() {
        let request = "Build a JWT api";
        let f = classify(&CATALOG, request, None);
        assert!(f.keywords.len() < MIN_SPECIFIC_KEYWORDS);
        let selected = techniques(&select_techniques(&f, request));
        assert_eq!(
            selected,
            vec![
                Technique::RoleAssignment,
                Technique::SophisticationAttribution,
                Technique::Emphasis,
                Technique::Clarification,
            ]
        );
    }

    #[test]
    fn fill_budget_reserves_clarification() {
        let ranked = [
            (Technique::SelfVerification, 8),
            (Technique::ChainOfThought, 3),
            (Technique::Clarification, 0),
        ];
        assert_eq!(fill_budget(&ranked, 1), vec![Technique::Clarification]);
        assert_eq!(
            fill_budget(&ranked, 2),
            vec![Technique::SelfVerification, Technique::Clarification]
        );
        assert!(fill_budget(&ranked, 0).is_empty());
        // without a clarification candidate the plain top-k applies
        assert_eq!(
            fill_budget(&ranked[..2], 2),
            vec![Technique::SelfVerification, Technique::ChainOfThought]
        );
    }

    #[test]
    fn student_audience_selects_adaptation() {
        let request = "Explique o que são microserviços";
        let f = classify(&CATALOG, request, Some("Para estudantes de graduação"));
        assert_eq!(f.target_audience, AUDIENCE_STUDENT);
        let selected = techniques(&select_techniques(&f, request));
        assert_eq!(
            selected,
            vec![
                Technique::RoleAssignment,
                Technique::SophisticationAttribution,
                Technique::AudienceAdaptation,
                Technique::Clarification,
            ]
        );
    }

    #[test]
    fn vague_request_selects_clarification() {
        let request = "Write a poem";
        let f = classify(&CATALOG, request, None);
        let selected = techniques(&select_techniques(&f, request));
        assert_eq!(
            selected,
            vec![
                Technique::RoleAssignment,
                Technique::SophisticationAttribution,
                Technique::CreativeConstraint,
                Technique::Clarification,
            ]
        );
    }

    #[test]
    fn no_candidates_yields_two_mandatory_only() {
        let f = facts(TaskType::Code, Complexity::Basic, &["sorting", "linked", "lists"]);
        assert!(situational_candidates(&f).is_empty());
        let selected = techniques(&select_techniques(&f, "sorting linked lists"));
        assert_eq!(
            selected,
            vec![Technique::RoleAssignment, Technique::SophisticationAttribution]
        );
    }

    #[test]
    fn ranking_is_stable_for_ties() {
        let f = facts(TaskType::Mixed, Complexity::Intermediate, &["alpha"]);
        let ranked = rank_candidates(
            &[Technique::AudienceAdaptation, Technique::FewShotExamples],
            &f,
        );
        assert_eq!(ranked[0].0, Technique::AudienceAdaptation);
        assert_eq!(ranked[1].0, Technique::FewShotExamples);
    }

    #[test]
    fn relevance_combines_expert_and_affinity_bonuses() {
        let f = facts(TaskType::Code, Complexity::Expert, &[]);
        assert_eq!(relevance(Technique::SelfVerification, &f), 8);
        assert_eq!(relevance(Technique::ChainOfThought, &f), 3);
        assert_eq!(relevance(Technique::Clarification, &f), 0);
    }

    #[test]
    fn restriction_is_deterministic() {
        let a = restriction_for("Write a poem about  the sea");
        let b = restriction_for("write a POEM about the sea");
        assert_eq!(a, b);
        assert!(RESTRICTION_TEXTS.contains(&a));
    }

    #[test]
    fn never_duplicates_and_stays_in_bounds() {
        for request in [
            "hi",
            "Analyze and compare the metrics trend, then debate the pros and cons",
            "Build a scalable production API with React, Postgres and Docker for my team",
            "Write a story",
        ] {
            let f = classify(&CATALOG, request, None);
            let selected = techniques(&select_techniques(&f, request));
            assert!((2..=MAX_TECHNIQUES).contains(&selected.len()), "{request}");
            let mut dedup = selected.clone();
            dedup.sort_by_key(|t| t.as_str());
            dedup.dedup();
            assert_eq!(dedup.len(), selected.len(), "{request}");
        }
    }
}
