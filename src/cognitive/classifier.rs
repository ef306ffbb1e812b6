//! Lexical classifier: raw request text to `RequestFacts`.
//!
//! Two passes. `extract_signals` reads the raw text and produces only
//! categorical results; `enrich` derives objective, audience and implicit
//! context from those results without touching the text again.

use super::catalog::{
    AUDIENCE_CLIENT, AUDIENCE_DEFAULT, AUDIENCE_EXPERIENCED, AUDIENCE_STUDENT, AUDIENCE_TEAM,
    AudienceSignal, Catalog, ContextSignal,
};
use super::types::{Complexity, RequestFacts, TaskType};
use std::collections::BTreeSet;

pub const MAX_KEYWORDS: usize = 5;
const MIN_KEYWORD_CHARS: usize = 5;
const LONG_REQUEST_WORDS: usize = 30;
const MEDIUM_REQUEST_WORDS: usize = 20;
/// More than this many candidate task types makes the request `mixed`.
const MAX_DISTINCT_TASK_TYPES: usize = 2;

/// First-pass output: categorical facts only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexicalSignals {
    pub task_type: TaskType,
    pub complexity: Complexity,
    pub keywords: Vec<String>,
    pub context: BTreeSet<ContextSignal>,
    pub audience: BTreeSet<AudienceSignal>,
}

/// Classify a request. Never fails; missing signal degrades to defaults.
pub fn classify(catalog: &Catalog, request: &str, context: Option<&str>) -> RequestFacts {
    let signals = extract_signals(catalog, request, context);
    let facts = enrich(&signals);
    tracing::debug!(
        "classify: task_type={}, complexity={}, keywords={:?}, audience={}",
        facts.task_type,
        facts.complexity,
        facts.keywords,
        facts.target_audience
    );
    facts
}

pub fn extract_signals(catalog: &Catalog, request: &str, context: Option<&str>) -> LexicalSignals {
    let lower = request.to_lowercase();
    // Context and audience cues may come from either the request or the caller context.
    let combined = match context {
        Some(c) if !c.trim().is_empty() => format!("{} {}", lower, c.to_lowercase()),
        _ => lower.clone(),
    };

    LexicalSignals {
        task_type: detect_task_type(catalog, &lower),
        complexity: detect_complexity(catalog, request, &lower),
        keywords: extract_keywords(catalog, request),
        context: catalog
            .context_signals
            .iter()
            .filter(|(_, phrases)| phrases.is_match(&combined))
            .map(|(s, _)| *s)
            .collect(),
        audience: catalog
            .audience_signals
            .iter()
            .filter(|(_, phrases)| phrases.is_match(&combined))
            .map(|(s, _)| *s)
            .collect(),
    }
}

/// Count keyword hits per type; more than two candidate types means `mixed`.
pub fn detect_task_type(catalog: &Catalog, lower: &str) -> TaskType {
    let candidates: Vec<(TaskType, usize)> = catalog
        .task_keywords
        .iter()
        .map(|(t, phrases)| (*t, phrases.count(lower)))
        .filter(|(_, count)| *count > 0)
        .collect();

    if candidates.len() > MAX_DISTINCT_TASK_TYPES {
        return TaskType::Mixed;
    }

    // Strict comparison keeps the earliest declared type on ties.
    let mut best: Option<(TaskType, usize)> = None;
    for (t, count) in candidates {
        if best.is_none_or(|(_, c)| count > c) {
            best = Some((t, count));
        }
    }
    best.map(|(t, _)| t).unwrap_or(TaskType::Technical)
}

pub fn detect_complexity(catalog: &Catalog, request: &str, lower: &str) -> Complexity {
    let expert = catalog.expert_indicators.count(lower);
    let intermediate = catalog.intermediate_indicators.count(lower);
    let basic = catalog.basic_indicators.count(lower);
    let words = request.split_whitespace().count();
    let long_with_code = words > LONG_REQUEST_WORDS && catalog.code_terms.is_match(request);

    if expert >= 2 || long_with_code {
        Complexity::Expert
    } else if expert == 1 {
        Complexity::Advanced
    } else if words > MEDIUM_REQUEST_WORDS || intermediate > 0 {
        Complexity::Intermediate
    } else if basic > 0 {
        Complexity::Basic
    } else {
        Complexity::Intermediate
    }
}

/// Whitespace tokens longer than four characters, minus stop-words, deduplicated, capped.
pub fn extract_keywords(catalog: &Catalog, request: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for raw in request.split_whitespace() {
        let token = raw
            .trim_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase();
        if token.chars().count() < MIN_KEYWORD_CHARS || catalog.stop_words.is_match(&token) {
            continue;
        }
        if !out.contains(&token) {
            out.push(token);
        }
        if out.len() == MAX_KEYWORDS {
            break;
        }
    }
    out
}

type AudienceRule = (fn(&LexicalSignals) -> bool, &'static str);

/// First match wins.
const AUDIENCE_RULES: &[AudienceRule] = &[
    (|s: &LexicalSignals| s.audience.contains(&AudienceSignal::Client), AUDIENCE_CLIENT),
    (|s: &LexicalSignals| s.audience.contains(&AudienceSignal::Team), AUDIENCE_TEAM),
    (|s: &LexicalSignals| s.audience.contains(&AudienceSignal::Student), AUDIENCE_STUDENT),
    (|s: &LexicalSignals| s.complexity == Complexity::Expert, AUDIENCE_EXPERIENCED),
];

pub fn resolve_audience(signals: &LexicalSignals) -> &'static str {
    AUDIENCE_RULES
        .iter()
        .find(|(matches, _)| matches(signals))
        .map(|(_, label)| *label)
        .unwrap_or(AUDIENCE_DEFAULT)
}

/// Returns the objective and whether it fell back to the generic template.
pub fn objective_for(task_type: TaskType, keywords: &[String]) -> (String, bool) {
    let focus = if keywords.is_empty() {
        None
    } else {
        Some(keywords.iter().take(2).cloned().collect::<Vec<_>>().join(" and "))
    };
    let Some(focus) = focus else {
        return (
            "Deliver a clear, well-structured response to the request".to_string(),
            true,
        );
    };
    let objective = match task_type {
        TaskType::Code => format!("Build a working, maintainable implementation for {focus}"),
        TaskType::Technical => format!("Design a sound technical solution for {focus}"),
        TaskType::Creative => format!("Produce an original creative piece about {focus}"),
        TaskType::Analytical => format!("Deliver an evidence-based analysis of {focus}"),
        TaskType::Educational => format!("Teach {focus} so the reader can apply it"),
        TaskType::Debate => format!("Present a balanced argument on {focus}"),
        TaskType::Documentation => format!("Write clear, accurate documentation for {focus}"),
        TaskType::Mixed => {
            return (format!("Address every facet of the request around {focus}"), true);
        }
    };
    (objective, false)
}

/// Second pass: derive the remaining facts from first-pass results only.
pub fn enrich(signals: &LexicalSignals) -> RequestFacts {
    let (main_objective, generic_objective) = objective_for(signals.task_type, &signals.keywords);
    RequestFacts {
        task_type: signals.task_type,
        complexity: signals.complexity,
        keywords: signals.keywords.clone(),
        implicit_context: signals
            .context
            .iter()
            .map(|s| s.label().to_string())
            .collect(),
        target_audience: resolve_audience(signals).to_string(),
        sophistication_score: signals.complexity.sophistication_score(),
        main_objective,
        generic_objective,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cognitive::catalog::{CATALOG, PRODUCTION_CONTEXT};

    #[test]
    fn detects_code_request() {
        let facts = classify(
            &CATALOG,
            "Create a REST API for user authentication with JWT",
            None,
        );
        assert_eq!(facts.task_type, TaskType::Code);
        assert_eq!(facts.complexity, Complexity::Expert);
        assert_eq!(facts.target_audience, AUDIENCE_EXPERIENCED);
    }

    #[test]
    fn empty_signal_falls_back_to_defaults() {
        let facts = classify(&CATALOG, "hmm", None);
        assert_eq!(facts.task_type, TaskType::Technical);
        assert_eq!(facts.complexity, Complexity::Intermediate);
        assert_eq!(facts.target_audience, AUDIENCE_DEFAULT);
        assert!(facts.generic_objective);
    }

    #[test]
    fn more_than_two_task_types_is_mixed() {
        // code ("function"), creative ("poem"), analytical ("compare")
        let t = detect_task_type(&CATALOG, "write a poem about a function and compare them");
        assert_eq!(t, TaskType::Mixed);
    }

    #[test]
    fn task_type_ties_keep_declaration_order() {
        // one code hit ("script") and one creative hit ("story")
        let t = detect_task_type(&CATALOG, "a story told by a script");
        assert_eq!(t, TaskType::Code);
    }

    #[test]
    fn long_request_with_code_terms_is_expert() {
        let request = format!(
            "{}and then wire the function into the module",
            "please look at this thing carefully ".repeat(7)
        );
        let lower = request.to_lowercase();
        assert_eq!(
            detect_complexity(&CATALOG, &request, &lower),
            Complexity::Expert
        );
    }

    #[test]
    fn complexity_precedence() {
        let c = |s: &str| detect_complexity(&CATALOG, s, &s.to_lowercase());
        assert_eq!(c("a simple hello world"), Complexity::Basic);
        assert_eq!(c("a simple testing workflow"), Complexity::Intermediate);
        assert_eq!(c("improve security"), Complexity::Advanced);
        assert_eq!(c("simple oauth security"), Complexity::Expert);
    }

    #[test]
    fn keywords_are_deduplicated_filtered_and_capped() {
        let kws = extract_keywords(
            &CATALOG,
            "Please design caching, caching layers, routing tables, queues, workers, schedulers",
        );
        assert_eq!(
            kws,
            vec!["caching", "layers", "routing", "tables", "queues"]
        );
        assert!(!kws.contains(&"please".to_string()));
    }

    #[test]
    fn request_verbs_never_become_the_objective() {
        let facts = classify(&CATALOG, "Build a JWT api", None);
        assert!(facts.keywords.is_empty());
        assert!(facts.generic_objective);
        assert!(!facts.main_objective.contains("build"));

        let facts = classify(&CATALOG, "Design the billing service", None);
        assert_eq!(facts.keywords, vec!["billing", "service"]);
        assert!(facts.main_objective.ends_with("billing and service"));
    }

    #[test]
    fn short_keywords_do_not_fire_inside_other_words() {
        for request in [
            "Write a story about a famous author",
            "Write a story about a restaurant",
            "Write a poem about a classic reaction",
        ] {
            let facts = classify(&CATALOG, request, None);
            assert_eq!(facts.task_type, TaskType::Creative, "{request}");
            assert!(facts.implicit_context.is_empty(), "{request}");
        }

        let facts = classify(&CATALOG, "Write a debate on whether trust in laws matters", None);
        assert_eq!(facts.task_type, TaskType::Debate);
        assert!(facts.implicit_context.is_empty());
    }

    #[test]
    fn stems_still_cover_inflected_forms() {
        let t = |s: &str| detect_task_type(&CATALOG, s);
        assert_eq!(t("summarize the quarterly metrics"), TaskType::Analytical);
        assert_eq!(t("two short stories"), TaskType::Creative);
        assert_eq!(t("refactoring the parser"), TaskType::Code);

        let facts = classify(&CATALOG, "Explain the release plan", Some("for the stakeholders"));
        assert_eq!(facts.target_audience, AUDIENCE_CLIENT);
    }

    #[test]
    fn audience_priority_chain() {
        let facts = classify(
            &CATALOG,
            "Explain the release plan",
            Some("for the client and my team"),
        );
        assert_eq!(facts.target_audience, AUDIENCE_CLIENT);

        let facts = classify(&CATALOG, "Explain the release plan", Some("for my team"));
        assert_eq!(facts.target_audience, AUDIENCE_TEAM);
    }

    #[test]
    fn implicit_context_collects_every_match() {
        let facts = classify(
            &CATALOG,
            "Build a React dashboard backed by Postgres for production",
            None,
        );
        assert!(facts.has_context("Frontend stack: React"));
        assert!(facts.has_context("Persistence layer: database involved"));
        assert!(facts.has_context(PRODUCTION_CONTEXT));
    }

    #[test]
    fn enrichment_uses_only_first_pass_results() {
        let signals = LexicalSignals {
            task_type: TaskType::Educational,
            complexity: Complexity::Basic,
            keywords: vec!["closures".to_string(), "scopes".to_string(), "hoisting".to_string()],
            context: BTreeSet::new(),
            audience: [AudienceSignal::Student].into_iter().collect(),
        };
        let facts = enrich(&signals);
        assert_eq!(facts.target_audience, AUDIENCE_STUDENT);
        assert_eq!(facts.main_objective, "Teach closures and scopes so the reader can apply it");
        assert_eq!(facts.sophistication_score, 3);
        assert!(!facts.generic_objective);
    }
}
