//! End-to-end tests for the classification and assembly pipeline.
//!
//! These drive `PromptArchitect` through the public API the MCP tool uses.

use prompt_architect::cognitive::assembler::contains_generation_verb;
use prompt_architect::cognitive::catalog::AUDIENCE_STUDENT;
use prompt_architect::cognitive::selector::MAX_TECHNIQUES;
use prompt_architect::cognitive::types::{Complexity, TaskType, Technique};
use prompt_architect::config::EngineConfig;
use prompt_architect::{ArchitectRequest, ArchitectResponse, PromptArchitect, PromptArchitectError};
use serde_json::json;

fn run(request: &str, context: Option<&str>) -> ArchitectResponse {
    PromptArchitect::default()
        .architect(&ArchitectRequest::new(request, context.map(str::to_string)))
        .unwrap()
}

fn techniques(response: &ArchitectResponse) -> Vec<Technique> {
    response.techniques.iter().map(|t| t.technique).collect()
}

const SAMPLE_REQUESTS: &[(&str, Option<&str>)] = &[
    ("Create a REST API for user authentication with JWT", None),
    ("Explique o que são microserviços", Some("Para estudantes de graduação")),
    ("Write a poem", None),
    ("hi", None),
    ("Compare the pros and cons of remote work versus office work", None),
    ("Document the payment endpoints in the README for the client", None),
    (
        "Build a scalable production service in Rust with Postgres and Kubernetes, covering the module layout, the async database layer, the deploy pipeline and the interface for the frontend team",
        Some("for my team"),
    ),
    ("Escreva uma história sobre um robô que aprende a pintar", None),
    ("Build a JWT api", None),
    ("Write a story about a famous author", None),
];

#[test]
fn test_rest_api_request_is_expert_code() {
    let response = run("Create a REST API for user authentication with JWT", None);
    assert_eq!(response.facts.task_type, TaskType::Code);
    assert_eq!(response.facts.complexity, Complexity::Expert);

    let selected = techniques(&response);
    assert!(selected.contains(&Technique::RoleAssignment));
    assert!(selected.contains(&Technique::SophisticationAttribution));
    assert!(
        response
            .framework
            .generation_directive
            .to_lowercase()
            .contains("generate")
    );
    assert_eq!(response.domain.as_deref(), Some("web api development"));
}

#[test]
fn test_portuguese_student_request_adapts_to_audience() {
    let response = run(
        "Explique o que são microserviços",
        Some("Para estudantes de graduação"),
    );
    assert_eq!(response.facts.task_type, TaskType::Educational);
    assert_eq!(response.facts.target_audience, AUDIENCE_STUDENT);
    assert!(techniques(&response).contains(&Technique::AudienceAdaptation));
}

#[test]
fn test_underspecified_request_gets_clarification() {
    for (request, context) in [
        ("Write a poem", None),
        ("Create a REST API for user authentication with JWT", None),
        ("Explique o que são microserviços", Some("Para estudantes de graduação")),
        ("Build a JWT api", None),
    ] {
        let response = run(request, context);
        assert!(response.facts.keywords.len() < 3, "{request}");
        let selected = techniques(&response);
        assert!(selected.contains(&Technique::Clarification), "{request}");
        assert!(selected.len() <= MAX_TECHNIQUES, "{request}");
    }
}

#[test]
fn test_clarification_shares_the_budget_with_emphasis_and_audience() {
    let api = techniques(&run("Create a REST API for user authentication with JWT", None));
    assert_eq!(
        api,
        [
            Technique::RoleAssignment,
            Technique::SophisticationAttribution,
            Technique::Emphasis,
            Technique::Clarification,
        ]
    );

    let student = techniques(&run(
        "Explique o que são microserviços",
        Some("Para estudantes de graduação"),
    ));
    assert_eq!(
        student,
        [
            Technique::RoleAssignment,
            Technique::SophisticationAttribution,
            Technique::AudienceAdaptation,
            Technique::Clarification,
        ]
    );
}

#[test]
fn test_missing_or_empty_request_is_invalid_input() {
    for args in [json!({}), json!({"request": ""}), json!({"request": null})] {
        let result = ArchitectRequest::from_arguments(args.as_object())
            .and_then(|req| PromptArchitect::default().architect(&req));
        assert!(
            matches!(result, Err(PromptArchitectError::InvalidInput { .. })),
            "{args}"
        );
    }
}

#[test]
fn test_selection_bounds_and_uniqueness() {
    for (request, context) in SAMPLE_REQUESTS {
        let selected = techniques(&run(request, *context));
        assert!((2..=MAX_TECHNIQUES).contains(&selected.len()), "{request}");
        for (i, t) in selected.iter().enumerate() {
            assert!(!selected[i + 1..].contains(t), "{request}: duplicate {t}");
        }
    }
}

#[test]
fn test_framework_postconditions_hold() {
    for (request, context) in SAMPLE_REQUESTS {
        let response = run(request, *context);
        let fw = &response.framework;
        assert!((5..=7).contains(&fw.thinking_steps.len()), "{request}");
        assert!(fw.directives.len() >= 2, "{request}");
        assert!(contains_generation_verb(&fw.generation_directive), "{request}");
        assert!(response.validation_issues.is_empty(), "{request}");
        assert_eq!(fw.original_request, *request);
    }
}

#[test]
fn test_pipeline_is_idempotent() {
    for (request, context) in SAMPLE_REQUESTS {
        let a = serde_json::to_string(&run(request, *context)).unwrap();
        let b = serde_json::to_string(&run(request, *context)).unwrap();
        assert_eq!(a, b, "{request}");
    }
}

#[test]
fn test_overall_matches_serialized_breakdown() {
    for (request, context) in SAMPLE_REQUESTS {
        let value = serde_json::to_value(run(request, *context)).unwrap();
        let b = &value["quality"]["breakdown"];
        let axis = |k: &str| b[k].as_f64().unwrap();
        let recomputed = (axis("clarity") * 0.25
            + axis("completeness") * 0.25
            + axis("specificity") * 0.20
            + axis("technique_balance") * 0.15
            + axis("actionability") * 0.15)
            .round() as u64;
        assert_eq!(value["quality"]["overall"].as_u64(), Some(recomputed), "{request}");
    }
}

#[test]
fn test_every_breakdown_axis_is_bounded() {
    for (request, context) in SAMPLE_REQUESTS {
        let b = run(request, *context).quality.breakdown;
        for axis in [
            b.clarity,
            b.completeness,
            b.specificity,
            b.technique_balance,
            b.actionability,
        ] {
            assert!(axis <= 100, "{request}");
        }
    }
}

#[test]
fn test_domain_hints_flag_controls_template_content() {
    let request = ArchitectRequest::new("Create a REST API for user authentication with JWT", None);
    let with = PromptArchitect::default().architect(&request).unwrap();
    let without = PromptArchitect::new(EngineConfig {
        domain_hints: false,
        ..EngineConfig::default()
    })
    .architect(&request)
    .unwrap();

    let pitfall = |r: &ArchitectResponse| {
        r.framework
            .structural_requirements
            .constraints
            .iter()
            .any(|c| c.starts_with("Avoid:"))
    };
    assert!(pitfall(&with));
    assert!(!pitfall(&without));
    // the matched role still drives the first directive
    assert_eq!(with.domain, without.domain);
    assert_eq!(
        with.framework.directives[0].directive,
        without.framework.directives[0].directive
    );
}
