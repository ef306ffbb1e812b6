//! Heuristic quality scoring of an assembled framework.

use super::assembler::contains_generation_verb;
use super::types::{
    Confidence, Directive, InstructionFramework, QualityBreakdown, QualityScore, RequestFacts,
    TechniqueApplication,
};

const SHORT_DIRECTIVE_CHARS: usize = 30;
const LONG_DIRECTIVE_CHARS: usize = 200;
const MIN_REASONING_CHARS: usize = 20;
const THINKING_STEP_RANGE: std::ops::RangeInclusive<usize> = 4..=10;

const FILLER_WORDS: &[&str] = &[
    "something", "stuff", "things", "etc", "various", "somehow", "whatever",
];

const ACTION_VERBS: &[&str] = &[
    "act", "pitch", "structure", "organize", "mark", "state", "adapt", "present", "reason",
    "decompose", "verify", "include", "build", "design", "implement", "define", "list",
    "explain", "analyze", "compare", "write", "create", "generate",
];

const CONNECTIVE_PHRASE: &str = "based on this framework";

pub fn evaluate(
    framework: &InstructionFramework,
    facts: &RequestFacts,
    techniques: &[TechniqueApplication],
) -> QualityScore {
    let breakdown = QualityBreakdown {
        clarity: clamp(clarity(framework)),
        completeness: clamp(completeness(framework)),
        specificity: clamp(specificity(framework, facts)),
        technique_balance: clamp(technique_balance(techniques)),
        actionability: clamp(actionability(framework)),
    };
    let score = QualityScore {
        breakdown,
        confidence: confidence(breakdown.weighted_overall(), framework),
    };
    tracing::debug!(
        "quality: overall={}, confidence={:?}, breakdown={:?}",
        score.overall(),
        score.confidence,
        score.breakdown
    );
    score
}

fn clamp(v: i32) -> u8 {
    v.clamp(0, 100) as u8
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn clarity(fw: &InstructionFramework) -> i32 {
    let mut score = 100;
    for d in &fw.directives {
        let len = char_len(&d.directive);
        if len < SHORT_DIRECTIVE_CHARS {
            score -= 5;
        } else if len > LONG_DIRECTIVE_CHARS {
            score -= 3;
        }
        if char_len(&d.reasoning) < MIN_REASONING_CHARS {
            score -= 8;
        }
    }
    if !THINKING_STEP_RANGE.contains(&fw.thinking_steps.len()) {
        score -= 10;
    }
    if !contains_generation_verb(&fw.generation_directive) {
        score -= 15;
    }
    score
}

/// Additive budget: 20 + 20 + 20 + 20 + 20.
fn completeness(fw: &InstructionFramework) -> i32 {
    let mut score = 0;
    if !fw.cognitive_analysis.trim().is_empty() {
        score += 20;
    }

    let directives = fw.directives.len();
    if directives >= 3 {
        score += 10;
    }
    if directives >= 4 {
        score += 5;
    }
    if directives >= 5 {
        score += 5;
    }

    let sr = &fw.structural_requirements;
    if !sr.context_requirements.is_empty() {
        score += 7;
    }
    if !sr.constraints.is_empty() {
        score += 7;
    }
    if !sr.output_format_guidelines.is_empty() {
        score += 6;
    }

    let steps = fw.thinking_steps.len();
    if steps >= 4 {
        score += 10;
    }
    if steps >= 6 {
        score += 10;
    }

    if char_len(&fw.generation_directive) > 50 {
        score += 20;
    }
    score
}

fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
}

fn specificity(fw: &InstructionFramework, facts: &RequestFacts) -> i32 {
    let mut score = 70;
    let mentions_keyword = fw.directives.iter().any(|d| {
        let lower = d.directive.to_lowercase();
        facts.keywords.iter().any(|k| lower.contains(k.as_str()))
    });
    if mentions_keyword {
        score += 15;
    }

    let ctx = fw.structural_requirements.context_requirements.len();
    if ctx >= 5 {
        score += 10;
    } else if ctx >= 4 {
        score += 5;
    }
    if !fw.structural_requirements.constraints.is_empty() {
        score += 5;
    }

    let filler = fw
        .directives
        .iter()
        .filter(|d| words(&d.directive).any(|w| FILLER_WORDS.contains(&w.as_str())))
        .count() as i32;
    score - 3 * filler
}

fn technique_balance(techniques: &[TechniqueApplication]) -> i32 {
    let mut score = 100;
    let total = techniques.len();
    let mandatory = techniques
        .iter()
        .filter(|a| a.technique.is_mandatory())
        .count();
    let situational = total - mandatory;

    if total < 3 {
        score -= 20;
    }
    if total > 5 {
        score -= 10 * (total - 5) as i32;
    }
    if mandatory == 0 {
        score -= 30;
    }
    if mandatory >= 2 && (1..=2).contains(&situational) {
        score += 10;
    }
    score
}

fn is_vague(d: &Directive) -> bool {
    char_len(&d.directive) < SHORT_DIRECTIVE_CHARS || char_len(&d.reasoning) < MIN_REASONING_CHARS
}

fn actionability(fw: &InstructionFramework) -> i32 {
    let mut score = 80;
    let with_verb = fw
        .directives
        .iter()
        .filter(|d| words(&d.directive).any(|w| ACTION_VERBS.contains(&w.as_str())))
        .count() as i32;
    score += (4 * with_verb).min(20);

    if fw
        .thinking_steps
        .iter()
        .any(|s| s.chars().next().is_some_and(|c| c.is_ascii_digit()))
    {
        score += 5;
    }
    if fw
        .generation_directive
        .to_lowercase()
        .contains(CONNECTIVE_PHRASE)
    {
        score += 5;
    }
    let vague = fw.directives.iter().filter(|d| is_vague(d)).count() as i32;
    score - 5 * vague
}

fn confidence(overall: u8, fw: &InstructionFramework) -> Confidence {
    let directives = fw.directives.len();
    if overall >= 85 && directives >= 4 && fw.thinking_steps.len() >= 5 {
        Confidence::High
    } else if overall >= 70 && directives >= 3 {
        Confidence::Medium
    } else {
        Confidence::Low
    }
}
