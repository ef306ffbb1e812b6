//! Static read-only catalogs: keyword lists, context phrases, technique table.
//!
//! Built once on first use and shared by reference across every request.
//! Lists carry English and Portuguese entries.

use super::domains::builtin_templates;
use super::types::{DomainTemplate, TaskType, Technique};
use once_cell::sync::Lazy;
use regex::{Regex, RegexSet};

// Entries match whole words; a trailing `*` marks a stem that matches any word it begins.

pub const CODE_KEYWORDS: &[&str] = &[
    "code*", "function*", "api", "apis", "rest", "jwt", "auth", "bug", "bugs", "implement*",
    "class", "classes", "script", "scripts", "program*", "algorithm*", "refactor*", "endpoint*",
    "compil*", "código*", "funç*",
];

pub const TECHNICAL_KEYWORDS: &[&str] = &[
    "architectur*", "infrastructur*", "deploy*", "server*", "database*", "docker*",
    "kubernetes", "cloud", "network*", "pipeline*", "arquitetura*", "infraestrutura*",
    "servidor*", "banco de dados",
];

pub const CREATIVE_KEYWORDS: &[&str] = &[
    "story", "stories", "poem*", "creativ*", "narrativ*", "character*", "slogan*", "lyric*",
    "fiction*", "história*", "criativ*", "personage*", "roteiro*",
];

pub const ANALYTICAL_KEYWORDS: &[&str] = &[
    "analy*", "compar*", "evaluat*", "metric*", "trend*", "statistic*", "insight*", "assess*",
    "análise*", "analis*", "avali*", "tendência*",
];

pub const EDUCATIONAL_KEYWORDS: &[&str] = &[
    "explain*", "teach*", "learn*", "tutorial*", "what is", "what are", "how does", "lesson*",
    "explique", "explica*", "ensin*", "aprend*", "o que é", "o que são", "aula*",
];

pub const DEBATE_KEYWORDS: &[&str] = &[
    "debat*", "argument*", "pros and cons", "versus", "vs", "controvers*", "persuad*",
    "prós e contras", "polêmic*", "convenc*",
];

pub const DOCUMENTATION_KEYWORDS: &[&str] = &[
    "document*", "readme", "docs", "manual*", "changelog*", "specification*", "guide*",
    "guia*",
];

pub const EXPERT_INDICATORS: &[&str] = &[
    "api", "apis", "jwt", "authentication", "scalab*", "distributed", "microservi*",
    "concurren*", "security", "optimiz*", "enterprise", "high availability", "oauth*",
    "escalabil*", "segurança", "otimiz*", "distribuíd*",
];

pub const INTERMEDIATE_INDICATORS: &[&str] = &[
    "integra*", "framework*", "database*", "testing", "deploy*", "workflow*", "librar*",
    "teste*", "bibliotec*", "fluxo*",
];

pub const BASIC_INDICATORS: &[&str] = &[
    "simple", "basic*", "beginner*", "introduct*", "hello world", "first time", "simples",
    "básic*", "iniciante*", "introdução",
];

/// Word-boundary matcher over one phrase list, compiled once per catalog.
#[derive(Debug, Clone)]
pub struct PhraseSet {
    set: RegexSet,
}

impl PhraseSet {
    pub fn new(phrases: &[&str]) -> Result<Self, regex::Error> {
        let set = RegexSet::new(phrases.iter().map(|p| phrase_pattern(p)))?;
        Ok(Self { set })
    }

    /// Number of distinct phrases found in `text`.
    pub fn count(&self, text: &str) -> usize {
        self.set.matches(text).iter().count()
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.set.is_match(text)
    }
}

fn phrase_pattern(phrase: &str) -> String {
    match phrase.strip_suffix('*') {
        Some(stem) => format!(r"(?i)\b{}", regex::escape(stem)),
        None => format!(r"(?i)\b{}\b", regex::escape(phrase)),
    }
}

fn phrase_set(phrases: &[&str]) -> PhraseSet {
    PhraseSet::new(phrases).unwrap()
}

/// A context phrase list and the implicit-context entry it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContextSignal {
    ReactStack,
    NodeStack,
    PythonStack,
    RustStack,
    DataStore,
    CloudDeployment,
    ProductionIntent,
    LearningIntent,
}

impl ContextSignal {
    pub const ALL: [ContextSignal; 8] = [
        ContextSignal::ReactStack,
        ContextSignal::NodeStack,
        ContextSignal::PythonStack,
        ContextSignal::RustStack,
        ContextSignal::DataStore,
        ContextSignal::CloudDeployment,
        ContextSignal::ProductionIntent,
        ContextSignal::LearningIntent,
    ];

    pub fn phrases(&self) -> &'static [&'static str] {
        match self {
            Self::ReactStack => &["react", "next.js", "nextjs", "jsx"],
            Self::NodeStack => &[
                "node",
                "node.js",
                "nodejs",
                "express.js",
                "typescript",
                "javascript",
            ],
            Self::PythonStack => &["python", "django", "flask", "fastapi", "pandas"],
            Self::RustStack => &["rust", "cargo", "tokio"],
            Self::DataStore => &["postgres*", "mysql", "mongodb", "redis", "sql", "sqlite"],
            Self::CloudDeployment => &["aws", "azure", "gcp", "docker*", "kubernetes"],
            Self::ProductionIntent => &[
                "production",
                "enterprise",
                "scalable",
                "real users",
                "produção",
                "escalável",
                "empresa*",
            ],
            Self::LearningIntent => &[
                "learn*",
                "study",
                "studying",
                "understand*",
                "aprend*",
                "estudar",
                "entender",
            ],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::ReactStack => "Frontend stack: React",
            Self::NodeStack => "Runtime stack: Node.js / TypeScript",
            Self::PythonStack => "Runtime stack: Python",
            Self::RustStack => "Runtime stack: Rust",
            Self::DataStore => "Persistence layer: database involved",
            Self::CloudDeployment => "Deployment target: cloud or containers",
            Self::ProductionIntent => PRODUCTION_CONTEXT,
            Self::LearningIntent => LEARNING_CONTEXT,
        }
    }
}

pub const PRODUCTION_CONTEXT: &str = "Production-grade result expected";
pub const LEARNING_CONTEXT: &str = "Learning-oriented request";

/// Audience hints detected in the first pass; resolved by priority in the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AudienceSignal {
    Client,
    Team,
    Student,
}

impl AudienceSignal {
    pub const ALL: [AudienceSignal; 3] =
        [AudienceSignal::Client, AudienceSignal::Team, AudienceSignal::Student];

    pub fn phrases(&self) -> &'static [&'static str] {
        match self {
            Self::Client => &["client*", "stakeholder*", "executiv*", "gestor*"],
            Self::Team => &["team", "teams", "colleague*", "equipe*", "time de", "colega*"],
            Self::Student => &[
                "student*",
                "beginner*",
                "estudante*",
                "aluno*",
                "iniciante*",
                "graduação",
            ],
        }
    }
}

pub const AUDIENCE_CLIENT: &str = "clients and business stakeholders";
pub const AUDIENCE_TEAM: &str = "development team";
pub const AUDIENCE_STUDENT: &str = "students and learners";
pub const AUDIENCE_EXPERIENCED: &str = "experienced developer";
pub const AUDIENCE_DEFAULT: &str = "general developer";

/// Display and directive data for one technique.
#[derive(Debug, Clone, Copy)]
pub struct TechniqueDefinition {
    pub technique: Technique,
    pub name: &'static str,
    pub improvement: &'static str,
}

pub const TECHNIQUE_TABLE: &[TechniqueDefinition] = &[
    TechniqueDefinition {
        technique: Technique::RoleAssignment,
        name: "Role Assignment",
        improvement: "Anchors depth and vocabulary to a concrete expert persona",
    },
    TechniqueDefinition {
        technique: Technique::SophisticationAttribution,
        name: "Sophistication Attribution",
        improvement: "Calibrates the level of detail to the reader's expertise",
    },
    TechniqueDefinition {
        technique: Technique::Emphasis,
        name: "Strategic Emphasis",
        improvement: "Keeps critical requirements from being lost in a long response",
    },
    TechniqueDefinition {
        technique: Technique::Clarification,
        name: "Assumption Clarification",
        improvement: "Makes hidden assumptions explicit when the request is underspecified",
    },
    TechniqueDefinition {
        technique: Technique::AudienceAdaptation,
        name: "Audience Adaptation",
        improvement: "Matches tone and examples to the people who will read the result",
    },
    TechniqueDefinition {
        technique: Technique::CreativeConstraint,
        name: "Creative Constraint",
        improvement: "Forces original choices instead of the most predictable output",
    },
    TechniqueDefinition {
        technique: Technique::OpposingViewpoints,
        name: "Opposing Viewpoints",
        improvement: "Reduces one-sided conclusions by confronting the strongest counterargument",
    },
    TechniqueDefinition {
        technique: Technique::ChainOfThought,
        name: "Chain of Thought",
        improvement: "Exposes intermediate reasoning so mistakes surface early",
    },
    TechniqueDefinition {
        technique: Technique::ProblemDecomposition,
        name: "Problem Decomposition",
        improvement: "Turns a broad request into ordered, independently solvable parts",
    },
    TechniqueDefinition {
        technique: Technique::SelfVerification,
        name: "Self Verification",
        improvement: "Catches requirement gaps before the result is delivered",
    },
    TechniqueDefinition {
        technique: Technique::FewShotExamples,
        name: "Worked Examples",
        improvement: "Shows the expected pattern concretely before asking for generalization",
    },
];

/// Situational techniques worth more when the request is expert-level.
pub const EXPERT_HIGH_VALUE: &[Technique] = &[
    Technique::ChainOfThought,
    Technique::ProblemDecomposition,
    Technique::SelfVerification,
];

/// Situational techniques with natural affinity to each task type.
pub fn task_affinity(task_type: TaskType) -> &'static [Technique] {
    match task_type {
        TaskType::Code => &[Technique::SelfVerification, Technique::ProblemDecomposition],
        TaskType::Technical => &[Technique::ChainOfThought, Technique::SelfVerification],
        TaskType::Creative => &[Technique::CreativeConstraint],
        TaskType::Analytical => &[Technique::ChainOfThought, Technique::OpposingViewpoints],
        TaskType::Educational => &[Technique::FewShotExamples, Technique::AudienceAdaptation],
        TaskType::Debate => &[Technique::OpposingViewpoints],
        TaskType::Documentation => &[Technique::FewShotExamples, Technique::AudienceAdaptation],
        TaskType::Mixed => &[Technique::ProblemDecomposition, Technique::Clarification],
    }
}

/// Fixed restriction texts for the creative-constraint technique.
pub const RESTRICTION_TEXTS: [&str; 3] = [
    "Work as if the piece had to fit in half the usual length, keeping only what earns its place",
    "Avoid the three most obvious ideas for this theme and build on the fourth",
    "Use a single concrete image or scenario as the anchor for the entire piece",
];

pub const REQUIRED_GENERATION_VERBS: &[&str] = &["generate", "construct", "build"];

/// Immutable configuration shared by every pipeline component.
pub struct Catalog {
    pub task_keywords: Vec<(TaskType, PhraseSet)>,
    pub expert_indicators: PhraseSet,
    pub intermediate_indicators: PhraseSet,
    pub basic_indicators: PhraseSet,
    pub context_signals: Vec<(ContextSignal, PhraseSet)>,
    pub audience_signals: Vec<(AudienceSignal, PhraseSet)>,
    pub stop_words: Regex,
    pub code_terms: Regex,
    pub domains: Vec<DomainTemplate>,
}

impl Catalog {
    pub fn builtin() -> Self {
        Self {
            task_keywords: vec![
                (TaskType::Code, phrase_set(CODE_KEYWORDS)),
                (TaskType::Technical, phrase_set(TECHNICAL_KEYWORDS)),
                (TaskType::Creative, phrase_set(CREATIVE_KEYWORDS)),
                (TaskType::Analytical, phrase_set(ANALYTICAL_KEYWORDS)),
                (TaskType::Educational, phrase_set(EDUCATIONAL_KEYWORDS)),
                (TaskType::Debate, phrase_set(DEBATE_KEYWORDS)),
                (TaskType::Documentation, phrase_set(DOCUMENTATION_KEYWORDS)),
            ],
            expert_indicators: phrase_set(EXPERT_INDICATORS),
            intermediate_indicators: phrase_set(INTERMEDIATE_INDICATORS),
            basic_indicators: phrase_set(BASIC_INDICATORS),
            context_signals: ContextSignal::ALL
                .iter()
                .map(|s| (*s, phrase_set(s.phrases())))
                .collect(),
            audience_signals: AudienceSignal::ALL
                .iter()
                .map(|s| (*s, phrase_set(s.phrases())))
                .collect(),
            stop_words: Regex::new(
                r"^(about|after|again|being|could|would|should|their|there|these|those|which|while|where|please|create|write|make|using|something|other|every|build|design|develop|implement|generate|describe|explain|analyze|analyse|improve|sobre|para|como|quero|preciso|fazer|criar|crie|escreva|explique|construa|construir|desenvolva|desenvolver|implemente|gerar|descreva|analise|mostre|porque|quando|também|outro|outra)$",
            )
            .unwrap(),
            code_terms: Regex::new(
                r"(?i)\b(function|class|api|endpoint|database|schema|query|module|deploy|backend|frontend|async|interface|função|classe)\b",
            )
            .unwrap(),
            domains: builtin_templates(),
        }
    }
}

pub fn definition(technique: Technique) -> &'static TechniqueDefinition {
    TECHNIQUE_TABLE
        .iter()
        .find(|d| d.technique == technique)
        .unwrap_or(&TECHNIQUE_TABLE[0])
}

pub static CATALOG: Lazy<Catalog> = Lazy::new(Catalog::builtin);
