//! The fixed set of operations the orchestrator may ask to run.
//!
//! The model names a capability in free text; `CapabilityKind::from_str` turns that name
//! into a closed variant (or an explicit unknown-capability error) before the registry
//! is consulted. Implementations live behind the `CapabilityHandler` trait so the
//! orchestrator never sees concrete extractors, and tests can swap in doubles.

pub mod advisory;
pub mod compare;
pub mod extract;
pub mod prompts;
pub mod registry;

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::llm_client::LlmError;

pub use advisory::AdvisoryFinalizer;
pub use compare::CompareSkills;
pub use extract::{DocumentRoot, ExtractJdSkills, ParseResumeSkills};
pub use registry::{default_registry, CapabilityRegistry, RegistryError};

// ────────────────────────────────────────────────────────────────────────────
// Capability names
// ────────────────────────────────────────────────────────────────────────────

/// Every capability the registry knows about. The wire name is the snake_case form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityKind {
    ParseResumeSkills,
    ExtractJdSkills,
    CompareSkills,
    SuggestResumeImprovements,
}

impl CapabilityKind {
    pub const ALL: [CapabilityKind; 4] = [
        CapabilityKind::ParseResumeSkills,
        CapabilityKind::ExtractJdSkills,
        CapabilityKind::CompareSkills,
        CapabilityKind::SuggestResumeImprovements,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CapabilityKind::ParseResumeSkills => "parse_resume_skills",
            CapabilityKind::ExtractJdSkills => "extract_jd_skills",
            CapabilityKind::CompareSkills => "compare_skills",
            CapabilityKind::SuggestResumeImprovements => "suggest_resume_improvements",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            CapabilityKind::ParseResumeSkills => "Extracts skills from a resume file (PDF or text).",
            CapabilityKind::ExtractJdSkills => "Extracts skills from a job description file or raw text.",
            CapabilityKind::CompareSkills => "Compares resume skills against job description skills.",
            CapabilityKind::SuggestResumeImprovements => {
                "Suggests resume improvements from a skill comparison."
            }
        }
    }

    pub fn input_shape(self) -> Shape {
        match self {
            CapabilityKind::ParseResumeSkills => Shape::FilePath,
            CapabilityKind::ExtractJdSkills => Shape::FilePathOrText,
            CapabilityKind::CompareSkills => Shape::SkillLists,
            CapabilityKind::SuggestResumeImprovements => Shape::ComparisonEnvelope,
        }
    }

    pub fn output_shape(self) -> Shape {
        match self {
            CapabilityKind::ParseResumeSkills | CapabilityKind::ExtractJdSkills => Shape::SkillCsv,
            CapabilityKind::CompareSkills => Shape::Comparison,
            CapabilityKind::SuggestResumeImprovements => Shape::AdvisoryText,
        }
    }
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CapabilityKind {
    type Err = RegistryError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        CapabilityKind::ALL
            .into_iter()
            .find(|kind| kind.name() == name.trim())
            .ok_or_else(|| RegistryError::UnknownCapability(name.to_string()))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Declared shapes
// ────────────────────────────────────────────────────────────────────────────

/// Declared input/output shape of a capability. Rendered into the model's tool catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    FilePath,
    FilePathOrText,
    SkillLists,
    ComparisonEnvelope,
    SkillCsv,
    Comparison,
    AdvisoryText,
}

impl Shape {
    pub fn signature(self) -> &'static str {
        match self {
            Shape::FilePath => "file_path: str",
            Shape::FilePathOrText => "jd_text_or_path: str",
            Shape::SkillLists => r#"{"resume_skills": [str], "jd_skills": [str]}"#,
            Shape::ComparisonEnvelope => {
                r#"{"comparison_result": {"common": [str], "missing_from_resume": [str], "extra_in_resume": [str]}}"#
            }
            Shape::SkillCsv => "comma-separated skills",
            Shape::Comparison => r#"{"common": [str], "missing_from_resume": [str], "extra_in_resume": [str]}"#,
            Shape::AdvisoryText => "suggestion text",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handler contract
// ────────────────────────────────────────────────────────────────────────────

/// What a capability hands back to the orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub enum CapabilityOutput {
    Text(String),
    Structured(Value),
}

impl CapabilityOutput {
    /// A structured `{"error": "..."}` payload is how a capability reports a soft failure.
    pub fn error_marker(&self) -> Option<String> {
        match self {
            CapabilityOutput::Structured(Value::Object(map)) => map.get("error").map(|e| match e {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            }),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum CapabilityError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("document error: {0}")]
    Document(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A registry-resolvable operation. Accepts one JSON value, returns text or structure.
#[async_trait]
pub trait CapabilityHandler: Send + Sync {
    async fn invoke(&self, input: Value) -> Result<CapabilityOutput, CapabilityError>;
}

/// Pulls a single string argument out of a capability input.
///
/// Models send either a bare string (`"input": "/tmp/resume.pdf"`) or wrap it in a
/// one-field object (`"input": {"resume_path": "/tmp/resume.pdf"}`); both are accepted.
pub(crate) fn string_argument(input: &Value, capability: CapabilityKind) -> Result<String, CapabilityError> {
    let value = match input {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) if map.len() == 1 => map.values().next().and_then(|v| v.as_str()).map(String::from),
        _ => None,
    };

    match value {
        Some(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        _ => Err(CapabilityError::InvalidInput(format!(
            "{capability} expects {}, got {input}",
            capability.input_shape().signature()
        ))),
    }
}
