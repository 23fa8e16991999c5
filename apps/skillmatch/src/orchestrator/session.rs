//! The skill sets accumulated during one orchestration run.
//!
//! Only the orchestrator mutates a `SessionState`, and only after a capability call
//! succeeded. Capabilities never see it.

use serde::Serialize;
use serde_json::Value;

use crate::capabilities::{CapabilityKind, CapabilityOutput};
use crate::skills::SkillSet;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionState {
    pub resume_skills: SkillSet,
    pub jd_skills: SkillSet,
}

/// Where the run stands, derived from the state on every iteration.
///
/// Used only to advise the model what to do next; the model's decision is still what
/// gets validated and executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopPhase {
    AwaitingResumeSkills,
    AwaitingJdSkills,
    ReadyToCompare,
}

impl LoopPhase {
    pub fn of(state: &SessionState) -> Self {
        if state.resume_skills.is_empty() {
            LoopPhase::AwaitingResumeSkills
        } else if state.jd_skills.is_empty() {
            LoopPhase::AwaitingJdSkills
        } else {
            LoopPhase::ReadyToCompare
        }
    }

    pub fn expected_capability(self) -> CapabilityKind {
        match self {
            LoopPhase::AwaitingResumeSkills => CapabilityKind::ParseResumeSkills,
            LoopPhase::AwaitingJdSkills => CapabilityKind::ExtractJdSkills,
            LoopPhase::ReadyToCompare => CapabilityKind::CompareSkills,
        }
    }
}

/// What folding a capability result did to the state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FoldEffect {
    ResumeSkills { count: usize },
    JdSkills { count: usize },
    /// Nothing changed. The string says why, for the log.
    Unchanged(&'static str),
}

impl SessionState {
    /// Folds a successful capability result into the state.
    ///
    /// Skill extractors may answer with comma-separated text or a JSON array of strings;
    /// any other shape leaves the state untouched.
    pub fn fold(&mut self, kind: CapabilityKind, output: &CapabilityOutput) -> FoldEffect {
        let target = match kind {
            CapabilityKind::ParseResumeSkills => &mut self.resume_skills,
            CapabilityKind::ExtractJdSkills => &mut self.jd_skills,
            CapabilityKind::CompareSkills | CapabilityKind::SuggestResumeImprovements => {
                return FoldEffect::Unchanged("capability result carries no skill list");
            }
        };

        let Some(skills) = skill_list(output) else {
            return FoldEffect::Unchanged("unexpected output shape for a skill extractor");
        };

        let count = skills.len();
        *target = skills;
        match kind {
            CapabilityKind::ParseResumeSkills => FoldEffect::ResumeSkills { count },
            _ => FoldEffect::JdSkills { count },
        }
    }
}

fn skill_list(output: &CapabilityOutput) -> Option<SkillSet> {
    match output {
        CapabilityOutput::Text(text) => Some(SkillSet::from_csv(text)),
        CapabilityOutput::Structured(Value::Array(items)) => items
            .iter()
            .map(|item| item.as_str())
            .collect::<Option<Vec<_>>>()
            .map(SkillSet::normalized),
        CapabilityOutput::Structured(_) => None,
    }
}
