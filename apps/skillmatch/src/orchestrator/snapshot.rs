//! Builds the prompts the decision model sees: a fixed system instruction derived from
//! the registry, and a per-iteration context snapshot of the session.

use serde_json::json;

use crate::capabilities::CapabilityRegistry;
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::orchestrator::prompts::{
    COMPARE_ADVICE_TEMPLATE, DECISION_PROMPT_TEMPLATE, DECISION_SYSTEM_TEMPLATE,
    EXTRACT_JD_ADVICE, PARSE_RESUME_ADVICE,
};
use crate::orchestrator::session::{LoopPhase, SessionState};

pub fn build_system_prompt(registry: &CapabilityRegistry) -> String {
    DECISION_SYSTEM_TEMPLATE
        .replace("{catalog}", &registry.catalog())
        .replace("{json_only}", JSON_ONLY_INSTRUCTION)
}

/// Renders the snapshot deterministically: skill sets are sorted JSON arrays.
pub fn build_decision_prompt(user_request: &str, state: &SessionState) -> String {
    DECISION_PROMPT_TEMPLATE
        .replace("{user_request}", user_request.trim())
        .replace("{resume_skills}", &state.resume_skills.to_json_array())
        .replace("{jd_skills}", &state.jd_skills.to_json_array())
        .replace("{next_action}", &next_action_advice(LoopPhase::of(state), state))
}

fn next_action_advice(phase: LoopPhase, state: &SessionState) -> String {
    match phase {
        LoopPhase::AwaitingResumeSkills => PARSE_RESUME_ADVICE.to_string(),
        LoopPhase::AwaitingJdSkills => EXTRACT_JD_ADVICE.to_string(),
        LoopPhase::ReadyToCompare => {
            let payload = json!({
                "resume_skills": state.resume_skills,
                "jd_skills": state.jd_skills,
            });
            COMPARE_ADVICE_TEMPLATE.replace("{payload}", &payload.to_string())
        }
    }
}
