//! compare_skills: set algebra over the two skill lists. No model call.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

use crate::capabilities::{CapabilityError, CapabilityHandler, CapabilityOutput};
use crate::skills::{compare_skill_sets, SkillSet};

/// Payload accepted by compare_skills. Missing lists count as empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompareRequest {
    #[serde(default)]
    pub resume_skills: SkillSet,
    #[serde(default)]
    pub jd_skills: SkillSet,
}

impl CompareRequest {
    /// Accepts the payload as a JSON object or as a string holding encoded JSON.
    pub fn from_payload(payload: &Value) -> Result<Self, String> {
        let parsed = match payload {
            Value::String(encoded) => serde_json::from_str(encoded),
            Value::Object(_) => serde_json::from_value(payload.clone()),
            other => {
                return Err(format!(
                    "expected an object with resume_skills and jd_skills, got {other}"
                ))
            }
        };
        parsed.map_err(|e| e.to_string())
    }
}

pub struct CompareSkills;

#[async_trait]
impl CapabilityHandler for CompareSkills {
    async fn invoke(&self, input: Value) -> Result<CapabilityOutput, CapabilityError> {
        let request = match CompareRequest::from_payload(&input) {
            Ok(request) => request,
            Err(e) => {
                warn!("compare_skills received malformed input {input}: {e}");
                return Ok(CapabilityOutput::Structured(json!({ "error": e })));
            }
        };

        let result = compare_skill_sets(&request.resume_skills, &request.jd_skills);
        Ok(CapabilityOutput::Structured(serde_json::to_value(result)?))
    }
}
